//! Import-statement extraction from raw source text.
//!
//! The extractor is a deliberate line-scoped heuristic, not a language
//! frontend: each non-comment line is matched against a fixed, ordered set of
//! statement shapes and every match on the line is collected. Svelte-style
//! composite files are reduced to their `<script>` regions first.
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct ImportExtractor {
    patterns: RegexPatterns,
}

#[derive(Debug)]
pub struct RegexPatterns {
    pub script_region: Regex,
    pub import_from: Regex,
    pub export_from: Regex,
    pub dynamic_import: Regex,
    pub require_call: Regex,
}

impl RegexPatterns {
    pub fn compile() -> Self {
        // Simple, conservative regexes to avoid catastrophic backtracking.
        // `import_from` covers standard, type-only and side-effect imports;
        // `require_call` covers both destructuring assignment and bare calls.
        let script_region = Regex::new(r"(?s)<script[^>]*>(.*?)</script>").unwrap();
        let import_from =
            Regex::new(r#"import\s+(?:type\s+)?(?:[\w$*\s{},]+?\s+from\s+)?["']([^"']+)["']"#)
                .unwrap();
        let export_from =
            Regex::new(r#"export\s+(?:type\s+)?[\w$*\s{},]*?\s*from\s+["']([^"']+)["']"#).unwrap();
        let dynamic_import = Regex::new(r#"import\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap();
        let require_call = Regex::new(r#"require\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap();
        Self { script_region, import_from, export_from, dynamic_import, require_call }
    }
}

impl Default for RegexPatterns {
    fn default() -> Self { Self::compile() }
}

impl ImportExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self { patterns: RegexPatterns::compile() }
    }

    /// Extract the deduplicated, order-preserving list of raw import
    /// specifiers from `content`.
    ///
    /// When `is_template_composite` is set, only the contents of `<script>`
    /// regions are scanned (concatenated in document order); a file without
    /// any such region falls back to whole-file scanning.
    #[must_use]
    pub fn extract(&self, content: &str, is_template_composite: bool) -> Vec<String> {
        let script = if is_template_composite {
            let mut regions = String::new();
            for cap in self.patterns.script_region.captures_iter(content) {
                if let Some(m) = cap.get(1) {
                    regions.push_str(m.as_str());
                    regions.push('\n');
                }
            }
            if regions.is_empty() { content.to_string() } else { regions }
        } else {
            content.to_string()
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut out: Vec<String> = Vec::new();
        for line in script.lines() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || is_comment_line(trimmed) {
                continue;
            }
            // A line may carry more than one statement; collect all matches
            // from every shape, in shape order.
            for re in [
                &self.patterns.import_from,
                &self.patterns.export_from,
                &self.patterns.dynamic_import,
                &self.patterns.require_call,
            ] {
                for cap in re.captures_iter(trimmed) {
                    let Some(m) = cap.get(1) else { continue };
                    let spec = m.as_str().trim();
                    if !is_valid_specifier(spec) {
                        continue;
                    }
                    if seen.insert(spec.to_string()) {
                        out.push(spec.to_string());
                    }
                }
            }
        }
        out
    }
}

fn is_comment_line(trimmed: &str) -> bool {
    trimmed.starts_with("//")
        || trimmed.starts_with("/*")
        || trimmed.starts_with('*')
        || trimmed.starts_with("<!--")
}

/// Reject specifiers that can never denote a file on disk: network schemes,
/// protocol-relative URLs, query/fragment carriers, template interpolation
/// and data URIs.
fn is_valid_specifier(spec: &str) -> bool {
    if spec.trim().is_empty() {
        return false;
    }
    if spec.starts_with("http://") || spec.starts_with("https://") || spec.starts_with("//") {
        return false;
    }
    if spec.contains('?') || spec.contains('#') {
        return false;
    }
    if spec.contains("${") {
        return false;
    }
    !spec.starts_with("data:")
}
