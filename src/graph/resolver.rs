use std::path::{Component, Path, PathBuf};

use crate::graph::GraphOptions;

/// Conventional top-level directory names that mark a project-absolute
/// specifier. Order matters only for documentation; any hit claims the
/// specifier for the project-absolute strategy.
pub const PROJECT_PREFIXES: &[&str] = &[
    "src/", "lib/", "components/", "routes/", "stores/", "utils/", "types/", "assets/", "static/",
];

/// Outcome of resolving one specifier. `Unresolved` means "not resolvable
/// under the current configuration"; the builder records it in the
/// unresolved set rather than producing a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Local(PathBuf),
    External(PathBuf),
    Unresolved,
}

/// Strategy-ordered specifier resolution. The first strategy that claims a
/// specifier wins; a claimed specifier never falls through to a later
/// strategy, even when the claiming strategy fails to find a file.
pub struct PathResolver {
    root: PathBuf,
    aliases: Vec<(String, String)>,
    extensions: Vec<String>,
    exclude: Vec<String>,
    include_external: bool,
}

impl PathResolver {
    #[must_use]
    pub fn new(options: &GraphOptions) -> Self {
        Self {
            root: options.root.clone(),
            aliases: options.aliases.clone(),
            extensions: options.extensions.clone(),
            exclude: options.exclude.clone(),
            include_external: options.include_external,
        }
    }

    /// Resolve `specifier` as seen from the file at `origin`.
    pub fn resolve(&self, specifier: &str, origin: &Path) -> Resolution {
        // 1. Alias match
        for (key, target) in &self.aliases {
            if let Some(rest) = match_alias(specifier, key) {
                return self.resolve_alias(specifier, key, target, rest);
            }
        }

        // 2. Project-absolute prefix match
        if PROJECT_PREFIXES.iter().any(|p| specifier.starts_with(p)) {
            return self.resolve_project_absolute(specifier);
        }

        // 3. Relative or filesystem-rooted
        if is_relative_marker(specifier) || specifier.starts_with('/') {
            return self.resolve_relative(specifier, origin);
        }

        // 4. External
        if !self.include_external {
            log::debug!("external inclusion off, dropping {specifier}");
            return Resolution::Unresolved;
        }
        match self.resolve_node_module(specifier, origin) {
            Some(p) => Resolution::External(p),
            None => {
                log::debug!("node module lookup failed for {specifier}");
                Resolution::Unresolved
            }
        }
    }

    fn resolve_alias(
        &self,
        specifier: &str,
        key: &str,
        target: &str,
        rest: &str,
    ) -> Resolution {
        let substituted = format!("{}{}", target, rest);
        log::debug!("alias {key} -> {target}: {specifier} becomes {substituted}");
        if is_builtin_target(target) {
            // Framework/runtime built-in: a project-path resolution makes no
            // sense, so gate on external inclusion and look inside the
            // dependency tree directly.
            if !self.include_external {
                return Resolution::Unresolved;
            }
            return match self.try_extensions_unfiltered(&self.root.join(&substituted)) {
                Some(p) => Resolution::External(p),
                None => Resolution::Unresolved,
            };
        }
        match self.try_extensions(&self.root.join(&substituted)) {
            Some(p) => Resolution::Local(p),
            None => Resolution::Unresolved,
        }
    }

    fn resolve_project_absolute(&self, specifier: &str) -> Resolution {
        let parent = self.root.parent().map(Path::to_path_buf);
        let mut bases: Vec<PathBuf> =
            vec![self.root.clone(), self.root.join("app"), self.root.join("src")];
        if let Some(p) = parent {
            bases.push(p.clone());
            bases.push(p.join("app"));
        }
        for base in &bases {
            log::debug!("project-absolute: trying {} under {}", specifier, base.display());
            if let Some(p) = self.try_extensions(&base.join(specifier)) {
                return Resolution::Local(p);
            }
        }
        Resolution::Unresolved
    }

    fn resolve_relative(&self, specifier: &str, origin: &Path) -> Resolution {
        let candidate = if specifier.starts_with('/') {
            PathBuf::from(specifier)
        } else {
            let origin_dir = origin.parent().unwrap_or_else(|| Path::new("."));
            origin_dir.join(specifier)
        };
        let candidate = normalize_lexically(&candidate);
        log::debug!("relative: {} from {} -> {}", specifier, origin.display(), candidate.display());
        match self.try_extensions(&candidate) {
            Some(p) => Resolution::Local(p),
            None => Resolution::Unresolved,
        }
    }

    /// Shared extension/index resolution: accept the candidate as-is when it
    /// is an existing, non-excluded regular file; else append each configured
    /// extension in priority order; else treat the candidate as a directory
    /// holding an `index.<ext>` file.
    pub fn try_extensions(&self, candidate: &Path) -> Option<PathBuf> {
        self.try_extensions_inner(candidate, true)
    }

    // Node-module lookup variant: external leaves are never expanded, so the
    // exclusion list (which names dependency-manager directories) must not
    // veto them.
    fn try_extensions_unfiltered(&self, candidate: &Path) -> Option<PathBuf> {
        self.try_extensions_inner(candidate, false)
    }

    fn try_extensions_inner(&self, candidate: &Path, filtered: bool) -> Option<PathBuf> {
        let accept = |p: &Path| -> Option<PathBuf> {
            if filtered && self.is_excluded(p) {
                log::debug!("excluded candidate {}", p.display());
                return None;
            }
            if p.is_file() { p.canonicalize().ok() } else { None }
        };
        if let Some(p) = accept(candidate) {
            return Some(p);
        }
        for ext in &self.extensions {
            let with_ext = PathBuf::from(format!("{}.{}", candidate.display(), ext));
            if let Some(p) = accept(&with_ext) {
                return Some(p);
            }
        }
        for ext in &self.extensions {
            if let Some(p) = accept(&candidate.join(format!("index.{ext}"))) {
                return Some(p);
            }
        }
        None
    }

    /// A path matching any exclude pattern is treated as nonexistent
    /// regardless of actual filesystem state.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        let s = path.to_string_lossy();
        self.exclude.iter().any(|pat| s.contains(pat.as_str()))
    }

    // Walk upward from the origin directory looking for
    // node_modules/<specifier>; accept the package.json `main` target, an
    // index file, or the specifier itself as a file path.
    fn resolve_node_module(&self, specifier: &str, origin: &Path) -> Option<PathBuf> {
        let mut dir = origin.parent()?.to_path_buf();
        loop {
            let pkg_dir = dir.join("node_modules").join(specifier);
            if pkg_dir.is_file() {
                return pkg_dir.canonicalize().ok();
            }
            if pkg_dir.is_dir() {
                if let Some(main) = read_package_main(&pkg_dir) {
                    if let Some(p) = self.try_extensions_unfiltered(&pkg_dir.join(main)) {
                        return Some(p);
                    }
                }
                for idx in ["index.js", "index.mjs", "index.ts"] {
                    let p = pkg_dir.join(idx);
                    if p.is_file() {
                        return p.canonicalize().ok();
                    }
                }
            }
            if let Some(p) = self.try_extensions_unfiltered(&pkg_dir) {
                return Some(p);
            }
            if !dir.pop() {
                return None;
            }
        }
    }
}

// An alias key claims a specifier when it matches exactly or at a path
// segment boundary ("$lib" matches "$lib/x" but not "$library").
fn match_alias<'a>(specifier: &'a str, key: &str) -> Option<&'a str> {
    let rest = specifier.strip_prefix(key)?;
    if rest.is_empty() || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

fn is_builtin_target(target: &str) -> bool {
    target.trim_start_matches("./").starts_with("node_modules")
}

fn is_relative_marker(specifier: &str) -> bool {
    specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

// Lexical normalization of `.` and `..` components; enough for candidate
// construction since existence checks go through the filesystem anyway.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn read_package_main(pkg_dir: &Path) -> Option<String> {
    let data = std::fs::read_to_string(pkg_dir.join("package.json")).ok()?;
    let json: serde_json::Value = serde_json::from_str(&data).ok()?;
    json.get("main").and_then(|v| v.as_str()).map(str::to_string)
}
