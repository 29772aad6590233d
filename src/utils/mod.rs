pub mod table {
    // Helper to render a separator line
    fn sep(widths: &[usize]) -> String {
        let mut s = String::from("+");
        for w in widths {
            s.push_str(&"-".repeat(w + 2));
            s.push('+');
        }
        s
    }

    // Helper to render a row line
    fn line(cells: &[String], widths: &[usize]) -> String {
        let mut s = String::from("|");
        for (i, cell) in cells.iter().enumerate() {
            let w = widths[i];
            s.push(' ');
            s.push_str(cell);
            if cell.len() < w {
                s.push_str(&" ".repeat(w - cell.len()));
            }
            s.push(' ');
            s.push('|');
        }
        s
    }

    // Render a simple ASCII table given headers and rows
    pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
        let cols = headers.len();
        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in rows {
            for (c, w) in widths.iter_mut().enumerate().take(cols) {
                *w = (*w).max(row.get(c).map_or(0, String::len));
            }
        }

        let mut out = String::new();
        out.push_str(&sep(&widths));
        out.push('\n');
        let header_cells: Vec<String> = headers.iter().map(|s| (*s).to_string()).collect();
        out.push_str(&line(&header_cells, &widths));
        out.push('\n');
        out.push_str(&sep(&widths));
        out.push('\n');
        for row in rows {
            let mut cells = Vec::with_capacity(cols);
            for i in 0..cols {
                cells.push(row.get(i).cloned().unwrap_or_default());
            }
            out.push_str(&line(&cells, &widths));
            out.push('\n');
        }
        out.push_str(&sep(&widths));
        out
    }
}

pub mod config {
    use serde::Deserialize;
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Optional overrides loaded from `import-graph.toml`. Every field is
    /// optional; absent fields keep the built-in defaults, and CLI flags win
    /// over the file.
    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        pub root: Option<String>,
        pub max_depth: Option<usize>,
        pub include_external: Option<bool>,
        pub max_content_length: Option<usize>,
        /// Replaces the default exclude list when present.
        pub exclude: Option<Vec<String>>,
        /// Replaces the default extension priority when present.
        pub extensions: Option<Vec<String>>,
        /// Merged over the default alias table (same key overrides).
        pub aliases: Option<BTreeMap<String, String>>,
    }

    fn default_config_path(root: &Path) -> PathBuf {
        root.join("import-graph.toml")
    }

    #[must_use]
    pub fn load_config_at(path: &Path) -> Option<Config> {
        let data = fs::read_to_string(path).ok()?;
        toml::from_str::<Config>(&data).ok()
    }

    #[must_use]
    pub fn load_config_near(root: &Path) -> Option<Config> {
        let p = default_config_path(root);
        if p.exists() {
            load_config_at(&p)
        } else {
            None
        }
    }
}

pub mod project_root {
    use std::env;
    use std::path::{Path, PathBuf};

    /// Marker filenames tested at each ancestor level, in order.
    pub const ROOT_MARKERS: &[&str] = &[
        "package.json",
        "svelte.config.js",
        "vite.config.ts",
        "vite.config.js",
        "tsconfig.json",
        "pnpm-lock.yaml",
        "yarn.lock",
        "package-lock.json",
        ".git",
    ];

    // Conventional folder names for structural inference when no marker is
    // found. The bool says whether the root is the segment's parent (true)
    // or the segment itself (false).
    const STRUCTURAL_SEGMENTS: &[(&str, bool)] =
        &[("src", true), ("routes", true), ("lib", true), ("app", false), ("packages", false)];

    /// Detect the project root for `start_file`: walk ancestors looking for a
    /// marker file, fall back to structural inference over the path segments,
    /// and default to the current working directory.
    #[must_use]
    pub fn detect(start_file: &Path) -> PathBuf {
        let abs = absolutize(start_file);

        let mut cur = abs.parent().map(Path::to_path_buf);
        while let Some(dir) = cur {
            if ROOT_MARKERS.iter().any(|m| dir.join(m).exists()) {
                return dir;
            }
            cur = dir.parent().map(Path::to_path_buf);
        }

        for (name, use_parent) in STRUCTURAL_SEGMENTS {
            if let Some(root) = infer_from_segment(&abs, name, *use_parent) {
                return root;
            }
        }

        env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    }

    fn absolutize(path: &Path) -> PathBuf {
        if let Ok(canon) = path.canonicalize() {
            return canon;
        }
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join(path)
        }
    }

    // First occurrence of `name` among the path's directory segments wins.
    fn infer_from_segment(path: &Path, name: &str, use_parent: bool) -> Option<PathBuf> {
        let comps: Vec<_> = path.components().collect();
        for (i, c) in comps.iter().enumerate().take(comps.len().saturating_sub(1)) {
            if let std::path::Component::Normal(os) = c {
                if os.to_str() == Some(name) {
                    let upto = if use_parent { i } else { i + 1 };
                    let mut root = PathBuf::new();
                    for comp in &comps[..upto] {
                        root.push(comp.as_os_str());
                    }
                    return Some(root);
                }
            }
        }
        None
    }

}
