//! Tree model and builder for the crate.
//!
//! This module defines the core data structures for the dependency tree
//! (`FileNode`, `GraphOptions`, `GraphSummary`) and the traversal that
//! populates it. You typically construct a tree via `GraphBuilder::build`
//! and then pass it to the renderers in `crate::render`.
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::GraphError;
use crate::extractor::ImportExtractor;

pub mod resolver;

use resolver::{PathResolver, Resolution};

/// Extension priority for extension/index resolution.
pub const DEFAULT_EXTENSIONS: &[&str] =
    &["ts", "js", "svelte", "tsx", "jsx", "mjs", "cjs", "json"];

/// Paths matching any of these substrings are treated as nonexistent at every
/// resolution stage. Directory names carry slashes so that "dist" does not
/// swallow "distance.ts".
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules", "/.git/", "/.svelte-kit/", "/dist/", "/build/", "/coverage/", ".test.",
    ".spec.",
];

/// SvelteKit routing/library aliases. The `$app` target lives under
/// `node_modules`, which marks it as a runtime built-in for the resolver.
pub const DEFAULT_ALIASES: &[(&str, &str)] =
    &[("$lib", "src/lib"), ("$app", "node_modules/@sveltejs/kit/src/runtime/app")];

/// Extensions whose content is never read.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "ico", "bmp", "woff", "woff2", "ttf", "eot", "otf",
    "mp3", "mp4", "webm", "ogg", "pdf", "zip", "gz", "tar", "wasm",
];

/// File extensions treated as markup+script composites, scanned through their
/// `<script>` regions only.
pub const COMPOSITE_EXTENSIONS: &[&str] = &["svelte", "html"];

pub const DEFAULT_MAX_CONTENT_LENGTH: usize = 100_000;

/// Runtime configuration consumed by the builder and resolver. Produced by
/// the CLI layer from defaults, the TOML config file and flags.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    pub root: PathBuf,
    pub max_depth: Option<usize>,
    pub include_external: bool,
    pub max_content_length: usize,
    pub exclude: Vec<String>,
    /// Ordered prefix substitutions; the first matching key claims the
    /// specifier.
    pub aliases: Vec<(String, String)>,
    pub extensions: Vec<String>,
}

impl GraphOptions {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            max_depth: None,
            include_external: false,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            exclude: DEFAULT_EXCLUDES.iter().map(|s| (*s).to_string()).collect(),
            aliases: DEFAULT_ALIASES
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self::new(PathBuf::from("."))
    }
}

/// One entry per tree position, not per unique file: a file reached through
/// two different import edges produces two nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileNode {
    pub display_path: String,
    pub absolute_path: PathBuf,
    pub exists: bool,
    pub size: u64,
    /// Raw content, absent when gated or unreadable.
    pub content: Option<String>,
    /// Reason the content was omitted by gating (binary file, size ceiling).
    pub content_skipped: Option<String>,
    /// Read failure annotation; the node is still produced.
    pub error: Option<String>,
    pub import_count: usize,
    pub children: Vec<FileNode>,
    pub depth: usize,
    pub circular: bool,
    pub external: bool,
}

/// Statistics derived from one `build` call, for renderers and downstream
/// consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSummary {
    pub total_files: usize,
    pub total_size: u64,
    pub max_depth: usize,
    pub external_count: usize,
    pub circular_count: usize,
    pub circular_edges: Vec<(String, String)>,
    pub unresolved_count: usize,
    pub unresolved: Vec<String>,
    pub file_types: BTreeMap<String, usize>,
}

/// Depth-first, pre-order, synchronous traversal assembling the annotated
/// tree. All traversal state (visited table, cycle edges, unresolved set,
/// all-files index) lives on the instance and covers exactly one `build`
/// call; call `reset` before reusing an instance.
pub struct GraphBuilder {
    options: GraphOptions,
    extractor: ImportExtractor,
    resolver: PathResolver,
    visited: HashMap<PathBuf, usize>,
    circular_edges: Vec<(PathBuf, PathBuf)>,
    circular_seen: HashSet<(PathBuf, PathBuf)>,
    unresolved: Vec<String>,
    unresolved_seen: HashSet<String>,
    all_files: HashMap<PathBuf, u64>,
    externals: HashSet<PathBuf>,
    max_depth_reached: usize,
}

impl GraphBuilder {
    #[must_use]
    pub fn new(mut options: GraphOptions) -> Self {
        // Canonical root keeps the visited table and display paths stable
        // when the same file is reached through different lexical routes.
        if let Ok(canon) = options.root.canonicalize() {
            options.root = canon;
        }
        let resolver = PathResolver::new(&options);
        Self {
            options,
            extractor: ImportExtractor::new(),
            resolver,
            visited: HashMap::new(),
            circular_edges: Vec::new(),
            circular_seen: HashSet::new(),
            unresolved: Vec::new(),
            unresolved_seen: HashSet::new(),
            all_files: HashMap::new(),
            externals: HashSet::new(),
            max_depth_reached: 0,
        }
    }

    /// Build the dependency tree rooted at `root_file`.
    ///
    /// # Errors
    /// Returns `GraphError::RootNotFound` when the root file itself does not
    /// exist; every other failure degrades to a node annotation or an entry
    /// in the unresolved set.
    pub fn build(&mut self, root_file: &Path) -> Result<FileNode, GraphError> {
        let abs = match root_file.canonicalize() {
            Ok(p) if p.is_file() => p,
            _ => return Err(GraphError::RootNotFound(root_file.to_path_buf())),
        };
        match self.build_node(&abs, 0, None) {
            Some(node) => Ok(node),
            None => Err(GraphError::RootNotFound(abs)),
        }
    }

    /// Clear all per-traversal state so the instance can run another `build`.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.circular_edges.clear();
        self.circular_seen.clear();
        self.unresolved.clear();
        self.unresolved_seen.clear();
        self.all_files.clear();
        self.externals.clear();
        self.max_depth_reached = 0;
    }

    fn build_node(&mut self, path: &Path, depth: usize, caller: Option<&Path>) -> Option<FileNode> {
        if let Some(max) = self.options.max_depth {
            if depth > max {
                log::debug!("depth {depth} exceeds max {max}, omitting {}", path.display());
                return None;
            }
        }

        if let Some(&first_seen) = self.visited.get(path) {
            if first_seen <= depth {
                // Back-edge: terminate as a circular leaf instead of
                // expanding.
                if let Some(from) = caller {
                    let edge = (from.to_path_buf(), path.to_path_buf());
                    if self.circular_seen.insert(edge.clone()) {
                        self.circular_edges.push(edge);
                    }
                }
                log::debug!("circular: {} (first seen at depth {first_seen})", path.display());
                return Some(self.leaf(path, depth, true, false));
            }
            // Visited first at a greater depth: produce no node at all; the
            // subtree already exists elsewhere in the output (see README,
            // "Traversal notes").
            log::debug!(
                "already visited deeper ({first_seen} > {depth}), omitting {}",
                path.display()
            );
            return None;
        }
        self.visited.insert(path.to_path_buf(), depth);
        self.max_depth_reached = self.max_depth_reached.max(depth);

        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let mut node = FileNode {
            display_path: self.display_path(path),
            absolute_path: path.to_path_buf(),
            exists: path.is_file(),
            size,
            depth,
            ..FileNode::default()
        };
        self.all_files.insert(path.to_path_buf(), size);

        // Content gating: binary extensions and oversized files keep their
        // metadata but omit content; a failed read is recorded, not thrown.
        let ext = extension_of(path);
        if BINARY_EXTENSIONS.contains(&ext.as_str()) {
            node.content_skipped = Some("Binary file".to_string());
        } else if size > (self.options.max_content_length as u64).saturating_mul(4) {
            node.content_skipped =
                Some(format!("File too large ({size} bytes) for content inclusion"));
        } else {
            match fs::read_to_string(path) {
                Ok(content) => node.content = Some(content),
                Err(e) => node.error = Some(format!("Could not read file: {e}")),
            }
        }

        let specifiers = match node.content.as_deref() {
            Some(content) => {
                let composite = COMPOSITE_EXTENSIONS.contains(&ext.as_str());
                self.extractor.extract(content, composite)
            }
            // Imports cannot be discovered without readable content.
            None => Vec::new(),
        };
        node.import_count = specifiers.len();

        for spec in &specifiers {
            match self.resolver.resolve(spec, path) {
                Resolution::Local(target) => {
                    if let Some(child) = self.build_node(&target, depth + 1, Some(path)) {
                        node.children.push(child);
                    }
                }
                Resolution::External(target) => {
                    if depth + 1 <= self.options.max_depth.unwrap_or(usize::MAX) {
                        self.externals.insert(target.clone());
                        node.children.push(self.external_leaf(spec, &target, depth + 1));
                    }
                }
                Resolution::Unresolved => {
                    if self.unresolved_seen.insert(spec.clone()) {
                        self.unresolved.push(spec.clone());
                    }
                }
            }
        }
        Some(node)
    }

    // Leaf for circular references and the reuse-hazard root.
    fn leaf(&mut self, path: &Path, depth: usize, circular: bool, external: bool) -> FileNode {
        self.max_depth_reached = self.max_depth_reached.max(depth);
        let size =
            self.all_files.get(path).copied().or_else(|| fs::metadata(path).map(|m| m.len()).ok());
        FileNode {
            display_path: self.display_path(path),
            absolute_path: path.to_path_buf(),
            exists: path.is_file(),
            size: size.unwrap_or(0),
            depth,
            circular,
            external,
            ..FileNode::default()
        }
    }

    // Unexpanded leaf for an included external dependency; displayed under
    // its specifier, registered under its resolved path.
    fn external_leaf(&mut self, specifier: &str, target: &Path, depth: usize) -> FileNode {
        self.max_depth_reached = self.max_depth_reached.max(depth);
        let size = fs::metadata(target).map(|m| m.len()).unwrap_or(0);
        self.all_files.insert(target.to_path_buf(), size);
        FileNode {
            display_path: specifier.to_string(),
            absolute_path: target.to_path_buf(),
            exists: true,
            size,
            depth,
            external: true,
            ..FileNode::default()
        }
    }

    fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.options.root) {
            Ok(rel) => rel.display().to_string(),
            Err(_) => path.display().to_string(),
        }
    }

    /// Summary statistics over the state of the last `build` call.
    #[must_use]
    pub fn summary(&self) -> GraphSummary {
        let mut file_types: BTreeMap<String, usize> = BTreeMap::new();
        for path in self.all_files.keys() {
            *file_types.entry(extension_of(path)).or_default() += 1;
        }
        GraphSummary {
            total_files: self.all_files.len(),
            total_size: self.all_files.values().sum(),
            max_depth: self.max_depth_reached,
            external_count: self.externals.len(),
            circular_count: self.circular_edges.len(),
            circular_edges: self
                .circular_edges
                .iter()
                .map(|(from, to)| (self.display_path(from), self.display_path(to)))
                .collect(),
            unresolved_count: self.unresolved.len(),
            unresolved: self.unresolved.clone(),
            file_types,
        }
    }

    /// Absolute-path index of every file registered during traversal, with
    /// sizes in bytes.
    #[must_use]
    pub fn all_files(&self) -> &HashMap<PathBuf, u64> {
        &self.all_files
    }

    /// Directed (from, to) cycle edges discovered during traversal.
    #[must_use]
    pub fn circular_edges(&self) -> &[(PathBuf, PathBuf)] {
        &self.circular_edges
    }

    /// Specifiers that could not be mapped to a filesystem path, in
    /// first-seen order.
    #[must_use]
    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    #[must_use]
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }
}

fn extension_of(path: &Path) -> String {
    path.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase()
}
