//! import-graph — File Dependency Tree Extractor
//!
//! Build the transitive file-dependency tree rooted at a JavaScript,
//! TypeScript or Svelte source file and render it for downstream tooling.
//!
//! # Features
//! - Line-scoped import/require extraction (static, dynamic, re-export, CJS)
//! - Multi-strategy path resolution: aliases, project-absolute prefixes,
//!   relative paths, extension/index fallback, exclusion filtering
//! - Depth-bounded, cycle-safe depth-first traversal with content gating
//! - Tree, list, JSON and content renderers plus summary statistics
//!
//! # Quickstart (Library)
//! ```no_run
//! use import_graph::graph::{GraphBuilder, GraphOptions};
//!
//! let options = GraphOptions::new(std::path::PathBuf::from("."));
//! let mut builder = GraphBuilder::new(options);
//! let tree = builder.build(std::path::Path::new("src/routes/+page.svelte"))
//!     .expect("build dependency tree");
//! let summary = builder.summary();
//! println!("files: {} max depth: {}", summary.total_files, summary.max_depth);
//! ```
//!
//! # Quickstart (CLI)
//! ```text
//! import-graph analyze src/routes/+page.svelte --format tree
//! import-graph analyze src/lib/api.ts --format json --output deps.json
//! ```
//!
//! # Traversal State
//! A `GraphBuilder` carries the visited table, cycle-edge set and unresolved
//! set for exactly one `build` call. Reusing an instance for a second call
//! without `reset` makes the second root appear already visited.
pub mod app;
pub mod cli;
pub mod errors;
pub mod extractor;
pub mod graph;
pub mod render;
pub mod utils;
