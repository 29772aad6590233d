//! Output renderers over a built dependency tree.
//!
//! Four formats: an indented tree with a summary block, a flattened list
//! table, pretty JSON and a raw-content dump. Renderers never mutate the
//! tree; flattening deduplicates by absolute path because one physical file
//! can occupy several tree positions.
use std::collections::HashSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::errors::GraphError;
use crate::graph::{FileNode, GraphSummary};

/// Indented tree, one line per node, followed by the summary block.
#[must_use]
pub fn tree(node: &FileNode, summary: &GraphSummary) -> String {
    let mut out = String::new();
    out.push_str(&node_label(node));
    out.push('\n');
    tree_children(node, "", &mut out);
    out.push('\n');
    out.push_str(&summary_block(summary));
    out
}

fn tree_children(node: &FileNode, prefix: &str, out: &mut String) {
    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.iter().enumerate() {
        let (branch, cont) = if i == last { ("└── ", "    ") } else { ("├── ", "│   ") };
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&node_label(child));
        out.push('\n');
        tree_children(child, &format!("{prefix}{cont}"), out);
    }
}

fn node_label(node: &FileNode) -> String {
    let mut label = format!("{} ({})", node.display_path, format_size(node.size));
    if node.circular {
        label.push_str(" (circular)");
    }
    if node.external {
        label.push_str(" (external)");
    }
    if let Some(reason) = &node.content_skipped {
        label.push_str(&format!(" [skipped: {reason}]"));
    }
    if let Some(err) = &node.error {
        label.push_str(&format!(" [error: {err}]"));
    }
    if !node.exists {
        label.push_str(" [missing]");
    }
    label
}

/// Flattened unique-file listing as an ASCII table.
#[must_use]
pub fn list(node: &FileNode) -> String {
    let mut files = flatten(node);
    files.sort_by(|a, b| a.display_path.cmp(&b.display_path));
    let rows: Vec<Vec<String>> = files
        .iter()
        .enumerate()
        .map(|(i, n)| {
            vec![format!("{}", i + 1), n.display_path.clone(), format_size(n.size)]
        })
        .collect();
    crate::utils::table::render(&["#", "Path", "Size"], &rows)
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tree: &'a FileNode,
    summary: &'a GraphSummary,
}

/// Pretty-printed JSON of the tree and summary.
///
/// # Errors
/// Returns `GraphError::Render` if serialization fails.
pub fn json(node: &FileNode, summary: &GraphSummary) -> Result<String, GraphError> {
    serde_json::to_string_pretty(&JsonReport { tree: node, summary })
        .map_err(|e| GraphError::Render(e.to_string()))
}

/// Raw content dump: a header per unique file, then its content or the
/// omission/error reason.
#[must_use]
pub fn content(node: &FileNode) -> String {
    let mut out = String::new();
    for n in flatten(node) {
        out.push_str(&format!("=== {} ===\n", n.display_path));
        if let Some(c) = &n.content {
            out.push_str(c);
            if !c.ends_with('\n') {
                out.push('\n');
            }
        } else if let Some(reason) = &n.content_skipped {
            out.push_str(&format!("[content omitted: {reason}]\n"));
        } else if let Some(err) = &n.error {
            out.push_str(&format!("[content unavailable: {err}]\n"));
        } else {
            out.push_str("[no content]\n");
        }
        out.push('\n');
    }
    out
}

/// Pre-order flattening deduplicated by absolute path.
#[must_use]
pub fn flatten(node: &FileNode) -> Vec<&FileNode> {
    let mut seen: HashSet<&PathBuf> = HashSet::new();
    let mut out = Vec::new();
    let mut stack = vec![node];
    while let Some(n) = stack.pop() {
        if seen.insert(&n.absolute_path) {
            out.push(n);
        }
        // Reverse keeps pre-order while using a LIFO stack.
        for child in n.children.iter().rev() {
            stack.push(child);
        }
    }
    out
}

#[must_use]
pub fn summary_block(summary: &GraphSummary) -> String {
    let mut out = String::new();
    out.push_str("Summary\n");
    out.push_str(&format!("  files: {}\n", summary.total_files));
    out.push_str(&format!("  total size: {}\n", format_size(summary.total_size)));
    out.push_str(&format!("  max depth: {}\n", summary.max_depth));
    out.push_str(&format!("  external dependencies: {}\n", summary.external_count));
    out.push_str(&format!("  circular edges: {}\n", summary.circular_count));
    for (from, to) in &summary.circular_edges {
        out.push_str(&format!("    {from} -> {to}\n"));
    }
    out.push_str(&format!("  unresolved imports: {}\n", summary.unresolved_count));
    for spec in &summary.unresolved {
        out.push_str(&format!("    {spec}\n"));
    }
    if !summary.file_types.is_empty() {
        out.push_str("  file types:\n");
        for (ext, count) in &summary.file_types {
            let name = if ext.is_empty() { "(none)" } else { ext.as_str() };
            out.push_str(&format!("    {name}: {count}\n"));
        }
    }
    out
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
