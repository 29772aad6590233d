//! Library-level traversal behavior that only shows up on multi-file
//! fixtures: revisit handling across subtrees and alias resolution through
//! Svelte components.

use import_graph::graph::{GraphBuilder, GraphOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let p = root.join(rel);
    fs::create_dir_all(p.parent().unwrap()).unwrap();
    fs::write(&p, content).unwrap();
    p
}

#[test]
fn file_first_seen_deeper_is_dropped_from_shallower_position() {
    // r imports a then c; a -> b -> c. DFS reaches c at depth 3 first, so
    // when r's own edge to c arrives at depth 1 the node is dropped
    // entirely: r keeps a single child and no circular marker appears.
    let td = tempdir().unwrap();
    let root = td.path();
    let r = write(root, "src/r.ts", "import a from \"./a\";\nimport c from \"./c\";\n");
    write(root, "src/a.ts", "import b from \"./b\";\n");
    write(root, "src/b.ts", "import c from \"./c\";\n");
    write(root, "src/c.ts", "export const c = 1;\n");

    let mut builder = GraphBuilder::new(GraphOptions::new(root.to_path_buf()));
    let tree = builder.build(&r).unwrap();

    assert_eq!(tree.import_count, 2);
    assert_eq!(tree.children.len(), 1);
    assert!(tree.children[0].display_path.ends_with("a.ts"));
    assert!(builder.circular_edges().is_empty());
    // The file itself is still in the index from the deep visit.
    assert!(builder.all_files().keys().any(|p| p.ends_with("c.ts")));
}

#[test]
fn svelte_component_chain_resolves_through_lib_alias() {
    let td = tempdir().unwrap();
    let root = td.path();
    let page = write(
        root,
        "src/routes/+page.svelte",
        "<script lang=\"ts\">\nimport Card from \"$lib/Card.svelte\";\n</script>\n<Card />\n",
    );
    write(
        root,
        "src/lib/Card.svelte",
        "<script>\nimport { money } from \"$lib/format\";\n</script>\n<span>{money(1)}</span>\n",
    );
    write(root, "src/lib/format.ts", "export const money = (n) => `$${n}`;\n");

    let mut builder = GraphBuilder::new(GraphOptions::new(root.to_path_buf()));
    let tree = builder.build(&page).unwrap();

    assert_eq!(tree.children.len(), 1);
    let card = &tree.children[0];
    assert_eq!(card.display_path, "src/lib/Card.svelte");
    assert_eq!(card.children.len(), 1);
    assert_eq!(card.children[0].display_path, "src/lib/format.ts");
    assert!(builder.unresolved().is_empty());
}

#[test]
fn markup_outside_script_never_contributes_imports() {
    // The template references a path-like string; only the script block is
    // scanned, so nothing is extracted from it.
    let td = tempdir().unwrap();
    let root = td.path();
    let page = write(
        root,
        "src/App.svelte",
        "<script>\nimport real from \"./real\";\n</script>\n\
         <p>see import notes from \"./fake\"</p>\n",
    );
    write(root, "src/real.ts", "export default 1;\n");
    write(root, "src/fake.ts", "export default 2;\n");

    let mut builder = GraphBuilder::new(GraphOptions::new(root.to_path_buf()));
    let tree = builder.build(&page).unwrap();
    assert_eq!(tree.import_count, 1);
    assert_eq!(tree.children.len(), 1);
    assert!(tree.children[0].display_path.ends_with("real.ts"));
}

#[test]
fn index_file_resolution_for_directory_import() {
    let td = tempdir().unwrap();
    let root = td.path();
    let entry = write(root, "src/main.ts", "import * as api from \"./api\";\n");
    write(root, "src/api/index.ts", "export const get = () => {};\n");

    let mut builder = GraphBuilder::new(GraphOptions::new(root.to_path_buf()));
    let tree = builder.build(&entry).unwrap();
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].display_path, "src/api/index.ts");
}
