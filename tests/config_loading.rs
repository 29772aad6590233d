use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    fs::write(path, content).unwrap();
}

fn chain_fixture(root: &Path) {
    write_file(&root.join("package.json"), "{}\n");
    write_file(&root.join("src/r0.ts"), "import a from \"./a\";\n");
    write_file(&root.join("src/a.ts"), "import b from \"./b\";\n");
    write_file(&root.join("src/b.ts"), "export const b = 1;\n");
}

#[test]
fn config_file_next_to_root_is_picked_up() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    chain_fixture(root);
    write_file(&root.join("import-graph.toml"), "max_depth = 1\n");

    let mut cmd = Command::cargo_bin("import-graph").unwrap();
    cmd.arg("analyze").arg(root.join("src/r0.ts")).arg("--root").arg(root);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("src/a.ts"))
        .stdout(predicate::str::contains("src/b.ts").not());
}

#[test]
fn depth_flag_wins_over_config_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    chain_fixture(root);
    write_file(&root.join("import-graph.toml"), "max_depth = 1\n");

    let mut cmd = Command::cargo_bin("import-graph").unwrap();
    cmd.arg("analyze")
        .arg(root.join("src/r0.ts"))
        .arg("--root")
        .arg(root)
        .arg("--depth")
        .arg("5");
    cmd.assert().success().stdout(predicate::str::contains("src/b.ts"));
}

#[test]
fn explicit_config_path_and_alias_table() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("package.json"), "{}\n");
    write_file(&root.join("src/main.ts"), "import c from \"@comp/Button\";\n");
    write_file(&root.join("ui/Button.ts"), "export default 1;\n");
    let cfg = root.join("custom.toml");
    write_file(&cfg, "[aliases]\n\"@comp\" = \"ui\"\n");

    let mut cmd = Command::cargo_bin("import-graph").unwrap();
    cmd.arg("analyze")
        .arg(root.join("src/main.ts"))
        .arg("--root")
        .arg(root)
        .arg("--config")
        .arg(&cfg);
    cmd.assert().success().stdout(predicate::str::contains("ui/Button.ts"));
}

#[test]
fn config_exclude_replaces_defaults() {
    // A config exclude list without "node_modules" plus --include-external
    // exposes a package that the default list would also have allowed, while
    // the custom pattern drops a local file.
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("package.json"), "{}\n");
    write_file(&root.join("src/main.ts"), "import a from \"./legacy/a\";\nimport b from \"./b\";\n");
    write_file(&root.join("src/legacy/a.ts"), "export const a = 1;\n");
    write_file(&root.join("src/b.ts"), "export const b = 1;\n");
    write_file(&root.join("import-graph.toml"), "exclude = [\"/legacy/\"]\n");

    let mut cmd = Command::cargo_bin("import-graph").unwrap();
    cmd.arg("analyze").arg(root.join("src/main.ts")).arg("--root").arg(root);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("src/b.ts"))
        .stdout(predicate::str::contains("legacy/a.ts").not())
        .stdout(predicate::str::contains("unresolved imports: 1"));
}
