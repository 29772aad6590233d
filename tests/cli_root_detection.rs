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

#[test]
fn root_is_detected_from_marker_without_flag() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("package.json"), "{}\n");
    write_file(&root.join("src/lib/util.ts"), "export const u = 1;\n");
    write_file(&root.join("src/main.ts"), "import { u } from \"$lib/util\";\n");

    // No --root: the package.json marker anchors the project, which is what
    // makes the $lib alias land in src/lib.
    let mut cmd = Command::cargo_bin("import-graph").unwrap();
    cmd.arg("-v").arg("analyze").arg(root.join("src/main.ts"));
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Using project root:"))
        .stdout(predicate::str::contains("util.ts"));
}

#[test]
fn root_flag_overrides_detection() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("package.json"), "{}\n");
    write_file(&root.join("sub/lib/x.ts"), "export const x = 1;\n");
    write_file(&root.join("sub/main.ts"), "import { x } from \"$lib/x\";\n");
    // $lib maps to src/lib under the detected root, so without the override
    // this import would be unresolved.
    write_file(&root.join("sub/src/lib/x.ts"), "export const x = 2;\n");

    let mut cmd = Command::cargo_bin("import-graph").unwrap();
    cmd.arg("analyze").arg(root.join("sub/main.ts")).arg("--root").arg(root.join("sub"));
    cmd.assert().success().stdout(predicate::str::contains("src/lib/x.ts"));
}

#[test]
fn quiet_suppresses_write_confirmation() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(&root.join("package.json"), "{}\n");
    write_file(&root.join("src/main.ts"), "export {};\n");
    let out_path = root.join("out.txt");

    let mut cmd = Command::cargo_bin("import-graph").unwrap();
    cmd.arg("-q")
        .arg("analyze")
        .arg(root.join("src/main.ts"))
        .arg("--output")
        .arg(&out_path);
    cmd.assert().success().stdout(predicate::str::contains("Wrote").not());
    assert!(out_path.exists());
}
