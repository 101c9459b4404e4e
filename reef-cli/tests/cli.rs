use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn write_sample(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("sample.reef");
    fs::write(&path, contents).expect("write sample");
    (dir, path)
}

#[test]
fn prints_inferred_types_by_default() {
    let (_dir, path) = write_sample("val a = 5\nval b = \"hi\"\n");
    let output = Command::new(env!("CARGO_BIN_EXE_reef"))
        .arg(&path)
        .output()
        .expect("run reef");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains("a: Int"), "stdout: {stdout}");
    assert!(stdout.contains("b: String"), "stdout: {stdout}");
}

#[test]
fn members_mode_substitutes_generics() {
    let (_dir, path) = write_sample("val l = List.new()\n");
    let output = Command::new(env!("CARGO_BIN_EXE_reef"))
        .arg(&path)
        .args(["--members", "List<Int>"])
        .output()
        .expect("run reef");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains("get(index: Int): Int"), "stdout: {stdout}");
    assert!(stdout.contains("add(element: Int): Unit"), "stdout: {stdout}");
}

#[test]
fn json_mode_emits_a_type_map() {
    let (_dir, path) = write_sample("val flag = true\n");
    let output = Command::new(env!("CARGO_BIN_EXE_reef"))
        .arg(&path)
        .args(["--types", "--json"])
        .output()
        .expect("run reef");
    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("valid JSON report");
    assert_eq!(report["types"]["flag"], "Bool");
}

#[test]
fn symbols_mode_lists_visible_names() {
    let source = "actor App {\n  fun run() {\n    val x = 1\n  }\n}\n";
    let (_dir, path) = write_sample(source);
    let output = Command::new(env!("CARGO_BIN_EXE_reef"))
        .arg(&path)
        .args(["--symbols-at", "3"])
        .output()
        .expect("run reef");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains("type App"), "stdout: {stdout}");
    assert!(stdout.contains("function run"), "stdout: {stdout}");
    assert!(stdout.contains("variable x"), "stdout: {stdout}");
}

#[test]
fn unterminated_blocks_warn_but_still_succeed() {
    let (_dir, path) = write_sample("actor Stream {\n  fun poll() {\n");
    let output = Command::new(env!("CARGO_BIN_EXE_reef"))
        .arg(&path)
        .arg("--dump-tree")
        .output()
        .expect("run reef");
    assert!(output.status.success());
    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("warning"), "stderr: {stderr}");
}
