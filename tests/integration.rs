// Integration testing can be done either by calling library functions directly or by invoking your CLI as a subprocess.
use assert_fs::prelude::*;
use predicates::prelude::*;

const DEMO_MANIFEST: &str = r#"{
    "src/index.js": {"type": "file", "name": "index.js", "contents": "console.log(1)"},
    "src": {"type": "folder", "name": "src"}
}"#;

fn sprout(dir: &assert_fs::TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("sprout").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

fn workspace(manifest: &str) -> assert_fs::TempDir {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("base.json").write_str(manifest).unwrap();
    dir
}

#[test]
fn creates_structure_in_named_project_folder() {
    let dir = workspace(DEMO_MANIFEST);

    sprout(&dir)
        .arg("--name")
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("File structure created successfully!"));

    dir.child("demo/src/index.js").assert("console.log(1)");
    dir.child("demo/src").assert(predicate::path::is_dir());
}

#[test]
fn creates_structure_in_current_directory_by_default() {
    let dir = workspace(
        r#"{
            "README.md": {"type": "file", "name": "README.md", "contents": "hello\n"},
            "assets/dot.bin": {"type": "file", "name": "dot.bin", "contents": "AAECAw==", "isBinary": true},
            "empty/.gitkeep": {"type": "file", "name": ".gitkeep"}
        }"#,
    );

    sprout(&dir).assert().success();

    dir.child("README.md").assert("hello\n");
    assert_eq!(
        std::fs::read(dir.child("assets/dot.bin").path()).unwrap(),
        vec![0u8, 1, 2, 3]
    );
    dir.child("empty/.gitkeep").assert("");
}

#[test]
fn missing_manifest_fails_before_prompting() {
    let dir = assert_fs::TempDir::new().unwrap();

    sprout(&dir)
        .arg("--project")
        .write_stdin("demo\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Project folder name").not())
        .stderr(predicate::str::contains("not found"));

    dir.child("demo").assert(predicate::path::missing());
}

#[test]
fn empty_manifest_fails() {
    let dir = workspace("   \n");

    sprout(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty"));
}

#[test]
fn malformed_manifest_fails_without_writing() {
    let dir = workspace(r#"{"a.txt": {"type": "file",, }"#);

    sprout(&dir)
        .arg("--name")
        .arg("demo")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to parse"));

    dir.child("demo").assert(predicate::path::missing());
}

#[test]
fn prompt_reasks_until_folder_name_is_valid() {
    let dir = workspace(DEMO_MANIFEST);

    sprout(&dir)
        .arg("--project")
        .write_stdin("My Project!\nmy-project_1.0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid name."));

    dir.child("My Project!").assert(predicate::path::missing());
    dir.child("my-project_1.0/src/index.js")
        .assert("console.log(1)");
}

#[test]
fn prompt_end_of_input_aborts() {
    let dir = workspace(DEMO_MANIFEST);

    sprout(&dir)
        .arg("--project")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("canceled"));

    dir.child("src").assert(predicate::path::missing());
}

#[test]
fn invalid_name_flag_is_fatal() {
    let dir = workspace(DEMO_MANIFEST);

    sprout(&dir)
        .arg("--name")
        .arg("My Project!")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project folder name"));
}

#[test]
fn clean_removes_manifest_files_but_keeps_unrelated_content() {
    let dir = workspace(
        r#"{
            "a/b.txt": {"type": "file", "name": "b.txt", "contents": "new b"},
            "a/c.txt": {"type": "file", "name": "c.txt", "contents": "new c"}
        }"#,
    );
    dir.child("a/b.txt").write_str("stale").unwrap();
    dir.child("a/keep.txt").write_str("mine").unwrap();

    sprout(&dir)
        .arg("--clean")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaning up existing files..."));

    dir.child("a/b.txt").assert("new b");
    dir.child("a/c.txt").assert("new c");
    dir.child("a/keep.txt").assert("mine");
}

#[test]
fn clean_runs_against_project_folder() {
    let dir = workspace(DEMO_MANIFEST);
    dir.child("demo/src/index.js").write_str("old").unwrap();
    dir.child("src/index.js").write_str("outside").unwrap();

    sprout(&dir)
        .args(["--clean", "--name", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("remove"));

    dir.child("demo/src/index.js").assert("console.log(1)");
    dir.child("src/index.js").assert("outside");
}

#[test]
fn dry_run_writes_nothing() {
    let dir = workspace(DEMO_MANIFEST);

    sprout(&dir)
        .args(["--dry-run", "--name", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("index.js").and(predicate::str::contains("Preview")));

    dir.child("demo").assert(predicate::path::missing());
}

#[test]
fn custom_manifest_path() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("layouts/web.json")
        .write_str(DEMO_MANIFEST)
        .unwrap();

    sprout(&dir)
        .args(["--manifest", "layouts/web.json", "--name", "web"])
        .assert()
        .success();

    dir.child("web/src/index.js").assert("console.log(1)");
}

#[test]
fn filesystem_failure_is_fatal() {
    let dir = workspace(
        r#"{
            "first.txt": {"type": "file", "name": "first.txt", "contents": "1"},
            "blocked/inner.txt": {"type": "file", "name": "inner.txt"},
            "last.txt": {"type": "file", "name": "last.txt"}
        }"#,
    );
    dir.child("blocked").write_str("a file, not a directory").unwrap();

    sprout(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("creating a directory"));

    dir.child("first.txt").assert("1");
    dir.child("last.txt").assert(predicate::path::missing());
}
