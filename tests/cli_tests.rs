//! Integration tests for the helloworld CLI
//!
//! These tests drive the binary end to end against temporary workspaces.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

/// Test helper to get the CLI binary
fn helloworld_cmd() -> Command {
    Command::cargo_bin("helloworld").unwrap()
}

#[test]
fn test_cli_help() {
    helloworld_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("count-words"))
        .stdout(predicate::str::contains("list-files"));
}

#[test]
fn test_count_words() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("doc.txt");
    fs::write(&file, "hello brave\nnew_world").unwrap();

    helloworld_cmd()
        .arg("count-words")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Word Count: 3"));
}

#[test]
fn test_count_lines() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("doc.txt");
    fs::write(&file, "one\ntwo\nthree\n").unwrap();

    helloworld_cmd()
        .arg("count-lines")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Line Count: 4"));
}

#[test]
fn test_count_words_missing_file_fails() {
    let dir = tempdir().unwrap();

    helloworld_cmd()
        .arg("count-words")
        .arg(dir.path().join("nope.txt"))
        .assert()
        .failure();
}

#[test]
fn test_list_files_plain_and_json() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/nested")).unwrap();
    fs::write(dir.path().join("top.txt"), "").unwrap();
    fs::write(dir.path().join("src/nested/deep.rs"), "").unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["list-files", ".", "--max-concurrency", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("top.txt"))
        .stdout(predicate::str::contains("deep.rs"));

    let output = helloworld_cmd()
        .current_dir(dir.path())
        .args(["list-files", ".", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let files: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(files.len(), 2);
}

#[test]
fn test_list_files_missing_folder_fails() {
    let dir = tempdir().unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["list-files", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to list directory"));
}

#[test]
fn test_replace_writes_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "foo bar foo").unwrap();

    helloworld_cmd()
        .arg("replace")
        .arg(&file)
        .args(["--find", "foo", "--with", "baz", "--write"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Replaced 2 occurrence(s)"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "baz bar baz");
}

#[test]
fn test_replace_without_write_prints_result() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "foo bar").unwrap();

    helloworld_cmd()
        .arg("replace")
        .arg(&file)
        .args(["--find", "bar", "--with", "qux"])
        .assert()
        .success()
        .stdout(predicate::str::contains("foo qux"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "foo bar");
}

#[test]
fn test_panel_ping_replies_pong() {
    let dir = tempdir().unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["panel", "--message", r#"{"command":"ping"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"type":"pong"}"#));
}

#[test]
fn test_panel_count_words_message() {
    let dir = tempdir().unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["panel", "--message", r#"{"command":"countWords","text":"a b c d"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""count":4"#));
}

#[test]
fn test_panel_renders_html() {
    let dir = tempdir().unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .arg("panel")
        .assert()
        .success()
        .stdout(predicate::str::contains("<html"))
        .stdout(predicate::str::contains("Hello World Panel"));
}

#[test]
fn test_run_count_words_by_id() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("doc.txt");
    fs::write(&file, "one two").unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["run", "helloworld.countWords", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Word Count: 2"));
}

#[test]
fn test_run_without_document_reports_it() {
    let dir = tempdir().unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["run", "helloworld.countLines"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No document is open"));
}

#[test]
fn test_run_replace_with_scripted_inputs() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    fs::write(&file, "cat dog cat").unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["run", "helloworld.replaceText", "--input", "cat", "--input", "cow", "--write", "--file"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Replaced 2 occurrence(s)"));

    assert_eq!(fs::read_to_string(&file).unwrap(), "cow dog cow");
}

#[test]
fn test_run_unknown_command_fails() {
    let dir = tempdir().unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["run", "helloworld.doesNotExist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command"));
}

#[test]
fn test_tree_output() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("ws/src")).unwrap();
    fs::write(dir.path().join("ws/src/main.rs"), "").unwrap();
    fs::write(dir.path().join("ws/README.md"), "").unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .args(["tree", "ws"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ws/\n  src/\n    main.rs\n  README.md"));
}

#[test]
fn test_list_commands() {
    helloworld_cmd()
        .arg("list-commands")
        .assert()
        .success()
        .stdout(predicate::str::contains("helloworld.listFiles"))
        .stdout(predicate::str::contains("helloworld.showTree"));
}

#[test]
fn test_print_default_config() {
    helloworld_cmd()
        .arg("print-default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("enumeration:"))
        .stdout(predicate::str::contains("max_depth: 3"));
}

#[test]
fn test_init_and_validate_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("test-config.yml");

    helloworld_cmd()
        .args(["init-config", "--output"])
        .arg(&config_path)
        .assert()
        .success();
    assert!(config_path.exists());

    helloworld_cmd()
        .args(["init-config", "--output"])
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    helloworld_cmd()
        .arg("validate-config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("bad.yml");
    fs::write(&config_path, "tree:\n  max_depth: 0\n").unwrap();

    helloworld_cmd()
        .current_dir(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["tree", "."])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration validation failed"));
}
