use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn parse_json(stdout: &[u8]) -> Value {
    serde_json::from_slice(stdout).expect("valid json output")
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn has_program(name: &str) -> bool {
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(name).is_file()))
        .unwrap_or(false)
}

fn grepctx(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("grepctx"));
    cmd.current_dir(dir).env_remove("GREPCTX_GREP").env_remove("GREPCTX_FIND");
    cmd
}

#[test]
fn search_lists_matching_files_with_count() {
    if !has_program("grep") {
        return;
    }
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "needle\n");
    write_file(&temp.path().join("b.txt"), "hay\n");

    let assert = grepctx(temp.path())
        .arg("search")
        .arg("needle")
        .assert()
        .success();
    let value = parse_json(&assert.get_output().stdout);

    assert_eq!(value["files"], serde_json::json!(["./a.txt"]));
    assert_eq!(value["count"], 1);
    assert_eq!(value["query"], "needle");
    assert_eq!(value["search_path"], ".");
}

#[test]
fn search_without_matches_is_empty_not_an_error() {
    if !has_program("grep") {
        return;
    }
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "nothing\n");

    let assert = grepctx(temp.path())
        .args(["search", "needle", "does-not-exist"])
        .assert()
        .success();
    let value = parse_json(&assert.get_output().stdout);

    assert_eq!(value["files"], serde_json::json!([]));
    assert_eq!(value["count"], 0);
    assert_eq!(value["search_path"], "does-not-exist");
}

#[test]
fn context_splits_blocks_per_match() {
    if !has_program("grep") {
        return;
    }
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join("log.txt"),
        "boot\nerror: disk\nretry\nok\nok\nok\nok\nerror: net\nshutdown\n",
    );

    let assert = grepctx(temp.path())
        .args(["context", "error", "log.txt", "-B", "1", "-A", "1"])
        .assert()
        .success();
    let value = parse_json(&assert.get_output().stdout);
    let records = value.as_array().unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["file"], "log.txt");
    assert_eq!(
        records[0]["context"],
        "log.txt-1-boot\nlog.txt:2:error: disk\nlog.txt-3-retry"
    );
    assert_eq!(
        records[1]["context"],
        "log.txt-7-ok\nlog.txt:8:error: net\nlog.txt-9-shutdown"
    );
}

#[test]
fn context_jsonl_emits_one_record_per_line() {
    if !has_program("grep") {
        return;
    }
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.md"), "x\nmark\ny\n\n\n\n\nmark\n");

    let assert = grepctx(temp.path())
        .args(["--format", "jsonl", "context", "mark", ".", "-B", "0", "-A", "0"])
        .assert()
        .success();
    let items = parse_jsonl(&assert.get_output().stdout);

    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["file"] == "./a.md"));
}

#[test]
fn context_raw_keeps_grep_layout() {
    if !has_program("grep") {
        return;
    }
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "one\ntwo\n");

    grepctx(temp.path())
        .args(["--format", "raw", "--no-color", "context", "two", "a.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("a.txt-1-one\na.txt:2:two\n"));
}

#[test]
fn find_lists_regular_files_by_pattern() {
    if !has_program("find") {
        return;
    }
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("src/lib.rs"), "");
    write_file(&temp.path().join("README.md"), "");
    fs::create_dir_all(temp.path().join("dir.rs")).unwrap();

    let assert = grepctx(temp.path())
        .args(["find", "*.rs"])
        .assert()
        .success();
    let value = parse_json(&assert.get_output().stdout);

    assert_eq!(value, serde_json::json!(["./src/lib.rs"]));
}

#[test]
fn missing_backend_is_an_error() {
    let temp = tempdir().unwrap();

    grepctx(temp.path())
        .args(["--grep-bin", "grepctx-no-such-grep", "search", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("grepctx-no-such-grep"));
}

#[test]
fn backend_program_can_come_from_env() {
    let temp = tempdir().unwrap();

    grepctx(temp.path())
        .env("GREPCTX_FIND", "grepctx-no-such-find")
        .args(["find", "*.rs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("grepctx-no-such-find"));
}

#[test]
fn tools_prints_three_definitions() {
    let temp = tempdir().unwrap();

    let assert = grepctx(temp.path()).arg("tools").assert().success();
    let value = parse_json(&assert.get_output().stdout);
    let names: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(
        names,
        vec!["search_files", "search_files_with_context", "find_files_by_name"]
    );
    assert_eq!(value[1]["parameters"]["properties"]["lines_after"]["default"], 2);
}

#[test]
fn call_dispatches_inline_arguments() {
    if !has_program("grep") {
        return;
    }
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.py"), "import os\n");

    let assert = grepctx(temp.path())
        .args(["call", "search_files", r#"{"query": "import"}"#])
        .assert()
        .success();
    let value = parse_json(&assert.get_output().stdout);

    assert_eq!(value["files"], serde_json::json!(["./a.py"]));
    assert_eq!(value["count"], 1);
}

#[test]
fn call_reads_arguments_from_stdin() {
    if !has_program("find") {
        return;
    }
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("notes.md"), "");

    let assert = grepctx(temp.path())
        .args(["call", "find_files_by_name"])
        .write_stdin(r#"{"pattern": "*.md"}"#)
        .assert()
        .success();
    let value = parse_json(&assert.get_output().stdout);

    assert_eq!(value, serde_json::json!(["./notes.md"]));
}

#[test]
fn call_unknown_tool_fails() {
    let temp = tempdir().unwrap();

    grepctx(temp.path())
        .args(["call", "rm_rf", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool `rm_rf`"));
}

#[test]
fn call_rejects_invalid_json() {
    let temp = tempdir().unwrap();

    grepctx(temp.path())
        .args(["call", "search_files", "{query"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn doctor_reports_both_backends() {
    let temp = tempdir().unwrap();

    let assert = grepctx(temp.path()).arg("doctor").assert().success();
    let value = parse_json(&assert.get_output().stdout);
    let names: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap().to_string())
        .collect();

    assert_eq!(names, vec!["grep", "find"]);
}
