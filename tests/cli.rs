use std::fs;
use std::path::Path;

use assert_cmd::Command;

const JPEG_STUB: &[u8] = b"\xff\xd8\xff\xd9";

fn write_pair(dir: &Path, stem: &str, annotation: &str) {
    fs::write(dir.join(format!("{stem}.txt")), annotation).expect("write annotation");
    fs::write(dir.join(format!("{stem}.jpg")), JPEG_STUB).expect("write image");
}

#[test]
fn outputs_tool_name() {
    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.arg("-V");
    cmd.assert().success().stdout("yolotidy 0.3.1\n");
}

#[test]
fn missing_source_dir_argument_fails() {
    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Usage"));
}

#[test]
fn unknown_flag_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.arg(temp.path()).arg("--bogus");
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("unexpected argument"));
}

#[test]
fn flag_without_value_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.arg(temp.path()).arg("-o");
    cmd.assert().failure();
}

#[test]
fn non_numeric_index_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.args([temp.path().to_str().unwrap(), "-i", "not-a-number"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid value"));
}

#[test]
fn nonexistent_source_dir_fails() {
    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.arg("no_such_dataset_dir");
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("not a directory"));
}

#[test]
fn successful_run_prints_summary() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_pair(temp.path(), "cat.tabby.a", "0 0.5 0.5 0.1 0.1");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.arg(temp.path());
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("1 kept"))
        .stdout(predicates::str::contains("Next index: 00001"));

    assert!(temp.path().join("labels/cat.tabby.00000.txt").is_file());
}

#[test]
fn objects_flag_filters_classes() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_pair(temp.path(), "cat.tabby.a", "0 .1 .2\n1 .3 .4\n2 .5 .6");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.args([temp.path().to_str().unwrap(), "-o", "0,2"]);
    cmd.assert().success();

    let content = fs::read_to_string(temp.path().join("labels/cat.tabby.00000.txt"))
        .expect("read filtered annotation");
    assert_eq!(content, "0 .1 .2\n2 .5 .6");
}

#[test]
fn json_output_reports_counts() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_pair(temp.path(), "cat.tabby.a", "0 0.5 0.5 0.1 0.1");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.args([temp.path().to_str().unwrap(), "--output", "json"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("\"kept\": 1"))
        .stdout(predicates::str::contains("\"next_index\": 1"));
}

#[test]
fn unsupported_output_mode_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.args([temp.path().to_str().unwrap(), "--output", "yaml"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported output mode"));
}

#[test]
fn unreadable_label_list_fails_and_leaves_tree_alone() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_pair(temp.path(), "cat.tabby.a", "0 0.5 0.5 0.1 0.1");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.args([temp.path().to_str().unwrap(), "-l", "no_such_labels.list"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("label list"));

    assert!(temp.path().join("cat.tabby.a.txt").is_file());
    assert!(!temp.path().join("images").exists());
}

#[test]
fn dry_run_leaves_tree_alone() {
    let temp = tempfile::tempdir().expect("create temp dir");
    write_pair(temp.path(), "cat.tabby.a", "0 0.5 0.5 0.1 0.1");

    let mut cmd = Command::cargo_bin("yolotidy").unwrap();
    cmd.args([temp.path().to_str().unwrap(), "--dry-run"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("1 kept"));

    assert!(temp.path().join("cat.tabby.a.txt").is_file());
    assert!(!temp.path().join("labels").exists());
}
