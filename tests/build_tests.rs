//! Integration tests for build command

#![allow(deprecated)]

use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

mod common;
use common::{blogforge_cmd, init_site, write_comment, write_post};

fn populate(temp: &TempDir) {
    init_site(temp.path());
    write_post(temp.path(), "first", "2024-01-01", &["posts", "Systems"], false);
    write_post(temp.path(), "til-one", "2024-01-02", &["Compilers"], true);
    write_post(temp.path(), "second", "2024-01-03", &["Career", "Systems"], false);
    write_comment(
        temp.path(),
        "second",
        "a.json",
        r#"{"_id": "c1", "message": "nice", "date": 100}"#,
    );
}

#[test]
fn test_build_to_stdout() {
    let temp = TempDir::new().unwrap();
    populate(&temp);

    let output = blogforge_cmd()
        .current_dir(temp.path())
        .arg("build")
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["tagList"], serde_json::json!(["Career", "Systems"]));
    assert_eq!(json["tilTagList"], serde_json::json!(["Compilers"]));

    let posts = json["posts"].as_array().unwrap();
    assert_eq!(posts.len(), 3);

    assert_eq!(posts[0]["slug"], "first");
    assert_eq!(posts[0]["date"], "2024-01-01");
    assert_eq!(posts[0]["tags"], serde_json::json!(["Systems"]));
    assert_eq!(posts[0]["previous"], Value::Null);
    assert_eq!(posts[0]["next"], "second");

    assert_eq!(posts[1]["isTodayLearned"], true);
    assert_eq!(posts[1]["next"], Value::Null);

    assert_eq!(posts[2]["previous"], "first");
    assert_eq!(posts[2]["staticmanEntries"][0]["_id"], "c1");
}

#[test]
fn test_build_to_file() {
    let temp = TempDir::new().unwrap();
    populate(&temp);

    blogforge_cmd()
        .current_dir(temp.path())
        .args(["build", "--output", "_site/data/blog.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote site data to"));

    let written = fs::read_to_string(temp.path().join("_site/data/blog.json")).unwrap();
    let json: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(json["posts"].as_array().unwrap().len(), 3);
}

#[test]
fn test_build_invalid_tag_fails_without_output() {
    let temp = TempDir::new().unwrap();
    populate(&temp);
    write_post(temp.path(), "bad", "2024-01-04", &["Gardening"], false);

    blogforge_cmd()
        .current_dir(temp.path())
        .args(["build", "--output", "blog.json"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Gardening"));

    assert!(!temp.path().join("blog.json").exists());
}

#[test]
fn test_build_duplicate_slug_fails() {
    let temp = TempDir::new().unwrap();
    populate(&temp);

    let bundle = temp.path().join("src/posts/first");
    fs::create_dir_all(&bundle).unwrap();
    fs::write(bundle.join("index.md"), "---\ndate: 2024-01-05\n---\n").unwrap();

    blogforge_cmd()
        .current_dir(temp.path())
        .arg("build")
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("Duplicate post slug 'first'"))
        .stderr(predicate::str::contains("index.md"));
}
