//! Integration tests for comments command

#![allow(deprecated)]

use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

mod common;
use common::{blogforge_cmd, init_site, write_comment, write_post};

fn thread_json(temp: &TempDir, slug: &str) -> Value {
    let output = blogforge_cmd()
        .current_dir(temp.path())
        .args(["comments", slug, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_comments_thread_ordering() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    write_post(temp.path(), "hello", "2024-01-01", &["Systems"], false);

    write_comment(
        temp.path(),
        "hello",
        "a.json",
        r#"{"_id": "c1", "message": "hi", "date": 100, "name": "Ada"}"#,
    );
    write_comment(
        temp.path(),
        "hello",
        "b.json",
        r#"{"_id": "c2", "parent": "c1", "message": "reply1", "date": 200}"#,
    );
    write_comment(
        temp.path(),
        "hello",
        "c.json",
        r#"{"_id": "c3", "parent": "c1", "message": "reply2", "date": 150}"#,
    );

    let json = thread_json(&temp, "hello");
    let thread = json.as_array().unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0]["_id"], "c1");
    assert_eq!(thread[0]["name"], "Ada");
    assert_eq!(thread[0]["message"], "<p>hi</p>\n");

    let children = thread[0]["children"].as_array().unwrap();
    let ids: Vec<&str> = children.iter().map(|c| c["_id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["c2", "c3"]);
}

#[test]
fn test_comments_top_level_oldest_first() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    write_post(temp.path(), "hello", "2024-01-01", &[], false);

    write_comment(
        temp.path(),
        "hello",
        "a.json",
        r#"{"_id": "c1", "message": "later", "date": "300"}"#,
    );
    write_comment(
        temp.path(),
        "hello",
        "b.json",
        r#"{"_id": "c2", "parent": "", "message": "earlier", "date": 100}"#,
    );

    let json = thread_json(&temp, "hello");
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["c2", "c1"]);
}

#[test]
fn test_comments_orphan_dropped() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    write_post(temp.path(), "hello", "2024-01-01", &[], false);

    write_comment(
        temp.path(),
        "hello",
        "a.json",
        r#"{"_id": "c1", "parent": "ghost", "message": "lost", "date": 100}"#,
    );

    assert_eq!(thread_json(&temp, "hello"), Value::Array(vec![]));
}

#[test]
fn test_comments_markup_is_sanitized() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    write_post(temp.path(), "hello", "2024-01-01", &[], false);

    write_comment(
        temp.path(),
        "hello",
        "a.json",
        r#"{"_id": "c1", "message": "<script>alert(1)</script> [x](javascript:alert(1))", "date": 100}"#,
    );

    let json = thread_json(&temp, "hello");
    let message = json[0]["message"].as_str().unwrap();
    assert!(!message.contains("<script"));
    assert!(!message.contains("javascript:"));
}

#[test]
fn test_comments_text_output() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    write_post(temp.path(), "hello", "2024-01-01", &[], false);

    write_comment(
        temp.path(),
        "hello",
        "a.json",
        r#"{"_id": "c1", "message": "hi", "date": 100, "name": "Ada"}"#,
    );

    blogforge_cmd()
        .current_dir(temp.path())
        .args(["comments", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1970-01-01 00:01  Ada (c1)"))
        .stdout(predicate::str::contains("<p>hi</p>"));
}

#[test]
fn test_comments_none() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    write_post(temp.path(), "quiet", "2024-01-01", &[], false);

    blogforge_cmd()
        .current_dir(temp.path())
        .args(["comments", "quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No comments"));
}

#[test]
fn test_comments_unknown_post() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());

    blogforge_cmd()
        .current_dir(temp.path())
        .args(["comments", "missing"])
        .assert()
        .failure()
        .code(6)
        .stderr(predicate::str::contains("Post not found: missing"));
}

#[test]
fn test_comments_malformed_entry() {
    let temp = TempDir::new().unwrap();
    init_site(temp.path());
    write_post(temp.path(), "hello", "2024-01-01", &[], false);

    write_comment(temp.path(), "hello", "a.json", r#"{"_id": "c1", "date": 100}"#);

    blogforge_cmd()
        .current_dir(temp.path())
        .args(["comments", "hello"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("a.json"));
}
