#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::Path;

pub fn blogforge_cmd() -> Command {
    let mut cmd = Command::cargo_bin("blogforge").unwrap();
    cmd.env_remove("BLOGFORGE_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Initialize a site in `root` with the default configuration
pub fn init_site(root: &Path) {
    blogforge_cmd().arg("init").arg(root).assert().success();
}

/// Write a post under the default posts directory
pub fn write_post(root: &Path, slug: &str, date: &str, tags: &[&str], til: bool) {
    let dir = root.join("src/posts");
    fs::create_dir_all(&dir).unwrap();

    let tag_lines: String = tags.iter().map(|t| format!("  - {}\n", t)).collect();
    let contents = format!(
        "---\ntitle: {slug}\ndate: {date}\nisTodayLearned: {til}\ntags:\n{tag_lines}---\n\nBody of {slug}.\n"
    );
    fs::write(dir.join(format!("{}.md", slug)), contents).unwrap();
}

/// Write one comment entry for a post under the default comments directory
pub fn write_comment(root: &Path, slug: &str, file: &str, json: &str) {
    let dir = root.join("src/_data/comments").join(slug);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(file), json).unwrap();
}
