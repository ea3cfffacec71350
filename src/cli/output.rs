//! Output formatting utilities

use crate::domain::comments::RenderedComment;

const ANONYMOUS: &str = "anonymous";

/// Format a list of tags for display.
pub fn format_tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return "No tags found".to_string();
    }

    let mut output = String::new();
    for tag in tags {
        output.push_str(tag);
        output.push('\n');
    }

    output
}

/// Format a comment thread for display. Replies are indented under their
/// top-level comment.
pub fn format_comment_thread(thread: &[RenderedComment]) -> String {
    if thread.is_empty() {
        return "No comments".to_string();
    }

    let mut output = String::new();
    for comment in thread {
        push_comment(&mut output, comment, "");
        for reply in comment.children.iter().flatten() {
            push_comment(&mut output, reply, "    ");
        }
    }
    output
}

fn push_comment(output: &mut String, comment: &RenderedComment, indent: &str) {
    let author = comment
        .author
        .get("name")
        .and_then(|v| v.as_str())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(ANONYMOUS);

    output.push_str(&format!(
        "{}{}  {} ({})\n",
        indent,
        comment.date.format("%Y-%m-%d %H:%M"),
        author,
        comment.id
    ));
    for line in comment.message.trim_end().lines() {
        output.push_str(&format!("{}  {}\n", indent, line));
    }
}
