// Plain-text rendering of parsed records

use std::fmt::Write as _;
use std::path::Path;

use super::errors::FetchError;
use super::models::{ChatMessageRecord, CommentRecord};

pub fn render_comments(comments: &[CommentRecord]) -> String {
    let mut out = String::new();
    for c in comments {
        let _ = write!(out, "{}:\n{}\n\n", c.author, c.text);
    }
    out
}

pub fn render_chat(messages: &[ChatMessageRecord]) -> String {
    let mut out = String::new();
    for m in messages {
        if m.timestamp.is_empty() {
            let _ = writeln!(out, "{}: {}", m.author, m.text);
        } else {
            let _ = writeln!(out, "[{}] {}: {}", m.timestamp, m.author, m.text);
        }
    }
    out
}

/// Write rendered text, replacing whatever was there
pub async fn write_text(path: &Path, contents: &str) -> Result<(), FetchError> {
    tokio::fs::write(path, contents).await?;
    Ok(())
}
