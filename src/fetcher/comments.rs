// Comment parser for yt-dlp info JSON

use std::path::Path;

use serde_json::Value;

use super::errors::FetchError;
use super::models::CommentRecord;

pub const DEFAULT_AUTHOR: &str = "Anonymous";
pub const DEFAULT_COMMENT_TEXT: &str = "No comment text";

/// Parse the info JSON document written by `--write-comments`.
///
/// An empty `comments` array is a valid, empty result; a missing one is not.
pub fn parse_comments(json: impl AsRef<[u8]>) -> Result<Vec<CommentRecord>, FetchError> {
    let json: Value = serde_json::from_slice(json.as_ref())?;

    let comments = json
        .get("comments")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            FetchError::MalformedData("No comments found in the downloaded data.".to_string())
        })?;

    Ok(comments.iter().map(parse_comment).collect())
}

fn parse_comment(c: &Value) -> CommentRecord {
    CommentRecord {
        author: c["author"].as_str().unwrap_or(DEFAULT_AUTHOR).to_string(),
        text: c["text"].as_str().unwrap_or(DEFAULT_COMMENT_TEXT).to_string(),
    }
}

pub async fn parse_comments_file(path: &Path) -> Result<Vec<CommentRecord>, FetchError> {
    let content = tokio::fs::read(path).await?;
    parse_comments(content)
}
