// Live chat replay parser
//
// yt-dlp writes the `live_chat` subtitle track as newline-delimited JSON, one
// `replayChatItemAction` per line. The shape is controlled by YouTube and only
// a handful of fields are consumed, so lines are walked as generic JSON values
// and anything unrecognized is skipped.

use std::path::Path;

use serde_json::Value;

use super::errors::FetchError;
use super::models::ChatMessageRecord;

pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Parse a whole NDJSON chat replay.
///
/// Lines are decoded one at a time, so a line that is not valid UTF-8 or not
/// valid JSON is dropped on its own. Blank and irrelevant lines are skipped
/// too. A stream that yields no text messages at all is `NoMessagesFound`.
pub fn parse_live_chat(ndjson: impl AsRef<[u8]>) -> Result<Vec<ChatMessageRecord>, FetchError> {
    let messages: Vec<ChatMessageRecord> = ndjson
        .as_ref()
        .split(|b| *b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .filter_map(|line| serde_json::from_slice::<Value>(line).ok())
        .flat_map(|json| parse_line(&json))
        .collect();

    if messages.is_empty() {
        return Err(FetchError::NoMessagesFound);
    }
    Ok(messages)
}

pub async fn parse_live_chat_file(path: &Path) -> Result<Vec<ChatMessageRecord>, FetchError> {
    let content = tokio::fs::read(path).await?;
    parse_live_chat(content)
}

/// Messages carried by one decoded line, in order
fn parse_line(json: &Value) -> Vec<ChatMessageRecord> {
    let Some(actions) = json
        .pointer("/replayChatItemAction/actions")
        .and_then(Value::as_array)
    else {
        return vec![];
    };

    actions.iter().filter_map(parse_action).collect()
}

fn parse_action(action: &Value) -> Option<ChatMessageRecord> {
    let renderer = action.pointer("/addChatItemAction/item/liveChatTextMessageRenderer")?;
    if !renderer.is_object() {
        return None;
    }

    Some(ChatMessageRecord {
        author: simple_text(renderer, "authorName")
            .unwrap_or(DEFAULT_AUTHOR)
            .to_string(),
        text: message_text(renderer),
        timestamp: simple_text(renderer, "timestampText")
            .unwrap_or_default()
            .to_string(),
    })
}

fn simple_text<'a>(renderer: &'a Value, field: &str) -> Option<&'a str> {
    renderer.get(field)?.get("simpleText")?.as_str()
}

/// Concatenate message runs; emoji runs contribute their emoji id
fn message_text(renderer: &Value) -> String {
    let Some(runs) = renderer.pointer("/message/runs").and_then(Value::as_array) else {
        return String::new();
    };

    runs.iter()
        .filter_map(|run| {
            run.get("text")
                .and_then(Value::as_str)
                .or_else(|| run.pointer("/emoji/emojiId").and_then(Value::as_str))
        })
        .collect()
}
