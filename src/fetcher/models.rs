// Common data models for comment and live chat fetches

use std::fmt;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::FetchError;

lazy_static! {
    static ref VIDEO_ID_RE: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap();
}

/// Which resource a fetch targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Comments,
    LiveChat,
}

impl ResourceKind {
    /// Prefix used for persisted artifacts (`comments_<id>.json`)
    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Comments => "comments",
            Self::LiveChat => "livechat",
        }
    }

    /// yt-dlp flags selecting what gets written
    pub fn mode_args(&self) -> &'static [&'static str] {
        match self {
            Self::Comments => &["--write-comments"],
            Self::LiveChat => &["--write-subs", "--sub-langs", "live_chat"],
        }
    }

    /// Output template handed to yt-dlp, relative to a scratch directory
    pub fn output_template(&self, video_id: &VideoId) -> String {
        match self {
            Self::Comments => format!("{}.comments.json", video_id),
            Self::LiveChat => format!("{}.livechat", video_id),
        }
    }

    /// Suffix yt-dlp appends to the template for the file we consume
    pub fn written_suffix(&self) -> &'static str {
        match self {
            Self::Comments => ".info.json",
            Self::LiveChat => ".live_chat.json",
        }
    }

    /// Human-readable name for messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Comments => "comments",
            Self::LiveChat => "live chat",
        }
    }

    /// Persisted raw artifact location
    pub fn raw_path(&self, output_dir: &Path, video_id: &VideoId) -> PathBuf {
        output_dir.join(format!("{}_{}.json", self.file_prefix(), video_id))
    }

    /// Formatted text location
    pub fn text_path(&self, output_dir: &Path, video_id: &VideoId) -> PathBuf {
        output_dir.join(format!("{}_{}.txt", self.file_prefix(), video_id))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Validated 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    /// Validate a raw command-line identifier.
    ///
    /// A single leading `--` is stripped first; shells and argument parsers
    /// need it to pass IDs that start with a dash.
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let candidate = raw.strip_prefix("--").unwrap_or(raw);
        if VIDEO_ID_RE.is_match(candidate) {
            Ok(Self(candidate.to_string()))
        } else {
            Err(FetchError::InvalidVideoId(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw yt-dlp output persisted under the output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawArtifact {
    pub kind: ResourceKind,
    pub path: PathBuf,
}

/// Single top-level comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub author: String,
    pub text: String,
}

/// Single chat replay message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageRecord {
    pub author: String,
    pub text: String,
    /// Offset into the stream as shown by YouTube (e.g. "1:02:03"), may be empty
    pub timestamp: String,
}

/// Result of fetching comments and live chat together.
///
/// Each side is `None` when its own pipeline failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchAllResult {
    pub comments: Option<PathBuf>,
    pub livechat: Option<PathBuf>,
}

impl FetchAllResult {
    pub fn is_complete(&self) -> bool {
        self.comments.is_some() && self.livechat.is_some()
    }
}
