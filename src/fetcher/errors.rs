// Error types for comment and live chat fetches

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Scheduled premiere or stream whose start is reported in hours
    #[error("This video is a future live event that will begin in {0} hours. Comments and live chat are not available yet.")]
    FutureEventHours(u64),

    /// Scheduled premiere or stream whose start is reported in minutes
    #[error("This video is a future live event that will begin in {0} minutes. Comments and live chat are not available yet.")]
    FutureEventMinutes(u64),

    /// Scheduled event without a parsable start time
    #[error("This video is a future live event. Comments and live chat are not available yet.")]
    FutureEventUnknown,

    #[error("Comments are disabled for this video.")]
    CommentsDisabled,

    #[error("This video has no live chat replay.")]
    NoLiveChat,

    /// yt-dlp exited 0 but the expected file was never written
    #[error("yt-dlp finished without producing {0}. The video might not have any or they might be disabled.")]
    EmptyResult(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("No chat messages found in the downloaded live chat data.")]
    NoMessagesFound,

    #[error("Failed to execute yt-dlp: {status}\n\nError Output: {stderr}")]
    GenericFailure { status: String, stderr: String },

    #[error("Failed to fetch both comments and live chat for video {0}")]
    AggregateFailure(String),

    #[error("yt-dlp timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid YouTube video ID '{0}'. It should be 11 characters long and contain only letters, numbers, underscores, and hyphens.")]
    InvalidVideoId(String),

    #[error("Raw data file not found: {}", .0.display())]
    MissingArtifact(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FetchError {
    /// What the user can do about it, when there is anything to do
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::FutureEventHours(_) | Self::FutureEventMinutes(_) | Self::FutureEventUnknown => {
                Some("Try again after the event has started.")
            }
            Self::NoLiveChat => Some(
                "Only past live streams and premieres have a chat replay.\n\
                 Use fetch-comments for regular uploads.",
            ),
            Self::EmptyResult(_) | Self::GenericFailure { .. } => Some(
                "What to try:\n\
                 1) Check the video ID\n\
                 2) Export cookies.txt from a logged-in browser and pass --cookies\n\
                 3) Update yt-dlp",
            ),
            Self::Timeout { .. } => Some("Raise the limit with --timeout or YOUTUBE_COMMENTS_TIMEOUT."),
            Self::ToolNotFound(_) => Some("Install yt-dlp or point --youtube-dl at the executable."),
            Self::MissingArtifact(_) => {
                Some("Download the raw data first using the download-comments command.")
            }
            _ => None,
        }
    }

    /// Whether the failure stems from the video itself rather than the tooling
    pub fn is_content_unavailable(&self) -> bool {
        matches!(
            self,
            Self::FutureEventHours(_)
                | Self::FutureEventMinutes(_)
                | Self::FutureEventUnknown
                | Self::CommentsDisabled
                | Self::NoLiveChat
                | Self::EmptyResult(_)
                | Self::NoMessagesFound
        )
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedData(err.to_string())
    }
}
