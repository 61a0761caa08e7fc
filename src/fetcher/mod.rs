// Fetcher module - yt-dlp driven comment and live chat retrieval

pub mod comments;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod formatter;
pub mod invoker;
pub mod livechat;
pub mod models;
pub mod orchestrator;
pub mod tools;
pub mod traits;
pub mod utils;

pub use config::FetchConfig;
pub use diagnostics::classify_failure;
pub use errors::FetchError;
pub use invoker::YtDlpInvoker;
pub use models::{ChatMessageRecord, CommentRecord, FetchAllResult, RawArtifact, ResourceKind, VideoId};
pub use orchestrator::CommentFetcher;
pub use tools::{ToolInfo, ToolProbe};
pub use traits::ArtifactSource;
