pub mod cli;
pub mod fetcher;

pub use cli::run;
pub use fetcher::{
    ArtifactSource, ChatMessageRecord, CommentFetcher, CommentRecord, FetchAllResult, FetchConfig,
    FetchError, ResourceKind, VideoId,
};
