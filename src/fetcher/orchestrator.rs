// Fetch orchestrator: raw data -> parsed records -> text file
//
// fetch_both runs the comment and chat pipelines side by side. A failing side
// is logged and reported as absent; only when both fail does the call fail.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::comments::parse_comments_file;
use super::config::FetchConfig;
use super::errors::FetchError;
use super::formatter::{render_chat, render_comments, write_text};
use super::invoker::YtDlpInvoker;
use super::livechat::parse_live_chat_file;
use super::models::{FetchAllResult, ResourceKind, VideoId};
use super::traits::ArtifactSource;
use super::utils::ensure_dir;

pub struct CommentFetcher {
    source: Box<dyn ArtifactSource>,
    output_directory: PathBuf,
}

impl CommentFetcher {
    /// Fetcher backed by yt-dlp
    pub fn new(config: FetchConfig) -> Self {
        let output_directory = config.output_directory.clone();
        Self::with_source(Box::new(YtDlpInvoker::new(config)), output_directory)
    }

    pub fn with_source(source: Box<dyn ArtifactSource>, output_directory: PathBuf) -> Self {
        Self {
            source,
            output_directory,
        }
    }

    /// Persisted raw artifact path for a video, whether or not it exists yet
    pub fn raw_path(&self, kind: ResourceKind, video_id: &VideoId) -> PathBuf {
        kind.raw_path(&self.output_directory, video_id)
    }

    pub async fn download(
        &self,
        kind: ResourceKind,
        video_id: &VideoId,
    ) -> Result<PathBuf, FetchError> {
        debug!(source = self.source.name(), %kind, video_id = %video_id, "downloading raw data");
        let artifact = self.source.fetch_raw(kind, video_id).await.map_err(|e| {
            debug!(source = self.source.name(), %kind, "download failed: {}", e);
            e
        })?;
        Ok(artifact.path)
    }

    /// Parse an existing raw artifact and write the formatted text next to it
    pub async fn parse(
        &self,
        kind: ResourceKind,
        video_id: &VideoId,
        raw_path: &Path,
    ) -> Result<PathBuf, FetchError> {
        if !tokio::fs::try_exists(raw_path).await? {
            return Err(FetchError::MissingArtifact(raw_path.to_path_buf()));
        }

        let text = match kind {
            ResourceKind::Comments => render_comments(&parse_comments_file(raw_path).await?),
            ResourceKind::LiveChat => render_chat(&parse_live_chat_file(raw_path).await?),
        };

        ensure_dir(&self.output_directory).await?;
        let output = kind.text_path(&self.output_directory, video_id);
        write_text(&output, &text).await?;
        info!(%kind, video_id = %video_id, path = %output.display(), "text saved");
        Ok(output)
    }

    pub async fn fetch(&self, kind: ResourceKind, video_id: &VideoId) -> Result<PathBuf, FetchError> {
        let raw = self.download(kind, video_id).await?;
        self.parse(kind, video_id, &raw).await
    }

    pub async fn download_comments(&self, video_id: &VideoId) -> Result<PathBuf, FetchError> {
        self.download(ResourceKind::Comments, video_id).await
    }

    pub async fn parse_comments(
        &self,
        video_id: &VideoId,
        json_path: &Path,
    ) -> Result<PathBuf, FetchError> {
        self.parse(ResourceKind::Comments, video_id, json_path).await
    }

    pub async fn fetch_comments(&self, video_id: &VideoId) -> Result<PathBuf, FetchError> {
        self.fetch(ResourceKind::Comments, video_id).await
    }

    pub async fn download_live_chat(&self, video_id: &VideoId) -> Result<PathBuf, FetchError> {
        self.download(ResourceKind::LiveChat, video_id).await
    }

    pub async fn parse_live_chat(
        &self,
        video_id: &VideoId,
        json_path: &Path,
    ) -> Result<PathBuf, FetchError> {
        self.parse(ResourceKind::LiveChat, video_id, json_path).await
    }

    pub async fn fetch_live_chat(&self, video_id: &VideoId) -> Result<PathBuf, FetchError> {
        self.fetch(ResourceKind::LiveChat, video_id).await
    }

    /// Fetch comments and live chat; succeeds when at least one side does
    pub async fn fetch_both(&self, video_id: &VideoId) -> Result<FetchAllResult, FetchError> {
        let (comments, livechat) = tokio::join!(
            self.fetch_comments(video_id),
            self.fetch_live_chat(video_id)
        );

        let result = FetchAllResult {
            comments: Self::keep_success(ResourceKind::Comments, video_id, comments),
            livechat: Self::keep_success(ResourceKind::LiveChat, video_id, livechat),
        };

        if result.comments.is_none() && result.livechat.is_none() {
            return Err(FetchError::AggregateFailure(video_id.to_string()));
        }
        Ok(result)
    }

    fn keep_success(
        kind: ResourceKind,
        video_id: &VideoId,
        outcome: Result<PathBuf, FetchError>,
    ) -> Option<PathBuf> {
        match outcome {
            Ok(path) => Some(path),
            Err(e) if e.is_content_unavailable() => {
                info!(%kind, video_id = %video_id, "{} not available: {}", kind, e);
                None
            }
            Err(e) => {
                warn!(%kind, video_id = %video_id, "✗ {} failed: {}", kind, e);
                None
            }
        }
    }
}
