// Raw artifact source trait definition

use async_trait::async_trait;

use super::errors::FetchError;
use super::models::{RawArtifact, ResourceKind, VideoId};

/// Something that can produce raw comment or live chat data for a video
#[async_trait]
pub trait ArtifactSource: Send + Sync {
    /// Name of the source (for logging)
    fn name(&self) -> &'static str;

    /// Retrieve the raw data and persist it under its stable name
    async fn fetch_raw(
        &self,
        kind: ResourceKind,
        video_id: &VideoId,
    ) -> Result<RawArtifact, FetchError>;
}
