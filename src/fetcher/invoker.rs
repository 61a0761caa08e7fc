// yt-dlp process invoker
//
// Runs yt-dlp in metadata-only mode against a private scratch directory,
// classifies failures from stderr and copies the produced file to its
// persistent location under the output directory.

use async_trait::async_trait;
use tracing::{debug, info};

use super::config::FetchConfig;
use super::diagnostics::classify_failure;
use super::errors::FetchError;
use super::models::{RawArtifact, ResourceKind, VideoId};
use super::traits::ArtifactSource;
use super::utils::{ensure_dir, run_output_with_timeout};

pub struct YtDlpInvoker {
    config: FetchConfig,
}

impl YtDlpInvoker {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Build command arguments
    pub fn build_args(&self, kind: ResourceKind, video_id: &VideoId, output: &str) -> Vec<String> {
        let mut args = vec!["--skip-download".to_string()];
        args.extend(kind.mode_args().iter().map(|a| a.to_string()));
        args.extend([
            "--no-check-certificate".to_string(),
            "--output".to_string(),
            output.to_string(),
            video_id.watch_url(),
        ]);

        if let Some(cookies) = self.config.cookies_file_path() {
            args.push("--cookies".to_string());
            args.push(cookies.to_string_lossy().to_string());
        }

        args
    }

    pub async fn invoke(
        &self,
        kind: ResourceKind,
        video_id: &VideoId,
    ) -> Result<RawArtifact, FetchError> {
        let scratch = tempfile::Builder::new()
            .prefix("youtube-comments-")
            .tempdir()?;
        let template = scratch.path().join(kind.output_template(video_id));
        let template = template.to_string_lossy().to_string();
        let args = self.build_args(kind, video_id, &template);

        debug!(
            "[yt-dlp] {} {}",
            self.config.youtube_dl_path,
            args.join(" ")
        );

        let output =
            run_output_with_timeout(&self.config.youtube_dl_path, &args, self.config.timeout())
                .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(kind, &output.status.to_string(), &stderr));
        }

        let written = format!("{}{}", template, kind.written_suffix());
        if !tokio::fs::try_exists(&written).await? {
            return Err(FetchError::EmptyResult(kind.label().to_string()));
        }

        ensure_dir(&self.config.output_directory).await?;
        let persisted = kind.raw_path(&self.config.output_directory, video_id);
        tokio::fs::copy(&written, &persisted).await?;
        info!(%kind, video_id = %video_id, path = %persisted.display(), "raw data saved");

        Ok(RawArtifact {
            kind,
            path: persisted,
        })
    }
}

#[async_trait]
impl ArtifactSource for YtDlpInvoker {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn fetch_raw(
        &self,
        kind: ResourceKind,
        video_id: &VideoId,
    ) -> Result<RawArtifact, FetchError> {
        self.invoke(kind, video_id).await
    }
}
