// Fetch configuration: defaults, optional JSON file, environment overrides

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::errors::FetchError;

pub const DEFAULT_YOUTUBE_DL: &str = "yt-dlp";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_COOKIES_FILE: &str = "cookies.txt";

pub const ENV_OUTPUT_DIR: &str = "YOUTUBE_COMMENTS_OUTPUT_DIR";
pub const ENV_YOUTUBE_DL: &str = "YOUTUBE_DL_PATH";
pub const ENV_TIMEOUT: &str = "YOUTUBE_COMMENTS_TIMEOUT";
pub const ENV_COOKIES: &str = "YOUTUBE_COMMENTS_COOKIES_PATH";

/// Configuration consumed by the fetch pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Where raw JSON and formatted text land
    pub output_directory: PathBuf,
    /// yt-dlp executable name or path
    pub youtube_dl_path: String,
    /// Wall-clock limit per yt-dlp run, in seconds
    pub command_timeout: u64,
    /// Directory that may hold a Netscape cookies file
    pub cookies_path: Option<PathBuf>,
    /// File name looked up inside `cookies_path`
    pub cookies_file: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            output_directory: default_output_dir(),
            youtube_dl_path: DEFAULT_YOUTUBE_DL.to_string(),
            command_timeout: DEFAULT_TIMEOUT_SECS,
            cookies_path: None,
            cookies_file: DEFAULT_COOKIES_FILE.to_string(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("youtube-comments"))
        .unwrap_or_else(|| PathBuf::from("output"))
}

/// Partial config as stored in a JSON file; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    output_directory: Option<PathBuf>,
    youtube_dl_path: Option<String>,
    command_timeout: Option<u64>,
    cookies_path: Option<PathBuf>,
    cookies_file: Option<String>,
}

impl FetchConfig {
    pub fn with_output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = dir.into();
        self
    }

    pub fn with_youtube_dl_path(mut self, path: impl Into<String>) -> Self {
        self.youtube_dl_path = path.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.command_timeout = seconds;
        self
    }

    pub fn with_cookies_path(mut self, dir: Option<PathBuf>) -> Self {
        self.cookies_path = dir;
        self
    }

    pub fn with_cookies_file(mut self, name: impl Into<String>) -> Self {
        self.cookies_file = name.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout)
    }

    /// Cookies file to pass to yt-dlp, if one is configured and present
    pub fn cookies_file_path(&self) -> Option<PathBuf> {
        let candidate = self.cookies_path.as_ref()?.join(&self.cookies_file);
        candidate.is_file().then_some(candidate)
    }

    /// Merge values from a JSON config file over `self`
    pub fn merge_file(self, path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FetchError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let file: ConfigFile = serde_json::from_str(&content).map_err(|e| {
            FetchError::Config(format!("invalid config file {}: {}", path.display(), e))
        })?;
        Ok(self.merge(file))
    }

    fn merge(mut self, file: ConfigFile) -> Self {
        if let Some(dir) = file.output_directory {
            self.output_directory = dir;
        }
        if let Some(path) = file.youtube_dl_path {
            self.youtube_dl_path = path;
        }
        if let Some(secs) = file.command_timeout {
            self.command_timeout = secs;
        }
        if file.cookies_path.is_some() {
            self.cookies_path = file.cookies_path;
        }
        if let Some(name) = file.cookies_file {
            self.cookies_file = name;
        }
        self
    }

    /// Apply overrides from the process environment
    pub fn merge_env(self) -> Result<Self, FetchError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, FetchError> {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.is_empty()) {
            self.output_directory = PathBuf::from(dir);
        }
        if let Some(path) = lookup(ENV_YOUTUBE_DL).filter(|v| !v.is_empty()) {
            self.youtube_dl_path = path;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT).filter(|v| !v.is_empty()) {
            self.command_timeout = raw.trim().parse().map_err(|_| {
                FetchError::Config(format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT, raw))
            })?;
        }
        if let Some(dir) = lookup(ENV_COOKIES).filter(|v| !v.is_empty()) {
            self.cookies_path = Some(PathBuf::from(dir));
        }
        Ok(self)
    }
}
