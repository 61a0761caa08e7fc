use serde::Serialize;
use std::io;
use std::path::Path;
use std::process::Command;

use super::errors::FetchError;

/// Where and which yt-dlp was found
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub version: Option<String>,
    pub path: Option<String>,
    pub is_available: bool,
}

/// Locates the downloader executable and reads its version
pub struct ToolProbe {
    configured: String,
}

impl ToolProbe {
    pub fn new(configured: impl Into<String>) -> Self {
        Self {
            configured: configured.into(),
        }
    }

    pub fn probe(&self) -> ToolInfo {
        let path = self.detect();
        let version = path.as_deref().and_then(Self::get_version);

        ToolInfo {
            name: self.binary_name().to_string(),
            version,
            is_available: path.is_some(),
            path,
        }
    }

    /// `probe` on the blocking pool; it runs `which` and `--version`
    pub async fn probe_async(self) -> Result<ToolInfo, FetchError> {
        tokio::task::spawn_blocking(move || self.probe())
            .await
            .map_err(|e| FetchError::Io(io::Error::new(io::ErrorKind::Other, e)))
    }

    fn binary_name(&self) -> &str {
        Path::new(&self.configured)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.configured)
    }

    fn detect(&self) -> Option<String> {
        // 1. Explicit path
        if self.configured.contains(std::path::MAIN_SEPARATOR) {
            return Path::new(&self.configured)
                .is_file()
                .then(|| self.configured.clone());
        }

        // 2. Common install locations
        let binary_name = self.binary_name();
        let common_paths = [
            format!("/opt/homebrew/bin/{}", binary_name),
            format!("/usr/local/bin/{}", binary_name),
            format!("/usr/bin/{}", binary_name),
        ];
        if let Some(path) = common_paths.into_iter().find(|p| Path::new(p).exists()) {
            return Some(path);
        }

        // 3. PATH
        match Command::new("which").arg(binary_name).output() {
            Ok(output) if output.status.success() => {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                (!path.is_empty()).then_some(path)
            }
            _ => None,
        }
    }

    fn get_version(path: &str) -> Option<String> {
        match Command::new(path).arg("--version").output() {
            Ok(output) if output.status.success() => {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("yt-dlp");
        let info = ToolProbe::new(missing.to_string_lossy().to_string()).probe();
        assert!(!info.is_available);
        assert!(info.version.is_none());
        assert_eq!(info.name, "yt-dlp");
    }

    #[test]
    fn test_unknown_binary() {
        let info = ToolProbe::new("no-such-yt-dlp-binary-4242").probe();
        assert!(!info.is_available);
        assert!(info.path.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_reads_version() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("yt-dlp");
        std::fs::write(&tool, "#!/bin/sh\necho 2024.08.06\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let info = ToolProbe::new(tool.to_string_lossy().to_string()).probe();
        assert!(info.is_available);
        assert_eq!(info.version.as_deref(), Some("2024.08.06"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_probe_async_from_runtime() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("yt-dlp");
        std::fs::write(&tool, "#!/bin/sh\necho 2025.01.15\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

        let info = ToolProbe::new(tool.to_string_lossy().to_string())
            .probe_async()
            .await
            .unwrap();
        assert_eq!(info.version.as_deref(), Some("2025.01.15"));
    }
}
