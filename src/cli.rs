// Command-line front end

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::fetcher::{
    CommentFetcher, FetchConfig, FetchError, ResourceKind, ToolProbe, VideoId,
};

#[derive(Debug, Parser)]
#[command(
    name = "youtube-comments",
    version,
    disable_help_subcommand = true,
    about = "Dump YouTube comments and live chat replays to text files",
    long_about = "Fetch comments and live chat replays through yt-dlp and save them as plain text.",
    after_help = "Settings are resolved in order by defaults, --config file, environment variables, then flags."
)]
pub struct Cli {
    #[arg(long, global = true, value_name = "DIR", help = "Directory for raw JSON and text output")]
    output_dir: Option<PathBuf>,
    #[arg(long = "youtube-dl", global = true, value_name = "PATH", help = "yt-dlp executable")]
    youtube_dl: Option<String>,
    #[arg(long, global = true, value_name = "SECONDS", help = "Timeout for each yt-dlp run")]
    timeout: Option<u64>,
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        help = "Directory containing a cookies.txt to pass to yt-dlp"
    )]
    cookies: Option<PathBuf>,
    #[arg(long, global = true, value_name = "FILE", help = "JSON config file")]
    config: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Log debug output to stderr")]
    verbose: bool,
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Fetch comments and save them to a text file
    FetchComments(VideoArg),
    /// Fetch the live chat replay and save it to a text file
    FetchLivechat(VideoArg),
    /// Fetch both comments and live chat into separate text files
    FetchAll(VideoArg),
    /// Download comments and keep the raw JSON only
    DownloadComments(VideoArg),
    /// Turn previously downloaded comments JSON into text
    ParseComments(VideoArg),
    /// Turn previously downloaded live chat JSON into text
    ParseLivechat(VideoArg),
    /// Show where yt-dlp was found and its version
    CheckTool,
}

#[derive(Debug, Args)]
struct VideoArg {
    /// The YouTube video ID (prefix with `--` if it starts with a dash)
    #[arg(allow_hyphen_values = true)]
    video_id: String,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(hint) = e.suggestion() {
                eprintln!("\n{}", hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> Result<FetchConfig, FetchError> {
    let mut config = FetchConfig::default();
    if let Some(path) = &cli.config {
        config = config.merge_file(path)?;
    }
    Ok(apply_flags(config.merge_env()?, cli))
}

fn apply_flags(mut config: FetchConfig, cli: &Cli) -> FetchConfig {
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_directory(dir.clone());
    }
    if let Some(path) = &cli.youtube_dl {
        config = config.with_youtube_dl_path(path.clone());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(secs);
    }
    if cli.cookies.is_some() {
        config = config.with_cookies_path(cli.cookies.clone());
    }
    config
}

async fn execute(cli: Cli) -> Result<(), FetchError> {
    let config = build_config(&cli)?;

    if let CliCommand::CheckTool = cli.command {
        let configured = config.youtube_dl_path.clone();
        let info = ToolProbe::new(configured).probe_async().await?;
        return match (&info.path, &info.version) {
            (Some(path), version) => {
                println!(
                    "{} found at {} (version {})",
                    info.name,
                    path,
                    version.as_deref().unwrap_or("unknown")
                );
                Ok(())
            }
            (None, _) => Err(FetchError::ToolNotFound(info.name)),
        };
    }

    let fetcher = CommentFetcher::new(config);

    match cli.command {
        CliCommand::FetchComments(arg) => {
            let id = VideoId::parse(&arg.video_id)?;
            println!("Fetching comments for video ID: {}", id);
            let path = fetcher.fetch_comments(&id).await?;
            println!("Comments saved to: {}", path.display());
        }
        CliCommand::FetchLivechat(arg) => {
            let id = VideoId::parse(&arg.video_id)?;
            println!("Fetching live chat for video ID: {}", id);
            let path = fetcher.fetch_live_chat(&id).await?;
            println!("Live chat saved to: {}", path.display());
        }
        CliCommand::FetchAll(arg) => {
            let id = VideoId::parse(&arg.video_id)?;
            println!("Fetching comments and live chat for video ID: {}", id);
            let result = fetcher.fetch_both(&id).await?;
            match &result.comments {
                Some(path) => println!("Comments saved to: {}", path.display()),
                None => eprintln!("Warning: Could not fetch comments for this video."),
            }
            match &result.livechat {
                Some(path) => println!("Live chat saved to: {}", path.display()),
                None => eprintln!("Warning: Could not fetch live chat for this video."),
            }
        }
        CliCommand::DownloadComments(arg) => {
            let id = VideoId::parse(&arg.video_id)?;
            println!("Downloading comments for video ID: {}", id);
            let path = fetcher.download_comments(&id).await?;
            println!("Comments downloaded and saved to: {}", path.display());
        }
        CliCommand::ParseComments(arg) => {
            let id = VideoId::parse(&arg.video_id)?;
            let raw = fetcher.raw_path(ResourceKind::Comments, &id);
            let path = fetcher.parse_comments(&id, &raw).await?;
            println!("Comments parsed and saved to: {}", path.display());
        }
        CliCommand::ParseLivechat(arg) => {
            let id = VideoId::parse(&arg.video_id)?;
            let raw = fetcher.raw_path(ResourceKind::LiveChat, &id);
            let path = fetcher.parse_live_chat(&id, &raw).await?;
            println!("Live chat parsed and saved to: {}", path.display());
        }
        CliCommand::CheckTool => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("youtube-comments").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_subcommand_names() {
        for name in [
            "fetch-comments",
            "fetch-livechat",
            "fetch-all",
            "download-comments",
            "parse-comments",
            "parse-livechat",
        ] {
            let cli = parse(&[name, "dQw4w9WgXcQ"]);
            assert!(!matches!(cli.command, CliCommand::CheckTool), "{name}");
        }
        assert!(matches!(parse(&["check-tool"]).command, CliCommand::CheckTool));
    }

    #[test]
    fn test_hyphen_video_id() {
        let cli = parse(&["fetch-comments", "--", "-abcdefghij"]);
        let CliCommand::FetchComments(arg) = cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(VideoId::parse(&arg.video_id).unwrap().as_str(), "-abcdefghij");
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "fetch-all",
            "dQw4w9WgXcQ",
            "--output-dir",
            "/tmp/yt",
            "--youtube-dl",
            "/opt/yt-dlp",
            "--timeout",
            "42",
            "--cookies",
            "/secrets",
        ]);
        let config = apply_flags(FetchConfig::default().with_timeout(7), &cli);
        assert_eq!(config.output_directory, PathBuf::from("/tmp/yt"));
        assert_eq!(config.youtube_dl_path, "/opt/yt-dlp");
        assert_eq!(config.command_timeout, 42);
        assert_eq!(config.cookies_path, Some(PathBuf::from("/secrets")));
    }

    #[test]
    fn test_absent_flags_keep_config() {
        let cli = parse(&["check-tool"]);
        let base = FetchConfig::default().with_timeout(7);
        assert_eq!(apply_flags(base.clone(), &cli), base);
    }

    #[tokio::test]
    async fn test_invalid_video_id_rejected_before_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_string_lossy().to_string();
        let cli = parse(&["fetch-comments", "bad", "--output-dir", &out, "--youtube-dl", "no-such-tool-4242"]);
        assert!(matches!(execute(cli).await, Err(FetchError::InvalidVideoId(_))));
    }

    #[tokio::test]
    async fn test_check_tool_reports_missing_binary() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("yt-dlp").to_string_lossy().to_string();
        let cli = parse(&["check-tool", "--youtube-dl", &tool]);
        assert!(matches!(execute(cli).await, Err(FetchError::ToolNotFound(name)) if name == "yt-dlp"));
    }

    #[tokio::test]
    async fn test_parse_comments_without_download() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().to_string_lossy().to_string();
        let cli = parse(&["parse-comments", "dQw4w9WgXcQ", "--output-dir", &out]);
        assert!(matches!(execute(cli).await, Err(FetchError::MissingArtifact(_))));
    }

    #[tokio::test]
    async fn test_parse_comments_from_existing_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("comments_dQw4w9WgXcQ.json"),
            r#"{"comments":[{"author":"A","text":"hi"}]}"#,
        )
        .unwrap();
        let out = dir.path().to_string_lossy().to_string();
        let cli = parse(&["parse-comments", "dQw4w9WgXcQ", "--output-dir", &out]);
        execute(cli).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("comments_dQw4w9WgXcQ.txt")).unwrap(),
            "A:\nhi\n\n"
        );
    }
}
