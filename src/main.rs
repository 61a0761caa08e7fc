use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    youtube_comments_lib::run().await
}
