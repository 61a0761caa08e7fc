// Helper functions for running yt-dlp and managing artifacts

use std::io;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::AsyncReadExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use super::errors::FetchError;

/// Run command with a hard wall-clock limit.
///
/// stdout and stderr are drained concurrently so a chatty child cannot block
/// on a full pipe. When the limit expires the child is killed.
pub async fn run_output_with_timeout(
    program: &str,
    args: &[String],
    limit: Duration,
) -> Result<Output, FetchError> {
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                FetchError::ToolNotFound(format!("{}: {}", program, e))
            }
            _ => FetchError::Io(e),
        })?;

    let mut stdout_pipe = child
        .stdout
        .take()
        .ok_or_else(|| pipe_error(program, "stdout"))?;
    let mut stderr_pipe = child
        .stderr
        .take()
        .ok_or_else(|| pipe_error(program, "stderr"))?;

    let mut stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe.read_to_end(&mut buf).await?;
        Ok::<Vec<u8>, io::Error>(buf)
    });
    let mut stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).await?;
        Ok::<Vec<u8>, io::Error>(buf)
    });

    // Exit alone is not enough: a grandchild can keep the pipes open.
    let finished = timeout(limit, async {
        let status = child.wait().await?;
        let stdout = (&mut stdout_task).await.map_err(join_error)??;
        let stderr = (&mut stderr_task).await.map_err(join_error)??;
        Ok::<Output, FetchError>(Output { status, stdout, stderr })
    })
    .await;

    match finished {
        Ok(output) => output,
        Err(_) => {
            let _ = child.kill().await;
            stdout_task.abort();
            stderr_task.abort();
            Err(FetchError::Timeout {
                seconds: limit.as_secs(),
            })
        }
    }
}

fn pipe_error(program: &str, stream: &str) -> FetchError {
    FetchError::Io(io::Error::new(
        io::ErrorKind::BrokenPipe,
        format!("Failed to capture {} from {}", stream, program),
    ))
}

fn join_error(e: tokio::task::JoinError) -> FetchError {
    FetchError::Io(io::Error::new(io::ErrorKind::Other, e))
}

/// Create the output directory (and parents) if missing
pub async fn ensure_dir(dir: &Path) -> Result<(), FetchError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        FetchError::Io(io::Error::new(
            e.kind(),
            format!("Directory \"{}\" was not created: {}", dir.display(), e),
        ))
    })
}
