use std::{path::Path, process::Stdio, sync::Arc, time::Instant};

use tokio::{io::AsyncReadExt, sync::Mutex, time::Duration};

use crate::{
    errors::DownloadError,
    management::{DownloadRegistry, JobStatus, JobUpdate},
    warning,
};

use super::Venv;

/// After this many seconds without the subprocess exiting, a non-fatal
/// "still running" notice is printed. The process is never killed for
/// running long; playlist downloads routinely take minutes.
pub const LONG_RUNNING_NOTICE_SECS: u64 = 60;

/// Result of one finished (or canceled) spotdl invocation.
#[derive(Debug)]
pub struct JobOutcome {
    pub status: JobStatus,
    pub elapsed_secs: u64,
    pub stderr: String,
    /// The stderr indicated a broken Python environment; the caller should
    /// offer `spotwire env rebuild`.
    pub needs_rebuild: bool,
}

/// Whether a failed run's stderr points at a broken venv rather than a bad
/// URL or network problem. A missing module inside the environment is only
/// fixable by rebuilding it.
pub fn stderr_signals_broken_env(stderr: &str) -> bool {
    stderr.contains("ModuleNotFoundError") || stderr.contains("ImportError")
}

/// Runs `spotdl download <url> --output <folder>` for one job and reflects
/// the subprocess lifecycle into the registry.
///
/// The job moves to `InProgress` once the process is spawned and to exactly
/// one terminal state afterwards:
///
/// - exit code 0 → `Completed`
/// - non-zero exit → `Failed`, with the captured stderr as error detail
/// - Ctrl-C → the child is killed and the job becomes `Canceled` only after
///   the kill has been confirmed
///
/// Spawn failures and a missing environment are reported as errors before
/// any status change; the caller attaches them to the job.
pub async fn run_job(
    venv: &Venv,
    track_url: &str,
    folder: &Path,
    registry: &Arc<Mutex<DownloadRegistry>>,
    download_id: &str,
) -> Result<JobOutcome, DownloadError> {
    let mut cmd = venv.spotdl_command()?;
    cmd.arg("download")
        .arg(track_url)
        .arg("--output")
        .arg(folder)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let started = Instant::now();
    let mut child = cmd.spawn().map_err(DownloadError::Spawn)?;

    {
        let mut reg = registry.lock().await;
        reg.update(download_id, JobUpdate::status(JobStatus::InProgress));
    }

    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();
    let stdout_task = tokio::spawn(read_pipe(stdout_pipe));
    let stderr_task = tokio::spawn(read_pipe(stderr_pipe));

    let notice = tokio::time::sleep(Duration::from_secs(LONG_RUNNING_NOTICE_SECS));
    tokio::pin!(notice);
    let mut notified = false;

    let exit_status = loop {
        tokio::select! {
            status = child.wait() => {
                break Some(status.map_err(DownloadError::Spawn)?);
            }
            _ = tokio::signal::ctrl_c() => {
                warning!("Canceling download...");
                // kill() waits for the process to be reaped, so the status
                // change below happens after confirmed termination.
                let _ = child.kill().await;
                break None;
            }
            _ = &mut notice, if !notified => {
                notified = true;
                warning!(
                    "Download still running after {}s; large playlists can take a while.",
                    LONG_RUNNING_NOTICE_SECS
                );
            }
        }
    };

    let elapsed_secs = started.elapsed().as_secs();
    let stderr = stderr_task.await.unwrap_or_default();
    let _stdout = stdout_task.await.unwrap_or_default();

    let outcome = match exit_status {
        None => {
            let mut reg = registry.lock().await;
            let mut update = JobUpdate::status(JobStatus::Canceled);
            update.elapsed = Some(elapsed_secs);
            reg.update(download_id, update);
            JobOutcome {
                status: JobStatus::Canceled,
                elapsed_secs,
                stderr,
                needs_rebuild: false,
            }
        }
        Some(status) if status.success() => {
            let mut reg = registry.lock().await;
            reg.update(download_id, JobUpdate::completed(elapsed_secs));
            JobOutcome {
                status: JobStatus::Completed,
                elapsed_secs,
                stderr,
                needs_rebuild: false,
            }
        }
        Some(status) => {
            let needs_rebuild = stderr_signals_broken_env(&stderr);
            let detail = if stderr.trim().is_empty() {
                format!("spotdl exited with {}", status)
            } else {
                stderr.trim().to_string()
            };
            let mut reg = registry.lock().await;
            reg.update(download_id, JobUpdate::failed(detail, elapsed_secs));
            JobOutcome {
                status: JobStatus::Failed,
                elapsed_secs,
                stderr,
                needs_rebuild,
            }
        }
    };

    Ok(outcome)
}

async fn read_pipe<R>(pipe: Option<R>) -> String
where
    R: tokio::io::AsyncRead + Unpin,
{
    let Some(mut pipe) = pipe else {
        return String::new();
    };
    let mut buf = String::new();
    let _ = pipe.read_to_string(&mut buf).await;
    buf
}
