use std::{path::PathBuf, sync::Arc};

use tabled::Table;
use tokio::sync::Mutex;

use crate::{
    downloader::{self, Venv},
    error,
    errors::DownloadError,
    info,
    management::{DownloadJob, DownloadRegistry, JobStatus, JobUpdate, SettingsStore},
    spotify, success,
    types::DownloadTableRow,
    utils, warning,
};

use super::{require_session, spinner};

/// Downloads a single track by id, URL, or URI.
pub async fn download_track(track: String, output: Option<PathBuf>) {
    let (settings, _credentials, token) = require_session().await;
    let folder = resolve_folder(&settings, output);

    let track_id = utils::extract_spotify_id(&track);

    let pb = spinner("Fetching track...");
    let meta = spotify::tracks::get_track(&token, &track_id).await;
    pb.finish_and_clear();

    let meta = match meta {
        Ok(t) => t,
        Err(e) => error!("Failed to fetch track details: {}", e),
    };

    let job = DownloadJob::track(&track_id, &meta.name, &meta.artist_names());
    let url = meta
        .external_urls
        .spotify
        .clone()
        .unwrap_or_else(|| utils::track_url(&track_id));

    run(job, &url, &folder).await;
}

/// Downloads a whole playlist as one aggregated job. spotdl resolves the
/// individual tracks itself, so the playlist URL is handed over as-is.
pub async fn download_playlist(playlist: String, output: Option<PathBuf>) {
    let (settings, _credentials, token) = require_session().await;
    let folder = resolve_folder(&settings, output);

    let playlist_id = utils::extract_spotify_id(&playlist);

    let pb = spinner("Fetching playlist...");
    let meta = spotify::playlists::get_playlist(&token, &playlist_id).await;
    pb.finish_and_clear();

    let meta = match meta {
        Ok(p) => p,
        Err(e) => error!("Failed to fetch playlist details: {}", e),
    };

    let job = DownloadJob::playlist(&playlist_id, &meta.name);
    let url = utils::playlist_url(&playlist_id);

    run(job, &url, &folder).await;
}

/// Destination folder: the `--output` override wins, otherwise the
/// configured default. Neither set is a hard error before any job exists.
fn resolve_folder(settings: &SettingsStore, output: Option<PathBuf>) -> PathBuf {
    match output.or_else(|| settings.downloads_folder()) {
        Some(folder) => folder,
        None => error!("{}", DownloadError::FolderNotConfigured),
    }
}

async fn run(job: DownloadJob, url: &str, folder: &PathBuf) {
    let venv = Venv::default_location();
    let download_id = job.download_id.clone();
    let display_name = job.display_name.clone();

    let registry = Arc::new(Mutex::new(DownloadRegistry::new()));
    registry.lock().await.add(job);

    info!("Downloading {} to {}", display_name, folder.display());

    let result = downloader::run_job(&venv, url, folder, &registry, &download_id).await;

    let outcome = match result {
        Ok(o) => o,
        Err(e) => {
            let mut reg = registry.lock().await;
            reg.update(&download_id, JobUpdate::failed(e.to_string(), 0));
            drop(reg);
            print_downloads(&registry).await;
            error!("{}", e);
        }
    };

    print_downloads(&registry).await;

    match outcome.status {
        JobStatus::Completed => success!("Download finished in {}s.", outcome.elapsed_secs),
        JobStatus::Canceled => warning!("Download canceled."),
        _ => {
            if outcome.needs_rebuild {
                warning!("The Python environment looks broken. Run `spotwire env rebuild` and retry.");
            }
            error!("Download failed. See the table above for details.");
        }
    }
}

/// Prints the session's download records as a table.
async fn print_downloads(registry: &Arc<Mutex<DownloadRegistry>>) {
    let reg = registry.lock().await;
    let table_rows: Vec<DownloadTableRow> = reg
        .list()
        .iter()
        .map(|job| DownloadTableRow {
            track: if job.artist.is_empty() {
                job.display_name.clone()
            } else {
                format!("{} - {}", job.artist, job.display_name)
            },
            status: match &job.error {
                Some(err) if job.status == JobStatus::Failed => {
                    format!("{}: {}", job.status, first_line(err))
                }
                _ => job.status.to_string(),
            },
            started: utils::format_start_time(job.start_time),
            elapsed: job
                .elapsed
                .map(|s| format!("{}s", s))
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect();

    if table_rows.is_empty() {
        return;
    }

    let table = Table::new(table_rows);
    println!("{}", table);
}

/// Error details can span many lines of Python traceback; the table only
/// shows the first.
fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or(text).trim()
}
