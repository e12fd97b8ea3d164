use crate::{
    downloader::{self, Venv},
    error, info, success, warning,
};

use super::spinner;

/// Prints the status of everything a download needs: Python, ffmpeg, and
/// the managed virtual environment.
pub async fn env_check() {
    let pb = spinner("Checking environment...");
    let python = downloader::check_python().await;
    let ffmpeg = downloader::find_ffmpeg();
    let venv = Venv::default_location();
    pb.finish_and_clear();

    if python.compatible {
        success!("Python {} found.", python.version);
    } else {
        warning!("Python: {}", python.version);
        if let Some(message) = &python.message {
            warning!("{}", message);
        }
    }

    match ffmpeg {
        Some(path) => success!("ffmpeg found at {}.", path.display()),
        None => warning!("ffmpeg not found. Install it or place it in the app's bin directory."),
    }

    if venv.exists() {
        success!("spotdl environment ready at {}.", venv.dir().display());
    } else {
        warning!(
            "spotdl environment missing at {}. Run `spotwire env setup`.",
            venv.dir().display()
        );
    }
}

/// Creates the spotdl environment from scratch.
pub async fn env_setup() {
    let venv = Venv::default_location();
    if venv.exists() {
        info!(
            "Environment already exists at {}. Use `spotwire env rebuild` to recreate it.",
            venv.dir().display()
        );
        return;
    }

    let python = downloader::check_python().await;
    if !python.compatible {
        if let Some(message) = &python.message {
            warning!("{}", message);
        }
        error!("No compatible Python found (have: {}).", python.version);
    }

    if let Err(e) = downloader::create_venv(&venv).await {
        error!("Environment setup failed: {}", e);
    }
    success!("spotdl environment ready.");
}

/// Deletes and recreates the spotdl environment.
///
/// Destructive, so it refuses to run without `--yes`.
pub async fn env_rebuild(yes: bool) {
    if !yes {
        error!("Rebuilding deletes the existing environment. Re-run with --yes to confirm.");
    }

    let venv = Venv::default_location();

    info!("Removing environment at {}...", venv.dir().display());
    if let Err(e) = downloader::remove_venv(&venv).await {
        error!("Failed to remove environment: {}", e);
    }

    if let Err(e) = downloader::create_venv(&venv).await {
        error!("Environment rebuild failed: {}", e);
    }
    success!("spotdl environment rebuilt.");
}
