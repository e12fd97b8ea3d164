//! # CLI Module
//!
//! User-facing command implementations. Each command coordinates the
//! management layer (settings, token, download registry), the Spotify API
//! fetchers, and the downloader, and renders results as tables or status
//! lines.
//!
//! ## Command Categories
//!
//! - **Authentication**: [`auth`], [`logout`]
//! - **Configuration**: [`set_credentials`], [`set_folder`], [`show_config`]
//! - **Browsing**: [`profile`], [`list_playlists`], [`list_tracks`],
//!   [`liked_songs`], [`top_tracks`]
//! - **Downloads**: [`download_track`], [`download_playlist`]
//! - **Environment**: [`env_check`], [`env_setup`], [`env_rebuild`]
//!
//! ## Authentication state handling
//!
//! Commands that need the API resolve their session through
//! [`require_session`]: missing credentials route the user to
//! `spotwire config set` (the authorize URL is never built in that case),
//! a missing token routes to `spotwire auth`, and an expired token is
//! refreshed transparently before falling back to the login hint.

mod auth;
mod config;
mod download;
mod env;
mod library;
mod playlists;
mod user;

pub use auth::auth;
pub use auth::logout;
pub use config::set_credentials;
pub use config::set_folder;
pub use config::show_config;
pub use download::download_playlist;
pub use download::download_track;
pub use env::env_check;
pub use env::env_rebuild;
pub use env::env_setup;
pub use library::liked_songs;
pub use library::top_tracks;
pub use playlists::list_playlists;
pub use playlists::list_tracks;
pub use user::profile;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    error,
    management::{SettingsStore, TokenManager},
    types::Credentials,
};

/// Loads settings and a valid access token, exiting with guidance when
/// configuration or authentication is missing.
pub(crate) async fn require_session() -> (SettingsStore, Credentials, String) {
    let settings = match SettingsStore::load().await {
        Ok(s) => s,
        Err(e) => error!("Failed to load settings. Err: {}", e),
    };

    let credentials = match settings.credentials() {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run spotwire auth\n Error: {}",
                e
            );
        }
    };

    let token = match token_mgr.get_valid_token(&credentials).await {
        Ok(t) => t,
        Err(e) => error!("{}", e),
    };

    (settings, credentials, token)
}

/// Standard progress spinner used by all network-bound commands.
pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
