//! Configuration management for Spotwire.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage runtime
//! parameters such as Spotify endpoint URLs and the local callback server address.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults
//!
//! Spotify credentials (client id, client secret, redirect URI) deliberately do
//! not live here: they are user data entered through `spotwire config set` and
//! are owned by [`crate::management::SettingsStore`], from which an explicit
//! [`crate::types::Credentials`] value is constructed and passed to the
//! components that need it.

use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `spotwire/.env`. This allows users to override
/// endpoint URLs or the callback server address without hardcoding values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotwire/.env`
/// - macOS: `~/Library/Application Support/spotwire/.env`
/// - Windows: `%LOCALAPPDATA%/spotwire/.env`
///
/// # Returns
///
/// Returns `Ok(())` if the environment is set up, or an error string if the
/// directory cannot be created. A missing `.env` file is not an error since
/// every variable has a default.
///
/// # Example
///
/// ```
/// use spotwire::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // Every variable has a default, so a missing file is fine.
    let _ = dotenv::from_path(path);
    Ok(())
}

/// Returns the application's local data directory (`<data_local_dir>/spotwire`).
///
/// All persisted state (token cache, settings, the Python virtual environment,
/// the default downloads folder) lives below this directory.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotwire");
    path
}

/// Returns the directory of the managed Python virtual environment.
pub fn venv_dir() -> PathBuf {
    let mut path = data_dir();
    path.push("venv");
    path
}

/// Returns the directory checked for a bundled ffmpeg binary.
///
/// When this directory exists it is prepended to `PATH` for spotdl
/// invocations so the bundled transcoder wins over any system install.
pub fn ffmpeg_dir() -> PathBuf {
    let mut path = data_dir();
    path.push("bin");
    path
}

/// Returns the server address for the local OAuth callback server.
///
/// Retrieves the `SERVER_ADDRESS` environment variable which specifies
/// the address and port where the local HTTP server should bind for
/// handling OAuth callbacks during the authentication flow. Defaults to
/// `127.0.0.1:8888`, matching the default redirect URI.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8888"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string())
}

/// Returns the Spotify OAuth authorization URL.
///
/// Retrieves the `SPOTIFY_API_AUTH_URL` environment variable which contains
/// the base URL for Spotify's OAuth authorization endpoint. This is where
/// users are redirected to grant permissions to the application.
///
/// # Example
///
/// ```
/// let auth_url = spotify_apiauth_url(); // "https://accounts.spotify.com/authorize"
/// ```
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable which contains
/// the URL for exchanging authorization codes for access tokens and for
/// refreshing expired tokens.
///
/// # Example
///
/// ```
/// let token_url = spotify_apitoken_url(); // "https://accounts.spotify.com/api/token"
/// ```
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable which contains the
/// base URL for Spotify's Web API endpoints. This is used for all API
/// operations after authentication.
///
/// # Example
///
/// ```
/// let api_url = spotify_apiurl(); // "https://api.spotify.com/v1"
/// ```
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}

/// Returns the default OAuth redirect URI used when none is configured.
///
/// Must match a redirect URI registered in the Spotify application settings
/// and points at the local callback server started during `spotwire auth`.
pub fn default_redirect_uri() -> String {
    format!("http://{}/callback", server_addr())
}
