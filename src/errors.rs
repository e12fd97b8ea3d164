//! Error taxonomy for authentication and download orchestration.
//!
//! Authentication failures are terminal for the attempt; callers decide
//! whether to route the user to configuration, re-login, or just report.
//! Download failures attach to the affected job record and never interrupt
//! other jobs.

use std::{fmt, io, path::PathBuf};

#[derive(Debug)]
pub enum AuthError {
    /// No client id/secret configured yet.
    ConfigurationMissing,
    /// The OAuth redirect lacked the `code` query parameter.
    AuthCodeMissing,
    /// Transport-level failure talking to the token endpoint.
    Network(reqwest::Error),
    /// The token endpoint answered with a non-2xx status.
    SpotifyApi(u16),
    /// A 2xx token response that did not carry an `access_token`.
    MissingAccessToken,
    /// Token expired and no refresh token is available.
    TokenExpiredNoRefresh,
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::ConfigurationMissing => {
                write!(
                    f,
                    "no Spotify credentials configured, run `spotwire config set` first"
                )
            }
            AuthError::AuthCodeMissing => {
                write!(f, "OAuth redirect did not carry an authorization code")
            }
            AuthError::Network(e) => write!(f, "network error during token exchange: {}", e),
            AuthError::SpotifyApi(status) => {
                write!(f, "Spotify token endpoint answered with status {}", status)
            }
            AuthError::MissingAccessToken => {
                write!(f, "token response did not contain an access token")
            }
            AuthError::TokenExpiredNoRefresh => {
                write!(
                    f,
                    "access token expired and no refresh token is available, run `spotwire auth`"
                )
            }
        }
    }
}

impl std::error::Error for AuthError {}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err)
    }
}

#[derive(Debug)]
pub enum DownloadError {
    /// The Python virtual environment does not exist at the expected path.
    EnvironmentMissing(PathBuf),
    /// No destination folder configured and none passed on the command line.
    FolderNotConfigured,
    /// Spawning the spotdl subprocess failed.
    Spawn(io::Error),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::EnvironmentMissing(path) => {
                write!(
                    f,
                    "Python environment not found at {}, run `spotwire env setup`",
                    path.display()
                )
            }
            DownloadError::FolderNotConfigured => {
                write!(
                    f,
                    "no downloads folder set, run `spotwire config folder <path>` or pass --output"
                )
            }
            DownloadError::Spawn(e) => write!(f, "failed to start spotdl: {}", e),
        }
    }
}

impl std::error::Error for DownloadError {}

impl From<io::Error> for DownloadError {
    fn from(err: io::Error) -> Self {
        DownloadError::Spawn(err)
    }
}
