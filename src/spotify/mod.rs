//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by
//! Spotwire: the OAuth 2.0 authorization code flow, the authenticated
//! fetchers for the user profile, playlists, liked songs and top tracks,
//! and the shared request plumbing they sit on.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Management)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code + client secret)
//!     ├── User Profile
//!     ├── Playlists (list, detail, tracks)
//!     └── Library (liked songs, top tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Pagination
//!
//! Every list fetcher is a one-page primitive returning
//! [`crate::types::Page`]; aggregation strategies (fixed page count,
//! load-all) live with the callers via [`crate::utils::collect_pages`],
//! because different views want different strategies.
//!
//! ## Error Handling
//!
//! - Transient 502 Bad Gateway responses are retried after a delay
//! - 401 responses are NOT retried here; callers hold the token manager and
//!   decide whether to refresh and reissue
//! - Token endpoint failures are classified in [`auth`] as
//!   [`crate::errors::AuthError`] variants
//!
//! ## Dependencies
//!
//! - **reqwest** - HTTP client with JSON support
//! - **tokio** - async runtime and sleep for retry delays
//! - **chrono** - token timestamps

pub mod auth;
pub mod playlists;
pub mod tracks;
pub mod user;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

/// Issues a bearer-authenticated GET and deserializes the JSON body.
///
/// Retries 502 Bad Gateway responses after a 10-second delay; every other
/// error is propagated immediately, including 401 (token refresh is the
/// caller's concern).
pub(crate) async fn get_json<T: DeserializeOwned>(
    url: &str,
    token: &str,
) -> Result<T, reqwest::Error> {
    loop {
        let client = Client::new();
        let response = client.get(url).bearer_auth(token).send().await;

        let response = match response {
            Ok(resp) => match resp.error_for_status() {
                Ok(valid_response) => valid_response,
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err); // propagate other errors
                }
            },
            Err(err) => {
                return Err(err);
            } // network or reqwest error
        };

        return response.json::<T>().await;
    }
}
