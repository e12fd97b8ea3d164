use crate::{config, types::User};

/// Retrieves the authenticated user's profile.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
///
/// # Returns
///
/// Returns a `Result` containing the [`User`] profile or the HTTP error.
pub async fn get_profile(token: &str) -> Result<User, reqwest::Error> {
    let api_url = format!("{uri}/me", uri = config::spotify_apiurl());
    super::get_json(&api_url, token).await
}
