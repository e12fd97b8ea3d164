use crate::{
    config,
    types::{Page, Playlist, TrackItem},
};

/// URL of the first page of the user's playlists.
pub fn playlists_url(limit: u64) -> String {
    format!(
        "{uri}/me/playlists?limit={limit}",
        uri = config::spotify_apiurl(),
        limit = limit
    )
}

/// URL of the first page of a playlist's tracks.
pub fn playlist_tracks_url(playlist_id: &str, limit: u64) -> String {
    format!(
        "{uri}/playlists/{id}/tracks?limit={limit}",
        uri = config::spotify_apiurl(),
        id = playlist_id,
        limit = limit
    )
}

/// Retrieves one page of the user's playlists.
///
/// `url` is either the value of [`playlists_url`] or a `next` cursor from a
/// previous page. Aggregation across pages is left to the caller.
pub async fn get_playlists_page(token: &str, url: &str) -> Result<Page<Playlist>, reqwest::Error> {
    super::get_json(url, token).await
}

/// Retrieves a playlist's metadata (name, owner, track count).
pub async fn get_playlist(token: &str, playlist_id: &str) -> Result<Playlist, reqwest::Error> {
    let api_url = format!(
        "{uri}/playlists/{id}",
        uri = config::spotify_apiurl(),
        id = playlist_id
    );
    super::get_json(&api_url, token).await
}

/// Retrieves one page of a playlist's tracks.
///
/// Entries with a null `track` (removed or local-only) are preserved as-is;
/// callers filter them when rendering.
pub async fn get_playlist_tracks_page(
    token: &str,
    url: &str,
) -> Result<Page<TrackItem>, reqwest::Error> {
    super::get_json(url, token).await
}
