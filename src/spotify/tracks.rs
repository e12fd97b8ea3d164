use crate::{
    config,
    types::{Page, Track, TrackItem},
};

/// URL of the first page of the user's liked songs.
pub fn liked_songs_url(limit: u64) -> String {
    format!(
        "{uri}/me/tracks?limit={limit}",
        uri = config::spotify_apiurl(),
        limit = limit
    )
}

/// URL of the first page of the user's top tracks.
pub fn top_tracks_url(limit: u64) -> String {
    format!(
        "{uri}/me/top/tracks?limit={limit}",
        uri = config::spotify_apiurl(),
        limit = limit
    )
}

/// Retrieves a single track by id, used to resolve display metadata before
/// a download is triggered.
pub async fn get_track(token: &str, track_id: &str) -> Result<Track, reqwest::Error> {
    let api_url = format!(
        "{uri}/tracks/{id}",
        uri = config::spotify_apiurl(),
        id = track_id
    );
    super::get_json(&api_url, token).await
}

/// Retrieves one page of the user's liked songs.
pub async fn get_liked_songs_page(
    token: &str,
    url: &str,
) -> Result<Page<TrackItem>, reqwest::Error> {
    super::get_json(url, token).await
}

/// Retrieves one page of the user's top tracks. Unlike the saved-track
/// endpoints, items here are bare tracks without a wrapper object.
pub async fn get_top_tracks_page(token: &str, url: &str) -> Result<Page<Track>, reqwest::Error> {
    super::get_json(url, token).await
}
