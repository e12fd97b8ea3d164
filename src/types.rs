use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Safety margin subtracted from the expiry timestamp when checking token
/// validity, to account for network delays.
pub const TOKEN_EXPIRY_MARGIN_SECS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// Unix timestamp at which the access token expires.
    pub fn expires_at(&self) -> u64 {
        self.obtained_at + self.expires_in
    }

    /// Whether the token is still usable at `now` (Unix seconds), applying
    /// the safety margin. At exactly `expires_at - margin` the token is
    /// already considered expired.
    pub fn is_valid_at(&self, now: u64) -> bool {
        now < self.expires_at().saturating_sub(TOKEN_EXPIRY_MARGIN_SECS)
    }
}

/// Spotify application credentials entered by the user.
///
/// Constructed from the settings store and passed explicitly to every
/// component that needs it; there is no ambient credential state.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Shared state between the auth flow and the callback handler.
///
/// The handler needs the credentials to perform the code exchange and stores
/// the resulting token here for the waiting flow to pick up.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub credentials: Credentials,
    pub token: Option<Token>,
}

/// Successful response of the token endpoint. `refresh_token` may be absent
/// on refresh; `access_token` is optional only so that a malformed 2xx body
/// can be classified instead of failing deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: Option<PlaylistOwner>,
    pub tracks: Option<PlaylistTracksRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    pub total: u64,
}

/// Entry of `/playlists/{id}/tracks` and `/me/tracks`; the wrapped track can
/// be null for removed or local-only entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub artists: Vec<TrackArtist>,
    pub album: Option<TrackAlbum>,
    pub duration_ms: u64,
    pub external_urls: ExternalUrls,
}

impl Track {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub owner: String,
    pub tracks: String,
    pub id: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    #[tabled(rename = "#")]
    pub number: usize,
    pub title: String,
    pub artists: String,
    pub album: String,
    pub duration: String,
}

#[derive(Tabled)]
pub struct DownloadTableRow {
    pub track: String,
    pub status: String,
    pub started: String,
    pub elapsed: String,
}
