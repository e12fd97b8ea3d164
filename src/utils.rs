use std::future::Future;

use chrono::Utc;

use crate::types::Page;

/// Current Unix time in milliseconds, used for job ids and start times.
pub fn now_millis() -> u64 {
    Utc::now().timestamp_millis().max(0) as u64
}

/// Formats a track duration in milliseconds as `m:ss`.
pub fn format_duration(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    format!("{}:{:02}", minutes, seconds)
}

/// Formats a millisecond timestamp as a local wall-clock time (`HH:MM:SS`).
pub fn format_start_time(millis: u64) -> String {
    match chrono::DateTime::from_timestamp_millis(millis as i64) {
        Some(dt) => dt.with_timezone(&chrono::Local).format("%H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

/// Follows `next` links of a paginated list endpoint, aggregating items.
///
/// Pages are requested strictly sequentially because each `next` cursor is
/// only known once the previous page has resolved. Fetching stops when the
/// API reports no further page or when `max_pages` pages have been fetched,
/// whichever comes first; in the capped case the pending cursor is returned
/// so the caller can resume later.
pub async fn collect_pages<T, E, F, Fut>(
    first_url: String,
    max_pages: Option<usize>,
    mut fetch_page: F,
) -> Result<(Vec<T>, Option<String>), E>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Page<T>, E>>,
{
    let mut items = Vec::new();
    let mut next = Some(first_url);
    let mut fetched = 0usize;

    while let Some(url) = next {
        if let Some(max) = max_pages {
            if fetched >= max {
                return Ok((items, Some(url)));
            }
        }

        let page = fetch_page(url).await?;
        items.extend(page.items);
        next = page.next;
        fetched += 1;
    }

    Ok((items, None))
}

/// Accepts a bare Spotify id, an `open.spotify.com` URL, or a `spotify:` URI
/// and returns the bare id. Query strings on share links are stripped.
pub fn extract_spotify_id(input: &str) -> String {
    let trimmed = input.trim();

    if let Some(rest) = trimmed.strip_prefix("spotify:") {
        if let Some(id) = rest.rsplit(':').next() {
            return id.to_string();
        }
    }

    if trimmed.contains("open.spotify.com/") {
        let without_query = trimmed.split('?').next().unwrap_or(trimmed);
        if let Some(id) = without_query.trim_end_matches('/').rsplit('/').next() {
            return id.to_string();
        }
    }

    trimmed.to_string()
}

/// Canonical share URL for a track, as passed to spotdl.
pub fn track_url(id: &str) -> String {
    format!("https://open.spotify.com/track/{}", id)
}

/// Canonical share URL for a playlist, as passed to spotdl.
pub fn playlist_url(id: &str) -> String {
    format!("https://open.spotify.com/playlist/{}", id)
}
