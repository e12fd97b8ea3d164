use tabled::Table;

use crate::{error, info, spotify, types::TrackTableRow, utils, warning};

use super::{require_session, spinner};

const LIKED_PAGE_SIZE: u64 = 50;
const TOP_TRACKS_MAX: u64 = 50;

/// Lists the user's liked songs, `pages` pages at a time.
pub async fn liked_songs(pages: Option<usize>, all: bool) {
    let (_settings, _credentials, token) = require_session().await;

    let pb = spinner("Fetching liked songs...");
    let max_pages = if all { None } else { Some(pages.unwrap_or(1)) };
    let result = utils::collect_pages(
        spotify::tracks::liked_songs_url(LIKED_PAGE_SIZE),
        max_pages,
        |url| {
            let token = token.clone();
            async move { spotify::tracks::get_liked_songs_page(&token, &url).await }
        },
    )
    .await;
    pb.finish_and_clear();

    let (items, next) = match result {
        Ok(r) => r,
        Err(e) => error!("Failed to fetch liked songs: {}", e),
    };

    let table_rows: Vec<TrackTableRow> = items
        .iter()
        .filter_map(|item| item.track.as_ref())
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            number: i + 1,
            title: track.name.clone(),
            artists: track.artist_names(),
            album: track.album.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            duration: utils::format_duration(track.duration_ms),
        })
        .collect();

    if table_rows.is_empty() {
        warning!("No liked songs found.");
        return;
    }

    let table = Table::new(table_rows);
    println!("{}", table);

    if next.is_some() {
        info!("More liked songs available. Re-run with --all or a higher --pages value.");
    }
}

/// Lists the user's top tracks. The endpoint caps its page size at 50, which
/// covers every use of this view, so only the first page is fetched.
pub async fn top_tracks(limit: Option<u64>) {
    let (_settings, _credentials, token) = require_session().await;
    let limit = limit.unwrap_or(20).min(TOP_TRACKS_MAX);

    let pb = spinner("Fetching top tracks...");
    let url = spotify::tracks::top_tracks_url(limit);
    let page = spotify::tracks::get_top_tracks_page(&token, &url).await;
    pb.finish_and_clear();

    let page = match page {
        Ok(p) => p,
        Err(e) => error!("Failed to fetch top tracks: {}", e),
    };

    if page.items.is_empty() {
        warning!("No top tracks found.");
        return;
    }

    let table_rows: Vec<TrackTableRow> = page
        .items
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            number: i + 1,
            title: track.name.clone(),
            artists: track.artist_names(),
            album: track.album.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            duration: utils::format_duration(track.duration_ms),
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}
