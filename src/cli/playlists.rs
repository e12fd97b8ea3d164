use tabled::Table;

use crate::{
    error, info, spotify,
    types::{PlaylistTableRow, TrackTableRow},
    utils, warning,
};

use super::{require_session, spinner};

const PLAYLISTS_PAGE_SIZE: u64 = 50;
const TRACKS_PAGE_SIZE: u64 = 100;

/// Lists the user's playlists, optionally filtered by a search term.
///
/// Always aggregates every page; playlist collections are small compared to
/// track lists.
pub async fn list_playlists(search: Option<String>) {
    let (_settings, _credentials, token) = require_session().await;

    let pb = spinner("Fetching playlists...");
    let result = utils::collect_pages(
        spotify::playlists::playlists_url(PLAYLISTS_PAGE_SIZE),
        None,
        |url| {
            let token = token.clone();
            async move { spotify::playlists::get_playlists_page(&token, &url).await }
        },
    )
    .await;
    pb.finish_and_clear();

    let (mut playlists, _) = match result {
        Ok(r) => r,
        Err(e) => error!("Failed to fetch playlists: {}", e),
    };

    if let Some(term) = search {
        let term = term.to_lowercase();
        playlists.retain(|p| p.name.to_lowercase().contains(&term));
    }

    if playlists.is_empty() {
        warning!("No playlists found.");
        return;
    }

    let table_rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            name: p.name,
            owner: p
                .owner
                .and_then(|o| o.display_name)
                .unwrap_or_default(),
            tracks: p
                .tracks
                .map(|t| t.total.to_string())
                .unwrap_or_else(|| "-".to_string()),
            id: p.id,
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
}

/// Lists the tracks of one playlist.
///
/// Fetches `pages` pages (default 1) or everything with `all`; when more
/// pages remain a hint with the pending count is printed, mirroring the
/// load-more affordance of the original views.
pub async fn list_tracks(playlist: String, pages: Option<usize>, all: bool) {
    let (_settings, _credentials, token) = require_session().await;
    let playlist_id = utils::extract_spotify_id(&playlist);

    let pb = spinner("Fetching playlist...");
    let meta = spotify::playlists::get_playlist(&token, &playlist_id).await;
    let playlist_name = match meta {
        Ok(p) => p.name,
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch playlist details: {}", e);
        }
    };

    pb.set_message("Fetching tracks...");
    let max_pages = if all { None } else { Some(pages.unwrap_or(1)) };
    let result = utils::collect_pages(
        spotify::playlists::playlist_tracks_url(&playlist_id, TRACKS_PAGE_SIZE),
        max_pages,
        |url| {
            let token = token.clone();
            async move { spotify::playlists::get_playlist_tracks_page(&token, &url).await }
        },
    )
    .await;
    pb.finish_and_clear();

    let (items, next) = match result {
        Ok(r) => r,
        Err(e) => error!("Failed to fetch tracks: {}", e),
    };

    info!("{}", playlist_name);

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
        warning!("No tracks found.");
        return;
    }

    let table = Table::new(table_rows);
    println!("{}", table);

    if next.is_some() {
        info!("More tracks available. Re-run with --all or a higher --pages value.");
    }
}
