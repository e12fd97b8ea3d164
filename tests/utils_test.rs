use spotwire::types::Page;
use spotwire::utils::*;

// Helper to build a page for the pagination tests
fn page(items: Vec<u32>, next: Option<&str>) -> Page<u32> {
    Page {
        items,
        next: next.map(str::to_string),
        total: None,
    }
}

#[test]
fn test_format_duration() {
    // Zero duration
    assert_eq!(format_duration(0), "0:00");

    // Sub-minute durations keep a leading zero on seconds
    assert_eq!(format_duration(5_000), "0:05");
    assert_eq!(format_duration(59_999), "0:59");

    // Full minutes
    assert_eq!(format_duration(60_000), "1:00");
    assert_eq!(format_duration(213_000), "3:33");

    // Long tracks
    assert_eq!(format_duration(3_725_000), "62:05");
}

#[test]
fn test_format_start_time_invalid() {
    // Out-of-range timestamps render as a placeholder instead of panicking
    assert_eq!(format_start_time(i64::MAX as u64), "-");
}

#[test]
fn test_extract_spotify_id_bare() {
    // Bare ids pass through unchanged
    assert_eq!(
        extract_spotify_id("4cOdK2wGLETKBW3PvgPWqT"),
        "4cOdK2wGLETKBW3PvgPWqT"
    );

    // Surrounding whitespace is stripped
    assert_eq!(
        extract_spotify_id("  4cOdK2wGLETKBW3PvgPWqT\n"),
        "4cOdK2wGLETKBW3PvgPWqT"
    );
}

#[test]
fn test_extract_spotify_id_url() {
    // Plain share URL
    assert_eq!(
        extract_spotify_id("https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT"),
        "4cOdK2wGLETKBW3PvgPWqT"
    );

    // Share URL with tracking query string
    assert_eq!(
        extract_spotify_id(
            "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=abc123"
        ),
        "37i9dQZF1DXcBWIGoYBM5M"
    );

    // Trailing slash
    assert_eq!(
        extract_spotify_id("https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT/"),
        "4cOdK2wGLETKBW3PvgPWqT"
    );
}

#[test]
fn test_extract_spotify_id_uri() {
    assert_eq!(
        extract_spotify_id("spotify:track:4cOdK2wGLETKBW3PvgPWqT"),
        "4cOdK2wGLETKBW3PvgPWqT"
    );
    assert_eq!(
        extract_spotify_id("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M"),
        "37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[test]
fn test_share_urls() {
    assert_eq!(
        track_url("4cOdK2wGLETKBW3PvgPWqT"),
        "https://open.spotify.com/track/4cOdK2wGLETKBW3PvgPWqT"
    );
    assert_eq!(
        playlist_url("37i9dQZF1DXcBWIGoYBM5M"),
        "https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M"
    );
}

#[tokio::test]
async fn test_collect_pages_follows_next_links() {
    let fetch = |url: String| async move {
        match url.as_str() {
            "page1" => Ok::<_, String>(page(vec![1, 2], Some("page2"))),
            "page2" => Ok(page(vec![3, 4], Some("page3"))),
            "page3" => Ok(page(vec![5], None)),
            other => Err(format!("unexpected url {}", other)),
        }
    };

    let (items, next) = collect_pages("page1".to_string(), None, fetch)
        .await
        .unwrap();

    // All pages aggregated in order, nothing pending
    assert_eq!(items, vec![1, 2, 3, 4, 5]);
    assert_eq!(next, None);
}

#[tokio::test]
async fn test_collect_pages_respects_page_cap() {
    let fetch = |url: String| async move {
        match url.as_str() {
            "page1" => Ok::<_, String>(page(vec![1, 2], Some("page2"))),
            "page2" => Ok(page(vec![3, 4], Some("page3"))),
            other => Err(format!("unexpected url {}", other)),
        }
    };

    let (items, next) = collect_pages("page1".to_string(), Some(2), fetch)
        .await
        .unwrap();

    // Two pages fetched, the third page's cursor returned for resumption
    assert_eq!(items, vec![1, 2, 3, 4]);
    assert_eq!(next, Some("page3".to_string()));
}

#[tokio::test]
async fn test_collect_pages_single_page() {
    let fetch = |_url: String| async move { Ok::<_, String>(page(vec![7], None)) };

    let (items, next) = collect_pages("page1".to_string(), Some(5), fetch)
        .await
        .unwrap();

    // Fewer pages than the cap is fine
    assert_eq!(items, vec![7]);
    assert_eq!(next, None);
}

#[tokio::test]
async fn test_collect_pages_propagates_errors() {
    let fetch = |url: String| async move {
        match url.as_str() {
            "page1" => Ok(page(vec![1], Some("page2"))),
            _ => Err("boom".to_string()),
        }
    };

    let result = collect_pages("page1".to_string(), None, fetch).await;

    // The error of a later page aborts the aggregation
    assert_eq!(result.unwrap_err(), "boom");
}
