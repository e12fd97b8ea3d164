use spotwire::errors::AuthError;
use spotwire::management::merge_refreshed;
use spotwire::spotify::auth::{SCOPES, build_authorize_url, token_from_response};
use spotwire::types::{Credentials, TOKEN_EXPIRY_MARGIN_SECS, Token, TokenResponse};

// Helper to create a token obtained at a fixed point in time
fn create_test_token(expires_in: u64, refresh_token: Option<&str>) -> Token {
    Token {
        access_token: "access-abc".to_string(),
        refresh_token: refresh_token.map(str::to_string),
        scope: "user-library-read".to_string(),
        expires_in,
        obtained_at: 1_000_000,
    }
}

fn create_test_credentials() -> Credentials {
    Credentials {
        client_id: "client id".to_string(),
        client_secret: "secret".to_string(),
        redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
    }
}

#[test]
fn test_token_validity_window() {
    let token = create_test_token(3600, None);

    // Fresh token is valid
    assert!(token.is_valid_at(1_000_000));

    // Just inside the margin boundary
    assert!(token.is_valid_at(1_003_600 - TOKEN_EXPIRY_MARGIN_SECS - 1));

    // Exactly at expires_at - margin the token counts as expired
    assert!(!token.is_valid_at(1_003_600 - TOKEN_EXPIRY_MARGIN_SECS));

    // Well past expiry
    assert!(!token.is_valid_at(1_003_600));
    assert!(!token.is_valid_at(2_000_000));
}

#[test]
fn test_token_validity_short_lifetime() {
    // Lifetime shorter than the margin must not underflow
    let token = create_test_token(30, None);
    assert!(!token.is_valid_at(1_000_000));
    assert!(!token.is_valid_at(0));
}

#[test]
fn test_merge_refreshed_keeps_old_refresh_token() {
    let old = create_test_token(3600, Some("refresh-original"));
    let mut new = create_test_token(3600, None);
    new.access_token = "access-new".to_string();
    new.obtained_at = 2_000_000;

    let merged = merge_refreshed(&old, new);

    // New access token wins, the previously issued refresh token is retained
    assert_eq!(merged.access_token, "access-new");
    assert_eq!(merged.obtained_at, 2_000_000);
    assert_eq!(merged.refresh_token.as_deref(), Some("refresh-original"));
}

#[test]
fn test_merge_refreshed_prefers_new_refresh_token() {
    let old = create_test_token(3600, Some("refresh-original"));
    let new = create_test_token(3600, Some("refresh-rotated"));

    let merged = merge_refreshed(&old, new);

    // A rotated refresh token replaces the stored one
    assert_eq!(merged.refresh_token.as_deref(), Some("refresh-rotated"));
}

#[test]
fn test_token_from_response_complete() {
    let body = TokenResponse {
        access_token: Some("access-xyz".to_string()),
        refresh_token: Some("refresh-xyz".to_string()),
        scope: Some("user-library-read".to_string()),
        expires_in: Some(1800),
    };

    let token = token_from_response(body, 5_000).unwrap();
    assert_eq!(token.access_token, "access-xyz");
    assert_eq!(token.refresh_token.as_deref(), Some("refresh-xyz"));
    assert_eq!(token.expires_in, 1800);
    assert_eq!(token.obtained_at, 5_000);
    assert_eq!(token.expires_at(), 6_800);
}

#[test]
fn test_token_from_response_defaults() {
    // Spotify omits expires_in in theory only, but the default keeps the
    // record usable
    let body = TokenResponse {
        access_token: Some("access-xyz".to_string()),
        refresh_token: None,
        scope: None,
        expires_in: None,
    };

    let token = token_from_response(body, 0).unwrap();
    assert_eq!(token.expires_in, 3600);
    assert_eq!(token.scope, "");
    assert_eq!(token.refresh_token, None);
}

#[test]
fn test_token_from_response_missing_access_token() {
    let body = TokenResponse {
        access_token: None,
        refresh_token: Some("refresh-xyz".to_string()),
        scope: None,
        expires_in: Some(3600),
    };

    // A 2xx body without an access token is never a valid record
    let err = token_from_response(body, 0).unwrap_err();
    assert!(matches!(err, AuthError::MissingAccessToken));
}

#[test]
fn test_build_authorize_url() {
    let credentials = create_test_credentials();
    let url = build_authorize_url(&credentials);

    // Authorization code flow, not implicit or PKCE
    assert!(url.contains("response_type=code"));

    // Credentials are percent-encoded
    assert!(url.contains("client_id=client%20id"));
    assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8888%2Fcallback"));

    // Every requested scope is present
    assert!(url.contains("user-library-read"));
    assert!(url.contains("playlist-read-private"));
    assert!(url.contains("user-read-email"));

    // Deterministic for fixed inputs
    assert_eq!(url, build_authorize_url(&credentials));
}

#[test]
fn test_scope_list() {
    // The scope set is fixed; a change here invalidates existing grants
    assert_eq!(SCOPES.len(), 19);
    assert!(SCOPES.contains(&"user-library-read"));
    assert!(SCOPES.contains(&"playlist-read-collaborative"));
    assert!(SCOPES.contains(&"user-top-read"));

    // No stray whitespace that would break the joined scope parameter
    assert!(SCOPES.iter().all(|s| !s.contains(' ')));
}
