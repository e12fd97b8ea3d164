use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;

use crate::{
    config,
    errors::AuthError,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{AuthState, Credentials, Token, TokenResponse},
    warning,
};

/// Scopes requested during authorization. The order carries no semantics;
/// it mirrors the Spotify console grouping for readability.
pub const SCOPES: [&str; 19] = [
    "ugc-image-upload",
    "user-read-playback-state",
    "user-modify-playback-state",
    "user-read-currently-playing",
    "streaming",
    "app-remote-control",
    "playlist-read-private",
    "playlist-read-collaborative",
    "playlist-modify-private",
    "playlist-modify-public",
    "user-follow-modify",
    "user-follow-read",
    "user-read-playback-position",
    "user-top-read",
    "user-read-recently-played",
    "user-library-modify",
    "user-library-read",
    "user-read-email",
    "user-read-private",
];

/// Builds the Spotify authorize URL for the authorization code flow.
///
/// Construction is deterministic: fixed scope list, `response_type=code`,
/// and the caller-supplied credentials. Callers must not invoke this without
/// configured credentials; the CLI routes to `spotwire config` first.
pub fn build_authorize_url(credentials: &Credentials) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}",
        auth_url = config::spotify_apiauth_url(),
        client_id = urlencoding::encode(&credentials.client_id),
        redirect_uri = urlencoding::encode(&credentials.redirect_uri),
        scope = urlencoding::encode(&SCOPES.join(" ")),
    )
}

/// Runs the complete OAuth 2.0 authorization code flow with Spotify.
///
/// Starts the local callback server, opens the authorize URL in the user's
/// browser, waits for the callback handler to complete the code exchange,
/// and persists the obtained token for future use.
///
/// # Arguments
///
/// * `shared_state` - Thread-safe shared state carrying the credentials to
///   the callback handler and the resulting token back to this flow
/// * `credentials` - The configured Spotify application credentials
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Token persistence failures terminate the program with an error
/// - Authentication timeouts or failures terminate with an error message
pub async fn auth(shared_state: Arc<tokio::sync::Mutex<Option<AuthState>>>, credentials: Credentials) {
    let auth_url = build_authorize_url(&credentials);

    // The callback handler needs the credentials for the code exchange, so
    // the state has to be in place before the browser opens.
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(AuthState {
            credentials,
            token: None,
        });
    }

    // start API server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(t);
            if let Err(e) = token_manager.persist().await {
                crate::error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            crate::error!("Authentication failed or timed out.");
        }
    }
}

/// Waits for the OAuth callback to complete and return a token.
///
/// Polls the shared state for a completed token with a 120-second timeout.
/// Runs concurrently with the callback handler that populates the token
/// after a successful exchange.
async fn wait_for_token(
    shared_state: Arc<tokio::sync::Mutex<Option<AuthState>>>,
) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(120);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(auth_state) = lock.as_ref() {
            if let Some(token) = &auth_state.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token.
///
/// Performs the final step of the authorization code flow: a POST to the
/// token endpoint authenticated with a Basic header built from the client
/// id and secret, carrying `grant_type=authorization_code`.
///
/// # Errors
///
/// The attempt is terminal; there is no retry loop. Failures are classified
/// as [`AuthError::Network`] (transport), [`AuthError::SpotifyApi`]
/// (non-2xx), or [`AuthError::MissingAccessToken`] (2xx without a token).
pub async fn exchange_code(code: &str, credentials: &Credentials) -> Result<Token, AuthError> {
    request_token(
        credentials,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &credentials.redirect_uri),
        ],
    )
    .await
}

/// Refreshes an expired access token using a refresh token.
///
/// Spotify's refresh response may omit a new `refresh_token`; the returned
/// record carries `None` in that case and the caller must retain the prior
/// one (see [`crate::management::merge_refreshed`]).
pub async fn refresh(refresh_token: &str, credentials: &Credentials) -> Result<Token, AuthError> {
    request_token(
        credentials,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(
    credentials: &Credentials,
    form: &[(&str, &str)],
) -> Result<Token, AuthError> {
    let basic = STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .header("Authorization", format!("Basic {}", basic))
        .form(form)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        return Err(AuthError::SpotifyApi(status.as_u16()));
    }

    let body: TokenResponse = res.json().await?;
    token_from_response(body, Utc::now().timestamp() as u64)
}

/// Turns a 2xx token response into a token record obtained at `now`.
///
/// A response without an access token is never treated as a valid record.
pub fn token_from_response(body: TokenResponse, now: u64) -> Result<Token, AuthError> {
    let access_token = body.access_token.ok_or(AuthError::MissingAccessToken)?;

    Ok(Token {
        access_token,
        refresh_token: body.refresh_token,
        scope: body.scope.unwrap_or_default(),
        expires_in: body.expires_in.unwrap_or(3600),
        obtained_at: now,
    })
}
