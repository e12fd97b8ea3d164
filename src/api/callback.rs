use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{errors::AuthError, spotify, types::AuthState, warning};

/// OAuth callback handler.
///
/// Parses the `code` query parameter from the redirect and exchanges it for
/// a token using the credentials stashed in the shared state. A redirect
/// without a code is answered with an error page and leaves the state
/// untouched so the waiting auth flow times out with a clear message.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthState>>>>,
) -> Html<&'static str> {
    if let Some(code) = params.get("code") {
        let mut state = shared_state.lock().await;
        let Some(ref mut auth_state) = state.as_mut() else {
            return Html("<h4>No login in progress.</h4>");
        };

        let credentials = auth_state.credentials.clone();

        match spotify::auth::exchange_code(code, &credentials).await {
            Ok(token) => {
                auth_state.token = Some(token);
                Html("<h2>Authentication successful.</h2><p>Close this browser window.</p>")
            }
            Err(e) => {
                warning!("Token exchange failed: {}", e);
                Html("<h4>Login failed.</h4>")
            }
        }
    } else {
        warning!("{}", AuthError::AuthCodeMissing);
        Html("<h4>Missing authorization code.</h4>")
    }
}
