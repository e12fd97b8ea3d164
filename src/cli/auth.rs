use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    error,
    management::{SettingsStore, TokenManager},
    spotify, success,
    types::AuthState,
};

/// Starts the OAuth login flow.
///
/// Without configured credentials this never builds the authorize URL;
/// the user is routed to `spotwire config set` instead.
pub async fn auth(shared_state: Arc<Mutex<Option<AuthState>>>) {
    let settings = match SettingsStore::load().await {
        Ok(s) => s,
        Err(e) => error!("Failed to load settings. Err: {}", e),
    };

    match settings.credentials() {
        Ok(credentials) => spotify::auth::auth(shared_state, credentials).await,
        Err(e) => error!("{}", e),
    }
}

/// Removes the cached token. Credentials stay configured.
pub async fn logout() {
    if let Err(e) = TokenManager::clear().await {
        error!("Failed to remove token cache. Err: {}", e);
    }
    success!("Logged out.");
}
