use std::path::PathBuf;

use crate::{
    error, info,
    management::{
        KEY_CLIENT_ID, KEY_CLIENT_SECRET, KEY_DOWNLOADS_FOLDER, KEY_REDIRECT_URI, SettingsStore,
    },
    success,
};

/// Stores the Spotify application credentials.
pub async fn set_credentials(
    client_id: String,
    client_secret: String,
    redirect_uri: Option<String>,
) {
    let mut settings = match SettingsStore::load().await {
        Ok(s) => s,
        Err(e) => error!("Failed to load settings. Err: {}", e),
    };

    settings.set(KEY_CLIENT_ID, client_id);
    settings.set(KEY_CLIENT_SECRET, client_secret);
    if let Some(uri) = redirect_uri {
        settings.set(KEY_REDIRECT_URI, uri);
    }

    if let Err(e) = settings.persist().await {
        error!("Failed to save settings. Err: {}", e);
    }
    success!("Credentials saved. Run spotwire auth to log in.");
}

/// Stores the default downloads folder, creating it if necessary.
pub async fn set_folder(path: PathBuf) {
    if let Err(e) = async_fs::create_dir_all(&path).await {
        error!("Cannot create downloads folder {}: {}", path.display(), e);
    }

    let mut settings = match SettingsStore::load().await {
        Ok(s) => s,
        Err(e) => error!("Failed to load settings. Err: {}", e),
    };

    settings.set(KEY_DOWNLOADS_FOLDER, path.display().to_string());
    if let Err(e) = settings.persist().await {
        error!("Failed to save settings. Err: {}", e);
    }
    success!("Downloads folder set to {}", path.display());
}

/// Prints the current configuration with the client secret redacted.
pub async fn show_config() {
    let settings = match SettingsStore::load().await {
        Ok(s) => s,
        Err(e) => error!("Failed to load settings. Err: {}", e),
    };

    info!(
        "client id:        {}",
        settings.get(KEY_CLIENT_ID).unwrap_or("(not set)")
    );
    info!(
        "client secret:    {}",
        if settings.get(KEY_CLIENT_SECRET).is_some() {
            "********"
        } else {
            "(not set)"
        }
    );
    info!(
        "redirect uri:     {}",
        settings.get(KEY_REDIRECT_URI).unwrap_or("(default)")
    );
    info!(
        "downloads folder: {}",
        settings.get(KEY_DOWNLOADS_FOLDER).unwrap_or("(not set)")
    );
}
