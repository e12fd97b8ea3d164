use std::{collections::HashMap, path::PathBuf};

use crate::{config, errors::AuthError, types::Credentials};

pub const KEY_CLIENT_ID: &str = "spotify_client_id";
pub const KEY_CLIENT_SECRET: &str = "spotify_client_secret";
pub const KEY_REDIRECT_URI: &str = "spotify_redirect_uri";
pub const KEY_DOWNLOADS_FOLDER: &str = "default_downloads_folder";

/// Flat key-value settings store persisted as JSON.
///
/// Holds the Spotify application credentials and the default downloads
/// folder. Keys are plain strings without schema versioning; unknown keys
/// are preserved on write.
pub struct SettingsStore {
    entries: HashMap<String, String>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Loads the settings file, returning an empty store if it does not
    /// exist yet.
    pub async fn load() -> Result<Self, String> {
        let path = Self::settings_path();
        match async_fs::read_to_string(&path).await {
            Ok(content) => {
                let entries: HashMap<String, String> =
                    serde_json::from_str(&content).map_err(|e| e.to_string())?;
                Ok(Self { entries })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.to_string()),
        }
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::settings_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    /// Builds the credential record from the stored entries.
    ///
    /// The redirect URI falls back to the local callback server default when
    /// unset. Missing client id or secret is a configuration error; callers
    /// route the user to `spotwire config set` instead of attempting login.
    pub fn credentials(&self) -> Result<Credentials, AuthError> {
        let client_id = self
            .get(KEY_CLIENT_ID)
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::ConfigurationMissing)?;
        let client_secret = self
            .get(KEY_CLIENT_SECRET)
            .filter(|v| !v.is_empty())
            .ok_or(AuthError::ConfigurationMissing)?;
        let redirect_uri = self
            .get(KEY_REDIRECT_URI)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(config::default_redirect_uri);

        Ok(Credentials {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            redirect_uri,
        })
    }

    pub fn downloads_folder(&self) -> Option<PathBuf> {
        self.get(KEY_DOWNLOADS_FOLDER)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn settings_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("settings.json");
        path
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}
