use std::path::PathBuf;

use chrono::Utc;

use crate::{
    config,
    errors::AuthError,
    spotify,
    types::{Credentials, Token},
    warning,
};

/// Owns the persisted token record.
///
/// No other component mutates the token directly; API callers go through
/// [`TokenManager::get_valid_token`] which refreshes transparently when the
/// record has expired.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(Self::token_path(), json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Removes the persisted token (logout). Missing file is fine.
    pub async fn clear() -> Result<(), String> {
        match async_fs::remove_file(Self::token_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.to_string()),
        }
    }

    /// Returns a usable access token, refreshing first if the stored one has
    /// expired.
    ///
    /// A refresh needs the client credentials for the Basic auth header. If
    /// the token is expired and no refresh token was ever issued, the caller
    /// has to send the user through `spotwire auth` again.
    pub async fn get_valid_token(
        &mut self,
        credentials: &Credentials,
    ) -> Result<String, AuthError> {
        if !self.is_valid() {
            let refresh_token = self
                .token
                .refresh_token
                .clone()
                .ok_or(AuthError::TokenExpiredNoRefresh)?;

            let refreshed = spotify::auth::refresh(&refresh_token, credentials).await?;
            self.token = merge_refreshed(&self.token, refreshed);
            // The refreshed token is still usable in-memory if the write fails.
            if let Err(e) = self.persist().await {
                warning!("Failed to save refreshed token to cache: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    fn is_valid(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        self.token.is_valid_at(now)
    }

    fn token_path() -> PathBuf {
        let mut path = config::data_dir();
        path.push("cache/token.json");
        path
    }
}

/// Applies a refresh response on top of the previous record.
///
/// Spotify's refresh response may omit the `refresh_token` field; in that
/// case the previously stored refresh token must be kept unchanged.
pub fn merge_refreshed(old: &Token, new: Token) -> Token {
    let refresh_token = new.refresh_token.or_else(|| old.refresh_token.clone());
    Token {
        refresh_token,
        ..new
    }
}
