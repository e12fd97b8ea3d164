use spotwire::errors::AuthError;
use spotwire::management::{
    KEY_CLIENT_ID, KEY_CLIENT_SECRET, KEY_DOWNLOADS_FOLDER, KEY_REDIRECT_URI, SettingsStore,
};
use std::path::PathBuf;

// Helper to build an in-memory store with both credentials set
fn store_with_credentials() -> SettingsStore {
    let mut settings = SettingsStore::new();
    settings.set(KEY_CLIENT_ID, "my-client-id".to_string());
    settings.set(KEY_CLIENT_SECRET, "my-secret".to_string());
    settings
}

#[test]
fn test_get_set_round_trip() {
    let mut settings = SettingsStore::new();

    // Empty store has nothing
    assert_eq!(settings.get(KEY_CLIENT_ID), None);

    settings.set(KEY_CLIENT_ID, "abc".to_string());
    settings.set(KEY_DOWNLOADS_FOLDER, "/music".to_string());
    assert_eq!(settings.get(KEY_CLIENT_ID), Some("abc"));
    assert_eq!(settings.get(KEY_DOWNLOADS_FOLDER), Some("/music"));

    // Setting overwrites, no merge semantics
    settings.set(KEY_CLIENT_ID, "def".to_string());
    assert_eq!(settings.get(KEY_CLIENT_ID), Some("def"));

    // Unknown keys survive alongside the known ones
    settings.set("custom_key", "kept".to_string());
    assert_eq!(settings.get("custom_key"), Some("kept"));
}

#[test]
fn test_credentials_missing_on_empty_store() {
    let settings = SettingsStore::new();

    // Nothing configured: the login flow must never get credentials to
    // build an authorize URL from
    let err = settings.credentials().unwrap_err();
    assert!(matches!(err, AuthError::ConfigurationMissing));
}

#[test]
fn test_credentials_missing_on_partial_store() {
    // Client id alone is not enough
    let mut settings = SettingsStore::new();
    settings.set(KEY_CLIENT_ID, "my-client-id".to_string());
    assert!(matches!(
        settings.credentials().unwrap_err(),
        AuthError::ConfigurationMissing
    ));

    // Secret alone is not enough either
    let mut settings = SettingsStore::new();
    settings.set(KEY_CLIENT_SECRET, "my-secret".to_string());
    assert!(matches!(
        settings.credentials().unwrap_err(),
        AuthError::ConfigurationMissing
    ));
}

#[test]
fn test_credentials_empty_strings_count_as_missing() {
    let mut settings = store_with_credentials();
    settings.set(KEY_CLIENT_SECRET, String::new());

    // An empty value is as good as an absent one
    assert!(matches!(
        settings.credentials().unwrap_err(),
        AuthError::ConfigurationMissing
    ));
}

#[test]
fn test_credentials_redirect_uri_default() {
    let settings = store_with_credentials();

    let credentials = settings.credentials().unwrap();
    assert_eq!(credentials.client_id, "my-client-id");
    assert_eq!(credentials.client_secret, "my-secret");

    // Unset redirect URI falls back to the local callback server
    assert_eq!(credentials.redirect_uri, "http://127.0.0.1:8888/callback");
}

#[test]
fn test_credentials_redirect_uri_configured() {
    let mut settings = store_with_credentials();
    settings.set(KEY_REDIRECT_URI, "http://localhost:9000/cb".to_string());

    let credentials = settings.credentials().unwrap();
    assert_eq!(credentials.redirect_uri, "http://localhost:9000/cb");

    // An empty configured value falls back to the default again
    settings.set(KEY_REDIRECT_URI, String::new());
    let credentials = settings.credentials().unwrap();
    assert_eq!(credentials.redirect_uri, "http://127.0.0.1:8888/callback");
}

#[test]
fn test_downloads_folder() {
    let mut settings = SettingsStore::new();
    assert_eq!(settings.downloads_folder(), None);

    settings.set(KEY_DOWNLOADS_FOLDER, "/home/me/Music".to_string());
    assert_eq!(
        settings.downloads_folder(),
        Some(PathBuf::from("/home/me/Music"))
    );

    // Empty value counts as unset
    settings.set(KEY_DOWNLOADS_FOLDER, String::new());
    assert_eq!(settings.downloads_folder(), None);
}
