mod auth;
mod registry;
mod settings;

pub use auth::TokenManager;
pub use auth::merge_refreshed;
pub use registry::DownloadJob;
pub use registry::DownloadRegistry;
pub use registry::JobStatus;
pub use registry::JobUpdate;
pub use settings::KEY_CLIENT_ID;
pub use settings::KEY_CLIENT_SECRET;
pub use settings::KEY_DOWNLOADS_FOLDER;
pub use settings::KEY_REDIRECT_URI;
pub use settings::SettingsStore;
