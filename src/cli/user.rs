use crate::{error, info, spotify};

use super::{require_session, spinner};

/// Shows the authenticated user's profile.
pub async fn profile() {
    let (_settings, _credentials, token) = require_session().await;

    let pb = spinner("Fetching profile...");
    let user = spotify::user::get_profile(&token).await;
    pb.finish_and_clear();

    match user {
        Ok(user) => {
            info!(
                "Logged in as {} ({})",
                user.display_name.as_deref().unwrap_or("unknown"),
                user.id
            );
            if let Some(email) = user.email {
                info!("Email: {}", email);
            }
        }
        Err(e) => error!("Failed to fetch profile: {}", e),
    }
}
