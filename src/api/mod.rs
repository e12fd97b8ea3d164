//! # API Module
//!
//! HTTP endpoints for the local callback server started during
//! `spotwire auth`.
//!
//! - [`callback`] - Handles OAuth callback requests from Spotify's
//!   authorization server and completes the authorization code exchange.
//! - [`health`] - Health check endpoint returning application status and
//!   version information.
//!
//! The module is built using the [Axum](https://docs.rs/axum) web framework;
//! each endpoint is an async function wired into the router in
//! [`crate::server`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
