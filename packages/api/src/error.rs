//! Server-side error type.
//!
//! Service functions return [`ApiError`] and use `?` on database and session errors; the server
//! function wrappers turn it into a [`ServerFnError`] carrying the display message, which the
//! client shows as-is.

use dioxus::prelude::ServerFnError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
    #[error("{0}")]
    Password(String),
}

impl ApiError {
    /// Wrap a validation message coming from [`crate::validate`].
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }
}

/// Convert at the server-function boundary.
pub fn into_server_error(err: ApiError) -> ServerFnError {
    match &err {
        ApiError::Database(e) => tracing::error!("database error: {e}"),
        ApiError::Session(e) => tracing::error!("session error: {e}"),
        _ => tracing::debug!("request rejected: {err}"),
    }
    ServerFnError::new(err.to_string())
}
