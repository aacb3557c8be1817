//! Server-session helpers.
//!
//! The session only ever stores the signed-in account id; everything else is loaded from the
//! database per request.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::ApiError;

/// Key for storing the account id in the session.
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Account id of the current session, if any.
pub async fn current_user_id(session: &Session) -> Result<Option<Uuid>, ApiError> {
    let raw: Option<String> = session.get(SESSION_USER_ID_KEY).await?;
    // An unparsable id means a stale or tampered session; treat it as signed out.
    Ok(raw.and_then(|id| Uuid::parse_str(&id).ok()))
}

/// Account id of the current session or [`ApiError::NotAuthenticated`].
pub async fn require_user_id(session: &Session) -> Result<Uuid, ApiError> {
    current_user_id(session)
        .await?
        .ok_or(ApiError::NotAuthenticated)
}

/// Bind the session to `user_id`, rotating the session id first.
pub async fn open_session(session: &Session, user_id: Uuid) -> Result<(), ApiError> {
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_ID_KEY, user_id.to_string())
        .await?;
    Ok(())
}
