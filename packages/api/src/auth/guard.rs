//! Row-level access rules enforced by the server functions.
//!
//! Trainers may act on clients they are actively assigned to; clients only on their own rows.

use sqlx::PgPool;
use tower_sessions::Session;
use uuid::Uuid;

use super::session::require_user_id;
use crate::error::ApiError;
use crate::models::{Profile, Role};

pub async fn load_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>, ApiError> {
    let profile = sqlx::query_as::<_, Profile>("SELECT * FROM user_profiles WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

/// Profile of the signed-in user.
pub async fn require_profile(pool: &PgPool, session: &Session) -> Result<Profile, ApiError> {
    let user_id = require_user_id(session).await?;
    load_profile(pool, user_id)
        .await?
        .ok_or(ApiError::NotFound("Profile"))
}

/// Profile of the signed-in user, which must hold `role`.
pub async fn require_role(
    pool: &PgPool,
    session: &Session,
    role: Role,
) -> Result<Profile, ApiError> {
    let profile = require_profile(pool, session).await?;
    if profile.role != role {
        tracing::warn!(
            user = %profile.id,
            required = %role,
            found = %profile.role,
            "role check failed"
        );
        return Err(ApiError::Forbidden(format!(
            "This action is reserved to {} accounts",
            role.label()
        )));
    }
    Ok(profile)
}

pub async fn is_assigned(pool: &PgPool, trainer_id: Uuid, client_id: Uuid) -> Result<bool, ApiError> {
    let row: Option<(i32,)> = sqlx::query_as(
        "SELECT 1 FROM trainer_client_assignments
         WHERE trainer_id = $1 AND client_id = $2 AND is_active = TRUE",
    )
    .bind(trainer_id)
    .bind(client_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.is_some())
}

/// The signed-in trainer, checked to be assigned to `client_id`.
pub async fn require_trainer_of(
    pool: &PgPool,
    session: &Session,
    client_id: Uuid,
) -> Result<Profile, ApiError> {
    let trainer = require_role(pool, session, Role::Trainer).await?;
    if !is_assigned(pool, trainer.id, client_id).await? {
        return Err(ApiError::Forbidden(
            "This athlete is not assigned to you".to_string(),
        ));
    }
    Ok(trainer)
}

/// The signed-in user, who must be `client_id` itself or one of its trainers.
pub async fn require_viewer_of(
    pool: &PgPool,
    session: &Session,
    client_id: Uuid,
) -> Result<Profile, ApiError> {
    let viewer = require_profile(pool, session).await?;
    if viewer.id == client_id {
        return Ok(viewer);
    }
    if viewer.role == Role::Trainer && is_assigned(pool, viewer.id, client_id).await? {
        return Ok(viewer);
    }
    Err(ApiError::Forbidden(
        "You cannot access this athlete's data".to_string(),
    ))
}
