//! Requests from athletes to their trainers.
//!
//! Trainers only ever see requests of athletes actively assigned to them; resolving a request
//! deletes it.

use dioxus::prelude::*;
use uuid::Uuid;

use crate::models::{ClientRequest, PendingRequest, RequestKind};

#[cfg(feature = "server")]
use crate::error::into_server_error;

/// File a request from the signed-in athlete.
#[cfg(feature = "server")]
#[post("/api/requests/submit", session: tower_sessions::Session)]
pub async fn submit_request(request: ClientRequest) -> Result<(), ServerFnError> {
    server::submit_request(&session, request)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/requests/submit")]
pub async fn submit_request(request: ClientRequest) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// All pending requests for the signed-in trainer, newest first.
#[cfg(feature = "server")]
#[get("/api/requests", session: tower_sessions::Session)]
pub async fn list_pending_requests() -> Result<Vec<PendingRequest>, ServerFnError> {
    server::list_pending_requests(&session)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/requests")]
pub async fn list_pending_requests() -> Result<Vec<PendingRequest>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/requests/resolve", session: tower_sessions::Session)]
pub async fn resolve_request(kind: RequestKind, request_id: Uuid) -> Result<(), ServerFnError> {
    server::resolve_request(&session, kind, request_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/requests/resolve")]
pub async fn resolve_request(kind: RequestKind, request_id: Uuid) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Badge count on the trainer dashboard.
#[cfg(feature = "server")]
#[get("/api/requests/count", session: tower_sessions::Session)]
pub async fn pending_request_count() -> Result<i64, ServerFnError> {
    server::pending_request_count(&session)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/requests/count")]
pub async fn pending_request_count() -> Result<i64, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
mod server {
    use chrono::{DateTime, Utc};
    use tower_sessions::Session;
    use uuid::Uuid;

    use crate::auth;
    use crate::db::get_pool;
    use crate::error::ApiError;
    use crate::models::{ClientRequest, PendingRequest, RequestKind, Role};

    /// Subject and detail columns of each request table.
    fn columns(kind: RequestKind) -> (&'static str, &'static str) {
        match kind {
            RequestKind::Program => ("goal", "notes"),
            RequestKind::ExerciseChange => ("exercise_name", "reason"),
            RequestKind::DietChange => ("meal_name", "reason"),
        }
    }

    type PendingRow = (Uuid, Uuid, String, String, Option<String>, DateTime<Utc>);

    pub async fn submit_request(session: &Session, request: ClientRequest) -> Result<(), ApiError> {
        request.validate().map_err(ApiError::invalid)?;
        let pool = get_pool().await?;
        let client = auth::require_role(pool, session, Role::Client).await?;

        let (subject, detail) = match &request {
            ClientRequest::Program { goal, notes } => {
                (goal.trim(), Some(notes.trim()).filter(|n| !n.is_empty()))
            }
            ClientRequest::ExerciseChange {
                exercise_name,
                reason,
            } => (exercise_name.trim(), Some(reason.trim())),
            ClientRequest::DietChange { meal_name, reason } => {
                (meal_name.trim(), Some(reason.trim()))
            }
        };
        let kind = request.kind();
        let (subject_col, detail_col) = columns(kind);

        sqlx::query(&format!(
            "INSERT INTO {} (client_id, {subject_col}, {detail_col}) VALUES ($1, $2, $3)",
            kind.table()
        ))
        .bind(client.id)
        .bind(subject)
        .bind(detail)
        .execute(pool)
        .await?;

        tracing::info!(client = %client.id, ?kind, "request submitted");
        Ok(())
    }

    pub async fn list_pending_requests(session: &Session) -> Result<Vec<PendingRequest>, ApiError> {
        let pool = get_pool().await?;
        let trainer = auth::require_role(pool, session, Role::Trainer).await?;

        let mut pending = Vec::new();
        for kind in RequestKind::ALL {
            let (subject_col, detail_col) = columns(kind);
            let rows: Vec<PendingRow> = sqlx::query_as(&format!(
                "SELECT r.id, r.client_id,
                        TRIM(up.first_name || ' ' || up.last_name),
                        r.{subject_col}, r.{detail_col}, r.created_at
                 FROM {} r
                 JOIN trainer_client_assignments a
                   ON a.client_id = r.client_id AND a.trainer_id = $1 AND a.is_active = TRUE
                 JOIN user_profiles up ON up.id = r.client_id",
                kind.table()
            ))
            .bind(trainer.id)
            .fetch_all(pool)
            .await?;

            pending.extend(rows.into_iter().map(
                |(id, client_id, client_name, subject, detail, created_at)| PendingRequest {
                    id,
                    kind,
                    client_id,
                    client_name,
                    subject,
                    detail,
                    created_at,
                },
            ));
        }

        pending.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(pending)
    }

    pub async fn resolve_request(
        session: &Session,
        kind: RequestKind,
        request_id: Uuid,
    ) -> Result<(), ApiError> {
        let pool = get_pool().await?;
        let owner: Option<(Uuid,)> =
            sqlx::query_as(&format!("SELECT client_id FROM {} WHERE id = $1", kind.table()))
                .bind(request_id)
                .fetch_optional(pool)
                .await?;
        let (client_id,) = owner.ok_or(ApiError::NotFound("Request"))?;
        let trainer = auth::require_trainer_of(pool, session, client_id).await?;

        sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(request_id)
            .execute(pool)
            .await?;
        tracing::info!(trainer = %trainer.id, ?kind, request = %request_id, "request resolved");
        Ok(())
    }

    pub async fn pending_request_count(session: &Session) -> Result<i64, ApiError> {
        let pool = get_pool().await?;
        let trainer = auth::require_role(pool, session, Role::Trainer).await?;

        let mut total = 0;
        for kind in RequestKind::ALL {
            let (count,): (i64,) = sqlx::query_as(&format!(
                "SELECT COUNT(*) FROM {} r
                 JOIN trainer_client_assignments a
                   ON a.client_id = r.client_id AND a.trainer_id = $1 AND a.is_active = TRUE",
                kind.table()
            ))
            .bind(trainer.id)
            .fetch_one(pool)
            .await?;
            total += count;
        }
        Ok(total)
    }
}
