//! Trainer roster: assigned athletes, assignment by email and dashboard counters.

use dioxus::prelude::*;
use uuid::Uuid;

use crate::models::{ClientSummary, Profile, TrainerStats};

#[cfg(feature = "server")]
use crate::error::into_server_error;

/// Active athletes of the signed-in trainer, sorted by name.
#[cfg(feature = "server")]
#[get("/api/clients", session: tower_sessions::Session)]
pub async fn list_clients() -> Result<Vec<ClientSummary>, ServerFnError> {
    server::list_clients(&session).await.map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/clients")]
pub async fn list_clients() -> Result<Vec<ClientSummary>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Assign the athlete registered under `email` to the signed-in trainer.
#[cfg(feature = "server")]
#[post("/api/clients/assign", session: tower_sessions::Session)]
pub async fn assign_client(email: String) -> Result<ClientSummary, ServerFnError> {
    server::assign_client(&session, &email)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/clients/assign")]
pub async fn assign_client(email: String) -> Result<ClientSummary, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Profile of an athlete, readable by the athlete and by their trainers.
#[cfg(feature = "server")]
#[post("/api/clients/profile", session: tower_sessions::Session)]
pub async fn get_client_profile(client_id: Uuid) -> Result<Profile, ServerFnError> {
    server::get_client_profile(&session, client_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/clients/profile")]
pub async fn get_client_profile(client_id: Uuid) -> Result<Profile, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[get("/api/clients/stats", session: tower_sessions::Session)]
pub async fn trainer_stats() -> Result<TrainerStats, ServerFnError> {
    server::trainer_stats(&session).await.map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/clients/stats")]
pub async fn trainer_stats() -> Result<TrainerStats, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
mod server {
    use sqlx::PgPool;
    use tower_sessions::Session;
    use uuid::Uuid;

    use crate::auth;
    use crate::db::get_pool;
    use crate::error::ApiError;
    use crate::models::{ClientSummary, Profile, Role, TrainerStats};
    use crate::validate;

    const SUMMARY_SELECT: &str = "
        SELECT up.id, up.first_name, up.last_name, up.email, cp.fitness_goal,
               (SELECT wp.name FROM workout_plans wp
                WHERE wp.client_id = up.id AND wp.is_active = TRUE
                ORDER BY wp.created_at DESC LIMIT 1) AS active_plan_name
        FROM trainer_client_assignments a
        JOIN user_profiles up ON up.id = a.client_id
        LEFT JOIN client_profiles cp ON cp.id = up.id";

    pub async fn list_clients(session: &Session) -> Result<Vec<ClientSummary>, ApiError> {
        let pool = get_pool().await?;
        let trainer = auth::require_role(pool, session, Role::Trainer).await?;

        let clients = sqlx::query_as::<_, ClientSummary>(&format!(
            "{SUMMARY_SELECT}
             WHERE a.trainer_id = $1 AND a.is_active = TRUE
             ORDER BY up.first_name, up.last_name"
        ))
        .bind(trainer.id)
        .fetch_all(pool)
        .await?;
        Ok(clients)
    }

    pub async fn assign_client(session: &Session, email: &str) -> Result<ClientSummary, ApiError> {
        let email = validate::normalize_email(email).map_err(ApiError::invalid)?;
        let pool = get_pool().await?;
        let trainer = auth::require_role(pool, session, Role::Trainer).await?;

        let client: Option<Profile> = sqlx::query_as(
            "SELECT * FROM user_profiles WHERE email = $1 AND user_type = 'client'",
        )
        .bind(&email)
        .fetch_optional(pool)
        .await?;
        let Some(client) = client else {
            return Err(ApiError::invalid("No athlete is registered with this email"));
        };

        let inserted = sqlx::query(
            "INSERT INTO trainer_client_assignments (trainer_id, client_id)
             VALUES ($1, $2)
             ON CONFLICT (trainer_id, client_id) DO UPDATE SET is_active = TRUE
             WHERE trainer_client_assignments.is_active = FALSE",
        )
        .bind(trainer.id)
        .bind(client.id)
        .execute(pool)
        .await?;
        if inserted.rows_affected() == 0 {
            return Err(ApiError::Conflict(
                "This athlete is already assigned to you".to_string(),
            ));
        }
        tracing::info!(trainer = %trainer.id, client = %client.id, "athlete assigned");

        summary(pool, trainer.id, client.id).await
    }

    async fn summary(
        pool: &PgPool,
        trainer_id: Uuid,
        client_id: Uuid,
    ) -> Result<ClientSummary, ApiError> {
        sqlx::query_as::<_, ClientSummary>(&format!(
            "{SUMMARY_SELECT} WHERE a.trainer_id = $1 AND a.client_id = $2"
        ))
        .bind(trainer_id)
        .bind(client_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound("Athlete"))
    }

    pub async fn get_client_profile(
        session: &Session,
        client_id: Uuid,
    ) -> Result<Profile, ApiError> {
        let pool = get_pool().await?;
        auth::require_viewer_of(pool, session, client_id).await?;
        auth::load_profile(pool, client_id)
            .await?
            .ok_or(ApiError::NotFound("Athlete"))
    }

    pub async fn trainer_stats(session: &Session) -> Result<TrainerStats, ApiError> {
        let pool = get_pool().await?;
        let trainer = auth::require_role(pool, session, Role::Trainer).await?;

        let (total_clients,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM trainer_client_assignments
             WHERE trainer_id = $1 AND is_active = TRUE",
        )
        .bind(trainer.id)
        .fetch_one(pool)
        .await?;
        let (workout_plans,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM workout_plans WHERE trainer_id = $1")
                .bind(trainer.id)
                .fetch_one(pool)
                .await?;
        let (diet_plans,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM diet_plans WHERE trainer_id = $1")
                .bind(trainer.id)
                .fetch_one(pool)
                .await?;

        Ok(TrainerStats {
            total_clients,
            workout_plans,
            diet_plans,
        })
    }
}
