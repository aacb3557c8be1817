//! Athlete self-tracking: body weight, trained weekdays and the daily supplement checklist.

use chrono::NaiveDate;
use dioxus::prelude::*;
use uuid::Uuid;

use crate::models::WeightEntry;

#[cfg(feature = "server")]
use crate::error::into_server_error;

/// Weight history of an athlete, oldest first.
#[cfg(feature = "server")]
#[post("/api/tracking/weights", session: tower_sessions::Session)]
pub async fn list_weight_entries(client_id: Uuid) -> Result<Vec<WeightEntry>, ServerFnError> {
    server::list_weight_entries(&session, client_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/tracking/weights")]
pub async fn list_weight_entries(client_id: Uuid) -> Result<Vec<WeightEntry>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/tracking/weights/add", session: tower_sessions::Session)]
pub async fn add_weight_entry(weight: f64) -> Result<WeightEntry, ServerFnError> {
    server::add_weight_entry(&session, weight)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/tracking/weights/add")]
pub async fn add_weight_entry(weight: f64) -> Result<WeightEntry, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Delete the signed-in athlete's whole weight history.
#[cfg(feature = "server")]
#[post("/api/tracking/weights/clear", session: tower_sessions::Session)]
pub async fn clear_weight_entries() -> Result<(), ServerFnError> {
    server::clear_weight_entries(&session)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/tracking/weights/clear")]
pub async fn clear_weight_entries() -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Weekday names (`Mon` … `Sun`) the signed-in athlete has trained on.
#[cfg(feature = "server")]
#[get("/api/tracking/days", session: tower_sessions::Session)]
pub async fn list_trained_days() -> Result<Vec<String>, ServerFnError> {
    server::list_trained_days(&session)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[get("/api/tracking/days")]
pub async fn list_trained_days() -> Result<Vec<String>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/tracking/days/reset", session: tower_sessions::Session)]
pub async fn reset_trained_days() -> Result<(), ServerFnError> {
    server::reset_trained_days(&session)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/tracking/days/reset")]
pub async fn reset_trained_days() -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Supplement ids ticked on `date`.
#[cfg(feature = "server")]
#[post("/api/tracking/supplements", session: tower_sessions::Session)]
pub async fn get_supplements(date: NaiveDate) -> Result<Vec<String>, ServerFnError> {
    server::get_supplements(&session, date)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/tracking/supplements")]
pub async fn get_supplements(date: NaiveDate) -> Result<Vec<String>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Replace the checklist of `date`, upserted on `(client, date)`.
#[cfg(feature = "server")]
#[post("/api/tracking/supplements/set", session: tower_sessions::Session)]
pub async fn set_supplements(date: NaiveDate, taken: Vec<String>) -> Result<(), ServerFnError> {
    server::set_supplements(&session, date, taken)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/tracking/supplements/set")]
pub async fn set_supplements(date: NaiveDate, taken: Vec<String>) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
mod server {
    use chrono::NaiveDate;
    use tower_sessions::Session;
    use uuid::Uuid;

    use crate::auth;
    use crate::db::get_pool;
    use crate::error::ApiError;
    use crate::models::{Role, WeightEntry, SUPPLEMENTS};

    pub async fn list_weight_entries(
        session: &Session,
        client_id: Uuid,
    ) -> Result<Vec<WeightEntry>, ApiError> {
        let pool = get_pool().await?;
        auth::require_viewer_of(pool, session, client_id).await?;

        let entries = sqlx::query_as::<_, WeightEntry>(
            "SELECT id, client_id, weight, logged_at FROM weight_logs
             WHERE client_id = $1 ORDER BY logged_at",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await?;
        Ok(entries)
    }

    pub async fn add_weight_entry(session: &Session, weight: f64) -> Result<WeightEntry, ApiError> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(ApiError::invalid("Weight must be greater than zero"));
        }
        let pool = get_pool().await?;
        let client = auth::require_role(pool, session, Role::Client).await?;

        let entry = sqlx::query_as::<_, WeightEntry>(
            "INSERT INTO weight_logs (client_id, weight) VALUES ($1, $2)
             RETURNING id, client_id, weight, logged_at",
        )
        .bind(client.id)
        .bind(weight)
        .fetch_one(pool)
        .await?;
        Ok(entry)
    }

    pub async fn clear_weight_entries(session: &Session) -> Result<(), ApiError> {
        let pool = get_pool().await?;
        let client = auth::require_role(pool, session, Role::Client).await?;
        sqlx::query("DELETE FROM weight_logs WHERE client_id = $1")
            .bind(client.id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn list_trained_days(session: &Session) -> Result<Vec<String>, ApiError> {
        let pool = get_pool().await?;
        let client = auth::require_role(pool, session, Role::Client).await?;
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT day_name FROM days_of_week WHERE client_id = $1")
                .bind(client.id)
                .fetch_all(pool)
                .await?;
        Ok(rows.into_iter().map(|(day,)| day).collect())
    }

    pub async fn reset_trained_days(session: &Session) -> Result<(), ApiError> {
        let pool = get_pool().await?;
        let client = auth::require_role(pool, session, Role::Client).await?;
        sqlx::query("DELETE FROM days_of_week WHERE client_id = $1")
            .bind(client.id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn get_supplements(session: &Session, date: NaiveDate) -> Result<Vec<String>, ApiError> {
        let pool = get_pool().await?;
        let client = auth::require_role(pool, session, Role::Client).await?;
        let row: Option<(Vec<String>,)> = sqlx::query_as(
            "SELECT supplements FROM daily_logs WHERE client_id = $1 AND date = $2",
        )
        .bind(client.id)
        .bind(date)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(taken,)| taken).unwrap_or_default())
    }

    pub async fn set_supplements(
        session: &Session,
        date: NaiveDate,
        taken: Vec<String>,
    ) -> Result<(), ApiError> {
        if let Some(unknown) = taken
            .iter()
            .find(|id| !SUPPLEMENTS.iter().any(|s| s.id == id.as_str()))
        {
            return Err(ApiError::invalid(format!("Unknown supplement: {unknown}")));
        }
        let pool = get_pool().await?;
        let client = auth::require_role(pool, session, Role::Client).await?;

        sqlx::query(
            "INSERT INTO daily_logs (client_id, date, supplements, updated_at)
             VALUES ($1, $2, $3, NOW())
             ON CONFLICT (client_id, date)
             DO UPDATE SET supplements = EXCLUDED.supplements, updated_at = NOW()",
        )
        .bind(client.id)
        .bind(date)
        .bind(&taken)
        .execute(pool)
        .await?;
        Ok(())
    }
}
