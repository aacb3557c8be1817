//! Diet plan items written by the trainer and read by the athlete.

use dioxus::prelude::*;
use uuid::Uuid;

use crate::models::DietItem;

#[cfg(feature = "server")]
use crate::error::into_server_error;

/// Items of the athlete's active diet plan, oldest first.
#[cfg(feature = "server")]
#[post("/api/diet/items", session: tower_sessions::Session)]
pub async fn list_diet_items(client_id: Uuid) -> Result<Vec<DietItem>, ServerFnError> {
    server::list_diet_items(&session, client_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/diet/items")]
pub async fn list_diet_items(client_id: Uuid) -> Result<Vec<DietItem>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Add a meal to the athlete's active diet plan, creating the plan on first use.
#[cfg(feature = "server")]
#[post("/api/diet/items/add", session: tower_sessions::Session)]
pub async fn add_diet_item(
    client_id: Uuid,
    meal_name: String,
    description: String,
) -> Result<DietItem, ServerFnError> {
    server::add_diet_item(&session, client_id, &meal_name, &description)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/diet/items/add")]
pub async fn add_diet_item(
    client_id: Uuid,
    meal_name: String,
    description: String,
) -> Result<DietItem, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/diet/items/delete", session: tower_sessions::Session)]
pub async fn delete_diet_item(item_id: Uuid) -> Result<(), ServerFnError> {
    server::delete_diet_item(&session, item_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/diet/items/delete")]
pub async fn delete_diet_item(item_id: Uuid) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
mod server {
    use tower_sessions::Session;
    use uuid::Uuid;

    use crate::auth;
    use crate::db::get_pool;
    use crate::error::ApiError;
    use crate::models::{DietItem, DEFAULT_DIET_PLAN_NAME};

    pub async fn list_diet_items(
        session: &Session,
        client_id: Uuid,
    ) -> Result<Vec<DietItem>, ApiError> {
        let pool = get_pool().await?;
        auth::require_viewer_of(pool, session, client_id).await?;

        let items = sqlx::query_as::<_, DietItem>(
            "SELECT di.id, di.plan_id, di.client_id, di.meal_name, di.description, di.created_at
             FROM diet_items di
             JOIN diet_plans dp ON dp.id = di.plan_id
             WHERE di.client_id = $1 AND dp.is_active = TRUE
             ORDER BY di.created_at",
        )
        .bind(client_id)
        .fetch_all(pool)
        .await?;
        Ok(items)
    }

    pub async fn add_diet_item(
        session: &Session,
        client_id: Uuid,
        meal_name: &str,
        description: &str,
    ) -> Result<DietItem, ApiError> {
        let meal_name = meal_name.trim();
        if meal_name.is_empty() {
            return Err(ApiError::invalid("Enter the meal name"));
        }
        let pool = get_pool().await?;
        let trainer = auth::require_trainer_of(pool, session, client_id).await?;

        let mut tx = pool.begin().await?;

        let existing: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM diet_plans
             WHERE client_id = $1 AND is_active = TRUE
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(client_id)
        .fetch_optional(&mut *tx)
        .await?;
        let plan_id = match existing {
            Some((id,)) => id,
            None => {
                let (id,): (Uuid,) = sqlx::query_as(
                    "INSERT INTO diet_plans (client_id, trainer_id, name)
                     VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(client_id)
                .bind(trainer.id)
                .bind(DEFAULT_DIET_PLAN_NAME)
                .fetch_one(&mut *tx)
                .await?;
                tracing::info!(client = %client_id, plan = %id, "diet plan created");
                id
            }
        };

        let item = sqlx::query_as::<_, DietItem>(
            "INSERT INTO diet_items (plan_id, client_id, meal_name, description)
             VALUES ($1, $2, $3, $4)
             RETURNING id, plan_id, client_id, meal_name, description, created_at",
        )
        .bind(plan_id)
        .bind(client_id)
        .bind(meal_name)
        .bind(description.trim())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(item)
    }

    pub async fn delete_diet_item(session: &Session, item_id: Uuid) -> Result<(), ApiError> {
        let pool = get_pool().await?;
        let owner: Option<(Uuid,)> =
            sqlx::query_as("SELECT client_id FROM diet_items WHERE id = $1")
                .bind(item_id)
                .fetch_optional(pool)
                .await?;
        let (client_id,) = owner.ok_or(ApiError::NotFound("Diet item"))?;
        auth::require_trainer_of(pool, session, client_id).await?;

        sqlx::query("DELETE FROM diet_items WHERE id = $1")
            .bind(item_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
