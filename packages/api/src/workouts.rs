//! Workout plans, their exercises and the session log.
//!
//! Trainers edit the active plan of an assigned athlete; the athlete records sessions against
//! it. Recording a session also marks the session's weekday in the gym-day tracker.

use chrono::NaiveDate;
use dioxus::prelude::*;
use uuid::Uuid;

use crate::models::{Exercise, ExerciseLog, NewExercise, PlanWithExercises, SessionEntry};

#[cfg(feature = "server")]
use crate::error::into_server_error;

/// Active workout plan of an athlete, `None` until the trainer adds a first exercise.
#[cfg(feature = "server")]
#[post("/api/workouts/active", session: tower_sessions::Session)]
pub async fn get_active_plan(client_id: Uuid) -> Result<Option<PlanWithExercises>, ServerFnError> {
    server::get_active_plan(&session, client_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/workouts/active")]
pub async fn get_active_plan(client_id: Uuid) -> Result<Option<PlanWithExercises>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/workouts/plan", session: tower_sessions::Session)]
pub async fn get_workout_plan(plan_id: Uuid) -> Result<PlanWithExercises, ServerFnError> {
    server::get_workout_plan(&session, plan_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/workouts/plan")]
pub async fn get_workout_plan(plan_id: Uuid) -> Result<PlanWithExercises, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Append an exercise to the athlete's active plan, creating the plan on first use.
#[cfg(feature = "server")]
#[post("/api/workouts/exercises/add", session: tower_sessions::Session)]
pub async fn add_exercise(client_id: Uuid, exercise: NewExercise) -> Result<Exercise, ServerFnError> {
    server::add_exercise(&session, client_id, exercise)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/workouts/exercises/add")]
pub async fn add_exercise(client_id: Uuid, exercise: NewExercise) -> Result<Exercise, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
#[post("/api/workouts/exercises/delete", session: tower_sessions::Session)]
pub async fn delete_exercise(exercise_id: Uuid) -> Result<(), ServerFnError> {
    server::delete_exercise(&session, exercise_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/workouts/exercises/delete")]
pub async fn delete_exercise(exercise_id: Uuid) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Record one session of the signed-in athlete's own plan.
#[cfg(feature = "server")]
#[post("/api/workouts/sessions", session: tower_sessions::Session)]
pub async fn log_workout_session(
    plan_id: Uuid,
    date: NaiveDate,
    entries: Vec<SessionEntry>,
) -> Result<(), ServerFnError> {
    server::log_workout_session(&session, plan_id, date, entries)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/workouts/sessions")]
pub async fn log_workout_session(
    plan_id: Uuid,
    date: NaiveDate,
    entries: Vec<SessionEntry>,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The ten most recent logged sets of an athlete.
#[cfg(feature = "server")]
#[post("/api/workouts/logs", session: tower_sessions::Session)]
pub async fn recent_exercise_logs(client_id: Uuid) -> Result<Vec<ExerciseLog>, ServerFnError> {
    server::recent_exercise_logs(&session, client_id)
        .await
        .map_err(into_server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/workouts/logs")]
pub async fn recent_exercise_logs(client_id: Uuid) -> Result<Vec<ExerciseLog>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

#[cfg(feature = "server")]
mod server {
    use chrono::{Datelike, NaiveDate, NaiveTime};
    use sqlx::PgPool;
    use tower_sessions::Session;
    use uuid::Uuid;

    use crate::auth;
    use crate::db::get_pool;
    use crate::error::ApiError;
    use crate::models::{
        day_name, Exercise, ExerciseLog, NewExercise, PlanWithExercises, Role, SessionEntry,
        WorkoutPlan, DEFAULT_SETS_REPS, DEFAULT_WORKOUT_PLAN_NAME,
    };

    /// Number of log rows shown on the client management page.
    const RECENT_LOGS: i64 = 10;

    async fn active_plan(pool: &PgPool, client_id: Uuid) -> Result<Option<WorkoutPlan>, ApiError> {
        let plan = sqlx::query_as(
            "SELECT id, client_id, trainer_id, name, is_active, created_at
             FROM workout_plans
             WHERE client_id = $1 AND is_active = TRUE
             ORDER BY created_at DESC LIMIT 1",
        )
        .bind(client_id)
        .fetch_optional(pool)
        .await?;
        Ok(plan)
    }

    async fn with_exercises(
        pool: &PgPool,
        plan: WorkoutPlan,
    ) -> Result<PlanWithExercises, ApiError> {
        let exercises = sqlx::query_as::<_, Exercise>(
            "SELECT id, plan_id, exercise_name, sets_reps, video_url, order_index
             FROM workout_exercises WHERE plan_id = $1
             ORDER BY order_index, created_at",
        )
        .bind(plan.id)
        .fetch_all(pool)
        .await?;
        Ok(PlanWithExercises { plan, exercises })
    }

    pub async fn get_active_plan(
        session: &Session,
        client_id: Uuid,
    ) -> Result<Option<PlanWithExercises>, ApiError> {
        let pool = get_pool().await?;
        auth::require_viewer_of(pool, session, client_id).await?;
        match active_plan(pool, client_id).await? {
            Some(plan) => Ok(Some(with_exercises(pool, plan).await?)),
            None => Ok(None),
        }
    }

    pub async fn get_workout_plan(
        session: &Session,
        plan_id: Uuid,
    ) -> Result<PlanWithExercises, ApiError> {
        let pool = get_pool().await?;
        let plan: WorkoutPlan = sqlx::query_as(
            "SELECT id, client_id, trainer_id, name, is_active, created_at
             FROM workout_plans WHERE id = $1",
        )
        .bind(plan_id)
        .fetch_optional(pool)
        .await?
        .ok_or(ApiError::NotFound("Workout plan"))?;
        auth::require_viewer_of(pool, session, plan.client_id).await?;
        with_exercises(pool, plan).await
    }

    pub async fn add_exercise(
        session: &Session,
        client_id: Uuid,
        exercise: NewExercise,
    ) -> Result<Exercise, ApiError> {
        let name = exercise.name.trim();
        if name.is_empty() {
            return Err(ApiError::invalid("Enter the exercise name"));
        }
        let pool = get_pool().await?;
        let trainer = auth::require_trainer_of(pool, session, client_id).await?;

        let mut tx = pool.begin().await?;

        let existing: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM workout_plans
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
                    "INSERT INTO workout_plans (client_id, trainer_id, name)
                     VALUES ($1, $2, $3) RETURNING id",
                )
                .bind(client_id)
                .bind(trainer.id)
                .bind(DEFAULT_WORKOUT_PLAN_NAME)
                .fetch_one(&mut *tx)
                .await?;
                tracing::info!(client = %client_id, plan = %id, "workout plan created");
                id
            }
        };

        let sets_reps = match exercise.sets_reps.trim() {
            "" => DEFAULT_SETS_REPS,
            s => s,
        };
        let video_url = Some(exercise.video_url.trim()).filter(|u| !u.is_empty());

        let created = sqlx::query_as::<_, Exercise>(
            "INSERT INTO workout_exercises (plan_id, exercise_name, sets_reps, video_url, order_index)
             VALUES ($1, $2, $3, $4,
                     (SELECT COALESCE(MAX(order_index) + 1, 0)
                      FROM workout_exercises WHERE plan_id = $1))
             RETURNING id, plan_id, exercise_name, sets_reps, video_url, order_index",
        )
        .bind(plan_id)
        .bind(name)
        .bind(sets_reps)
        .bind(video_url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(created)
    }

    pub async fn delete_exercise(session: &Session, exercise_id: Uuid) -> Result<(), ApiError> {
        let pool = get_pool().await?;
        let owner: Option<(Uuid,)> = sqlx::query_as(
            "SELECT wp.client_id FROM workout_exercises we
             JOIN workout_plans wp ON wp.id = we.plan_id
             WHERE we.id = $1",
        )
        .bind(exercise_id)
        .fetch_optional(pool)
        .await?;
        let (client_id,) = owner.ok_or(ApiError::NotFound("Exercise"))?;
        auth::require_trainer_of(pool, session, client_id).await?;

        sqlx::query("DELETE FROM workout_exercises WHERE id = $1")
            .bind(exercise_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn log_workout_session(
        session: &Session,
        plan_id: Uuid,
        date: NaiveDate,
        entries: Vec<SessionEntry>,
    ) -> Result<(), ApiError> {
        if entries.is_empty() {
            return Err(ApiError::invalid("This plan has no exercises to log"));
        }
        let pool = get_pool().await?;
        let client = auth::require_role(pool, session, Role::Client).await?;

        let owner: Option<(Uuid,)> =
            sqlx::query_as("SELECT client_id FROM workout_plans WHERE id = $1")
                .bind(plan_id)
                .fetch_optional(pool)
                .await?;
        match owner {
            Some((owner,)) if owner == client.id => {}
            Some(_) => {
                return Err(ApiError::Forbidden(
                    "This workout plan belongs to another athlete".to_string(),
                ))
            }
            None => return Err(ApiError::NotFound("Workout plan")),
        }

        let logged_at = date.and_time(NaiveTime::MIN).and_utc();
        let mut tx = pool.begin().await?;

        for entry in &entries {
            let inserted = sqlx::query(
                "INSERT INTO exercise_logs (client_id, exercise_id, weight, reps_actual, logged_at)
                 SELECT $1, id, $3, $4, $5 FROM workout_exercises
                 WHERE id = $2 AND plan_id = $6",
            )
            .bind(client.id)
            .bind(entry.exercise_id)
            .bind(entry.weight)
            .bind(entry.reps)
            .bind(logged_at)
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;
            if inserted.rows_affected() == 0 {
                return Err(ApiError::NotFound("Exercise"));
            }
        }

        sqlx::query(
            "INSERT INTO days_of_week (client_id, day_name, last_trained_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (client_id, day_name) DO UPDATE SET last_trained_at = EXCLUDED.last_trained_at",
        )
        .bind(client.id)
        .bind(day_name(date.weekday()))
        .bind(logged_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!(client = %client.id, %date, sets = entries.len(), "workout session logged");
        Ok(())
    }

    pub async fn recent_exercise_logs(
        session: &Session,
        client_id: Uuid,
    ) -> Result<Vec<ExerciseLog>, ApiError> {
        let pool = get_pool().await?;
        auth::require_viewer_of(pool, session, client_id).await?;

        let logs = sqlx::query_as::<_, ExerciseLog>(
            "SELECT el.id, el.client_id, el.exercise_id, we.exercise_name,
                    el.weight, el.reps_actual, el.logged_at
             FROM exercise_logs el
             LEFT JOIN workout_exercises we ON we.id = el.exercise_id
             WHERE el.client_id = $1
             ORDER BY el.logged_at DESC
             LIMIT $2",
        )
        .bind(client_id)
        .bind(RECENT_LOGS)
        .fetch_all(pool)
        .await?;
        Ok(logs)
    }
}
