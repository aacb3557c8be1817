//! Workout and diet plan records.
//!
//! A client has at most one *active* workout plan and one active diet plan. Both are created
//! lazily by the trainer's first "add" on the client management page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "server")]
use sqlx::FromRow;

/// Default name of a workout plan created on the first added exercise.
pub const DEFAULT_WORKOUT_PLAN_NAME: &str = "Workout Plan";
/// Default name of a diet plan created on the first added diet item.
pub const DEFAULT_DIET_PLAN_NAME: &str = "Diet Plan";
/// Sets/reps used when the trainer leaves the field empty.
pub const DEFAULT_SETS_REPS: &str = "3x10";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(FromRow))]
pub struct WorkoutPlan {
    pub id: Uuid,
    pub client_id: Uuid,
    pub trainer_id: Option<Uuid>,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(FromRow))]
pub struct Exercise {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub exercise_name: String,
    pub sets_reps: String,
    pub video_url: Option<String>,
    pub order_index: i32,
}

/// A workout plan with its exercises sorted by `order_index`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanWithExercises {
    pub plan: WorkoutPlan,
    pub exercises: Vec<Exercise>,
}

/// Exercise as typed by the trainer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NewExercise {
    pub name: String,
    pub sets_reps: String,
    pub video_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(FromRow))]
pub struct DietItem {
    pub id: Uuid,
    pub plan_id: Uuid,
    pub client_id: Uuid,
    pub meal_name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// One performed set recorded from a workout session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(FromRow))]
pub struct ExerciseLog {
    pub id: Uuid,
    pub client_id: Uuid,
    pub exercise_id: Uuid,
    pub exercise_name: Option<String>,
    pub weight: f64,
    pub reps_actual: i32,
    pub logged_at: DateTime<Utc>,
}

/// Weight and reps entered for one exercise of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionEntry {
    pub exercise_id: Uuid,
    pub weight: f64,
    pub reps: i32,
}

/// Row of the trainer's client list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "server", derive(FromRow))]
pub struct ClientSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub fitness_goal: Option<String>,
    pub active_plan_name: Option<String>,
}

impl ClientSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Case-insensitive match on first or last name.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.first_name.to_lowercase().contains(&term)
            || self.last_name.to_lowercase().contains(&term)
    }
}

/// Counters shown on the trainer dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct TrainerStats {
    pub total_clients: i64,
    pub workout_plans: i64,
    pub diet_plans: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_search_matches_either_name() {
        let client = ClientSummary {
            id: Uuid::nil(),
            first_name: "Giulia".to_string(),
            last_name: "Bianchi".to_string(),
            email: "giulia@example.com".to_string(),
            fitness_goal: None,
            active_plan_name: None,
        };
        assert!(client.matches(""));
        assert!(client.matches("giu"));
        assert!(client.matches(" BIAN "));
        assert!(!client.matches("rossi"));
        assert_eq!(client.full_name(), "Giulia Bianchi");
    }
}
