//! Client-to-trainer requests: new program, exercise swap and meal swap.
//!
//! Each kind lives in its own table; trainers see the three lists side by side and resolve a
//! request by deleting it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Program,
    ExerciseChange,
    DietChange,
}

impl RequestKind {
    pub const ALL: [RequestKind; 3] = [
        RequestKind::Program,
        RequestKind::ExerciseChange,
        RequestKind::DietChange,
    ];

    /// Table holding requests of this kind.
    pub fn table(&self) -> &'static str {
        match self {
            RequestKind::Program => "program_requests",
            RequestKind::ExerciseChange => "exercise_change_requests",
            RequestKind::DietChange => "diet_change_requests",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RequestKind::Program => "New program requests",
            RequestKind::ExerciseChange => "Exercise support",
            RequestKind::DietChange => "Nutrition support",
        }
    }
}

/// A request as submitted from the client dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClientRequest {
    Program { goal: String, notes: String },
    ExerciseChange { exercise_name: String, reason: String },
    DietChange { meal_name: String, reason: String },
}

impl ClientRequest {
    pub fn kind(&self) -> RequestKind {
        match self {
            ClientRequest::Program { .. } => RequestKind::Program,
            ClientRequest::ExerciseChange { .. } => RequestKind::ExerciseChange,
            ClientRequest::DietChange { .. } => RequestKind::DietChange,
        }
    }

    /// Program requests need a goal; swaps need both fields.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ClientRequest::Program { goal, .. } if goal.trim().is_empty() => {
                Err("Specify at least the main goal".to_string())
            }
            ClientRequest::ExerciseChange { exercise_name: a, reason: b }
            | ClientRequest::DietChange { meal_name: a, reason: b }
                if a.trim().is_empty() || b.trim().is_empty() =>
            {
                Err("Fill in all fields".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// A request waiting for the trainer, with the sender's name joined in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingRequest {
    pub id: Uuid,
    pub kind: RequestKind,
    pub client_id: Uuid,
    pub client_name: String,
    /// Program goal, exercise name or meal name.
    pub subject: String,
    /// Notes or reason.
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Reasons offered for an exercise swap.
pub const EXERCISE_REASONS: [&str; 5] = [
    "Joint pain or discomfort",
    "Machine not available",
    "Exercise too technically demanding",
    "Lack of motivation / boredom",
    "Other",
];

/// Reasons offered for a meal swap.
pub const DIET_REASONS: [&str; 5] = [
    "Hard to find the food",
    "Unpleasant taste",
    "Digestion problems",
    "Hard to organise the meal",
    "Other",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_request_needs_a_goal() {
        let req = ClientRequest::Program {
            goal: "  ".to_string(),
            notes: "anything".to_string(),
        };
        assert!(req.validate().is_err());

        let req = ClientRequest::Program {
            goal: "Hypertrophy".to_string(),
            notes: String::new(),
        };
        assert_eq!(req.validate(), Ok(()));
        assert_eq!(req.kind(), RequestKind::Program);
    }

    #[test]
    fn swap_requests_need_both_fields() {
        let req = ClientRequest::DietChange {
            meal_name: "Breakfast".to_string(),
            reason: String::new(),
        };
        assert_eq!(req.validate(), Err("Fill in all fields".to_string()));

        let req = ClientRequest::ExerciseChange {
            exercise_name: "Squat".to_string(),
            reason: EXERCISE_REASONS[0].to_string(),
        };
        assert!(req.validate().is_ok());
        assert_eq!(req.kind().table(), "exercise_change_requests");
    }
}
