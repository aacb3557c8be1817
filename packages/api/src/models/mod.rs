//! Data models for the application.

mod plan;
mod request;
mod tracking;
mod user;

pub use plan::{
    ClientSummary, DietItem, Exercise, ExerciseLog, NewExercise, PlanWithExercises,
    SessionEntry, TrainerStats, WorkoutPlan, DEFAULT_DIET_PLAN_NAME, DEFAULT_SETS_REPS,
    DEFAULT_WORKOUT_PLAN_NAME,
};
pub use request::{ClientRequest, PendingRequest, RequestKind, DIET_REASONS, EXERCISE_REASONS};
pub use tracking::{
    day_name, toggle_supplement, weight_change, Supplement, WeightEntry, SUPPLEMENTS, WEEK,
};
#[cfg(feature = "server")]
pub use user::Account;
pub use user::{FitnessGoal, Identity, Profile, ProfileUpdate, Role, SignUpForm, SignedIn, UnknownRole};
