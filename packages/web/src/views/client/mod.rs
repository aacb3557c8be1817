mod dashboard;
pub use dashboard::ClientDashboard;

mod workout_session;
pub use workout_session::WorkoutPlan;

mod profile;
pub use profile::ClientProfile;

mod request_forms;
