mod dashboard;
pub use dashboard::TrainerDashboard;

mod client_management;
pub use client_management::ClientManagement;

mod requests;
pub use requests::TrainerRequests;

mod profile;
pub use profile::TrainerProfile;
