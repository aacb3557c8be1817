mod home;
pub use home::Home;

mod login;
pub use login::{Login, LoginClient, LoginTrainer};

mod register;
pub use register::Register;

mod protected;
pub use protected::{route_for, Protected};

mod shell;
pub use shell::AppShell;

mod trainer;
pub use trainer::{ClientManagement, TrainerDashboard, TrainerProfile, TrainerRequests};

mod client;
pub use client::{ClientDashboard, ClientProfile, WorkoutPlan};

/// Local mirror of the signed-in user.
pub(crate) fn user_mirror(
    session: &ui::SessionHandle,
) -> store::Mirror<impl store::KeyValueStore> {
    let user_id = session.peek_state().identity.map(|i| i.id.to_string());
    ui::make_mirror(user_id.as_deref())
}

/// Today's date in the browser's time zone.
pub(crate) fn today() -> api::NaiveDate {
    chrono::Local::now().date_naive()
}
