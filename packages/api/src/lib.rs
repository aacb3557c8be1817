//! # API crate: shared fullstack server functions for the coaching app
//!
//! Defines every Dioxus server function the web frontend calls, together with the models,
//! validation rules and server-side access checks behind them.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | | Password hashing, session binding and row-level access rules |
//! | [`config`] | `server` | Server settings read from the environment |
//! | [`db`] | | PostgreSQL connection pool (lazy `OnceCell` singleton) |
//! | [`error`] | `server` | [`error::ApiError`] and its conversion at the server-function boundary |
//! | [`models`] | | Profiles, plans, tracking records and requests |
//! | [`validate`] | | Form checks run in the browser and again on the server |
//!
//! ## Server functions
//!
//! Every server function is declared twice: once with the real body behind
//! `#[cfg(feature = "server")]`, once as a client stub that forwards the call over HTTP.
//! The bodies delegate to service functions returning [`error::ApiError`].
//!
//! - **Account** ([`account`]): `get_session`, `get_my_profile`, `sign_in`, `sign_up`,
//!   `sign_out`, `update_identity`, `update_profile`
//! - **Clients** ([`clients`]): `list_clients`, `assign_client`, `get_client_profile`,
//!   `trainer_stats`
//! - **Workouts** ([`workouts`]): `get_active_plan`, `get_workout_plan`, `add_exercise`,
//!   `delete_exercise`, `log_workout_session`, `recent_exercise_logs`
//! - **Diet** ([`diet`]): `list_diet_items`, `add_diet_item`, `delete_diet_item`
//! - **Tracking** ([`tracking`]): weights, trained days and supplements
//! - **Requests** ([`requests`]): `submit_request`, `list_pending_requests`,
//!   `resolve_request`, `pending_request_count`

pub mod account;
pub mod auth;
pub mod clients;
#[cfg(feature = "server")]
pub mod config;
pub mod db;
pub mod diet;
#[cfg(feature = "server")]
pub mod error;
pub mod models;
pub mod requests;
pub mod tracking;
pub mod validate;
pub mod workouts;

pub use account::*;
pub use clients::*;
pub use diet::*;
pub use models::*;
pub use requests::*;
pub use tracking::*;
pub use workouts::*;

pub use chrono::NaiveDate;
pub use uuid::Uuid;
