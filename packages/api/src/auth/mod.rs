//! Authentication: password hashing, session binding and access rules.

#[cfg(feature = "server")]
mod guard;
#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod session;

#[cfg(feature = "server")]
pub use guard::{
    is_assigned, load_profile, require_profile, require_role, require_trainer_of,
    require_viewer_of,
};
#[cfg(feature = "server")]
pub use password::{hash_password, verify_password};
#[cfg(feature = "server")]
pub use session::{current_user_id, open_session, require_user_id, SESSION_USER_ID_KEY};
