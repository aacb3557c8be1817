use dioxus::prelude::*;

/// Stylesheet for the shared widgets and the navbar.
pub const VIEWS_CSS: Asset = asset!("/src/views/views.css");

mod modal_overlay;
pub use modal_overlay::ModalOverlay;

mod dialogs;
pub use dialogs::{AlertModal, ConfirmModal};

mod pending;
pub use pending::PendingIndicator;

mod profile_editor;
pub use profile_editor::ProfileEditor;

mod weight_trend;
pub use weight_trend::{format_weight_change, WeightTrend};
