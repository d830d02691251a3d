//! Status presentation module
//!
//! Pure derivation of the display status from the session state. The status is
//! recomputed after every state change; there is no hysteresis and no hidden
//! state, so noisy classifier output passes straight through.

pub mod presenter;

pub use presenter::{
    DisplayMode, LOADING_MESSAGE, PanelTone, SEARCHING_MESSAGE, StatusPresenter, StatusView,
    derive_status, heading_for,
};
