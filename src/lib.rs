//! `squatcount` - Squat-counting session supervisor
//!
//! Drives an external pose tracker through a squat-counting session. The tracker
//! does all pose estimation, classification and repetition counting; this crate
//! configures it once, applies the events it pushes to an owned `SessionState`,
//! and derives the three-state display status (loading / searching / confirmed).
//!
//! # Event Flow
//!
//! ```text
//! PoseTracker → TrackerEvent → SessionController → SessionState
//!                                       ↓
//!                                  StatusView → render sink
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod recording;
pub mod session;
pub mod status;
pub mod tracker;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{Result, SquatCountError};
