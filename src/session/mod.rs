//! Exercise session module
//!
//! This module holds the state of one exercise session and keeps it in sync
//! with the pose tracker.
//!
//! # Overview
//!
//! - `SessionState`: latest value per tracker channel, with one handler per channel
//! - `SessionController`: configures the tracker, registers a listener on every
//!   channel, and recomputes the status after each event
//!
//! # Lifecycle
//!
//! 1. `SessionController::new` validates the configuration; state starts loading
//! 2. `attach` hands the configuration to the tracker and subscribes 8 listeners
//! 3. Events update the state; the status is recomputed after each one
//! 4. `detach` removes the listeners; later events no longer reach the session
//!
//! If the tracker never reports that it finished loading, the session stays in
//! the loading status. That is a steady state, not an error.

pub mod controller;
pub mod state;

pub use controller::SessionController;
pub use state::SessionState;
