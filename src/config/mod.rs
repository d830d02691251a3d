//! Configuration management module
//!
//! This module handles loading, saving, and validating the tracker configuration.
//! Configuration is stored in $SQUATCOUNT_HOME/config.json with atomic writes
//! to prevent corruption.

pub mod manager;
pub mod models;

pub use manager::ConfigManager;
pub use models::{CameraFacing, EstimationModelType, ExerciseType, TrackerConfig};
