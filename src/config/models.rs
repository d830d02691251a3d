//! Configuration data models
//!
//! This module defines the typed option set handed to the pose tracker once per session.

use crate::error::{Result, SquatCountError};
use serde::{Deserialize, Serialize};

/// Exercise whose classifier and counting logic the tracker runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    /// Bodyweight squat
    #[default]
    Squat,
}

impl ExerciseType {
    /// Human-readable exercise name
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Squat => "Squat",
        }
    }
}

/// Which camera the tracker reads frames from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraFacing {
    /// Front (selfie) camera
    #[default]
    Front,
    /// Back camera
    Back,
}

/// Pose-estimation model variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimationModelType {
    /// Smallest, fastest model
    Lite,
    /// Balanced model
    #[default]
    Full,
    /// Most accurate, slowest model
    Heavy,
}

/// Options passed to the pose tracker when a session attaches
///
/// Keys serialize in camelCase to match the tracker's option names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Exercise to classify and count
    pub exercise_type: ExerciseType,
    /// Camera to read frames from
    pub camera_state: CameraFacing,
    /// Pose-estimation model variant
    pub estimation_model_type: EstimationModelType,
    /// Minimum keypoint confidence (0.0-1.0)
    pub estimation_threshold: f64,
    /// Minimum confidence for a pose classification to be accepted
    pub classification_threshold: f64,
    /// Smoothing factor applied to classification confidence over time
    pub classification_smoothing_value: f64,
    /// Samples before the movement-tracking window resets
    pub movement_window_reset_limit: u32,
    /// Temporal smoothing of keypoint estimates
    pub estimation_smoothing: bool,
    /// Show the tracker's FPS counter
    pub show_fps: bool,
    /// Draw keypoints on the tracker's preview
    pub render_keypoints: bool,
    /// Let the tracker render its own preview
    pub auto_render: bool,
    /// Clear accumulated exercise state on (re)configuration
    pub reset_exercises: bool,
    /// Label the tracker reports when no pose is confidently classified
    pub undefined_pose_name: String,
    /// Label the tracker reports when no exercise is confidently classified
    pub undefined_exercise_name: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            exercise_type: ExerciseType::Squat,
            camera_state: CameraFacing::Front,
            estimation_model_type: EstimationModelType::Full,
            estimation_threshold: 0.3,
            classification_threshold: 5.0,
            classification_smoothing_value: 1.0,
            movement_window_reset_limit: 20,
            estimation_smoothing: true,
            show_fps: true,
            render_keypoints: true,
            auto_render: true,
            reset_exercises: false,
            undefined_pose_name: "Undefined Pose".to_string(),
            undefined_exercise_name: "Undefined Exercise".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Check numeric ranges and sentinel labels
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.estimation_threshold) {
            return Err(invalid(format!(
                "estimationThreshold must be within [0, 1], got {}",
                self.estimation_threshold
            )));
        }
        check_non_negative("classificationThreshold", self.classification_threshold)?;
        check_non_negative(
            "classificationSmoothingValue",
            self.classification_smoothing_value,
        )?;
        if self.movement_window_reset_limit == 0 {
            return Err(invalid("movementWindowResetLimit must be greater than 0"));
        }
        check_label("undefinedPoseName", &self.undefined_pose_name)?;
        check_label("undefinedExerciseName", &self.undefined_exercise_name)?;
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> SquatCountError {
    SquatCountError::InvalidConfig(reason.into())
}

fn check_non_negative(option: &str, value: f64) -> Result<()> {
    // NaN fails both comparisons
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!(
            "{option} must be a finite, non-negative number, got {value}"
        )))
    }
}

fn check_label(option: &str, label: &str) -> Result<()> {
    if label.trim().is_empty() {
        Err(invalid(format!("{option} must not be empty")))
    } else {
        Ok(())
    }
}
