//! Session state and its per-channel handlers
//!
//! Each handler assigns its value verbatim to one field. Handlers never fail and
//! never touch another channel's field, so delivery order across channels does
//! not matter; the last write per field wins.

use crate::config::CameraFacing;
use crate::tracker::{Classification, ClassificationSet, TrackerEvent};
use tracing::debug;

/// Latest values reported by the tracker
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Camera the tracker was configured with
    pub camera_facing: CameraFacing,
    /// Current pose; `("", 0.0)` until the first pose event
    pub classified_pose: Classification,
    /// Recognized pose set
    pub classified_poses: Option<ClassificationSet>,
    /// Current exercise
    pub classified_exercise: Option<Classification>,
    /// Recognized exercise set
    pub classified_exercises: Option<ClassificationSet>,
    /// Pose labels the tracker knows (informational)
    pub learned_poses: Option<Vec<String>>,
    /// Exercise labels the tracker knows (informational)
    pub learned_exercises: Option<Vec<String>>,
    /// Pose detection active
    pub is_detecting: bool,
    /// Tracker still loading
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(CameraFacing::default())
    }
}

impl SessionState {
    /// Fresh state for a session using `camera_facing`
    pub fn new(camera_facing: CameraFacing) -> Self {
        Self {
            camera_facing,
            classified_pose: Classification::default(),
            classified_poses: None,
            classified_exercise: None,
            classified_exercises: None,
            learned_poses: None,
            learned_exercises: None,
            is_detecting: true,
            is_loading: true,
        }
    }

    /// Exercise label used for status derivation
    ///
    /// Empty until the first exercise event arrives.
    pub fn exercise_name(&self) -> &str {
        self.classified_exercise
            .as_ref()
            .map_or("", |exercise| exercise.name.as_str())
    }

    /// Store the current pose
    pub fn on_classified_pose(&mut self, pose: Classification) {
        self.classified_pose = pose;
    }

    /// Store the recognized pose set
    pub fn on_classified_poses(&mut self, poses: ClassificationSet) {
        self.classified_poses = Some(poses);
    }

    /// Store the current exercise
    pub fn on_classified_exercise(&mut self, exercise: Classification) {
        self.classified_exercise = Some(exercise);
    }

    /// Store the recognized exercise set
    pub fn on_classified_exercises(&mut self, exercises: ClassificationSet) {
        self.classified_exercises = Some(exercises);
    }

    /// Store the known pose labels
    pub fn on_learned_poses(&mut self, names: Vec<String>) {
        self.learned_poses = Some(names);
    }

    /// Store the known exercise labels
    pub fn on_learned_exercises(&mut self, names: Vec<String>) {
        self.learned_exercises = Some(names);
    }

    /// Store the detection-active flag
    pub fn on_is_detecting(&mut self, detecting: bool) {
        self.is_detecting = detecting;
    }

    /// Store the loading flag
    pub fn on_is_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Route an event to its handler
    pub fn apply(&mut self, event: &TrackerEvent) {
        debug!("Applying {} event", event.channel());
        match event {
            TrackerEvent::IsDetecting(detecting) => self.on_is_detecting(*detecting),
            TrackerEvent::IsLoading(loading) => self.on_is_loading(*loading),
            TrackerEvent::ClassifiedPoses(poses) => self.on_classified_poses(poses.clone()),
            TrackerEvent::ClassifiedPose(pose) => self.on_classified_pose(pose.clone()),
            TrackerEvent::ClassifiedExercise(exercise) => {
                self.on_classified_exercise(exercise.clone());
            }
            TrackerEvent::ClassifiedExercises(exercises) => {
                self.on_classified_exercises(exercises.clone());
            }
            TrackerEvent::LearnedPoses(names) => self.on_learned_poses(names.clone()),
            TrackerEvent::LearnedExercises(names) => self.on_learned_exercises(names.clone()),
        }
    }
}
