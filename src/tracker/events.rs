//! Events pushed by the pose tracker
//!
//! Every event belongs to exactly one `EventChannel`, and each channel maps to one
//! field of the session state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A classification result: label plus a numeric value
///
/// For poses the value is a confidence. For exercises the tracker reports a
/// score or repetition count; it is kept opaque and displayed verbatim.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ClassificationRepr")]
pub struct Classification {
    /// Pose or exercise label
    pub name: String,
    /// Confidence, score or repetition count
    pub score: f64,
}

impl Classification {
    /// Create a classification from a label and value
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Accepts both `{"name": .., "score": ..}` and the tracker's `[name, score]` pair form
#[derive(Deserialize)]
#[serde(untagged)]
enum ClassificationRepr {
    Pair(String, f64),
    Named { name: String, score: f64 },
}

impl From<ClassificationRepr> for Classification {
    fn from(repr: ClassificationRepr) -> Self {
        match repr {
            ClassificationRepr::Pair(name, score) | ClassificationRepr::Named { name, score } => {
                Self { name, score }
            }
        }
    }
}

/// All classifications the tracker currently recognizes
pub type ClassificationSet = Vec<Classification>;

/// One subscription point on the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventChannel {
    /// Pose detection active / inactive
    IsDetecting,
    /// Tracker still loading its models
    IsLoading,
    /// Every recognized pose with its confidence
    ClassifiedPoses,
    /// Best pose classification
    ClassifiedPose,
    /// Best exercise classification
    ClassifiedExercise,
    /// Every recognized exercise
    ClassifiedExercises,
    /// Pose labels the tracker knows
    LearnedPoses,
    /// Exercise labels the tracker knows
    LearnedExercises,
}

impl EventChannel {
    /// Number of channels
    pub const COUNT: usize = 8;

    /// Every channel in declaration order
    pub const ALL: [Self; Self::COUNT] = [
        Self::IsDetecting,
        Self::IsLoading,
        Self::ClassifiedPoses,
        Self::ClassifiedPose,
        Self::ClassifiedExercise,
        Self::ClassifiedExercises,
        Self::LearnedPoses,
        Self::LearnedExercises,
    ];

    /// Position of this channel in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name the tracker uses for this channel
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IsDetecting => "isDetecting",
            Self::IsLoading => "isLoading",
            Self::ClassifiedPoses => "classifiedPoses",
            Self::ClassifiedPose => "classifiedPose",
            Self::ClassifiedExercise => "classifiedExercise",
            Self::ClassifiedExercises => "classifiedExercises",
            Self::LearnedPoses => "learnedPoses",
            Self::LearnedExercises => "learnedExercises",
        }
    }
}

impl fmt::Display for EventChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event pushed by the tracker
///
/// Serialized as `{"event": "<channel>", "value": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "camelCase")]
pub enum TrackerEvent {
    /// Pose detection active flag
    IsDetecting(bool),
    /// Loading flag; `false` means the tracker is ready
    IsLoading(bool),
    /// Recognized pose set
    ClassifiedPoses(ClassificationSet),
    /// Current pose
    ClassifiedPose(Classification),
    /// Current exercise
    ClassifiedExercise(Classification),
    /// Recognized exercise set
    ClassifiedExercises(ClassificationSet),
    /// Known pose labels
    LearnedPoses(Vec<String>),
    /// Known exercise labels
    LearnedExercises(Vec<String>),
}

impl TrackerEvent {
    /// Channel this event is delivered on
    pub fn channel(&self) -> EventChannel {
        match self {
            Self::IsDetecting(_) => EventChannel::IsDetecting,
            Self::IsLoading(_) => EventChannel::IsLoading,
            Self::ClassifiedPoses(_) => EventChannel::ClassifiedPoses,
            Self::ClassifiedPose(_) => EventChannel::ClassifiedPose,
            Self::ClassifiedExercise(_) => EventChannel::ClassifiedExercise,
            Self::ClassifiedExercises(_) => EventChannel::ClassifiedExercises,
            Self::LearnedPoses(_) => EventChannel::LearnedPoses,
            Self::LearnedExercises(_) => EventChannel::LearnedExercises,
        }
    }
}
