//! Status derivation
//!
//! Maps a `SessionState` to the status shown to the user. Rules are evaluated in
//! order and the first match wins:
//!
//! 1. Tracker loading → `Loading`
//! 2. Exercise name equals the undefined-exercise sentinel → `Searching`
//! 3. Otherwise → `Confirmed`, showing `"<name> : <score>"`

use crate::config::{ExerciseType, TrackerConfig};
use crate::session::SessionState;
use serde::Serialize;
use std::fmt;

/// Message shown while the tracker loads its models
pub const LOADING_MESSAGE: &str = "Loading Pose Classification...";

/// Message shown while no exercise is confidently classified
pub const SEARCHING_MESSAGE: &str = "Detecting Exercise...";

/// The three mutually exclusive display modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Tracker not ready
    Loading,
    /// Tracker ready, no exercise classified
    Searching,
    /// Exercise classified
    Confirmed,
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Loading => "loading",
            Self::Searching => "searching",
            Self::Confirmed => "confirmed",
        })
    }
}

/// Panel color family for a display mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTone {
    /// Purple panel behind the loading message
    Busy,
    /// Orange panel while searching
    Warning,
    /// Green panel once confirmed
    Success,
}

impl PanelTone {
    /// Panel background color
    pub fn hex_color(self) -> &'static str {
        match self {
            Self::Busy => "#af5dc2",
            Self::Warning => "#e89631",
            Self::Success => "#58a34d",
        }
    }
}

/// Everything a renderer needs to draw the status box
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    /// Selected display mode
    pub mode: DisplayMode,
    /// Text inside the status panel
    pub message: String,
    /// Panel color family
    pub tone: PanelTone,
    /// Full-screen busy indicator over the tracker preview
    pub busy_overlay: bool,
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.mode, self.message)
    }
}

/// Derive the status for `state`
///
/// `undefined_exercise_name` must be the sentinel the tracker was configured with.
pub fn derive_status(state: &SessionState, undefined_exercise_name: &str) -> StatusView {
    if state.is_loading {
        return StatusView {
            mode: DisplayMode::Loading,
            message: LOADING_MESSAGE.to_string(),
            tone: PanelTone::Busy,
            busy_overlay: true,
        };
    }

    if state.exercise_name() == undefined_exercise_name {
        return StatusView {
            mode: DisplayMode::Searching,
            message: SEARCHING_MESSAGE.to_string(),
            tone: PanelTone::Warning,
            busy_overlay: false,
        };
    }

    let exercise = state.classified_exercise.clone().unwrap_or_default();
    StatusView {
        mode: DisplayMode::Confirmed,
        message: format!("{} : {}", exercise.name, exercise.score),
        tone: PanelTone::Success,
        busy_overlay: false,
    }
}

/// Heading shown above the tracker preview
pub fn heading_for(exercise: ExerciseType) -> String {
    format!("Do a {}", exercise.display_name())
}

/// Status derivation bound to one session's configuration
#[derive(Debug, Clone)]
pub struct StatusPresenter {
    undefined_exercise_name: String,
    exercise_type: ExerciseType,
}

impl StatusPresenter {
    /// Presenter for sessions configured with `config`
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            undefined_exercise_name: config.undefined_exercise_name.clone(),
            exercise_type: config.exercise_type,
        }
    }

    /// Current status for `state`
    pub fn present(&self, state: &SessionState) -> StatusView {
        derive_status(state, &self.undefined_exercise_name)
    }

    /// Heading for the configured exercise
    pub fn heading(&self) -> String {
        heading_for(self.exercise_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Classification;

    const UNDEFINED: &str = "Undefined Exercise";

    fn ready_state(exercise: Option<Classification>) -> SessionState {
        let mut state = SessionState::default();
        state.on_is_loading(false);
        if let Some(exercise) = exercise {
            state.on_classified_exercise(exercise);
        }
        state
    }

    #[test]
    fn test_fresh_state_is_loading() {
        let view = derive_status(&SessionState::default(), UNDEFINED);
        assert_eq!(view.mode, DisplayMode::Loading);
        assert_eq!(view.message, LOADING_MESSAGE);
        assert!(view.busy_overlay);
        assert_eq!(view.tone, PanelTone::Busy);
    }

    #[test]
    fn test_loading_wins_over_defined_exercise() {
        let mut state = ready_state(Some(Classification::new("Squat", 5.0)));
        state.on_is_loading(true);
        assert_eq!(derive_status(&state, UNDEFINED).mode, DisplayMode::Loading);
    }

    #[test]
    fn test_sentinel_means_searching() {
        let state = ready_state(Some(Classification::new(UNDEFINED, 0.0)));
        let view = derive_status(&state, UNDEFINED);
        assert_eq!(view.mode, DisplayMode::Searching);
        assert_eq!(view.message, "Detecting Exercise...");
        assert_eq!(view.tone.hex_color(), "#e89631");
        assert!(!view.busy_overlay);
    }

    #[test]
    fn test_defined_exercise_is_confirmed() {
        let state = ready_state(Some(Classification::new("Squat", 7.0)));
        let view = derive_status(&state, UNDEFINED);
        assert_eq!(view.mode, DisplayMode::Confirmed);
        assert_eq!(view.message, "Squat : 7");
        assert_eq!(view.tone, PanelTone::Success);
    }

    #[test]
    fn test_fractional_score_is_shown_verbatim() {
        let state = ready_state(Some(Classification::new("Squat", 0.5)));
        assert_eq!(derive_status(&state, UNDEFINED).message, "Squat : 0.5");
    }

    #[test]
    fn test_no_exercise_yet_is_not_searching() {
        let view = derive_status(&ready_state(None), UNDEFINED);
        assert_eq!(view.mode, DisplayMode::Confirmed);
        assert_eq!(view.message, " : 0");
    }

    #[test]
    fn test_sentinel_comes_from_configuration() {
        let config = TrackerConfig {
            undefined_exercise_name: "none".to_string(),
            ..TrackerConfig::default()
        };
        let presenter = StatusPresenter::new(&config);

        let state = ready_state(Some(Classification::new("none", 0.0)));
        assert_eq!(presenter.present(&state).mode, DisplayMode::Searching);

        let state = ready_state(Some(Classification::new(UNDEFINED, 0.0)));
        assert_eq!(presenter.present(&state).mode, DisplayMode::Confirmed);
    }

    #[test]
    fn test_heading_and_display() {
        assert_eq!(heading_for(ExerciseType::Squat), "Do a Squat");
        let view = derive_status(&SessionState::default(), UNDEFINED);
        assert_eq!(view.to_string(), "[loading] Loading Pose Classification...");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_event() -> impl Strategy<Value = crate::tracker::TrackerEvent> {
            use crate::tracker::TrackerEvent;
            let name = prop_oneof![Just(UNDEFINED.to_string()), "[A-Za-z ]{0,12}"];
            prop_oneof![
                any::<bool>().prop_map(TrackerEvent::IsLoading),
                any::<bool>().prop_map(TrackerEvent::IsDetecting),
                (name.clone(), 0.0..100.0f64).prop_map(|(n, s)| {
                    TrackerEvent::ClassifiedExercise(Classification::new(n, s))
                }),
                (name, 0.0..1.0f64)
                    .prop_map(|(n, s)| TrackerEvent::ClassifiedPose(Classification::new(n, s))),
            ]
        }

        proptest! {
            /// Property: loading always yields the loading mode
            #[test]
            fn loading_flag_dominates(events in prop::collection::vec(arb_event(), 0..20)) {
                let mut state = SessionState::default();
                for event in &events {
                    state.apply(event);
                }
                state.on_is_loading(true);
                prop_assert_eq!(derive_status(&state, UNDEFINED).mode, DisplayMode::Loading);
            }

            /// Property: once ready, searching iff the exercise name is the sentinel
            #[test]
            fn searching_iff_sentinel(events in prop::collection::vec(arb_event(), 0..20)) {
                let mut state = SessionState::default();
                for event in &events {
                    state.apply(event);
                }
                state.on_is_loading(false);
                let mode = derive_status(&state, UNDEFINED).mode;
                if state.exercise_name() == UNDEFINED {
                    prop_assert_eq!(mode, DisplayMode::Searching);
                } else {
                    prop_assert_eq!(mode, DisplayMode::Confirmed);
                }
            }

            /// Property: re-applying the last event changes nothing
            #[test]
            fn reapplying_is_idempotent(events in prop::collection::vec(arb_event(), 1..20)) {
                let mut state = SessionState::default();
                for event in &events {
                    state.apply(event);
                }
                let before = state.clone();
                let view = derive_status(&state, UNDEFINED);
                if let Some(last) = events.last() {
                    state.apply(last);
                }
                prop_assert_eq!(&state, &before);
                prop_assert_eq!(derive_status(&state, UNDEFINED), view);
            }
        }
    }
}
