//! Pose tracker interface
//!
//! The pose tracker is an external component that estimates poses, classifies
//! exercises and counts repetitions. This crate only sees its contract:
//!
//! - **Configuration**: a `TrackerConfig` handed over once when a session attaches
//! - **Subscriptions**: one subscription point per `EventChannel`
//! - **Events**: `TrackerEvent`s pushed to the listeners of their channel
//!
//! There is no query interface; everything flows from the tracker to its listeners.
//!
//! # Implementations
//!
//! - `ScriptedTracker`: replays events supplied by the caller (recordings, tests)
//! - `ChannelTracker`: receives events produced on another thread over an mpsc
//!   channel and delivers them on the thread that calls `pump()`

pub mod channel;
pub mod dispatcher;
pub mod events;
pub mod scripted;

pub use channel::{ChannelTracker, PumpOutcome};
pub use dispatcher::{EventDispatcher, Listener, ListenerControl, SubscriptionId};
pub use events::{Classification, ClassificationSet, EventChannel, TrackerEvent};
pub use scripted::ScriptedTracker;

use crate::config::TrackerConfig;
use crate::error::{Result, SquatCountError};
use tracing::info;

/// Contract of the external pose tracker
pub trait PoseTracker {
    /// Apply the session's configuration
    fn configure(&mut self, config: &TrackerConfig) -> Result<()>;

    /// Register `listener` for every event on `channel`
    fn subscribe(&mut self, channel: EventChannel, listener: Listener) -> SubscriptionId;

    /// Deregister a listener; returns false if it was not registered
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
}

/// Store `config` as the tracker's active configuration
///
/// A tracker accepts a second configuration only when it asks for accumulated
/// exercise state to be reset.
pub(crate) fn accept_configuration(
    slot: &mut Option<TrackerConfig>,
    config: &TrackerConfig,
) -> Result<()> {
    if slot.is_some() {
        if !config.reset_exercises {
            return Err(SquatCountError::TrackerRejected(
                "tracker is already configured and resetExercises is off".to_string(),
            ));
        }
        info!("Reconfiguring tracker with exercise state reset");
    }

    info!(
        "Tracker configured: exercise={:?}, camera={:?}, model={:?}",
        config.exercise_type, config.camera_state, config.estimation_model_type
    );
    *slot = Some(config.clone());
    Ok(())
}
