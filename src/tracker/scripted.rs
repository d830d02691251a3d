//! In-process tracker that replays caller-supplied events

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::tracker::dispatcher::{EventDispatcher, Listener, SubscriptionId};
use crate::tracker::events::{EventChannel, TrackerEvent};
use crate::tracker::{PoseTracker, accept_configuration};
use tracing::debug;

/// Tracker driven by the caller instead of a camera
///
/// Events passed to `emit` are delivered synchronously to the listeners of
/// their channel.
#[derive(Debug, Default)]
pub struct ScriptedTracker {
    dispatcher: EventDispatcher,
    config: Option<TrackerConfig>,
    emitted: usize,
}

impl ScriptedTracker {
    /// Create an unconfigured tracker with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one event; returns the number of listeners called
    pub fn emit(&mut self, event: &TrackerEvent) -> usize {
        self.emitted += 1;
        let called = self.dispatcher.dispatch(event);
        debug!("Emitted {} to {} listener(s)", event.channel(), called);
        called
    }

    /// Deliver events in order; returns the total number of listener calls
    pub fn emit_all<'a>(&mut self, events: impl IntoIterator<Item = &'a TrackerEvent>) -> usize {
        events.into_iter().map(|event| self.emit(event)).sum()
    }

    /// Configuration received from the session, if any
    pub fn configuration(&self) -> Option<&TrackerConfig> {
        self.config.as_ref()
    }

    /// Number of events emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Listeners currently registered on `channel`
    pub fn listener_count(&self, channel: EventChannel) -> usize {
        self.dispatcher.listener_count(channel)
    }

    /// Listeners currently registered across all channels
    pub fn total_listeners(&self) -> usize {
        self.dispatcher.total_listeners()
    }
}

impl PoseTracker for ScriptedTracker {
    fn configure(&mut self, config: &TrackerConfig) -> Result<()> {
        accept_configuration(&mut self.config, config)
    }

    fn subscribe(&mut self, channel: EventChannel, listener: Listener) -> SubscriptionId {
        self.dispatcher.subscribe(channel, listener)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{Classification, ListenerControl};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_emit_delivers_to_subscribers() {
        let mut tracker = ScriptedTracker::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        tracker.subscribe(
            EventChannel::ClassifiedExercise,
            Box::new(move |event| {
                sink.lock().push(event.clone());
                ListenerControl::Keep
            }),
        );

        let events = [
            TrackerEvent::IsLoading(false),
            TrackerEvent::ClassifiedExercise(Classification::new("Squat", 1.0)),
        ];
        let calls = tracker.emit_all(&events);

        assert_eq!(calls, 1);
        assert_eq!(tracker.emitted(), 2);
        assert_eq!(*seen.lock(), vec![events[1].clone()]);
    }

    #[test]
    fn test_configure_records_config() {
        let mut tracker = ScriptedTracker::new();
        assert!(tracker.configuration().is_none());

        tracker.configure(&TrackerConfig::default()).unwrap();
        assert_eq!(tracker.configuration(), Some(&TrackerConfig::default()));
    }

    #[test]
    fn test_second_configure_without_reset_fails() {
        let mut tracker = ScriptedTracker::new();
        tracker.configure(&TrackerConfig::default()).unwrap();
        assert!(tracker.configure(&TrackerConfig::default()).is_err());
    }
}
