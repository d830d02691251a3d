//! Session controller implementation
//!
//! Owns the session state, wires one listener per tracker channel into it, and
//! pushes recomputed status views to an optional render sink.

use crate::config::TrackerConfig;
use crate::error::{Result, SquatCountError};
use crate::session::state::SessionState;
use crate::status::{StatusPresenter, StatusView};
use crate::tracker::{EventChannel, ListenerControl, PoseTracker, SubscriptionId, TrackerEvent};
use parking_lot::Mutex;
use std::sync::{Arc, mpsc};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// State shared between the controller and its listeners
struct SessionCore {
    state: SessionState,
    presenter: StatusPresenter,
    status_sink: Option<mpsc::SyncSender<StatusView>>,
    last_pushed: Option<StatusView>,
}

impl SessionCore {
    fn handle_event(&mut self, session_id: Uuid, event: &TrackerEvent) {
        self.state.apply(event);
        self.push_status(session_id);
    }

    /// Send the current view to the sink if it changed since the last push
    fn push_status(&mut self, session_id: Uuid) {
        let Some(sink) = &self.status_sink else {
            return;
        };

        let view = self.presenter.present(&self.state);
        if self.last_pushed.as_ref() == Some(&view) {
            return;
        }

        debug!("Session {}: status changed to {}", session_id, view);
        match sink.try_send(view.clone()) {
            Ok(()) => self.last_pushed = Some(view),
            Err(mpsc::TrySendError::Full(_)) => {
                warn!("Session {}: status sink full, dropping update", session_id);
            }
            Err(mpsc::TrySendError::Disconnected(_)) => {
                warn!(
                    "Session {}: status sink disconnected, no further updates",
                    session_id
                );
                self.status_sink = None;
            }
        }
    }
}

/// Supervisor for one exercise session
///
/// Created with the session's configuration, attached to a tracker to receive
/// events, and detached when the session ends. Listeners only hold a weak
/// reference to the session; a session dropped without `detach` has its
/// listeners pruned by the tracker on their next event.
pub struct SessionController {
    session_id: Uuid,
    config: TrackerConfig,
    core: Arc<Mutex<SessionCore>>,
    subscriptions: Vec<SubscriptionId>,
}

impl SessionController {
    /// Validate `config` and create a session in its initial (loading) state
    pub fn new(config: TrackerConfig) -> Result<Self> {
        config.validate()?;

        let session_id = Uuid::new_v4();
        info!(
            "Session {} created for {:?} ({:?} camera)",
            session_id, config.exercise_type, config.camera_state
        );

        let core = SessionCore {
            state: SessionState::new(config.camera_state),
            presenter: StatusPresenter::new(&config),
            status_sink: None,
            last_pushed: None,
        };

        Ok(Self {
            session_id,
            config,
            core: Arc::new(Mutex::new(core)),
            subscriptions: Vec::new(),
        })
    }

    /// Push status views to `sink` whenever the status changes
    ///
    /// The sink is never blocked on: a full sink drops the update, a
    /// disconnected one is forgotten.
    #[must_use]
    pub fn with_status_sink(self, sink: mpsc::SyncSender<StatusView>) -> Self {
        {
            let mut core = self.core.lock();
            core.status_sink = Some(sink);
            core.last_pushed = None;
            core.push_status(self.session_id);
        }
        self
    }

    /// Configure `tracker` and register one listener per event channel
    pub fn attach<T: PoseTracker + ?Sized>(&mut self, tracker: &mut T) -> Result<()> {
        if self.is_attached() {
            return Err(SquatCountError::AlreadyAttached);
        }

        tracker.configure(&self.config)?;

        for channel in EventChannel::ALL {
            let core = Arc::downgrade(&self.core);
            let session_id = self.session_id;
            let id = tracker.subscribe(
                channel,
                Box::new(move |event: &TrackerEvent| {
                    let Some(core) = core.upgrade() else {
                        debug!("Session {} dropped; removing its listener", session_id);
                        return ListenerControl::Remove;
                    };
                    core.lock().handle_event(session_id, event);
                    ListenerControl::Keep
                }),
            );
            self.subscriptions.push(id);
        }

        info!(
            "Session {} attached with {} listeners",
            self.session_id,
            self.subscriptions.len()
        );
        Ok(())
    }

    /// Deregister every listener registered by `attach`
    ///
    /// Detaching an unattached session does nothing. Listeners `tracker` does
    /// not know about stay recorded, so detaching from the wrong tracker leaves
    /// the session attached.
    pub fn detach<T: PoseTracker + ?Sized>(&mut self, tracker: &mut T) {
        if !self.is_attached() {
            debug!("Session {} not attached; detach ignored", self.session_id);
            return;
        }

        let before = self.subscriptions.len();
        self.subscriptions.retain(|id| !tracker.unsubscribe(*id));
        let removed = before - self.subscriptions.len();

        if self.subscriptions.is_empty() {
            info!(
                "Session {} detached ({} listeners removed)",
                self.session_id, removed
            );
        } else {
            warn!(
                "Session {}: {} of {} listeners unknown to this tracker; still attached",
                self.session_id,
                self.subscriptions.len(),
                before
            );
        }
    }

    /// Apply an event directly, bypassing a tracker
    pub fn handle_event(&self, event: &TrackerEvent) {
        self.core.lock().handle_event(self.session_id, event);
    }

    /// Whether listeners are currently registered on a tracker
    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> SessionState {
        self.core.lock().state.clone()
    }

    /// Current status view
    pub fn status(&self) -> StatusView {
        let core = self.core.lock();
        core.presenter.present(&core.state)
    }

    /// Heading for the configured exercise
    pub fn heading(&self) -> String {
        self.core.lock().presenter.heading()
    }

    /// Configuration this session hands to the tracker
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Identifier used in this session's log lines
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
}

impl std::fmt::Debug for SessionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("session_id", &self.session_id)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::DisplayMode;
    use crate::tracker::{Classification, ScriptedTracker};

    fn exercise(name: &str, score: f64) -> TrackerEvent {
        TrackerEvent::ClassifiedExercise(Classification::new(name, score))
    }

    fn attached() -> (SessionController, ScriptedTracker) {
        let mut controller = SessionController::new(TrackerConfig::default()).unwrap();
        let mut tracker = ScriptedTracker::new();
        controller.attach(&mut tracker).unwrap();
        (controller, tracker)
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = TrackerConfig {
            undefined_exercise_name: String::new(),
            ..TrackerConfig::default()
        };
        let result = SessionController::new(config);
        assert!(matches!(result, Err(SquatCountError::InvalidConfig(_))));
    }

    #[test]
    fn test_mount_without_events_is_loading() {
        let (controller, _tracker) = attached();
        assert_eq!(controller.status().mode, DisplayMode::Loading);
        assert_eq!(controller.heading(), "Do a Squat");
    }

    #[test]
    fn test_attach_configures_and_subscribes_every_channel() {
        let (controller, tracker) = attached();
        assert!(controller.is_attached());
        assert_eq!(tracker.configuration(), Some(controller.config()));
        assert_eq!(tracker.total_listeners(), EventChannel::COUNT);
        for channel in EventChannel::ALL {
            assert_eq!(tracker.listener_count(channel), 1);
        }
    }

    #[test]
    fn test_attach_twice_fails() {
        let (mut controller, mut tracker) = attached();
        let result = controller.attach(&mut tracker);
        assert!(matches!(result, Err(SquatCountError::AlreadyAttached)));
        assert_eq!(tracker.total_listeners(), EventChannel::COUNT);
    }

    #[test]
    fn test_scenarios_searching_confirmed_loading() {
        let (controller, mut tracker) = attached();

        tracker.emit(&TrackerEvent::IsLoading(false));
        tracker.emit(&exercise("Undefined Exercise", 0.0));
        let view = controller.status();
        assert_eq!(view.mode, DisplayMode::Searching);
        assert_eq!(view.message, "Detecting Exercise...");

        tracker.emit(&exercise("Squat", 7.0));
        let view = controller.status();
        assert_eq!(view.mode, DisplayMode::Confirmed);
        assert_eq!(view.message, "Squat : 7");

        tracker.emit(&TrackerEvent::IsLoading(true));
        assert_eq!(controller.status().mode, DisplayMode::Loading);
        assert_eq!(
            controller.snapshot().classified_exercise,
            Some(Classification::new("Squat", 7.0))
        );
    }

    #[test]
    fn test_detach_stops_updates() {
        let (mut controller, mut tracker) = attached();
        controller.detach(&mut tracker);

        assert!(!controller.is_attached());
        assert_eq!(tracker.total_listeners(), 0);

        tracker.emit(&TrackerEvent::IsLoading(false));
        assert!(controller.snapshot().is_loading);

        // Second detach is a no-op
        controller.detach(&mut tracker);
    }

    #[test]
    fn test_detach_from_other_tracker_keeps_session_attached() {
        let (mut controller, mut tracker) = attached();
        let mut other = ScriptedTracker::new();

        controller.detach(&mut other);
        assert!(controller.is_attached());
        assert_eq!(tracker.total_listeners(), EventChannel::COUNT);

        controller.detach(&mut tracker);
        assert!(!controller.is_attached());
        assert_eq!(tracker.total_listeners(), 0);
    }

    #[test]
    fn test_dropped_session_stops_receiving_and_is_pruned() {
        let (tx, rx) = mpsc::sync_channel(16);
        let mut controller = SessionController::new(TrackerConfig::default())
            .unwrap()
            .with_status_sink(tx);
        let mut tracker = ScriptedTracker::new();
        controller.attach(&mut tracker).unwrap();
        assert_eq!(rx.try_recv().unwrap().mode, DisplayMode::Loading);

        drop(controller);
        assert_eq!(tracker.emit(&TrackerEvent::IsLoading(false)), 1);

        assert!(matches!(rx.try_recv(), Err(mpsc::TryRecvError::Disconnected)));
        assert_eq!(tracker.listener_count(EventChannel::IsLoading), 0);
        assert_eq!(tracker.total_listeners(), EventChannel::COUNT - 1);
    }

    #[test]
    fn test_status_sink_receives_only_changes() {
        let (tx, rx) = mpsc::sync_channel(16);
        let mut controller = SessionController::new(TrackerConfig::default())
            .unwrap()
            .with_status_sink(tx);
        let mut tracker = ScriptedTracker::new();
        controller.attach(&mut tracker).unwrap();

        tracker.emit(&TrackerEvent::IsDetecting(true));
        tracker.emit(&TrackerEvent::IsLoading(false));
        tracker.emit(&exercise("Undefined Exercise", 0.0));
        tracker.emit(&exercise("Undefined Exercise", 0.0));
        tracker.emit(&TrackerEvent::ClassifiedPose(Classification::new("Standing", 0.9)));
        tracker.emit(&exercise("Squat", 1.0));

        let modes: Vec<DisplayMode> = rx.try_iter().map(|view| view.mode).collect();
        assert_eq!(
            modes,
            vec![
                DisplayMode::Loading,
                DisplayMode::Confirmed,
                DisplayMode::Searching,
                DisplayMode::Confirmed,
            ]
        );
    }

    #[test]
    fn test_disconnected_sink_does_not_break_handlers() {
        let (tx, rx) = mpsc::sync_channel(1);
        drop(rx);
        let controller = SessionController::new(TrackerConfig::default())
            .unwrap()
            .with_status_sink(tx);

        controller.handle_event(&TrackerEvent::IsLoading(false));
        controller.handle_event(&exercise("Squat", 2.0));
        assert_eq!(controller.status().message, "Squat : 2");
    }

    #[test]
    fn test_full_sink_drops_update_without_blocking() {
        let (tx, rx) = mpsc::sync_channel(1);
        let controller = SessionController::new(TrackerConfig::default())
            .unwrap()
            .with_status_sink(tx);

        // Initial loading view fills the sink
        controller.handle_event(&TrackerEvent::IsLoading(false));
        assert_eq!(rx.try_recv().unwrap().mode, DisplayMode::Loading);
        assert!(rx.try_recv().is_err());

        // The dropped update is retried on the next change
        controller.handle_event(&exercise("Squat", 3.0));
        assert_eq!(rx.try_recv().unwrap().message, "Squat : 3");
    }

    #[test]
    fn test_camera_facing_comes_from_config() {
        let config = TrackerConfig {
            camera_state: crate::config::CameraFacing::Back,
            ..TrackerConfig::default()
        };
        let controller = SessionController::new(config).unwrap();
        assert_eq!(
            controller.snapshot().camera_facing,
            crate::config::CameraFacing::Back
        );
    }
}
