//! Tracker adapter for events produced on another thread
//!
//! A real tracker runs inference on its own thread. It pushes `TrackerEvent`s into
//! an mpsc channel, and the owning thread calls `pump()` to deliver them to the
//! session's listeners, so handlers always run on the thread that owns the session.

use crate::config::TrackerConfig;
use crate::error::Result;
use crate::tracker::dispatcher::{EventDispatcher, Listener, SubscriptionId};
use crate::tracker::events::{EventChannel, TrackerEvent};
use crate::tracker::{PoseTracker, accept_configuration};
use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::time::Duration;
use tracing::{debug, warn};

/// Result of one `pump` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpOutcome {
    /// Events delivered during this call
    pub delivered: usize,
    /// The producing side has hung up; no more events will arrive
    pub disconnected: bool,
}

/// Tracker fed through an mpsc channel
#[derive(Debug)]
pub struct ChannelTracker {
    receiver: mpsc::Receiver<TrackerEvent>,
    dispatcher: EventDispatcher,
    config: Option<TrackerConfig>,
}

impl ChannelTracker {
    /// Wrap an existing receiver
    pub fn new(receiver: mpsc::Receiver<TrackerEvent>) -> Self {
        Self {
            receiver,
            dispatcher: EventDispatcher::new(),
            config: None,
        }
    }

    /// Create a bounded channel and the tracker that drains it
    ///
    /// The sender goes to the producing thread.
    pub fn with_capacity(capacity: usize) -> (Self, mpsc::SyncSender<TrackerEvent>) {
        let (tx, rx) = mpsc::sync_channel(capacity);
        (Self::new(rx), tx)
    }

    /// Deliver every event already queued without blocking
    pub fn pump(&mut self) -> PumpOutcome {
        let mut delivered = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.dispatcher.dispatch(&event);
                    delivered += 1;
                }
                Err(TryRecvError::Empty) => {
                    return PumpOutcome {
                        delivered,
                        disconnected: false,
                    };
                }
                Err(TryRecvError::Disconnected) => {
                    warn!("Tracker event channel disconnected");
                    return PumpOutcome {
                        delivered,
                        disconnected: true,
                    };
                }
            }
        }
    }

    /// Wait up to `timeout` for the first event, then drain the rest
    pub fn pump_timeout(&mut self, timeout: Duration) -> PumpOutcome {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => {
                self.dispatcher.dispatch(&event);
                let rest = self.pump();
                PumpOutcome {
                    delivered: rest.delivered + 1,
                    disconnected: rest.disconnected,
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                debug!("No tracker events within {:?}", timeout);
                PumpOutcome {
                    delivered: 0,
                    disconnected: false,
                }
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Tracker event channel disconnected");
                PumpOutcome {
                    delivered: 0,
                    disconnected: true,
                }
            }
        }
    }

    /// Configuration received from the session, if any
    ///
    /// The producing thread reads this before starting inference.
    pub fn configuration(&self) -> Option<&TrackerConfig> {
        self.config.as_ref()
    }

    /// Listeners currently registered on `channel`
    pub fn listener_count(&self, channel: EventChannel) -> usize {
        self.dispatcher.listener_count(channel)
    }
}

impl PoseTracker for ChannelTracker {
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
