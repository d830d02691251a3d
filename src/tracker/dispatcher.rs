//! Per-channel listener registry
//!
//! Tracker implementations embed an `EventDispatcher` to provide the
//! subscribe/unsubscribe half of the `PoseTracker` contract.

use crate::tracker::events::{EventChannel, TrackerEvent};
use smallvec::SmallVec;
use tracing::debug;

/// What a listener asks the dispatcher to do after handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerControl {
    /// Keep delivering events to this listener
    Keep,
    /// Drop this listener; its owner is gone
    Remove,
}

/// Callback invoked with every event on the channel it was registered for
pub type Listener = Box<dyn FnMut(&TrackerEvent) -> ListenerControl + Send>;

/// Handle returned by `subscribe`, used to deregister the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    listener: Listener,
}

/// Listener lists indexed by channel
///
/// Most channels have one listener (the session), so lists stay inline.
#[derive(Default)]
pub struct EventDispatcher {
    channels: [SmallVec<[Subscription; 1]>; EventChannel::COUNT],
    next_id: u64,
}

impl EventDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` on `channel`
    pub fn subscribe(&mut self, channel: EventChannel, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.channels[channel.index()].push(Subscription { id, listener });
        debug!("Listener {:?} subscribed to {}", id, channel);
        id
    }

    /// Remove the listener registered under `id`
    ///
    /// Returns false when no such listener exists.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        for (index, list) in self.channels.iter_mut().enumerate() {
            if let Some(pos) = list.iter().position(|sub| sub.id == id) {
                list.remove(pos);
                debug!(
                    "Listener {:?} unsubscribed from {}",
                    id,
                    EventChannel::ALL[index]
                );
                return true;
            }
        }
        false
    }

    /// Deliver `event` to every listener of its channel in registration order
    ///
    /// Listeners returning `ListenerControl::Remove` are pruned. Returns the
    /// number of listeners called.
    pub fn dispatch(&mut self, event: &TrackerEvent) -> usize {
        let channel = event.channel();
        let list = &mut self.channels[channel.index()];
        let called = list.len();
        list.retain(|sub| match (sub.listener)(event) {
            ListenerControl::Keep => true,
            ListenerControl::Remove => {
                debug!("Listener {:?} pruned from {}", sub.id, channel);
                false
            }
        });
        called
    }

    /// Number of listeners on `channel`
    pub fn listener_count(&self, channel: EventChannel) -> usize {
        self.channels[channel.index()].len()
    }

    /// Number of listeners across all channels
    pub fn total_listeners(&self) -> usize {
        self.channels.iter().map(SmallVec::len).sum()
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("total_listeners", &self.total_listeners())
            .field("next_id", &self.next_id)
            .finish()
    }
}
