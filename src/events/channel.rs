//! Session event channel over crossbeam-channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::SessionEvent;

/// Sending half handed to [`Session`](crate::core::session::Session)
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<SessionEvent>,
}

impl EventSender {
    /// Send an event; dropped silently once the receiver is gone.
    pub fn send(&self, event: SessionEvent) {
        let _ = self.inner.send(event);
    }
}

/// Receiving half, drained by whoever presents the session
pub struct EventReceiver {
    inner: Receiver<SessionEvent>,
}

impl EventReceiver {
    /// Iterate until every sender is dropped
    pub fn iter(&self) -> impl Iterator<Item = SessionEvent> + '_ {
        self.inner.iter()
    }
}

/// Factory for sender/receiver pairs.
pub struct EventChannel;

impl EventChannel {
    /// Create an unbounded session event channel
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// Sender for sessions nobody is watching
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}
