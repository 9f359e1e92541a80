//! Notification delivery for pet events.
//!
//! A pet holds an ordered list of shared [`NotificationSink`] listeners and calls
//! every one of them synchronously, in registration order, at the point an event
//! is emitted. Sinks must return promptly: a slow sink stalls the activity that
//! emitted the event.

use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::logutil::escape_log;

/// Receiver of pet notifications. Every method defaults to a no-op so a sink only
/// implements the classes it is interested in.
pub trait NotificationSink: Send + Sync {
    fn on_status(&self, _message: &str) {}
    fn on_activity(&self, _message: &str) {}
    fn on_death(&self, _message: &str) {}
}

/// Notification class plus message, as recorded or forwarded by the bundled sinks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notification {
    Status(String),
    Activity(String),
    Death(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Status(m) | Notification::Activity(m) | Notification::Death(m) => m,
        }
    }

    pub fn is_status(&self) -> bool {
        matches!(self, Notification::Status(_))
    }

    pub fn is_activity(&self) -> bool {
        matches!(self, Notification::Activity(_))
    }

    pub fn is_death(&self) -> bool {
        matches!(self, Notification::Death(_))
    }
}

/// Ordered set of registered listeners.
#[derive(Clone, Default)]
pub struct Notifier {
    sinks: Vec<Arc<dyn NotificationSink>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, sink: Arc<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Remove a listener previously registered with [`Notifier::subscribe`].
    /// Returns false if the listener was not registered.
    pub fn unsubscribe(&mut self, sink: &Arc<dyn NotificationSink>) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|s| !Arc::ptr_eq(s, sink));
        self.sinks.len() != before
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn status(&self, message: &str) {
        debug!("status: {}", escape_log(message));
        for sink in &self.sinks {
            sink.on_status(message);
        }
    }

    pub fn activity(&self, message: &str) {
        debug!("activity: {}", escape_log(message));
        for sink in &self.sinks {
            sink.on_activity(message);
        }
    }

    pub fn death(&self, message: &str) {
        debug!("death: {}", escape_log(message));
        for sink in &self.sinks {
            sink.on_death(message);
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

/// Sink that keeps every notification in memory, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, n: Notification) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(n);
        }
    }

    /// Copy of everything recorded so far.
    pub fn events(&self) -> Vec<Notification> {
        self.events.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Drain and return everything recorded so far.
    pub fn take(&self) -> Vec<Notification> {
        self.events
            .lock()
            .map(|mut g| std::mem::take(&mut *g))
            .unwrap_or_default()
    }
}

impl NotificationSink for RecordingSink {
    fn on_status(&self, message: &str) {
        self.push(Notification::Status(message.to_string()));
    }

    fn on_activity(&self, message: &str) {
        self.push(Notification::Activity(message.to_string()));
    }

    fn on_death(&self, message: &str) {
        self.push(Notification::Death(message.to_string()));
    }
}

/// Sink that forwards notifications into an unbounded tokio channel so a
/// renderer can consume them on its own task.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }

    /// Create a sink together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, n: Notification) {
        // Receiver gone means nobody is rendering anymore; dropping is fine.
        let _ = self.tx.send(n);
    }
}

impl NotificationSink for ChannelSink {
    fn on_status(&self, message: &str) {
        self.send(Notification::Status(message.to_string()));
    }

    fn on_activity(&self, message: &str) {
        self.send(Notification::Activity(message.to_string()));
    }

    fn on_death(&self, message: &str) {
        self.send(Notification::Death(message.to_string()));
    }
}
