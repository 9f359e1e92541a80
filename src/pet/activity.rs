//! Timed activities.
//!
//! Every pet action that "takes time" follows the same protocol:
//! validate, announce the start, suspend, apply the stat change, announce the
//! result. [`TimedOperation`] captures that protocol once; the pet entity only
//! composes it.
//!
//! Suspension is a capability handed in by the caller through the [`Suspend`]
//! trait, so the same pet code can run on a tokio task ([`TokioSuspender`]), on a
//! plain thread ([`BlockingSuspender`]) or without any delay
//! ([`InstantSuspender`]). Cancellation is only observed while suspended, never
//! in the middle of a stat mutation.

use async_trait::async_trait;
use log::debug;
use std::time::Duration;
use tokio::sync::watch;

use super::errors::ActivityError;
use super::notify::Notifier;
use super::types::Stats;

/// What happened to a requested pet operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityOutcome {
    /// The operation ran to completion.
    Completed,
    /// The pet refused (incompatible item, stat maxed, pet dead). One status
    /// notification explained why; no state changed.
    Rejected,
    /// Cancelled or failed after starting. State is unchanged and nothing was
    /// emitted after the last notification.
    Aborted,
}

impl ActivityOutcome {
    pub fn is_completed(self) -> bool {
        self == ActivityOutcome::Completed
    }
}

/// Cooperative, cancellable delay requested by a pet while an activity runs.
#[async_trait]
pub trait Suspend: Send + Sync {
    async fn suspend(&self, duration: Duration) -> Result<(), ActivityError>;
}

/// Shared cancellation flag. Cloning yields a handle to the same flag.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: std::sync::Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self {
            tx: std::sync::Arc::new(tx),
        }
    }

    /// Request cancellation of the current and any following suspend.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Re-arm the handle after a cancellation has been handled.
    pub fn reset(&self) {
        self.tx.send_replace(false);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

fn scaled(duration: Duration, time_scale: f64) -> Duration {
    if time_scale <= 0.0 || !time_scale.is_finite() {
        return Duration::ZERO;
    }
    duration.mul_f64(time_scale)
}

/// Yields to the tokio scheduler for the (scaled) duration.
#[derive(Debug, Clone)]
pub struct TokioSuspender {
    time_scale: f64,
    cancel: CancelHandle,
}

impl TokioSuspender {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale,
            cancel: CancelHandle::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }
}

#[async_trait]
impl Suspend for TokioSuspender {
    async fn suspend(&self, duration: Duration) -> Result<(), ActivityError> {
        let mut rx = self.cancel.subscribe();
        if *rx.borrow_and_update() {
            return Err(ActivityError::Cancelled);
        }
        let wait = scaled(duration, self.time_scale);
        let cancelled = async {
            loop {
                if rx.changed().await.is_err() {
                    // Every handle is gone; nobody can cancel anymore.
                    std::future::pending::<()>().await;
                }
                if *rx.borrow_and_update() {
                    break;
                }
            }
        };
        tokio::select! {
            _ = tokio::time::sleep(wait) => Ok(()),
            _ = cancelled => Err(ActivityError::Cancelled),
        }
    }
}

/// Blocks the calling thread for the (scaled) duration. For synchronous callers
/// driving the pet with a minimal executor; cancellation is checked on both
/// sides of the sleep.
#[derive(Debug, Clone)]
pub struct BlockingSuspender {
    time_scale: f64,
    cancel: CancelHandle,
}

impl BlockingSuspender {
    pub fn new(time_scale: f64) -> Self {
        Self {
            time_scale,
            cancel: CancelHandle::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }
}

#[async_trait]
impl Suspend for BlockingSuspender {
    async fn suspend(&self, duration: Duration) -> Result<(), ActivityError> {
        if self.cancel.is_cancelled() {
            return Err(ActivityError::Cancelled);
        }
        std::thread::sleep(scaled(duration, self.time_scale));
        if self.cancel.is_cancelled() {
            return Err(ActivityError::Cancelled);
        }
        Ok(())
    }
}

/// No delay at all; only yields once. Used for tests and `time_scale = 0`.
#[derive(Debug, Clone, Default)]
pub struct InstantSuspender {
    cancel: CancelHandle,
}

impl InstantSuspender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: CancelHandle) -> Self {
        self.cancel = cancel;
        self
    }
}

#[async_trait]
impl Suspend for InstantSuspender {
    async fn suspend(&self, _duration: Duration) -> Result<(), ActivityError> {
        if self.cancel.is_cancelled() {
            return Err(ActivityError::Cancelled);
        }
        tokio::task::yield_now().await;
        Ok(())
    }
}

type Mutation<'a> = Box<dyn FnOnce(&mut Stats) -> Result<String, ActivityError> + Send + 'a>;

/// One "validate, announce, wait, mutate, report" step.
pub struct TimedOperation<'a> {
    rejection: Option<String>,
    start: Option<String>,
    duration: Duration,
    apply: Mutation<'a>,
}

impl<'a> TimedOperation<'a> {
    /// Operation that waits `duration` then runs `apply` against a copy of the
    /// stats. `apply` returns the completion message.
    pub fn new<F>(duration: Duration, apply: F) -> Self
    where
        F: FnOnce(&mut Stats) -> Result<String, ActivityError> + Send + 'a,
    {
        Self {
            rejection: None,
            start: None,
            duration,
            apply: Box::new(apply),
        }
    }

    /// Result of the validation step: `Some(message)` rejects the operation.
    pub fn reject_if(mut self, rejection: Option<String>) -> Self {
        self.rejection = rejection;
        self
    }

    /// Activity notification emitted before suspending.
    pub fn announce(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Run the operation. The stat change is computed on a copy and committed
    /// only when `apply` succeeds, so a failure never leaves a partial update.
    pub async fn run(
        self,
        stats: &mut Stats,
        notifier: &Notifier,
        suspender: &dyn Suspend,
    ) -> Result<ActivityOutcome, ActivityError> {
        if let Some(reason) = self.rejection {
            notifier.status(&reason);
            return Ok(ActivityOutcome::Rejected);
        }
        if let Some(start) = &self.start {
            notifier.activity(start);
        }
        debug!("suspending for {:?}", self.duration);
        suspender.suspend(self.duration).await?;

        let mut next = *stats;
        let done = (self.apply)(&mut next)?;
        *stats = next;
        notifier.status(&done);
        Ok(ActivityOutcome::Completed)
    }
}
