//! Trailing debounce for submission candidates.
//!
//! Every [`Debouncer::push`] restarts the quiet period and supersedes the
//! pending candidate. When the period elapses the timer task sends a
//! [`Fired`] message; the owner hands it back to [`Debouncer::accept`], which
//! only releases the value if no newer push or cancel happened in between.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Timer expiry for one pushed candidate.
#[derive(Debug)]
pub struct Fired<T> {
    generation: u64,
    value: T,
}

struct Pending {
    generation: u64,
    token: CancellationToken,
}

/// Coalesces bursts of candidates into the most recent one.
pub struct Debouncer<T> {
    interval: Duration,
    tx: mpsc::UnboundedSender<Fired<T>>,
    generation: u64,
    pending: Option<Pending>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer and the receiver its timers fire into.
    ///
    /// Must be used from within a tokio runtime.
    pub fn new(interval: Duration) -> (Self, mpsc::UnboundedReceiver<Fired<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            interval,
            tx,
            generation: 0,
            pending: None,
        };
        (debouncer, rx)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Offer a candidate, restarting the quiet period.
    pub fn push(&mut self, value: T) {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        let token = CancellationToken::new();
        let timer_token = token.clone();
        let tx = self.tx.clone();
        let interval = self.interval;

        tokio::spawn(async move {
            tokio::select! {
                _ = timer_token.cancelled() => {}
                _ = tokio::time::sleep(interval) => {
                    let _ = tx.send(Fired { generation, value });
                }
            }
        });

        self.pending = Some(Pending { generation, token });
    }

    /// Drop the pending candidate, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.token.cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release a fired candidate if it is still the pending one.
    ///
    /// A timer can fire just before a newer push or a cancel; such stale
    /// expiries return `None`.
    pub fn accept(&mut self, fired: Fired<T>) -> Option<T> {
        match &self.pending {
            Some(pending) if pending.generation == fired.generation => {
                self.pending = None;
                Some(fired.value)
            }
            _ => None,
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.token.cancel();
        }
    }
}
