//! Current-state cell with replaying, lossless subscriptions.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::mvi::UiState;

/// Holds the latest state snapshot and fans every new one out to subscribers.
///
/// Each subscriber has its own unbounded queue, so a slow reader never makes
/// another reader (or the publisher) miss a snapshot.
pub struct StateStore<S> {
    inner: Mutex<StoreInner<S>>,
}

struct StoreInner<S> {
    current: S,
    subscribers: Vec<mpsc::UnboundedSender<S>>,
}

impl<S: UiState> StateStore<S> {
    pub fn new(initial: S) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                current: initial,
                subscribers: Vec::new(),
            }),
        }
    }

    /// Get a clone of the current snapshot.
    pub fn current(&self) -> S {
        self.inner.lock().current.clone()
    }

    /// Replace the current snapshot and deliver it to every live subscriber.
    ///
    /// Subscriptions that were dropped are pruned here.
    pub fn publish(&self, state: S) {
        let mut inner = self.inner.lock();
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(state.clone()).is_ok());
        inner.current = state;
    }

    /// Subscribe to snapshots.
    ///
    /// The current snapshot is already queued when this returns; all later
    /// snapshots follow in publish order.
    pub fn subscribe(&self) -> StateSubscription<S> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();
        // Cannot fail: the receiver is alive.
        let _ = tx.send(inner.current.clone());
        inner.subscribers.push(tx);
        StateSubscription { rx }
    }

    /// Number of live subscribers (as of the last publish).
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner.lock();
        inner.subscribers.retain(|subscriber| !subscriber.is_closed());
        inner.subscribers.len()
    }
}

/// Ordered stream of state snapshots. Dropping it unsubscribes.
pub struct StateSubscription<S> {
    rx: mpsc::UnboundedReceiver<S>,
}

impl<S> StateSubscription<S> {
    /// Wait for the next snapshot. `None` once the store is gone.
    pub async fn next(&mut self) -> Option<S> {
        self.rx.recv().await
    }

    /// Take the next snapshot if one is already queued.
    pub fn try_next(&mut self) -> Option<S> {
        self.rx.try_recv().ok()
    }

    /// Take every snapshot that is already queued.
    pub fn drain(&mut self) -> Vec<S> {
        let mut states = Vec::new();
        while let Some(state) = self.try_next() {
            states.push(state);
        }
        states
    }
}

impl<S> Stream for StateSubscription<S> {
    type Item = S;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S>> {
        self.get_mut().rx.poll_recv(cx)
    }
}
