//! Load-more signal, the terminal counterpart of an infinite-scroll sentinel.
//!
//! The presentation layer calls [`VisibilityTrigger::fire`] whenever the end
//! of the list comes into view. A board bound with
//! [`VisibilityTrigger::subscribe`] reacts by loading the next page, for as
//! long as the returned [`ScrollSubscription`] is alive.

use super::{FetchOutcome, JobBoard};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::debug;

const SIGNAL_CAPACITY: usize = 16;

pub struct VisibilityTrigger {
    signal_tx: broadcast::Sender<()>,
}

impl Default for VisibilityTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl VisibilityTrigger {
    pub fn new() -> Self {
        let (signal_tx, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self { signal_tx }
    }

    /// Signal that the end of the list became visible.
    ///
    /// Returns the number of subscriptions notified.
    pub fn fire(&self) -> usize {
        self.signal_tx.send(()).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.signal_tx.receiver_count()
    }

    /// Load the next page of `board` on every signal until the returned
    /// subscription is dropped.
    ///
    /// Each signal yields exactly one [`FetchOutcome`] on the subscription,
    /// `Skipped` when the board was already loading or exhausted. A fetch
    /// still in flight when the subscription goes away is abandoned and its
    /// result discarded. Must be called from within a tokio runtime.
    pub fn subscribe(&self, board: JobBoard) -> ScrollSubscription {
        let mut signal_rx = self.signal_tx.subscribe();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let token = CancellationToken::new();
        let listener_token = token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    _ = listener_token.cancelled() => break,
                    signal = signal_rx.recv() => match signal {
                        Ok(()) => {}
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            debug!("Dropped {} visibility signal(s)", missed);
                            continue;
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }

                // Each load runs on its own task so that signals arriving
                // while it is in flight hit the board's loading check.
                let board = board.clone();
                let fetch_token = listener_token.clone();
                let outcome_tx = outcome_tx.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        biased;
                        _ = fetch_token.cancelled() => {
                            debug!("Subscription released, discarding page load");
                        }
                        outcome = board.fetch_next_page() => {
                            let _ = outcome_tx.send(outcome);
                        }
                    }
                });
            }
            debug!("Scroll subscription listener stopped");
        });

        ScrollSubscription { token, outcome_rx }
    }
}

/// Binding between a [`VisibilityTrigger`] and a board.
///
/// Dropping it unsubscribes.
pub struct ScrollSubscription {
    token: CancellationToken,
    outcome_rx: mpsc::UnboundedReceiver<FetchOutcome>,
}

impl ScrollSubscription {
    /// Wait for the outcome of the next signal handled.
    pub async fn next_outcome(&mut self) -> Option<FetchOutcome> {
        self.outcome_rx.recv().await
    }

    /// Outcome already delivered, if any, without waiting.
    pub fn try_next_outcome(&mut self) -> Option<FetchOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    pub fn unsubscribe(self) {}
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
