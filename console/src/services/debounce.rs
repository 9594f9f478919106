//! Trailing-edge debounce
//!
//! Each call cancels the pending one and schedules a fresh timer; only the
//! last value of a burst is delivered, once, after the quiet period.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A value whose quiet period elapsed, tagged with the call that produced it
#[derive(Debug)]
pub struct Settled<T> {
    generation: u64,
    value: T,
}

pub struct Debouncer<T> {
    delay: Duration,
    generation: u64,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Settled<T>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Debouncer plus the receiver its settled values arrive on
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<Settled<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                generation: 0,
                pending: None,
                tx,
            },
            rx,
        )
    }

    /// Schedule `value`, replacing anything not yet delivered
    pub fn call(&mut self, value: T) {
        self.cancel();

        let tx = self.tx.clone();
        let delay = self.delay;
        let generation = self.generation;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Settled { generation, value });
        }));
    }

    /// Drop the pending value, including one already sitting in the channel
    pub fn cancel(&mut self) {
        self.generation += 1;
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// The settled value, unless a later `call` or `cancel` superseded it
    pub fn accept(&self, settled: Settled<T>) -> Option<T> {
        if settled.generation == self.generation {
            Some(settled.value)
        } else {
            tracing::debug!(
                "Dropping superseded value (generation {}, current {})",
                settled.generation,
                self.generation
            );
            None
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
