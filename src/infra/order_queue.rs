//! Shared FIFO of pending orders.
//!
//! Backed by an unbounded crossbeam channel, which is multi-producer,
//! multi-consumer, FIFO, and hands each message to exactly one receiver.
//! The sender lives behind a mutex so the queue can be closed for the day:
//! once the sender is dropped, chefs drain what is left and then see
//! `QueueUnavailable`.

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use tracing::debug;

use crate::core::{Order, RestaurantError};

/// Thread-safe order queue shared by customers and chefs.
#[derive(Debug)]
pub struct OrderQueue {
    /// Order sender. `None` once the queue is closed.
    tx: Mutex<Option<Sender<Order>>>,
    rx: Receiver<Order>,
}

impl Default for OrderQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderQueue {
    /// Create an open, empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            tx: Mutex::new(Some(tx)),
            rx,
        }
    }

    /// Append an order and return the queue depth right after it.
    ///
    /// # Errors
    ///
    /// Returns `RestaurantError::QueueUnavailable` if the queue is closed. The
    /// order is dropped, which closes its pickup channel.
    pub fn submit(&self, order: Order) -> Result<usize, RestaurantError> {
        let tx_guard = self.tx.lock();
        let Some(tx) = tx_guard.as_ref() else {
            return Err(RestaurantError::QueueUnavailable);
        };
        tx.send(order).map_err(|_| RestaurantError::QueueUnavailable)?;
        Ok(self.rx.len())
    }

    /// Take the oldest order without blocking. Never mutates an empty queue.
    #[must_use]
    pub fn try_take(&self) -> Option<Order> {
        self.rx.try_recv().ok()
    }

    /// Block up to `timeout` for the oldest order.
    ///
    /// Returns `Ok(None)` when nothing arrived in time.
    ///
    /// # Errors
    ///
    /// Returns `RestaurantError::QueueUnavailable` once the queue is closed and drained.
    pub fn take_timeout(&self, timeout: Duration) -> Result<Option<Order>, RestaurantError> {
        match self.rx.recv_timeout(timeout) {
            Ok(order) => Ok(Some(order)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(RestaurantError::QueueUnavailable),
        }
    }

    /// Stop accepting orders. Queued orders stay available to chefs.
    pub fn close(&self) {
        if self.tx.lock().take().is_some() {
            debug!(remaining = self.rx.len(), "Order queue closed");
        }
    }

    /// Whether the queue has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.lock().is_none()
    }

    /// Number of orders waiting.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether no orders are waiting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
