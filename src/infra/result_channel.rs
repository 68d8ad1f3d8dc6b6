//! One-shot pickup channel between a chef and the customer who placed the order.
//!
//! The channel holds a single slot guarded by a `parking_lot` mutex, paired with
//! a condvar so the customer blocks without polling. Each end consumes itself on
//! use and marks itself closed on drop, so the peer always learns when the other
//! side has gone away, on every exit path.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::core::RestaurantError;

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    sender_open: bool,
    receiver_open: bool,
}

type Shared<T> = Arc<(Mutex<Slot<T>>, Condvar)>;

/// Kitchen end of a pickup channel. Travels with the order.
#[derive(Debug)]
pub struct ResultSender<T> {
    shared: Shared<T>,
}

/// Customer end of a pickup channel.
#[derive(Debug)]
pub struct ResultReceiver<T> {
    shared: Shared<T>,
}

/// Create a fresh single-use pickup channel.
#[must_use]
pub fn result_channel<T>() -> (ResultSender<T>, ResultReceiver<T>) {
    let shared = Arc::new((
        Mutex::new(Slot {
            value: None,
            sender_open: true,
            receiver_open: true,
        }),
        Condvar::new(),
    ));
    (
        ResultSender {
            shared: Arc::clone(&shared),
        },
        ResultReceiver { shared },
    )
}

impl<T> ResultSender<T> {
    /// Hand the value to the customer.
    ///
    /// # Errors
    ///
    /// Returns `RestaurantError::CustomerLeft` if the receiver is already gone.
    /// The value is dropped; callers treat this as a no-op.
    pub fn deliver(self, value: T) -> Result<(), RestaurantError> {
        let (slot, condvar) = self.shared.as_ref();
        let mut slot = slot.lock();
        if !slot.receiver_open {
            return Err(RestaurantError::CustomerLeft);
        }
        slot.value = Some(value);
        condvar.notify_one();
        Ok(())
    }

    /// Whether the customer has already stopped waiting.
    #[must_use]
    pub fn is_abandoned(&self) -> bool {
        !self.shared.0.lock().receiver_open
    }
}

impl<T> Drop for ResultSender<T> {
    fn drop(&mut self) {
        let (slot, condvar) = self.shared.as_ref();
        slot.lock().sender_open = false;
        condvar.notify_one();
    }
}

impl<T> ResultReceiver<T> {
    /// Wait up to `timeout` for the value.
    ///
    /// # Errors
    ///
    /// - `RestaurantError::Timeout` if nothing arrived in time
    /// - `RestaurantError::OrderDropped` if the sender closed without delivering
    pub fn await_result(self, timeout: Duration) -> Result<T, RestaurantError> {
        let deadline = Instant::now().checked_add(timeout);
        let (slot, condvar) = self.shared.as_ref();
        let mut slot = slot.lock();
        loop {
            if let Some(value) = slot.value.take() {
                return Ok(value);
            }
            if !slot.sender_open {
                return Err(RestaurantError::OrderDropped);
            }
            match deadline {
                Some(deadline) => {
                    if condvar.wait_until(&mut slot, deadline).timed_out() {
                        return slot.value.take().ok_or(RestaurantError::Timeout);
                    }
                }
                None => condvar.wait(&mut slot),
            }
        }
    }
}

impl<T: Send + 'static> ResultReceiver<T> {
    /// Async variant of [`ResultReceiver::await_result`].
    ///
    /// The condvar wait moves to tokio's blocking pool and carries its own
    /// deadline. The receiver stays owned by that wait until it returns, so a
    /// delivery is either handed back here or refused with `CustomerLeft`.
    ///
    /// # Errors
    ///
    /// Same as [`ResultReceiver::await_result`], plus `RestaurantError::Internal`
    /// if the blocking task panicked.
    pub async fn await_result_async(self, timeout: Duration) -> Result<T, RestaurantError> {
        tokio::task::spawn_blocking(move || self.await_result(timeout))
            .await
            .map_err(|e| RestaurantError::Internal(format!("pickup wait failed: {e}")))?
    }
}

impl<T> Drop for ResultReceiver<T> {
    fn drop(&mut self) {
        let mut slot = self.shared.0.lock();
        slot.receiver_open = false;
        slot.value = None;
    }
}
