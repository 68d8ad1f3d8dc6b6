//! Customers: one order each, a bounded wait, then they leave.

use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{CustomerId, EventSink, Order, RestaurantError, RestaurantEvent};
use crate::infra::result_channel::result_channel;
use crate::infra::OrderQueue;

/// Why a customer left without food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbandonReason {
    /// Patience ran out.
    Timeout,
    /// The kitchen dropped the order (e.g. it could not be cooked).
    OrderDropped,
    /// The restaurant had stopped taking orders.
    QueueUnavailable,
}

impl From<&RestaurantError> for AbandonReason {
    fn from(err: &RestaurantError) -> Self {
        match err {
            RestaurantError::Timeout => Self::Timeout,
            RestaurantError::QueueUnavailable => Self::QueueUnavailable,
            _ => Self::OrderDropped,
        }
    }
}

impl fmt::Display for AbandonReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "waited too long"),
            Self::OrderDropped => write!(f, "order was dropped by the kitchen"),
            Self::QueueUnavailable => write!(f, "restaurant stopped taking orders"),
        }
    }
}

/// How a customer's visit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerOutcome {
    /// Food arrived in time.
    Served {
        /// What they got.
        item: String,
        /// Time between placing the order and pickup.
        elapsed: Duration,
    },
    /// Left empty-handed.
    Abandoned {
        /// Why they left.
        reason: AbandonReason,
    },
}

impl CustomerOutcome {
    /// Whether the customer was served.
    #[must_use]
    pub const fn is_served(&self) -> bool {
        matches!(self, Self::Served { .. })
    }
}

/// A producer that submits exactly one order and waits for it.
pub struct Customer {
    id: CustomerId,
    item: String,
    queue: Arc<OrderQueue>,
    events: Arc<dyn EventSink>,
    patience: Duration,
    arrival_delay: Duration,
}

impl Customer {
    /// Create a customer who will order `item` and wait up to `patience`.
    pub fn new(
        id: CustomerId,
        item: impl Into<String>,
        queue: Arc<OrderQueue>,
        events: Arc<dyn EventSink>,
        patience: Duration,
    ) -> Self {
        Self {
            id,
            item: item.into(),
            queue,
            events,
            patience,
            arrival_delay: Duration::ZERO,
        }
    }

    /// Delay before the customer walks in and orders.
    #[must_use]
    pub const fn with_arrival_delay(mut self, delay: Duration) -> Self {
        self.arrival_delay = delay;
        self
    }

    /// Customer identifier.
    #[must_use]
    pub const fn id(&self) -> CustomerId {
        self.id
    }

    /// Run the visit on a dedicated thread.
    ///
    /// # Errors
    ///
    /// Returns `RestaurantError::Spawn` if the thread cannot be created.
    pub fn spawn(self) -> Result<JoinHandle<CustomerOutcome>, RestaurantError> {
        let span = tracing::Span::current();
        let handle = thread::Builder::new()
            .name(self.id.to_string())
            .spawn(move || span.in_scope(|| self.run()))?;
        Ok(handle)
    }

    /// Arrive, order, wait, leave.
    #[must_use]
    pub fn run(self) -> CustomerOutcome {
        if !self.arrival_delay.is_zero() {
            thread::sleep(self.arrival_delay);
        }

        let (pickup, receiver) = result_channel();
        let order = Order::new(self.id, self.item.clone(), pickup);
        let placed_at = order.placed_at;
        match self.queue.submit(order) {
            Ok(queue_depth) => self.events.record(RestaurantEvent::OrderQueued {
                customer_id: self.id,
                item: self.item.clone(),
                queue_depth,
            }),
            Err(e) => return self.leave(&e),
        }

        match receiver.await_result(self.patience) {
            Ok(item) => {
                let elapsed = placed_at.elapsed();
                debug!(customer_id = %self.id, ?elapsed, "Customer received their order");
                self.events.record(RestaurantEvent::OrderDelivered {
                    customer_id: self.id,
                    item: item.clone(),
                    elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                });
                CustomerOutcome::Served { item, elapsed }
            }
            Err(e) => self.leave(&e),
        }
    }

    fn leave(&self, err: &RestaurantError) -> CustomerOutcome {
        let reason = AbandonReason::from(err);
        self.events.record(RestaurantEvent::OrderAbandoned {
            customer_id: self.id,
            item: self.item.clone(),
            reason: reason.to_string(),
        });
        CustomerOutcome::Abandoned { reason }
    }
}
