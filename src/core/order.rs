//! Orders and the identifiers they carry.

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::infra::result_channel::ResultSender;

/// Opaque customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub u64);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "customer-{}", self.0)
    }
}

/// One unit of work: a customer's request for a single menu item.
///
/// Owned by exactly one party at a time: the customer builds it, the queue
/// holds it, and the chef that dequeues it consumes it.
#[derive(Debug)]
pub struct Order {
    /// Who placed the order.
    pub customer_id: CustomerId,
    /// Menu item requested.
    pub item: String,
    /// Where the cooked item goes.
    pub pickup: ResultSender<String>,
    /// When the order was handed to the queue.
    pub placed_at: Instant,
}

impl Order {
    /// Create an order stamped with the current time.
    pub fn new(customer_id: CustomerId, item: impl Into<String>, pickup: ResultSender<String>) -> Self {
        Self {
            customer_id,
            item: item.into(),
            pickup,
            placed_at: Instant::now(),
        }
    }
}
