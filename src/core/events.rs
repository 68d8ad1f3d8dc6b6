//! Restaurant event stream and sinks.
//!
//! Every observable step of a run is a [`RestaurantEvent`]. Components never
//! print; they hand events to a shared [`EventSink`]. The default sink turns
//! them into `tracing` records, the in-memory sink keeps them for inspection.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::CustomerId;
use crate::util::clock::now_ms;

/// Something that happened during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RestaurantEvent {
    /// Doors open.
    RestaurantOpened {
        /// Chefs on shift.
        chefs: usize,
        /// Customers expected.
        customers: usize,
    },
    /// A chef joined the pool.
    ChefHired {
        /// Chef identifier.
        chef_id: usize,
    },
    /// A customer's order entered the queue.
    OrderQueued {
        /// Who ordered.
        customer_id: CustomerId,
        /// What was ordered.
        item: String,
        /// Queue depth right after the order went in.
        queue_depth: usize,
    },
    /// A chef pulled an order off the queue.
    OrderTaken {
        /// Chef identifier.
        chef_id: usize,
        /// Who ordered.
        customer_id: CustomerId,
        /// What was ordered.
        item: String,
    },
    /// A chef finished cooking.
    OrderCooked {
        /// Chef identifier.
        chef_id: usize,
        /// Who ordered.
        customer_id: CustomerId,
        /// What was cooked.
        item: String,
    },
    /// A chef could not complete an order; it is discarded.
    OrderFailed {
        /// Chef identifier.
        chef_id: usize,
        /// Who ordered.
        customer_id: CustomerId,
        /// What was ordered.
        item: String,
        /// Why it failed.
        reason: String,
    },
    /// A customer received their food.
    OrderDelivered {
        /// Who ordered.
        customer_id: CustomerId,
        /// What they got.
        item: String,
        /// Milliseconds between placing the order and pickup.
        elapsed_ms: u64,
    },
    /// A customer left without food.
    OrderAbandoned {
        /// Who left.
        customer_id: CustomerId,
        /// What they had ordered.
        item: String,
        /// Why they left.
        reason: String,
    },
    /// Doors closed; final numbers.
    RunSummary {
        /// Ledger total.
        total_revenue: u64,
        /// Jobs handled, indexed by chef id.
        jobs_per_chef: Vec<u64>,
        /// `|customers - total jobs handled|`.
        jobs_missed: u64,
    },
}

/// Destination for restaurant events. Shared by every chef and customer.
pub trait EventSink: Send + Sync {
    /// Record an event.
    fn record(&self, event: RestaurantEvent);
}

/// Sink that emits each event as a `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn record(&self, event: RestaurantEvent) {
        match event {
            RestaurantEvent::RestaurantOpened { chefs, customers } => {
                info!(chefs, customers, "Restaurant has opened for business");
            }
            RestaurantEvent::ChefHired { chef_id } => {
                info!(chef_id, "Chef hired");
            }
            RestaurantEvent::OrderQueued { customer_id, item, queue_depth } => {
                info!(%customer_id, %item, queue_depth, "Order queued");
            }
            RestaurantEvent::OrderTaken { chef_id, customer_id, item } => {
                info!(chef_id, %customer_id, %item, "Order taken");
            }
            RestaurantEvent::OrderCooked { chef_id, customer_id, item } => {
                info!(chef_id, %customer_id, %item, "Order cooked");
            }
            RestaurantEvent::OrderFailed { chef_id, customer_id, item, reason } => {
                warn!(chef_id, %customer_id, %item, %reason, "Chef failed an order");
            }
            RestaurantEvent::OrderDelivered { customer_id, item, elapsed_ms } => {
                info!(%customer_id, %item, elapsed_ms, "Order delivered");
            }
            RestaurantEvent::OrderAbandoned { customer_id, item, reason } => {
                warn!(%customer_id, %item, %reason, "Customer left without food");
            }
            RestaurantEvent::RunSummary { total_revenue, jobs_per_chef, jobs_missed } => {
                info!(total_revenue, ?jobs_per_chef, jobs_missed, "Restaurant has closed for the day");
            }
        }
    }
}

/// A recorded event with its wall-clock timestamp.
#[derive(Debug, Clone)]
pub struct EventRecord {
    /// Timestamp milliseconds.
    pub created_at_ms: u128,
    /// The event.
    pub event: RestaurantEvent,
}

/// In-memory sink for testing and dev, bounded to the most recent events.
#[derive(Debug)]
pub struct InMemoryEventSink {
    events: Mutex<VecDeque<EventRecord>>,
    max_events: usize,
}

impl InMemoryEventSink {
    /// Create a new in-memory sink with a bounded buffer.
    #[must_use]
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(max_events.min(1024))),
            max_events,
        }
    }

    /// Snapshot of stored events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<RestaurantEvent> {
        self.events.lock().iter().map(|r| r.event.clone()).collect()
    }

    /// Snapshot of stored records with timestamps.
    #[must_use]
    pub fn records(&self) -> Vec<EventRecord> {
        self.events.lock().iter().cloned().collect()
    }
}

impl EventSink for InMemoryEventSink {
    fn record(&self, event: RestaurantEvent) {
        if self.max_events == 0 {
            return;
        }
        let mut events = self.events.lock();
        if events.len() >= self.max_events {
            events.pop_front();
        }
        events.push_back(EventRecord {
            created_at_ms: now_ms(),
            event,
        });
    }
}

/// Sink that forwards to another sink until it is closed.
///
/// Chefs and customers record through one of these so that nothing they emit
/// can land after the coordinator's closing summary. A record either completes
/// before [`ClosingEventSink::close`] returns or is discarded.
pub struct ClosingEventSink {
    inner: Arc<dyn EventSink>,
    open: RwLock<bool>,
}

impl ClosingEventSink {
    /// Wrap `inner`. The sink starts open.
    #[must_use]
    pub fn new(inner: Arc<dyn EventSink>) -> Self {
        Self {
            inner,
            open: RwLock::new(true),
        }
    }

    /// Stop forwarding. Waits for records already in progress.
    pub fn close(&self) {
        *self.open.write() = false;
    }

    /// Whether events are still forwarded.
    #[must_use]
    pub fn is_open(&self) -> bool {
        *self.open.read()
    }
}

impl EventSink for ClosingEventSink {
    fn record(&self, event: RestaurantEvent) {
        let open = self.open.read();
        if *open {
            self.inner.record(event);
        } else {
            debug!(?event, "Dropping event recorded after close");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_sink_is_bounded() {
        let sink = InMemoryEventSink::new(2);
        for chef_id in 0..3 {
            sink.record(RestaurantEvent::ChefHired { chef_id });
        }
        assert_eq!(
            sink.events(),
            vec![
                RestaurantEvent::ChefHired { chef_id: 1 },
                RestaurantEvent::ChefHired { chef_id: 2 },
            ]
        );
        assert!(sink.records().iter().all(|r| r.created_at_ms > 0));
    }

    #[test]
    fn test_zero_capacity_sink_keeps_nothing() {
        let sink = InMemoryEventSink::new(0);
        sink.record(RestaurantEvent::ChefHired { chef_id: 0 });
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_closing_sink_drops_events_after_close() {
        let inner = Arc::new(InMemoryEventSink::new(10));
        let sink = ClosingEventSink::new(Arc::clone(&inner) as Arc<dyn EventSink>);
        sink.record(RestaurantEvent::ChefHired { chef_id: 0 });
        assert!(sink.is_open());

        sink.close();
        sink.record(RestaurantEvent::ChefHired { chef_id: 1 });
        assert!(!sink.is_open());
        assert_eq!(inner.events(), vec![RestaurantEvent::ChefHired { chef_id: 0 }]);
    }

    #[test]
    fn test_event_serializes_with_kind_tag() {
        let event = RestaurantEvent::OrderQueued {
            customer_id: CustomerId(3),
            item: "fries".into(),
            queue_depth: 2,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "order_queued");
        assert_eq!(json["customer_id"], 3);
        assert_eq!(json["queue_depth"], 2);
    }

    #[test]
    fn test_tracing_sink_accepts_every_kind() {
        let sink = TracingEventSink;
        sink.record(RestaurantEvent::RunSummary {
            total_revenue: 10,
            jobs_per_chef: vec![1, 2],
            jobs_missed: 0,
        });
        sink.record(RestaurantEvent::OrderAbandoned {
            customer_id: CustomerId(1),
            item: "pizza".into(),
            reason: "timeout".into(),
        });
    }
}
