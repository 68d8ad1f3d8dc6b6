//! Chefs: the fixed worker pool that drains the order queue.
//!
//! Each chef is a dedicated OS thread with its own single-threaded tokio
//! runtime for the kitchen. The loop is
//! `Idle -> Fetching -> Cooking -> Delivering -> Idle`; fetching blocks on the
//! queue for at most one backoff period, so an idle chef wakes as soon as an
//! order arrives instead of sleeping through it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tokio::runtime::Runtime;
use tracing::{debug, trace};

use crate::core::{EventSink, Kitchen, Ledger, MenuCatalog, Order, RestaurantError, RestaurantEvent};
use crate::infra::OrderQueue;

/// Where a chef is in its work loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChefState {
    /// Between orders.
    Idle,
    /// Waiting on the queue.
    Fetching,
    /// Running the kitchen for the current order.
    Cooking,
    /// Handing food to the customer and ringing it up.
    Delivering,
}

/// Per-chef counters, shared with the coordinator.
#[derive(Debug)]
pub struct ChefRecord {
    id: usize,
    jobs_handled: AtomicU64,
}

impl ChefRecord {
    /// Create a record for chef `id`.
    #[must_use]
    pub const fn new(id: usize) -> Self {
        Self {
            id,
            jobs_handled: AtomicU64::new(0),
        }
    }

    /// Chef identifier.
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Orders this chef has cooked and rung up.
    #[must_use]
    pub fn jobs_handled(&self) -> u64 {
        self.jobs_handled.load(Ordering::Acquire)
    }
}

/// Shared restaurant state handed to every chef and customer at creation.
#[derive(Clone)]
pub struct Workplace {
    /// Pending orders.
    pub queue: Arc<OrderQueue>,
    /// Cash register.
    pub ledger: Arc<Ledger>,
    /// What the kitchen can cook.
    pub menu: Arc<MenuCatalog>,
    /// Event stream.
    pub events: Arc<dyn EventSink>,
}

impl Workplace {
    /// Bundle shared state.
    #[must_use]
    pub fn new(
        queue: Arc<OrderQueue>,
        ledger: Arc<Ledger>,
        menu: Arc<MenuCatalog>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            queue,
            ledger,
            menu,
            events,
        }
    }
}

/// A worker that cooks orders until the queue closes.
pub struct Chef<K: Kitchen> {
    record: Arc<ChefRecord>,
    kitchen: K,
    workplace: Workplace,
    backoff: Duration,
    state: ChefState,
}

impl<K: Kitchen> Chef<K> {
    /// Create a chef. `backoff` bounds each wait on an empty queue.
    #[must_use]
    pub fn new(id: usize, kitchen: K, workplace: Workplace, backoff: Duration) -> Self {
        Self {
            record: Arc::new(ChefRecord::new(id)),
            kitchen,
            workplace,
            backoff,
            state: ChefState::Idle,
        }
    }

    /// Handle to this chef's counters.
    #[must_use]
    pub fn record(&self) -> Arc<ChefRecord> {
        Arc::clone(&self.record)
    }

    /// Current loop state.
    #[must_use]
    pub const fn state(&self) -> ChefState {
        self.state
    }

    /// Start the chef on a dedicated thread.
    ///
    /// # Errors
    ///
    /// Returns `RestaurantError::Spawn` if the runtime or thread cannot be created.
    pub fn spawn(self) -> Result<JoinHandle<()>, RestaurantError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let span = tracing::Span::current();
        let handle = thread::Builder::new()
            .name(format!("chef-{}", self.record.id))
            .spawn(move || {
                let _enter = span.enter();
                self.run(&rt);
            })?;
        Ok(handle)
    }

    /// Work loop. Returns once the queue is closed and drained.
    pub fn run(mut self, rt: &Runtime) {
        let chef_id = self.record.id;
        self.workplace.events.record(RestaurantEvent::ChefHired { chef_id });

        loop {
            self.set_state(ChefState::Fetching);
            match self.workplace.queue.take_timeout(self.backoff) {
                Ok(Some(order)) => {
                    let customer_id = order.customer_id;
                    let item = order.item.clone();
                    if let Err(e) = self.serve(rt, order) {
                        debug!(chef_id, %customer_id, %item, error = %e, "Discarding order");
                        self.workplace.events.record(RestaurantEvent::OrderFailed {
                            chef_id,
                            customer_id,
                            item,
                            reason: e.to_string(),
                        });
                    }
                }
                Ok(None) => trace!(chef_id, "Queue empty, backing off"),
                Err(_) => {
                    debug!(chef_id, jobs_handled = self.record.jobs_handled(), "Queue closed, chef going home");
                    break;
                }
            }
            self.set_state(ChefState::Idle);
        }
    }

    /// Cook one order, deliver it, and ring it up.
    ///
    /// A customer who already left does not fail the job: the food is wasted
    /// but the order still counts and is still paid into the ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not on the menu or the kitchen fails.
    /// The order is dropped, which closes its pickup channel.
    pub fn serve(&mut self, rt: &Runtime, order: Order) -> Result<(), RestaurantError> {
        let chef_id = self.record.id;
        let menu = Arc::clone(&self.workplace.menu);
        let item = menu.get(&order.item)?;

        self.workplace.events.record(RestaurantEvent::OrderTaken {
            chef_id,
            customer_id: order.customer_id,
            item: item.name.clone(),
        });

        self.set_state(ChefState::Cooking);
        rt.block_on(self.kitchen.prepare(item))?;
        self.workplace.events.record(RestaurantEvent::OrderCooked {
            chef_id,
            customer_id: order.customer_id,
            item: item.name.clone(),
        });

        self.set_state(ChefState::Delivering);
        if let Err(e) = order.pickup.deliver(item.name.clone()) {
            debug!(chef_id, customer_id = %order.customer_id, error = %e, "Delivery went unclaimed");
        }
        self.workplace.ledger.credit(item.price);
        self.record.jobs_handled.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }

    fn set_state(&mut self, state: ChefState) {
        trace!(chef_id = self.record.id, from = ?self.state, to = ?state, "Chef state");
        self.state = state;
    }
}
