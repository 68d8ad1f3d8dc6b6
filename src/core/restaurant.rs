//! The coordinator: opens the restaurant, runs one day, reports the numbers.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, info_span, warn};
use uuid::Uuid;

use crate::config::{RestaurantConfig, ShutdownPolicy, MAX_CUSTOMERS, MIN_CUSTOMERS};
use crate::core::{
    AbandonReason, Chef, ChefRecord, ClosingEventSink, Customer, CustomerId, CustomerOutcome,
    EventSink, Kitchen, Ledger, MenuCatalog, RestaurantError, RestaurantEvent, TracingEventSink,
    Workplace,
};
use crate::infra::OrderQueue;

/// Final numbers for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Correlates this summary with the run's log records.
    pub run_id: Uuid,
    /// Ledger total.
    pub total_revenue: u64,
    /// Jobs handled, indexed by chef id.
    pub jobs_per_chef: Vec<u64>,
    /// `|customers - total jobs handled|`.
    pub jobs_missed: u64,
    /// Customers who got their food.
    pub served: usize,
    /// Customers who left without it.
    pub abandoned: usize,
}

impl RunSummary {
    /// Sum of jobs handled across all chefs.
    #[must_use]
    pub fn total_jobs_handled(&self) -> u64 {
        self.jobs_per_chef.iter().sum()
    }
}

/// Builds the shared state, starts chefs and customers, and reports.
///
/// The restaurant itself takes no part in the order flow; it only manages
/// lifecycles. Each call to [`Restaurant::run`] is an independent day with a
/// fresh queue and ledger.
pub struct Restaurant<K: Kitchen> {
    config: RestaurantConfig,
    menu: Arc<MenuCatalog>,
    kitchen: K,
    events: Arc<dyn EventSink>,
}

impl<K: Kitchen> Restaurant<K> {
    /// Create a restaurant. Events go to `tracing` until another sink is attached.
    #[must_use]
    pub fn new(config: RestaurantConfig, menu: MenuCatalog, kitchen: K) -> Self {
        Self {
            config,
            menu: Arc::new(menu),
            kitchen,
            events: Arc::new(TracingEventSink),
        }
    }

    /// Attach an event sink.
    #[must_use]
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RestaurantConfig {
        &self.config
    }

    /// Run a day with `customer_count` customers, each ordering a random menu item.
    ///
    /// # Errors
    ///
    /// See [`Restaurant::run_orders`]. Also fails on an empty menu.
    pub fn run(&self) -> Result<RunSummary, RestaurantError> {
        let mut rng = rand::rng();
        let items = (0..self.config.customer_count)
            .map(|_| {
                self.menu
                    .random_item(&mut rng)
                    .map(|item| item.name.clone())
                    .ok_or_else(|| RestaurantError::InvalidConfig("menu is empty".into()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.run_orders(items)
    }

    /// Run a day with one customer per entry of `items`, in that order.
    ///
    /// At most `MAX_CUSTOMERS` customers are seated; extra items are dropped
    /// with a warning.
    ///
    /// # Errors
    ///
    /// Returns `RestaurantError::InvalidConfig` for invalid timing values or an
    /// empty `items`, and `RestaurantError::Spawn` if a chef or customer thread
    /// cannot be started.
    pub fn run_orders(&self, mut items: Vec<String>) -> Result<RunSummary, RestaurantError> {
        self.config.validate().map_err(RestaurantError::InvalidConfig)?;
        if items.len() < MIN_CUSTOMERS {
            return Err(RestaurantError::InvalidConfig(format!(
                "at least {MIN_CUSTOMERS} order is required"
            )));
        }
        if items.len() > MAX_CUSTOMERS {
            warn!(
                requested = items.len(),
                seated = MAX_CUSTOMERS,
                "too many customers, turning the rest away"
            );
            items.truncate(MAX_CUSTOMERS);
        }

        let run_id = Uuid::new_v4();
        let span = info_span!("restaurant", %run_id);
        let _enter = span.enter();

        // Chefs detached by an immediate shutdown may still be cooking after the
        // summary; their events stop at the gate.
        let floor = Arc::new(ClosingEventSink::new(Arc::clone(&self.events)));
        let workplace = Workplace::new(
            Arc::new(OrderQueue::new()),
            Arc::new(Ledger::new()),
            Arc::clone(&self.menu),
            Arc::clone(&floor) as Arc<dyn EventSink>,
        );
        let customer_count = items.len();
        self.events.record(RestaurantEvent::RestaurantOpened {
            chefs: self.config.worker_count,
            customers: customer_count,
        });

        let (records, chefs) = match self.hire_chefs(&workplace) {
            Ok(hired) => hired,
            Err(e) => {
                workplace.queue.close();
                return Err(e);
            }
        };
        info!(chefs = records.len(), "Chefs have started working");

        let outcomes = self.seat_customers(&workplace, items);
        let served = outcomes.iter().filter(|o| o.is_served()).count();
        let abandoned = outcomes.len() - served;

        match self.config.shutdown {
            ShutdownPolicy::Drain => {
                workplace.queue.close();
                for (chef_id, chef) in chefs.into_iter().enumerate() {
                    if chef.join().is_err() {
                        warn!(chef_id, "Chef thread panicked");
                    }
                }
            }
            ShutdownPolicy::Immediate => {
                // Chefs keep cooking whatever is queued and exit on their own.
                workplace.queue.close();
                drop(chefs);
            }
        }

        let jobs_per_chef: Vec<u64> = records.iter().map(|r| r.jobs_handled()).collect();
        let total_jobs: u64 = jobs_per_chef.iter().sum();
        let jobs_missed = (customer_count as u64).abs_diff(total_jobs);
        let total_revenue = workplace.ledger.read();

        floor.close();
        self.events.record(RestaurantEvent::RunSummary {
            total_revenue,
            jobs_per_chef: jobs_per_chef.clone(),
            jobs_missed,
        });

        Ok(RunSummary {
            run_id,
            total_revenue,
            jobs_per_chef,
            jobs_missed,
            served,
            abandoned,
        })
    }

    fn hire_chefs(
        &self,
        workplace: &Workplace,
    ) -> Result<(Vec<Arc<ChefRecord>>, Vec<JoinHandle<()>>), RestaurantError> {
        let mut records = Vec::with_capacity(self.config.worker_count);
        let mut handles = Vec::with_capacity(self.config.worker_count);
        for chef_id in 0..self.config.worker_count {
            let chef = Chef::new(chef_id, self.kitchen.clone(), workplace.clone(), self.config.backoff());
            records.push(chef.record());
            handles.push(chef.spawn()?);
        }
        Ok((records, handles))
    }

    /// Start every customer, then wait for all of them to leave.
    ///
    /// A customer whose thread cannot be started or panics counts as abandoned.
    fn seat_customers(&self, workplace: &Workplace, items: Vec<String>) -> Vec<CustomerOutcome> {
        let mut rng = rand::rng();
        let max_jitter = self.config.max_jitter();
        let mut visits = Vec::with_capacity(items.len());

        for (idx, item) in items.into_iter().enumerate() {
            let id = CustomerId(idx as u64);
            let delay = if max_jitter.is_zero() {
                Duration::ZERO
            } else {
                rng.random_range(Duration::ZERO..=max_jitter)
            };
            let customer = Customer::new(
                id,
                item,
                Arc::clone(&workplace.queue),
                Arc::clone(&workplace.events),
                self.config.patience(),
            )
            .with_arrival_delay(delay);
            visits.push((id, customer.spawn()));
        }
        info!(customers = visits.len(), "Customers can begin ordering");

        visits
            .into_iter()
            .map(|(id, visit)| {
                let outcome = visit.map_err(|e| e.to_string()).and_then(|handle| {
                    handle.join().map_err(|_| "customer thread panicked".to_string())
                });
                outcome.unwrap_or_else(|reason| {
                    warn!(customer_id = %id, %reason, "Customer visit failed");
                    CustomerOutcome::Abandoned {
                        reason: AbandonReason::QueueUnavailable,
                    }
                })
            })
            .collect()
    }
}
