//! Restaurant domain: menu, ledger, orders, chefs, customers, and the coordinator.

pub mod chef;
pub mod customer;
pub mod error;
pub mod events;
pub mod kitchen;
pub mod ledger;
pub mod menu;
pub mod order;
pub mod restaurant;

pub use chef::{Chef, ChefRecord, ChefState, Workplace};
pub use customer::{AbandonReason, Customer, CustomerOutcome};
pub use error::{AppResult, RestaurantError};
pub use events::{ClosingEventSink, EventRecord, EventSink, InMemoryEventSink, RestaurantEvent, TracingEventSink};
pub use kitchen::{Kitchen, TimedKitchen};
pub use ledger::Ledger;
pub use menu::{MenuCatalog, MenuItem};
pub use order::{CustomerId, Order};
pub use restaurant::{Restaurant, RunSummary};
