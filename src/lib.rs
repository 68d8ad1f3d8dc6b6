//! # Restaurant Sim
//!
//! A bounded work-distribution simulation modelled as a restaurant.
//!
//! Many concurrent customers (producers) each place one order on a shared
//! queue. A fixed pool of chefs (consumers) pulls orders off that queue, cooks
//! them for a time that depends on the dish, rings the price into a shared
//! ledger, and hands the food back through a pickup channel that belongs to
//! that one order. Customers wait a bounded time for their food and leave if
//! it does not arrive.
//!
//! ## Core Problem Solved
//!
//! - **Exactly-once delivery**: every order is taken by at most one chef, and
//!   none is lost, under arbitrary interleavings
//! - **Point-to-point results**: each customer receives only their own food
//! - **Timeout-driven abandonment**: a customer who gives up closes their end;
//!   a chef delivering later is a harmless no-op
//! - **Consistent accounting**: the ledger is updated from many chefs without
//!   ever holding its lock across a cooking delay
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restaurant_sim::config::RestaurantConfig;
//! use restaurant_sim::core::{MenuCatalog, Restaurant, TimedKitchen};
//!
//! let config = RestaurantConfig::new(4, 30);
//! let kitchen = TimedKitchen::new(config.time_unit());
//! let restaurant = Restaurant::new(config, MenuCatalog::standard(), kitchen);
//!
//! let summary = restaurant.run()?;
//! println!("made ${} with {} jobs missed", summary.total_revenue, summary.jobs_missed);
//! ```
//!
//! For complete scenarios, see `tests/restaurant_test.rs`.

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Restaurant domain: menu, ledger, orders, chefs, customers, coordinator.
pub mod core;
/// Configuration for a restaurant run.
pub mod config;
/// Order queue and pickup channels.
pub mod infra;
/// Shared utilities.
pub mod util;
