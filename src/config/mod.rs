//! Configuration models for the restaurant run.

pub mod restaurant;

pub use restaurant::{
    RestaurantConfig, ShutdownPolicy, DEFAULT_CUSTOMERS, DEFAULT_WORKERS, MAX_CUSTOMERS,
    MAX_WORKERS, MIN_CUSTOMERS, MIN_WORKERS,
};
