//! Restaurant configuration.
//!
//! The core only needs two integers, the number of chefs and the number of
//! customers. Everything else tunes the simulated clock and has defaults that
//! match the house rules: customers wait 60 units, chefs back off 1 unit when
//! the queue is empty, and customers trickle in over the first 5 units.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Smallest allowed chef pool.
pub const MIN_WORKERS: usize = 1;
/// Largest allowed chef pool.
pub const MAX_WORKERS: usize = 10;
/// Default chef pool size.
pub const DEFAULT_WORKERS: usize = 4;
/// Smallest allowed customer count.
pub const MIN_CUSTOMERS: usize = 1;
/// Largest allowed customer count.
pub const MAX_CUSTOMERS: usize = 100;
/// Default customer count.
pub const DEFAULT_CUSTOMERS: usize = 30;

/// What the coordinator does with the chefs once the last customer has left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShutdownPolicy {
    /// Close the queue, let chefs finish whatever is still queued, join them,
    /// then report.
    #[default]
    Drain,
    /// Report immediately; chefs are detached and orders still in flight may
    /// or may not show up in the numbers.
    Immediate,
}

impl std::str::FromStr for ShutdownPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drain" => Ok(Self::Drain),
            "immediate" => Ok(Self::Immediate),
            other => Err(format!("unknown shutdown policy `{other}`")),
        }
    }
}

/// Configuration for one restaurant run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantConfig {
    /// Number of chefs, clamped to `[1, 10]`.
    pub worker_count: usize,
    /// Number of customers, clamped to `[1, 100]`.
    pub customer_count: usize,
    /// Length of one model time unit in milliseconds.
    pub time_unit_ms: u64,
    /// How long a customer waits for food, in time units.
    pub customer_patience_units: u64,
    /// How long an idle chef waits on an empty queue before re-checking, in time units.
    pub chef_backoff_units: u64,
    /// Upper bound of the random arrival delay, in time units.
    pub max_arrival_jitter_units: u64,
    /// Chef teardown policy.
    pub shutdown: ShutdownPolicy,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self {
            worker_count: DEFAULT_WORKERS,
            customer_count: DEFAULT_CUSTOMERS,
            time_unit_ms: 1000,
            customer_patience_units: 60,
            chef_backoff_units: 1,
            max_arrival_jitter_units: 5,
            shutdown: ShutdownPolicy::Drain,
        }
    }
}

fn clamp_count(field: &'static str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!(field, requested = value, clamped, "count out of range, clamping");
    }
    clamped
}

impl RestaurantConfig {
    /// Create a configuration with default timing and the given counts (clamped).
    #[must_use]
    pub fn new(worker_count: usize, customer_count: usize) -> Self {
        Self::default()
            .with_worker_count(worker_count)
            .with_customer_count(customer_count)
    }

    /// Set the chef count, clamped to `[1, 10]`.
    #[must_use]
    pub fn with_worker_count(mut self, count: usize) -> Self {
        self.worker_count = clamp_count("worker_count", count, MIN_WORKERS, MAX_WORKERS);
        self
    }

    /// Set the customer count, clamped to `[1, 100]`.
    #[must_use]
    pub fn with_customer_count(mut self, count: usize) -> Self {
        self.customer_count = clamp_count("customer_count", count, MIN_CUSTOMERS, MAX_CUSTOMERS);
        self
    }

    /// Set the length of one time unit in milliseconds.
    #[must_use]
    pub const fn with_time_unit_ms(mut self, ms: u64) -> Self {
        self.time_unit_ms = ms;
        self
    }

    /// Set customer patience in time units.
    #[must_use]
    pub const fn with_customer_patience_units(mut self, units: u64) -> Self {
        self.customer_patience_units = units;
        self
    }

    /// Set the idle chef backoff in time units.
    #[must_use]
    pub const fn with_chef_backoff_units(mut self, units: u64) -> Self {
        self.chef_backoff_units = units;
        self
    }

    /// Set the maximum arrival jitter in time units.
    #[must_use]
    pub const fn with_max_arrival_jitter_units(mut self, units: u64) -> Self {
        self.max_arrival_jitter_units = units;
        self
    }

    /// Set the shutdown policy.
    #[must_use]
    pub const fn with_shutdown(mut self, policy: ShutdownPolicy) -> Self {
        self.shutdown = policy;
        self
    }

    /// Re-apply the count ranges, e.g. after deserializing.
    #[must_use]
    pub fn clamped(self) -> Self {
        let (workers, customers) = (self.worker_count, self.customer_count);
        self.with_worker_count(workers).with_customer_count(customers)
    }

    /// Length of one model time unit.
    #[must_use]
    pub const fn time_unit(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms)
    }

    /// How long a customer waits before abandoning.
    #[must_use]
    pub const fn patience(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms.saturating_mul(self.customer_patience_units))
    }

    /// How long an idle chef blocks on the queue per check.
    #[must_use]
    pub const fn backoff(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms.saturating_mul(self.chef_backoff_units))
    }

    /// Upper bound of a customer's arrival delay.
    #[must_use]
    pub const fn max_jitter(&self) -> Duration {
        Duration::from_millis(self.time_unit_ms.saturating_mul(self.max_arrival_jitter_units))
    }

    /// Validate timing values. Counts are clamped rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns a message when a timing value would make the simulation spin.
    pub fn validate(&self) -> Result<(), String> {
        if self.time_unit_ms == 0 {
            return Err("time_unit_ms must be greater than 0".into());
        }
        if self.chef_backoff_units == 0 {
            return Err("chef_backoff_units must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string, clamp counts, and validate.
    ///
    /// # Errors
    ///
    /// Returns a message on malformed JSON or invalid timing values.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        let cfg = cfg.clamped();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the environment, loading `.env` first if present.
    ///
    /// Unset variables keep their defaults; unparsable ones are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns a message when the resulting timing values are invalid.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup (the environment, a map in tests).
    ///
    /// # Errors
    ///
    /// Returns a message when the resulting timing values are invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parsed<T: std::str::FromStr>(lookup: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<T> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(key, value = %raw, "ignoring unparsable setting");
                    None
                }
            }
        }

        let mut cfg = Self::default();
        if let Some(v) = parsed(&lookup, "RESTAURANT_CHEFS") {
            cfg = cfg.with_worker_count(v);
        }
        if let Some(v) = parsed(&lookup, "RESTAURANT_CUSTOMERS") {
            cfg = cfg.with_customer_count(v);
        }
        if let Some(v) = parsed(&lookup, "RESTAURANT_TIME_UNIT_MS") {
            cfg.time_unit_ms = v;
        }
        if let Some(v) = parsed(&lookup, "RESTAURANT_PATIENCE_UNITS") {
            cfg.customer_patience_units = v;
        }
        if let Some(v) = parsed(&lookup, "RESTAURANT_BACKOFF_UNITS") {
            cfg.chef_backoff_units = v;
        }
        if let Some(v) = parsed(&lookup, "RESTAURANT_JITTER_UNITS") {
            cfg.max_arrival_jitter_units = v;
        }
        if let Some(v) = parsed(&lookup, "RESTAURANT_SHUTDOWN") {
            cfg.shutdown = v;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
