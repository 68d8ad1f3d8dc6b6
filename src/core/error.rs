//! Error types for restaurant operations.

use thiserror::Error;

/// Errors produced by restaurant components.
#[derive(Debug, Error)]
pub enum RestaurantError {
    /// The order names an item the menu does not carry.
    #[error("unknown menu item: {0}")]
    UnknownMenuItem(String),
    /// The customer closed their pickup end before the food arrived.
    #[error("customer left before pickup")]
    CustomerLeft,
    /// The kitchen side of a pickup channel closed without delivering.
    #[error("order dropped by the kitchen")]
    OrderDropped,
    /// The order queue has been closed for the day.
    #[error("order queue unavailable")]
    QueueUnavailable,
    /// A bounded wait elapsed.
    #[error("timed out waiting for order")]
    Timeout,
    /// Cooking failed with context.
    #[error("kitchen failure: {0}")]
    Kitchen(String),
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An OS thread could not be started.
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// Internal error (join failure, runtime construction, etc.).
    #[error("internal error: {0}")]
    Internal(String),
}

impl RestaurantError {
    /// Whether the error only affects the job at hand; a chef logs it and keeps working.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::UnknownMenuItem(_) | Self::CustomerLeft | Self::Kitchen(_)
        )
    }

    /// Whether the error ends a customer's visit without food.
    #[must_use]
    pub const fn is_abandonment(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::OrderDropped | Self::QueueUnavailable
        )
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
