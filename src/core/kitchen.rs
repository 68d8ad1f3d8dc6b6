//! Cooking executor.

use std::time::Duration;

use async_trait::async_trait;

use crate::core::{MenuItem, RestaurantError};

/// Does the actual cooking for a chef.
///
/// Each chef thread runs its own single-threaded tokio runtime and drives
/// `prepare` to completion there, so cooking never blocks other chefs and
/// never runs while a shared lock is held.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct Microwave;
///
/// #[async_trait]
/// impl Kitchen for Microwave {
///     async fn prepare(&self, _item: &MenuItem) -> Result<(), RestaurantError> {
///         tokio::time::sleep(Duration::from_millis(1)).await;
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Kitchen: Send + Sync + Clone + 'static {
    /// Cook one portion of `item`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dish could not be made; the chef discards the order.
    async fn prepare(&self, item: &MenuItem) -> Result<(), RestaurantError>;
}

/// Kitchen that takes `prep_units` time units per dish.
#[derive(Debug, Clone, Copy)]
pub struct TimedKitchen {
    time_unit: Duration,
}

impl TimedKitchen {
    /// Create a kitchen where one prep unit lasts `time_unit`.
    #[must_use]
    pub const fn new(time_unit: Duration) -> Self {
        Self { time_unit }
    }
}

#[async_trait]
impl Kitchen for TimedKitchen {
    async fn prepare(&self, item: &MenuItem) -> Result<(), RestaurantError> {
        let cost = item.prep_cost(self.time_unit);
        if !cost.is_zero() {
            tokio::time::sleep(cost).await;
        }
        Ok(())
    }
}
