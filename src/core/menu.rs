//! The menu: a static mapping from item name to preparation cost and price.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::RestaurantError;

/// A dish the kitchen knows how to cook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Item identifier customers order by.
    pub name: String,
    /// Preparation cost in model time units.
    pub prep_units: u32,
    /// Price credited to the ledger when the dish is cooked.
    pub price: u64,
}

impl MenuItem {
    /// Create a menu item.
    pub fn new(name: impl Into<String>, prep_units: u32, price: u64) -> Self {
        Self {
            name: name.into(),
            prep_units,
            price,
        }
    }

    /// Wall-clock preparation time for a given time unit.
    #[must_use]
    pub fn prep_cost(&self, time_unit: Duration) -> Duration {
        time_unit.saturating_mul(self.prep_units)
    }
}

/// Immutable catalog of menu items, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MenuCatalog {
    items: BTreeMap<String, MenuItem>,
}

impl MenuCatalog {
    /// Build a catalog. A later item with a duplicate name replaces the earlier one.
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.name.clone(), item))
                .collect(),
        }
    }

    /// The house menu.
    #[must_use]
    pub fn standard() -> Self {
        Self::new([
            MenuItem::new("salad", 2, 2),
            MenuItem::new("burger", 4, 5),
            MenuItem::new("fries", 3, 3),
            MenuItem::new("hotDog", 4, 4),
            MenuItem::new("pizza", 10, 10),
        ])
    }

    /// Look up an item by name.
    ///
    /// # Errors
    ///
    /// Returns `RestaurantError::UnknownMenuItem` if the menu does not carry it.
    pub fn get(&self, name: &str) -> Result<&MenuItem, RestaurantError> {
        self.items
            .get(name)
            .ok_or_else(|| RestaurantError::UnknownMenuItem(name.to_string()))
    }

    /// Item names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Pick an item uniformly at random, or `None` on an empty menu.
    pub fn random_item<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&MenuItem> {
        if self.items.is_empty() {
            return None;
        }
        let idx = rng.random_range(0..self.items.len());
        self.items.values().nth(idx)
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the menu is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
