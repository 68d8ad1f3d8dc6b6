//! Run one day at the restaurant.
//!
//! Usage: `restaurant [chefs] [customers]`
//!
//! Settings come from the environment (and `.env`), see `RestaurantConfig::from_env`.
//! Positional arguments override the chef and customer counts; anything that is
//! not a number falls back to the configured value.

use anyhow::{anyhow, Context};
use restaurant_sim::config::RestaurantConfig;
use restaurant_sim::core::{AppResult, MenuCatalog, Restaurant, TimedKitchen};
use restaurant_sim::util::init_tracing;

fn main() -> AppResult<()> {
    init_tracing();

    let mut config = RestaurantConfig::from_env().map_err(|e| anyhow!(e))?;
    let mut args = std::env::args().skip(1);
    if let Some(chefs) = args.next().and_then(|a| a.parse().ok()) {
        config = config.with_worker_count(chefs);
    }
    if let Some(customers) = args.next().and_then(|a| a.parse().ok()) {
        config = config.with_customer_count(customers);
    }

    let kitchen = TimedKitchen::new(config.time_unit());
    let restaurant = Restaurant::new(config, MenuCatalog::standard(), kitchen);
    let summary = restaurant.run().context("restaurant run failed")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
