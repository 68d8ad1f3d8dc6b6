//! Tests for error types

use restaurant_sim::core::RestaurantError;

#[test]
fn test_unknown_item_error() {
    let err = RestaurantError::UnknownMenuItem("soup".to_string());
    assert_eq!(format!("{}", err), "unknown menu item: soup");
}

#[test]
fn test_customer_left_error() {
    let err = RestaurantError::CustomerLeft;
    assert_eq!(format!("{}", err), "customer left before pickup");
}

#[test]
fn test_queue_unavailable_error() {
    let err = RestaurantError::QueueUnavailable;
    assert_eq!(format!("{}", err), "order queue unavailable");
}

#[test]
fn test_timeout_error() {
    let err = RestaurantError::Timeout;
    assert_eq!(format!("{}", err), "timed out waiting for order");
}

#[test]
fn test_spawn_error_from_io() {
    let io = std::io::Error::new(std::io::ErrorKind::Other, "no threads left");
    let err: RestaurantError = io.into();
    assert_eq!(format!("{}", err), "failed to spawn thread: no threads left");
}
