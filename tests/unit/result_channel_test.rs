//! Tests for the one-shot pickup channel

use std::thread;
use std::time::Duration;

use restaurant_sim::core::RestaurantError;
use restaurant_sim::infra::result_channel;

#[test]
fn test_both_ends_closed_before_delivery() {
    let (tx, rx) = result_channel::<String>();
    drop(rx);

    let racer = thread::spawn(move || tx.deliver("fries".to_string()));
    assert!(matches!(racer.join().unwrap(), Err(RestaurantError::CustomerLeft)));
}

#[test]
fn test_receiver_wakes_when_sender_drops() {
    let (tx, rx) = result_channel::<String>();
    let dropper = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        drop(tx);
    });

    assert!(matches!(
        rx.await_result(Duration::from_secs(5)),
        Err(RestaurantError::OrderDropped)
    ));
    dropper.join().unwrap();
}

#[test]
fn test_delivery_racing_timeout_never_panics() {
    for i in 0..50u64 {
        let (tx, rx) = result_channel::<u64>();
        let cook = thread::spawn(move || tx.deliver(i));
        match rx.await_result(Duration::from_micros(i * 10)) {
            Ok(v) => assert_eq!(v, i),
            Err(e) => assert!(e.is_abandonment()),
        }
        let _ = cook.join().unwrap();
    }
}

#[tokio::test]
async fn test_async_await_result() {
    let (tx, rx) = result_channel::<String>();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        tx.deliver("burger".to_string()).unwrap();
    });

    let item = rx.await_result_async(Duration::from_secs(5)).await.unwrap();
    assert_eq!(item, "burger");
}

#[tokio::test]
async fn test_async_timeout() {
    let (_tx, rx) = result_channel::<String>();
    let err = rx.await_result_async(Duration::from_millis(20)).await.unwrap_err();
    assert!(matches!(err, RestaurantError::Timeout));
}

#[tokio::test]
async fn test_async_timeout_closes_pickup() {
    let (tx, rx) = result_channel::<String>();
    let err = rx.await_result_async(Duration::from_millis(10)).await.unwrap_err();
    assert!(matches!(err, RestaurantError::Timeout));

    // Once the wait has returned, the kitchen learns the customer is gone.
    assert!(tx.is_abandoned());
    assert!(matches!(
        tx.deliver("pizza".to_string()),
        Err(RestaurantError::CustomerLeft)
    ));
}
