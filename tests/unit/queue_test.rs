//! Concurrency tests for the order queue

use std::collections::HashSet;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use restaurant_sim::core::{CustomerId, Order};
use restaurant_sim::infra::{result_channel, OrderQueue};

const PRODUCERS: u64 = 4;
const PER_PRODUCER: u64 = 250;

/// Encode producer and sequence number into the customer id.
fn order_for(producer: u64, seq: u64) -> Order {
    let (tx, _rx) = result_channel();
    Order::new(CustomerId(producer * 10_000 + seq), "a", tx)
}

#[test]
fn test_every_order_taken_exactly_once() {
    let queue = Arc::new(OrderQueue::new());
    let seen: Arc<Mutex<HashSet<u64>>> = Arc::new(Mutex::new(HashSet::new()));
    let barrier = Arc::new(Barrier::new((PRODUCERS * 2) as usize));

    let mut producers = Vec::new();
    for p in 0..PRODUCERS {
        let queue = Arc::clone(&queue);
        let barrier = Arc::clone(&barrier);
        producers.push(thread::spawn(move || {
            barrier.wait();
            for seq in 0..PER_PRODUCER {
                queue.submit(order_for(p, seq)).unwrap();
            }
        }));
    }

    let mut consumers = Vec::new();
    for _ in 0..PRODUCERS {
        let queue = Arc::clone(&queue);
        let barrier = Arc::clone(&barrier);
        let seen = Arc::clone(&seen);
        consumers.push(thread::spawn(move || {
            barrier.wait();
            while let Ok(next) = queue.take_timeout(Duration::from_millis(5)) {
                if let Some(order) = next {
                    // Each order id should be observed at most once.
                    assert!(seen.lock().insert(order.customer_id.0));
                }
            }
        }));
    }

    for p in producers {
        p.join().unwrap();
    }
    queue.close();
    for c in consumers {
        c.join().unwrap();
    }

    assert_eq!(seen.lock().len() as u64, PRODUCERS * PER_PRODUCER);
    assert!(queue.is_empty());
}

#[test]
fn test_submission_order_is_service_order() {
    let queue = Arc::new(OrderQueue::new());

    let mut producers = Vec::new();
    for p in 0..PRODUCERS {
        let queue = Arc::clone(&queue);
        producers.push(thread::spawn(move || {
            for seq in 0..PER_PRODUCER {
                queue.submit(order_for(p, seq)).unwrap();
            }
        }));
    }
    for p in producers {
        p.join().unwrap();
    }

    // Orders from one producer were submitted in sequence, so they must come out in sequence.
    let mut last_seq = vec![None::<u64>; PRODUCERS as usize];
    while let Some(order) = queue.try_take() {
        let producer = (order.customer_id.0 / 10_000) as usize;
        let seq = order.customer_id.0 % 10_000;
        if let Some(prev) = last_seq[producer] {
            assert!(seq > prev, "producer {producer}: {seq} served after {prev}");
        }
        last_seq[producer] = Some(seq);
    }
    assert!(last_seq.iter().all(|s| *s == Some(PER_PRODUCER - 1)));
}

#[test]
fn test_blocked_consumer_wakes_on_submit() {
    let queue = Arc::new(OrderQueue::new());
    let consumer = {
        let queue = Arc::clone(&queue);
        thread::spawn(move || queue.take_timeout(Duration::from_secs(5)).unwrap())
    };

    thread::sleep(Duration::from_millis(20));
    queue.submit(order_for(0, 1)).unwrap();

    let order = consumer.join().unwrap().expect("order should arrive before timeout");
    assert_eq!(order.customer_id, CustomerId(1));
}

#[test]
fn test_repeated_empty_take_leaves_queue_untouched() {
    let queue = OrderQueue::new();
    queue.submit(order_for(0, 0)).unwrap();
    let _ = queue.try_take();

    for _ in 0..100 {
        assert!(queue.try_take().is_none());
    }
    assert_eq!(queue.len(), 0);
    assert!(!queue.is_closed());
    assert_eq!(queue.submit(order_for(0, 1)).unwrap(), 1);
}
