//! Tests for event sinks

use std::sync::Arc;
use std::thread;

use restaurant_sim::core::{CustomerId, EventSink, InMemoryEventSink, RestaurantEvent};

#[test]
fn test_in_memory_sink_across_threads() {
    let sink = Arc::new(InMemoryEventSink::new(1_000));
    let mut handles = vec![];

    for chef_id in 0..4 {
        let sink = Arc::clone(&sink);
        handles.push(thread::spawn(move || {
            for n in 0..10 {
                sink.record(RestaurantEvent::OrderCooked {
                    chef_id,
                    customer_id: CustomerId(n),
                    item: "salad".into(),
                });
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.events().len(), 40);
}

#[test]
fn test_summary_event_json() {
    let event = RestaurantEvent::RunSummary {
        total_revenue: 42,
        jobs_per_chef: vec![3, 4],
        jobs_missed: 1,
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: RestaurantEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
    assert!(json.contains("\"kind\":\"run_summary\""));
}
