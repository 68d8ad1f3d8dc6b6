//! Tests for configuration validation

use restaurant_sim::config::{RestaurantConfig, ShutdownPolicy, MAX_CUSTOMERS, MAX_WORKERS};

#[test]
fn test_config_validation() {
    let valid = RestaurantConfig::new(4, 30);
    assert!(valid.validate().is_ok());
}

#[test]
fn test_config_invalid_time_unit() {
    let invalid = RestaurantConfig::new(4, 30).with_time_unit_ms(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_zero_patience_is_allowed() {
    let cfg = RestaurantConfig::new(1, 1).with_customer_patience_units(0);
    assert!(cfg.validate().is_ok());
    assert!(cfg.patience().is_zero());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "worker_count": 2,
        "customer_count": 15,
        "time_unit_ms": 10,
        "shutdown": "immediate"
    }"#;

    let config = RestaurantConfig::from_json_str(json).unwrap();
    assert_eq!(config.worker_count, 2);
    assert_eq!(config.customer_count, 15);
    assert_eq!(config.time_unit_ms, 10);
    assert_eq!(config.customer_patience_units, 60);
    assert_eq!(config.shutdown, ShutdownPolicy::Immediate);
}

#[test]
fn test_config_from_json_clamps_counts() {
    let json = r#"{ "worker_count": 99, "customer_count": 0 }"#;
    let config = RestaurantConfig::from_json_str(json).unwrap();
    assert_eq!(config.worker_count, MAX_WORKERS);
    assert_eq!(config.customer_count, 1);
}

#[test]
fn test_config_from_json_rejects_garbage() {
    assert!(RestaurantConfig::from_json_str("not json").is_err());
    assert!(RestaurantConfig::from_json_str(r#"{ "time_unit_ms": 0 }"#).is_err());
}

#[test]
fn test_config_builder_clamps() {
    let cfg = RestaurantConfig::default()
        .with_worker_count(11)
        .with_customer_count(101);
    assert_eq!(cfg.worker_count, MAX_WORKERS);
    assert_eq!(cfg.customer_count, MAX_CUSTOMERS);
}

#[test]
fn test_shutdown_policy_parse() {
    assert_eq!("Drain".parse::<ShutdownPolicy>().unwrap(), ShutdownPolicy::Drain);
    assert_eq!(" immediate ".parse::<ShutdownPolicy>().unwrap(), ShutdownPolicy::Immediate);
    assert!("later".parse::<ShutdownPolicy>().is_err());
}
