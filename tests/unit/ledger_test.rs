//! Tests for the ledger and menu

use restaurant_sim::core::{Ledger, MenuCatalog, MenuItem, RestaurantError};

#[test]
fn test_ledger_is_monotonic() {
    let ledger = Ledger::new();
    let mut last = ledger.read();
    for amount in [2, 0, 5, 10] {
        ledger.credit(amount);
        assert!(ledger.read() >= last);
        last = ledger.read();
    }
    assert_eq!(last, 17);
    assert_eq!(ledger.credits(), 4);
}

#[test]
fn test_custom_catalog_lookup() {
    let menu = MenuCatalog::new([MenuItem::new("a", 0, 1), MenuItem::new("b", 2, 3)]);
    assert_eq!(menu.len(), 2);
    assert!(!menu.is_empty());
    assert_eq!(menu.get("b").unwrap().price, 3);
    assert!(matches!(menu.get("c"), Err(RestaurantError::UnknownMenuItem(_))));
}

#[test]
fn test_duplicate_names_keep_last() {
    let menu = MenuCatalog::new([MenuItem::new("a", 0, 1), MenuItem::new("a", 0, 9)]);
    assert_eq!(menu.len(), 1);
    assert_eq!(menu.get("a").unwrap().price, 9);
}
