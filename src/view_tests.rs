#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::store::SqliteStore;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn add(store: &SqliteStore, amount: Decimal, category: Option<&str>, day: &str) {
    let txn = Transaction::new(
        "u1".into(),
        amount,
        category.map(|c| c.to_string()),
        String::new(),
        date(day),
    );
    store.create(&txn).unwrap();
}

#[test]
fn test_load_without_initial_balance() {
    let store = SqliteStore::open_in_memory().unwrap();
    add(&store, dec!(5000), None, "2024-01-10");
    add(&store, dec!(-1500), Some("Food"), "2024-01-12");

    let view = DashboardView::load(&store, "u1", date("2024-01-15")).unwrap();
    assert!(view.needs_initial_balance());
    // Unset balance aggregates as zero.
    assert_eq!(view.result.balance, dec!(3500));
}

#[test]
fn test_load_with_initial_balance() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_initial_balance("u1", dec!(1000)).unwrap();
    add(&store, dec!(5000), None, "2024-01-15");
    add(&store, dec!(-1200), Some("Food"), "2024-01-15");
    add(&store, dec!(-300), Some("Food"), "2024-01-14");

    let view = DashboardView::load(&store, "u1", date("2024-01-15")).unwrap();
    assert!(!view.needs_initial_balance());
    assert_eq!(view.initial_balance, Some(dec!(1000)));
    assert_eq!(view.result.total_income, dec!(5000));
    assert_eq!(view.result.total_expenses, dec!(1500));
    assert_eq!(view.result.balance, dec!(4500));
    assert_eq!(
        view.result.category_breakdown,
        vec![("Food".to_string(), dec!(1500))]
    );
}

#[test]
fn test_reload_reflects_mutation() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_initial_balance("u1", dec!(100)).unwrap();

    let before = DashboardView::load(&store, "u1", date("2024-01-15")).unwrap();
    assert_eq!(before.result.balance, dec!(100));
    assert!(before.transactions.is_empty());

    add(&store, dec!(-40), Some("Food"), "2024-01-14");
    let after = DashboardView::load(&store, "u1", date("2024-01-15")).unwrap();
    assert_eq!(after.result.balance, dec!(60));
    assert_eq!(after.transactions.len(), 1);
}

#[test]
fn test_load_only_sees_own_user() {
    let store = SqliteStore::open_in_memory().unwrap();
    add(&store, dec!(-40), Some("Food"), "2024-01-14");

    let view = DashboardView::load(&store, "someone-else", date("2024-01-15")).unwrap();
    assert!(view.transactions.is_empty());
    assert_eq!(view.result.balance, Decimal::ZERO);
}
