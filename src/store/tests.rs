#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use super::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn make_txn(user_id: &str, amount: &str, day: &str) -> Transaction {
    Transaction {
        id: None,
        user_id: user_id.into(),
        amount: Decimal::from_str(amount).unwrap(),
        currency: "INR".into(),
        category: Some("Food".into()),
        note: "lunch".into(),
        date: date(day),
        created_at: "2024-01-15T00:00:00Z".into(),
    }
}

// ── TransactionStore ──────────────────────────────────────────

#[test]
fn test_create_assigns_id() {
    let store = SqliteStore::open_in_memory().unwrap();
    let persisted = store.create(&make_txn("u1", "-250", "2024-01-15")).unwrap();
    assert!(persisted.id.is_some());
    assert_eq!(persisted.amount, dec!(-250));
}

#[test]
fn test_list_roundtrips_fields() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.create(&make_txn("u1", "-1200.50", "2024-01-15")).unwrap();

    let txns = store.list("u1").unwrap();
    assert_eq!(txns.len(), 1);
    let txn = &txns[0];
    assert_eq!(txn.user_id, "u1");
    assert_eq!(txn.amount, dec!(-1200.50));
    assert_eq!(txn.currency, "INR");
    assert_eq!(txn.category.as_deref(), Some("Food"));
    assert_eq!(txn.note, "lunch");
    assert_eq!(txn.date, date("2024-01-15"));
    assert_eq!(txn.created_at, "2024-01-15T00:00:00Z");
}

#[test]
fn test_list_preserves_missing_category() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut txn = make_txn("u1", "100", "2024-01-15");
    txn.category = None;
    store.create(&txn).unwrap();

    let txns = store.list("u1").unwrap();
    // Stored as NULL, not normalized to "Other"; normalization is display-only.
    assert_eq!(txns[0].category, None);
    assert_eq!(txns[0].category_label(), "Other");
}

#[test]
fn test_list_newest_first() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.create(&make_txn("u1", "-10", "2024-01-10")).unwrap();
    store.create(&make_txn("u1", "-20", "2024-01-20")).unwrap();
    store.create(&make_txn("u1", "-15", "2024-01-15")).unwrap();

    let txns = store.list("u1").unwrap();
    let dates: Vec<NaiveDate> = txns.iter().map(|t| t.date).collect();
    assert_eq!(
        dates,
        vec![date("2024-01-20"), date("2024-01-15"), date("2024-01-10")]
    );
}

#[test]
fn test_list_same_date_latest_insert_first() {
    let store = SqliteStore::open_in_memory().unwrap();
    let first = store.create(&make_txn("u1", "-10", "2024-01-15")).unwrap();
    let second = store.create(&make_txn("u1", "-20", "2024-01-15")).unwrap();

    let txns = store.list("u1").unwrap();
    assert_eq!(txns[0].id, second.id);
    assert_eq!(txns[1].id, first.id);
}

#[test]
fn test_list_scoped_to_user() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.create(&make_txn("u1", "-10", "2024-01-15")).unwrap();
    store.create(&make_txn("u2", "-20", "2024-01-15")).unwrap();

    assert_eq!(store.list("u1").unwrap().len(), 1);
    assert_eq!(store.list("u2").unwrap().len(), 1);
    assert!(store.list("u3").unwrap().is_empty());
}

#[test]
fn test_amount_precision_roundtrip() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.create(&make_txn("u1", "-0.1", "2024-01-15")).unwrap();
    store.create(&make_txn("u1", "1234567.89", "2024-01-16")).unwrap();

    let txns = store.list("u1").unwrap();
    // Amounts are TEXT in SQLite, so decimal scale survives exactly.
    assert_eq!(txns[0].amount, dec!(1234567.89));
    assert_eq!(txns[1].amount, dec!(-0.1));
}

#[test]
fn test_bad_stored_amount_is_an_error() {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .conn
        .execute(
            "INSERT INTO transactions (user_id, amount, currency, category, note, date, created_at)
             VALUES ('u1', 'not-a-number', 'INR', NULL, '', '2024-01-15', '')",
            [],
        )
        .unwrap();

    let err = store.list("u1").unwrap_err();
    assert!(matches!(err, StoreError::BadAmount(_)));
}

// ── BalanceStore ──────────────────────────────────────────────

#[test]
fn test_initial_balance_absent() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert_eq!(store.initial_balance("u1").unwrap(), None);
}

#[test]
fn test_initial_balance_roundtrip() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_initial_balance("u1", dec!(2000.50)).unwrap();
    assert_eq!(store.initial_balance("u1").unwrap(), Some(dec!(2000.50)));
}

#[test]
fn test_initial_balance_overwrite() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_initial_balance("u1", dec!(1000)).unwrap();
    store.set_initial_balance("u1", dec!(3500)).unwrap();
    assert_eq!(store.initial_balance("u1").unwrap(), Some(dec!(3500)));
}

#[test]
fn test_initial_balance_per_user() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.set_initial_balance("u1", dec!(100)).unwrap();
    assert_eq!(store.initial_balance("u2").unwrap(), None);
}

// ── Migrations ────────────────────────────────────────────────

#[test]
fn test_migrate_is_idempotent() {
    let store = SqliteStore::open_in_memory().unwrap();
    store.migrate().unwrap();
    let version: i32 = store
        .conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, schema::CURRENT_VERSION);
}
