mod schema;

use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use crate::models::{StoreError, Transaction};

/// Transaction persistence, as the rest of the app sees it. Row-level
/// ownership is the store's problem: every query is scoped to one user.
pub(crate) trait TransactionStore {
    /// All transactions for one user, newest first.
    fn list(&self, user_id: &str) -> Result<Vec<Transaction>, StoreError>;

    /// Persist a new transaction and return it with its assigned id.
    fn create(&self, txn: &Transaction) -> Result<Transaction, StoreError>;
}

/// Per-user initial balance. `None` means the user has never set one and the
/// caller should prompt for it before the dashboard balance means anything.
pub(crate) trait BalanceStore {
    fn initial_balance(&self, user_id: &str) -> Result<Option<Decimal>, StoreError>;
    fn set_initial_balance(&self, user_id: &str, amount: Decimal) -> Result<(), StoreError>;
}

pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.display().to_string(),
            source,
        })?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // Existing database - check version and apply migrations
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }
}

impl TransactionStore for SqliteStore {
    fn list(&self, user_id: &str) -> Result<Vec<Transaction>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, user_id, amount, currency, category, note, date, created_at
             FROM transactions WHERE user_id = ?1
             ORDER BY date DESC, id DESC",
        )?;
        let rows = stmt.query_map(params![user_id], |row| {
            Ok(RawTransaction {
                id: row.get(0)?,
                user_id: row.get(1)?,
                amount: row.get(2)?,
                currency: row.get(3)?,
                category: row.get(4)?,
                note: row.get(5)?,
                date: row.get(6)?,
                created_at: row.get(7)?,
            })
        })?;
        let raw: Vec<RawTransaction> =
            rows.collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        raw.into_iter().map(RawTransaction::decode).collect()
    }

    fn create(&self, txn: &Transaction) -> Result<Transaction, StoreError> {
        self.conn.execute(
            "INSERT INTO transactions (user_id, amount, currency, category, note, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                txn.user_id,
                txn.amount.to_string(),
                txn.currency,
                txn.category,
                txn.note,
                txn.date.format("%Y-%m-%d").to_string(),
                txn.created_at,
            ],
        )?;
        let mut persisted = txn.clone();
        persisted.id = Some(self.conn.last_insert_rowid());
        Ok(persisted)
    }
}

impl BalanceStore for SqliteStore {
    fn initial_balance(&self, user_id: &str) -> Result<Option<Decimal>, StoreError> {
        let result = self.conn.query_row(
            "SELECT amount FROM initial_balances WHERE user_id = ?1",
            params![user_id],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(raw) => {
                let amount =
                    Decimal::from_str(&raw).map_err(|_| StoreError::BadAmount(raw.clone()))?;
                Ok(Some(amount))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_initial_balance(&self, user_id: &str, amount: Decimal) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO initial_balances (user_id, amount) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET amount = ?2",
            params![user_id, amount.to_string()],
        )?;
        Ok(())
    }
}

/// Row image before amount/date decoding. Amounts and dates live as TEXT in
/// SQLite; a row that fails to decode is surfaced as a StoreError rather
/// than silently zeroed.
struct RawTransaction {
    id: i64,
    user_id: String,
    amount: String,
    currency: String,
    category: Option<String>,
    note: String,
    date: String,
    created_at: String,
}

impl RawTransaction {
    fn decode(self) -> Result<Transaction, StoreError> {
        let amount = Decimal::from_str(&self.amount)
            .map_err(|_| StoreError::BadAmount(self.amount.clone()))?;
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| StoreError::BadDate(self.date.clone()))?;
        Ok(Transaction {
            id: Some(self.id),
            user_id: self.user_id,
            amount,
            currency: self.currency,
            category: self.category,
            note: self.note,
            date,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests;
