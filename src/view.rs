use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::engine::{self, AggregationResult};
use crate::models::{StoreError, Transaction};
use crate::store::{BalanceStore, TransactionStore};

/// Everything the dashboard needs, recomputed from scratch. Callers reload
/// after each successful store mutation; there is no incremental update path
/// and no hidden reactivity.
pub(crate) struct DashboardView {
    pub(crate) initial_balance: Option<Decimal>,
    pub(crate) result: AggregationResult,
    pub(crate) transactions: Vec<Transaction>,
}

impl DashboardView {
    /// One fetch per load: the full transaction list and the stored initial
    /// balance, fed to the engine in a single call. An unset balance
    /// aggregates as zero; `needs_initial_balance` tells the caller to
    /// prompt.
    pub(crate) fn load<S>(store: &S, user_id: &str, today: NaiveDate) -> Result<Self, StoreError>
    where
        S: TransactionStore + BalanceStore + ?Sized,
    {
        let transactions = store.list(user_id)?;
        let initial_balance = store.initial_balance(user_id)?;
        let result = engine::aggregate(
            &transactions,
            initial_balance.unwrap_or(Decimal::ZERO),
            today,
        );
        Ok(Self {
            initial_balance,
            result,
            transactions,
        })
    }

    pub(crate) fn needs_initial_balance(&self) -> bool {
        self.initial_balance.is_none()
    }
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
