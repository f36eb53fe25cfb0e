use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::format::format_day;
use crate::models::Transaction;

/// Trailing window for the income/expense trend series, in calendar days.
pub(crate) const TREND_WINDOW_DAYS: i64 = 30;

/// Every derived dashboard figure, recomputed from scratch on each call.
/// Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AggregationResult {
    pub(crate) balance: Decimal,
    pub(crate) total_income: Decimal,
    pub(crate) total_expenses: Decimal,
    pub(crate) category_breakdown: Vec<(String, Decimal)>,
    pub(crate) trend: Vec<TrendPoint>,
}

/// One trend bucket: all transactions sharing a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrendPoint {
    pub(crate) date: NaiveDate,
    pub(crate) label: String,
    pub(crate) income: Decimal,
    pub(crate) expenses: Decimal,
}

/// Pure transform: no I/O, inputs untouched, equal inputs give equal results.
pub(crate) fn aggregate(
    transactions: &[Transaction],
    initial_balance: Decimal,
    today: NaiveDate,
) -> AggregationResult {
    let (total_income, total_expenses) = compute_totals(transactions);
    AggregationResult {
        balance: compute_balance(initial_balance, total_income, total_expenses),
        total_income,
        total_expenses,
        category_breakdown: compute_category_breakdown(transactions),
        trend: compute_trend(transactions, today, TREND_WINDOW_DAYS),
    }
}

/// Total income and total expenses, both non-negative. Zero-amount entries
/// contribute to neither. Order-independent reduction.
pub(crate) fn compute_totals(transactions: &[Transaction]) -> (Decimal, Decimal) {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for txn in transactions {
        if txn.is_income() {
            income += txn.amount;
        } else if txn.is_expense() {
            expenses += txn.abs_amount();
        }
    }
    (income, expenses)
}

/// `initial_balance + income - expenses`. Negative results are valid
/// (overdraft); flooring the initial balance at zero is the input form's
/// policy, not the engine's.
pub(crate) fn compute_balance(
    initial_balance: Decimal,
    income: Decimal,
    expenses: Decimal,
) -> Decimal {
    initial_balance + income - expenses
}

/// Absolute expense totals keyed by category label; income never counted.
/// Entries appear in order of first occurrence, keys unique.
pub(crate) fn compute_category_breakdown(transactions: &[Transaction]) -> Vec<(String, Decimal)> {
    let mut breakdown: Vec<(String, Decimal)> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let label = txn.category_label();
        match breakdown.iter_mut().find(|(name, _)| name == label) {
            Some((_, total)) => *total += txn.abs_amount(),
            None => breakdown.push((label.to_string(), txn.abs_amount())),
        }
    }
    breakdown
}

/// Daily income/expense buckets over the trailing window, oldest first.
/// The whole-day difference `today - date` must be <= `window_days`, so
/// future-dated transactions pass the filter too. Bucketing and ordering key
/// on the underlying date, not the formatted label, so buckets never collide
/// or misorder across a year boundary.
pub(crate) fn compute_trend(
    transactions: &[Transaction],
    today: NaiveDate,
    window_days: i64,
) -> Vec<TrendPoint> {
    let mut recent: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| !t.amount.is_zero() && (today - t.date).num_days() <= window_days)
        .collect();
    // Stable sort: transactions on the same date keep their input order.
    recent.sort_by_key(|t| t.date);

    let mut trend: Vec<TrendPoint> = Vec::new();
    for txn in recent {
        if trend.last().map(|p| p.date) != Some(txn.date) {
            trend.push(TrendPoint {
                date: txn.date,
                label: format_day(txn.date),
                income: Decimal::ZERO,
                expenses: Decimal::ZERO,
            });
        }
        if let Some(point) = trend.last_mut() {
            if txn.is_income() {
                point.income += txn.amount;
            } else {
                point.expenses += txn.abs_amount();
            }
        }
    }
    trend
}
