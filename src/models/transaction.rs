use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The tracker is single-currency; amounts are never converted.
pub(crate) const DEFAULT_CURRENCY: &str = "INR";

/// A single signed financial event belonging to one user.
/// `amount > 0` is income, `amount < 0` is expense; zero is rejected by
/// input validation before a transaction is ever constructed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub(crate) id: Option<i64>,
    pub(crate) user_id: String,
    pub(crate) amount: Decimal,
    pub(crate) currency: String,
    pub(crate) category: Option<String>,
    pub(crate) note: String,
    pub(crate) date: NaiveDate,
    pub(crate) created_at: String,
}

impl Transaction {
    pub(crate) fn new(
        user_id: String,
        amount: Decimal,
        category: Option<String>,
        note: String,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            user_id,
            amount,
            currency: DEFAULT_CURRENCY.into(),
            category,
            note,
            date,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    pub(crate) fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    /// Display label; a missing or blank category falls back to "Other".
    pub(crate) fn category_label(&self) -> &str {
        match &self.category {
            Some(c) if !c.trim().is_empty() => c,
            _ => "Other",
        }
    }
}
