use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::Transaction;

/// Write transactions as CSV: header `Date,Category,Note,Amount`, dates as
/// YYYY-MM-DD, amounts as the raw signed decimal string (no symbol, no
/// thousands separators). The category column carries the stored value or
/// empty, not the "Other" display fallback.
///
/// Fields are never quoted, so an embedded comma in a note shifts columns.
/// Known limitation, kept for compatibility with exports users already have.
pub(crate) fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);

    wtr.write_record(["Date", "Category", "Note", "Amount"])?;
    for txn in transactions {
        wtr.write_record([
            txn.date.format("%Y-%m-%d").to_string(),
            txn.category.clone().unwrap_or_default(),
            txn.note.clone(),
            txn.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export to a file, returning the number of data rows written.
pub(crate) fn export_to_path(path: &Path, transactions: &[Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    write_csv(file, transactions)?;
    Ok(transactions.len())
}

#[cfg(test)]
#[path = "csv_export_tests.rs"]
mod tests;
