//! CSV export for extracted transactions
//!
//! The output contract is fixed: a literal header row, one row per
//! transaction in document order, free-text fields always quoted. Downstream
//! spreadsheet imports depend on this exact shape.

use std::path::Path;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::Transaction;

/// The exact header row of every export
pub const CSV_HEADER: &str = "Date,Transaction ID,Description,Amount,Category,Notes";

/// Fallback filename when no dated name is derived
pub const DEFAULT_EXPORT_FILENAME: &str = "bank_transactions.csv";

/// Render transactions as CSV in document order.
///
/// Description and notes are always quoted (with `"` doubled) because they
/// are free text from the statement; amount is the plain signed decimal with
/// no currency symbol or grouping; an empty transaction id falls back to
/// "NA"; unknown categories export their raw service label.
pub fn to_csv(transactions: &[Transaction]) -> String {
    let mut lines = Vec::with_capacity(transactions.len() + 1);
    lines.push(CSV_HEADER.to_string());

    for tx in transactions {
        let transaction_id = if tx.transaction_id.is_empty() {
            "NA"
        } else {
            tx.transaction_id.as_str()
        };
        lines.push(format!(
            "{},{},{},{},{},{}",
            tx.date,
            transaction_id,
            quote_csv_field(&tx.description),
            tx.amount,
            tx.category.raw(),
            quote_csv_field(&tx.notes)
        ));
    }

    lines.join("\n")
}

/// Write CSV text to a file
pub fn save_csv(csv: &str, path: &Path) -> Result<()> {
    std::fs::write(path, csv)?;
    Ok(())
}

/// Dated export filename, e.g. `Statement_Export_2024-06-15.csv`
pub fn export_filename(date: NaiveDate) -> String {
    format!("Statement_Export_{}.csv", date)
}

/// Quote a free-text field for CSV output, doubling embedded quotes
fn quote_csv_field(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
