//! Terminal rendering for extraction results
//!
//! Pure string-building functions so the card and table output can be
//! asserted in tests. Amounts are shown in rupees with Indian digit
//! grouping; debits are red, credits green.

use bankscan_core::models::{Category, ExtractionResult, Transaction};

use crate::commands::truncate;

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Format a magnitude with two decimals and en-IN digit grouping
/// (last three digits, then groups of two: 123456 → "1,23,456.00")
pub fn format_inr(amount: f64) -> String {
    let value = format!("{:.2}", amount.abs());
    let (integer, decimal) = match value.split_once('.') {
        Some(parts) => parts,
        None => (value.as_str(), "00"),
    };
    format!("{}.{}", group_indian(integer), decimal)
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Signed, colored amount: `-₹150.50` in red for debits, `+₹…` in green
/// for credits
pub fn amount_cell(amount: f64) -> String {
    let (color, sign) = if amount < 0.0 { (RED, "-") } else { (GREEN, "+") };
    format!("{}{}\u{20b9}{}{}", color, sign, format_inr(amount), RESET)
}

/// Summary cards: income, spending, transaction count, and the statement
/// period and account number when the service reported them
pub fn summary_cards(result: &ExtractionResult) -> String {
    let mut out = String::new();
    out.push_str("📊 Statement Summary\n");
    out.push_str("   ─────────────────────────────────────────────\n");
    out.push_str(&format!(
        "   Income (credits):   {}\u{20b9}{}{}\n",
        GREEN,
        format_inr(result.summary.total_credits),
        RESET
    ));
    out.push_str(&format!(
        "   Spending (debits):  {}\u{20b9}{}{}\n",
        RED,
        format_inr(result.summary.total_debits),
        RESET
    ));
    out.push_str(&format!(
        "   Transactions:       {}\n",
        result.transactions.len()
    ));
    if let Some(period) = &result.summary.statement_period {
        out.push_str(&format!("   Period:             {}\n", period));
    }
    if let Some(account) = &result.summary.account_number {
        out.push_str(&format!("   Account:            {}\n", account));
    }
    out
}

/// The transaction table in document order, notes as a dimmed sub-line,
/// with a detected-row footer
pub fn transaction_table(transactions: &[Transaction]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "   {:<11} │ {:<30} │ {:<9} │ {:<12} │ {:>13}\n",
        "Date", "Description", "Category", "Txn ID", "Amount"
    ));
    out.push_str(
        "   ────────────┼────────────────────────────────┼───────────┼──────────────┼──────────────\n",
    );

    for tx in transactions {
        let category_cell = format!(
            "{}{:<9}{}",
            category_color(&tx.category),
            tx.category.as_str(),
            RESET
        );
        out.push_str(&format!(
            "   {:<11} │ {:<30} │ {} │ {:<12} │ {}\n",
            truncate(&tx.date, 11),
            truncate(&tx.description, 30),
            category_cell,
            truncate(&tx.transaction_id, 12),
            padded_amount(tx.amount, 13),
        ));
        if !tx.notes.is_empty() {
            out.push_str(&format!("   {}└ {}{}\n", DIM, tx.notes, RESET));
        }
    }

    out.push_str(&format!("\n   Detected {} rows\n", transactions.len()));
    out
}

/// What to show in place of the table when no statement has been processed
pub fn empty_state() -> String {
    let mut out = String::new();
    out.push_str("   ─────────────────────────────────────────────\n");
    out.push_str("   No Statement Processed\n");
    out.push_str("   Process a statement to see transactions here.\n");
    out.push_str("   ─────────────────────────────────────────────\n");
    out
}

/// Right-align a colored amount. The escape codes add no visible width, so
/// the padding is computed from the plain text.
fn padded_amount(amount: f64, width: usize) -> String {
    let visible = 2 + format_inr(amount).chars().count();
    let padding = width.saturating_sub(visible);
    format!("{}{}", " ".repeat(padding), amount_cell(amount))
}

fn category_color(category: &Category) -> &'static str {
    match category.as_str() {
        "Food" => "\x1b[33m",
        "Travel" => "\x1b[36m",
        "Shopping" => "\x1b[35m",
        "Bills" => "\x1b[34m",
        "Salary" => GREEN,
        "Transfer" => "\x1b[94m",
        _ => DIM,
    }
}
