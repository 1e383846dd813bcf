//! Strict decode boundary for extraction responses.
//!
//! The service is asked for schema-conforming JSON, but everything it sends
//! is still treated as untrusted: the payload is located, deserialized, and
//! validated here, and every violation surfaces as a typed
//! [`Error::MalformedResponse`] instead of leaking partially-populated data
//! into the session.

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Category, ExtractionResult, StatementSummary, Transaction};

/// Raw wire transaction as the service reports it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTransaction {
    date: String,
    #[serde(default)]
    transaction_id: Option<String>,
    description: String,
    amount: f64,
    category: String,
    #[serde(default)]
    notes: Option<String>,
}

/// Raw wire summary; totals default to zero when the document has none
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSummary {
    #[serde(default)]
    total_credits: f64,
    #[serde(default)]
    total_debits: f64,
    statement_period: Option<String>,
    account_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResult {
    transactions: Vec<WireTransaction>,
    #[serde(default)]
    summary: WireSummary,
}

/// Decode an extraction response into the domain model.
///
/// Locates the JSON object in the raw text (models sometimes wrap the payload
/// in prose), enforces the required per-transaction fields, normalizes absent
/// or empty transaction ids to "NA", and assigns 1-based positional ids.
/// Unknown categories are carried as [`Category::Unknown`], never rejected.
pub fn decode_extraction(response: &str) -> Result<ExtractionResult> {
    let response = response.trim();

    // Look for JSON object
    let start = response.find('{');
    let end = response.rfind('}');

    let wire: WireResult = match (start, end) {
        (Some(s), Some(e)) if s < e => {
            let json_str = &response[s..=e];
            serde_json::from_str(json_str).map_err(|e| {
                Error::MalformedResponse(format!(
                    "Invalid extraction JSON: {} | Raw: {}",
                    e,
                    truncate_raw(json_str)
                ))
            })?
        }
        _ => {
            return Err(Error::MalformedResponse(format!(
                "No JSON found in extraction response | Raw: {}",
                truncate_raw(response)
            )))
        }
    };

    let mut transactions = Vec::with_capacity(wire.transactions.len());
    for (idx, tx) in wire.transactions.into_iter().enumerate() {
        if tx.date.trim().is_empty() {
            return Err(Error::MalformedResponse(format!(
                "Transaction {} has an empty date",
                idx + 1
            )));
        }
        if tx.description.trim().is_empty() {
            return Err(Error::MalformedResponse(format!(
                "Transaction {} has an empty description",
                idx + 1
            )));
        }

        // The service is told to use 'NA' for absent ids, but statements
        // without reference numbers still come back empty often enough
        let transaction_id = match tx.transaction_id {
            Some(id) if !id.trim().is_empty() => id,
            _ => "NA".to_string(),
        };

        transactions.push(Transaction {
            id: (idx + 1) as u32,
            date: tx.date,
            transaction_id,
            description: tx.description,
            amount: tx.amount,
            category: Category::from_raw(&tx.category),
            notes: tx.notes.unwrap_or_default(),
        });
    }

    Ok(ExtractionResult {
        transactions,
        summary: StatementSummary {
            total_credits: wire.summary.total_credits,
            total_debits: wire.summary.total_debits,
            statement_period: wire.summary.statement_period,
            account_number: wire.summary.account_number,
        },
    })
}

// Truncate long responses for the error message; clipped in chars, not
// bytes, since service text can carry multibyte currency symbols
fn truncate_raw(s: &str) -> String {
    if s.chars().count() > 200 {
        let cut: String = s.chars().take(200).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
