//! The fixed extraction contract sent with every request.
//!
//! The system instruction, user prompt, and structured-output schema are
//! deliberately constant: extraction quality lives here, and changing any of
//! them changes what every statement run returns. The schema mirrors what the
//! response decoder in [`super::decode`] is willing to accept.

use serde_json::{json, Value};

/// System instruction defining the extraction policy.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert financial auditor and OCR specialist.
Your task is to extract structured transaction data from bank statement images or PDFs.

GUIDELINES:
1. Extract every transaction listed in the document.
2. Clean descriptions to be readable (remove redundant codes if possible but keep essential merchant names).
3. Identify Amounts clearly: Negative for Debits/Expenses, Positive for Credits/Income.
4. Auto-categorize each transaction into one of these: Food, Travel, Shopping, Bills, Salary, Transfer, Others.
5. If a Transaction ID is not explicitly present, use 'NA'.
6. Combine multi-line descriptions into a single clean string.
7. Ignore headers, footers, and summary tables in the final transactions list, but use them for the summary object.
8. Return strictly valid JSON.";

/// The user-turn prompt accompanying the statement payload.
pub const USER_PROMPT: &str = "Extract the transaction data from this bank statement as JSON.";

/// Category labels the schema constrains the service to.
pub const CATEGORY_LABELS: [&str; 7] = [
    "Food",
    "Travel",
    "Shopping",
    "Bills",
    "Salary",
    "Transfer",
    "Others",
];

/// Structured-output schema for the generateContent request.
///
/// Per-transaction `date`, `description`, `amount`, and `category` are
/// required; `transactionId` and `notes` are optional and normalized by the
/// decoder. `summary` figures come from the document's own summary sections.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "transactions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "date": { "type": "STRING", "description": "ISO format date YYYY-MM-DD" },
                        "transactionId": { "type": "STRING" },
                        "description": { "type": "STRING" },
                        "amount": { "type": "NUMBER", "description": "Positive for credit, negative for debit" },
                        "category": { "type": "STRING", "enum": CATEGORY_LABELS },
                        "notes": { "type": "STRING" }
                    },
                    "required": ["date", "description", "amount", "category"]
                }
            },
            "summary": {
                "type": "OBJECT",
                "properties": {
                    "totalCredits": { "type": "NUMBER" },
                    "totalDebits": { "type": "NUMBER" },
                    "statementPeriod": { "type": "STRING" },
                    "accountNumber": { "type": "STRING" }
                }
            }
        },
        "required": ["transactions", "summary"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_requires_core_transaction_fields() {
        let schema = response_schema();
        let required = schema["properties"]["transactions"]["items"]["required"]
            .as_array()
            .unwrap();
        for field in ["date", "description", "amount", "category"] {
            assert!(required.iter().any(|v| v == field), "missing {}", field);
        }
        // transactionId and notes stay optional; the decoder fills them in
        assert!(!required.iter().any(|v| v == "transactionId"));
        assert!(!required.iter().any(|v| v == "notes"));
    }

    #[test]
    fn test_schema_constrains_category_to_closed_set() {
        let schema = response_schema();
        let labels = schema["properties"]["transactions"]["items"]["properties"]["category"]
            ["enum"]
            .as_array()
            .unwrap();
        assert_eq!(labels.len(), CATEGORY_LABELS.len());
        assert!(labels.iter().any(|v| v == "Salary"));
    }

    #[test]
    fn test_system_instruction_states_policy() {
        assert!(SYSTEM_INSTRUCTION.contains("Negative for Debits"));
        assert!(SYSTEM_INSTRUCTION.contains("use 'NA'"));
        assert!(SYSTEM_INSTRUCTION.contains("strictly valid JSON"));
    }
}
