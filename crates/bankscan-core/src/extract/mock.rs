//! Mock backend for testing
//!
//! Returns a deterministic canned statement so the CLI and tests can run
//! without a Gemini API key or network access.

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::{Category, ExtractionResult, StatementSummary, Transaction};

use super::ExtractionBackend;

/// Mock extraction backend for testing
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// Whether extract_statement should fail
    pub failing: bool,
}

impl MockBackend {
    /// Create a new mock backend (healthy by default)
    pub fn new() -> Self {
        Self {
            healthy: true,
            failing: false,
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            failing: false,
        }
    }

    /// Create a mock backend whose extractions fail, for error-path tests
    pub fn failing() -> Self {
        Self {
            healthy: true,
            failing: true,
        }
    }

    /// Create a new instance with a different model (no-op for mock)
    pub fn with_model(&self, _model: &str) -> Self {
        self.clone()
    }

    /// The canned statement every successful mock extraction returns
    pub fn canned_result() -> ExtractionResult {
        ExtractionResult {
            transactions: vec![
                Transaction {
                    id: 1,
                    date: "2024-01-05".to_string(),
                    transaction_id: "NA".to_string(),
                    description: "Coffee Shop".to_string(),
                    amount: -150.5,
                    category: Category::Food,
                    notes: String::new(),
                },
                Transaction {
                    id: 2,
                    date: "2024-01-31".to_string(),
                    transaction_id: "SAL-JAN".to_string(),
                    description: "Acme Corp Salary".to_string(),
                    amount: 85000.0,
                    category: Category::Salary,
                    notes: "monthly payroll".to_string(),
                },
            ],
            summary: StatementSummary {
                total_credits: 85000.0,
                total_debits: 150.5,
                statement_period: Some("01 Jan 2024 - 31 Jan 2024".to_string()),
                account_number: Some("XXXX1234".to_string()),
            },
        }
    }
}

#[async_trait]
impl ExtractionBackend for MockBackend {
    async fn extract_statement(
        &self,
        _file_data: &[u8],
        _mime_type: &str,
    ) -> Result<ExtractionResult> {
        if self.failing {
            return Err(Error::Extraction("Mock extraction failure".into()));
        }
        Ok(Self::canned_result())
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
