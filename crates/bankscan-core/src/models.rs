//! Domain models for bankscan

use serde::{Deserialize, Serialize};

/// Spending category assigned by the extraction service.
///
/// The service is asked to stay within the closed set, but anything else it
/// returns is preserved as `Unknown` rather than rejected. Display folds
/// `Unknown` into `Others`; export keeps the raw label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Travel,
    Shopping,
    Bills,
    Salary,
    Transfer,
    Others,
    /// Any label outside the closed set, carrying the service's raw value
    Unknown(String),
}

impl Category {
    /// Display label. Unknown values fold into Others.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Bills => "Bills",
            Self::Salary => "Salary",
            Self::Transfer => "Transfer",
            Self::Others | Self::Unknown(_) => "Others",
        }
    }

    /// The label as the service reported it. Export uses this so unknown
    /// values survive round-trips.
    pub fn raw(&self) -> &str {
        match self {
            Self::Unknown(raw) => raw,
            _ => self.as_str(),
        }
    }

    /// Map a service-reported label into the category set. Never fails;
    /// unrecognized labels become `Unknown`.
    pub fn from_raw(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "food" => Self::Food,
            "travel" => Self::Travel,
            "shopping" => Self::Shopping,
            "bills" => Self::Bills,
            "salary" => Self::Salary,
            "transfer" => Self::Transfer,
            "others" => Self::Others,
            _ => Self::Unknown(s.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        Category::from_raw(&s)
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.raw().to_string()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction extracted from a bank statement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Client-assigned position in the statement (1-based). The service
    /// never supplies ids; rendering identity is positional.
    pub id: u32,
    /// Date as printed on the statement, expected YYYY-MM-DD. Carried
    /// opaquely and never validated or reformatted.
    pub date: String,
    /// External reference number, or the literal "NA" when the statement
    /// shows none.
    pub transaction_id: String,
    pub description: String,
    /// Negative = debit/expense, positive = credit/income
    pub amount: f64,
    pub category: Category,
    /// May be empty
    pub notes: String,
}

/// Statement-level totals reported by the document itself.
///
/// These come from the statement's own summary section, not from adding up
/// the itemized rows, so they may legitimately disagree with the row sum.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Total credited to the account, as a magnitude
    #[serde(default)]
    pub total_credits: f64,
    /// Total debited from the account, as a magnitude
    #[serde(default)]
    pub total_debits: f64,
    /// e.g. "01 Jan 2024 - 31 Jan 2024"
    pub statement_period: Option<String>,
    /// Masked or full account number as printed
    pub account_number: Option<String>,
}

/// The full output of one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Document order, never re-sorted
    pub transactions: Vec<Transaction>,
    pub summary: StatementSummary,
}
