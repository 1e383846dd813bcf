//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `check` - Service configuration and availability check
//! - `contract` - Extraction contract inspection
//! - `extract` - Statement extraction workflow (intake → table → CSV)

pub mod check;
pub mod contract;
pub mod extract;

// Re-export command functions for main.rs
pub use check::*;
pub use contract::*;
pub use extract::*;

/// Truncate a string to a maximum length, adding "..." if truncated.
/// Length is counted in chars, not bytes; statement text is routinely
/// multibyte.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
