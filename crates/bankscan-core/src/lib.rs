//! Bankscan Core Library
//!
//! Shared functionality for the bankscan statement extraction tool:
//! - AI extraction backends (Gemini, mock) behind one trait
//! - The fixed extraction contract (system instruction + response schema)
//! - Strict decoding of the service's JSON into typed transactions
//! - CSV export in the fixed spreadsheet-import shape
//! - Upload session state machine with stale-request guarding
//! - Statement file intake (type restriction, size guidance)

pub mod error;
pub mod export;
pub mod extract;
pub mod intake;
pub mod models;
pub mod session;

/// Test utilities including the mock extraction server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use export::{export_filename, save_csv, to_csv, CSV_HEADER, DEFAULT_EXPORT_FILENAME};
pub use extract::{
    decode_extraction, ExtractionBackend, ExtractionClient, GeminiBackend, MockBackend,
    DEFAULT_HOST, DEFAULT_MODEL,
};
pub use intake::{media_type_for, read_statement, select_statement, SIZE_GUIDANCE_BYTES};
pub use models::{Category, ExtractionResult, StatementSummary, Transaction};
pub use session::{Phase, RequestToken, UploadSession, EXTRACTION_FAILED_MESSAGE};
