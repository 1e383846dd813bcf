//! Pluggable statement extraction abstraction
//!
//! # Architecture
//!
//! - `ExtractionBackend` trait: defines the interface for extraction operations
//! - `ExtractionClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - Backend implementations: `GeminiBackend`, `MockBackend`
//! - `contract`: the fixed system instruction, user prompt, and response schema
//! - `decode`: the strict boundary that turns raw response text into the domain model
//!
//! # Usage
//!
//! ```rust,ignore
//! // Create from environment
//! let client = ExtractionClient::from_env();
//!
//! // Run an extraction
//! if let Some(ref client) = client {
//!     let result = client.extract_statement(&bytes, "application/pdf").await?;
//!     println!("{} transactions", result.transactions.len());
//! }
//! ```
//!
//! # Configuration
//!
//! Environment variables:
//! - `BANKSCAN_BACKEND`: Backend to use (gemini, mock). Default: gemini
//! - `GEMINI_API_KEY`: API key (required for gemini backend)
//! - `GEMINI_MODEL`: Model name (default: gemini-3-flash-preview)
//! - `GEMINI_HOST`: API host override, mainly for tests

pub mod contract;
pub mod decode;
mod gemini;
mod mock;

pub use decode::decode_extraction;
pub use gemini::{GeminiBackend, DEFAULT_HOST, DEFAULT_MODEL};
pub use mock::MockBackend;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ExtractionResult;

/// Trait defining the interface for statement extraction backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait ExtractionBackend: Send + Sync {
    /// Extract structured transaction data from a statement file.
    ///
    /// One attempt, no retry. `mime_type` must be one of the statement types
    /// the intake layer accepts (PDF, PNG, JPEG).
    async fn extract_statement(
        &self,
        file_data: &[u8],
        mime_type: &str,
    ) -> Result<ExtractionResult>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for diagnostics)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete extraction client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum ExtractionClient {
    /// Gemini backend (generateContent API)
    Gemini(GeminiBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl ExtractionClient {
    /// Create an extraction client from environment variables
    ///
    /// Checks `BANKSCAN_BACKEND` to determine which backend to use:
    /// - `gemini` (default): Uses GEMINI_API_KEY, GEMINI_MODEL, GEMINI_HOST
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None if the required environment variables are not set.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("BANKSCAN_BACKEND").unwrap_or_else(|_| "gemini".to_string());

        match backend.to_lowercase().as_str() {
            "gemini" => GeminiBackend::from_env().map(ExtractionClient::Gemini),
            "mock" => Some(ExtractionClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown BANKSCAN_BACKEND, falling back to gemini");
                GeminiBackend::from_env().map(ExtractionClient::Gemini)
            }
        }
    }

    /// Create a Gemini backend directly
    pub fn gemini(host: &str, model: &str, api_key: &str) -> Self {
        ExtractionClient::Gemini(GeminiBackend::new(host, model, api_key))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        ExtractionClient::Mock(MockBackend::new())
    }

    /// Create a new instance with a different model
    ///
    /// Used for runtime model override (e.g. `--model` on the CLI)
    pub fn with_model(&self, model: &str) -> Self {
        match self {
            ExtractionClient::Gemini(b) => ExtractionClient::Gemini(b.with_model(model)),
            ExtractionClient::Mock(b) => ExtractionClient::Mock(b.with_model(model)),
        }
    }
}

// Implement ExtractionBackend for ExtractionClient by delegating to the inner backend
#[async_trait]
impl ExtractionBackend for ExtractionClient {
    async fn extract_statement(
        &self,
        file_data: &[u8],
        mime_type: &str,
    ) -> Result<ExtractionResult> {
        match self {
            ExtractionClient::Gemini(b) => b.extract_statement(file_data, mime_type).await,
            ExtractionClient::Mock(b) => b.extract_statement(file_data, mime_type).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            ExtractionClient::Gemini(b) => b.health_check().await,
            ExtractionClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            ExtractionClient::Gemini(b) => b.model(),
            ExtractionClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            ExtractionClient::Gemini(b) => b.host(),
            ExtractionClient::Mock(b) => b.host(),
        }
    }
}
