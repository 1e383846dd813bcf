//! Test utilities for bankscan-core
//!
//! This module provides a mock extraction server speaking the Gemini
//! generateContent surface, for development and integration tests.

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Mock extraction server for testing and development.
///
/// The canned response is keyed off marker bytes in the uploaded statement:
/// - `MALFORMED` returns prose instead of JSON
/// - `HTTP-ERROR` returns a 500
/// - `NO-TOTALS` returns a statement whose summary carries no totals
/// - anything else returns the single-transaction coffee shop statement
pub struct MockExtractionServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockExtractionServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/v1beta/models", get(handle_models))
            .route("/v1beta/models/:model_call", post(handle_generate_content));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockExtractionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// The statement every unmarked upload extracts to
const COFFEE_SHOP_STATEMENT: &str = r#"{
    "transactions": [
        {"date": "2024-01-05", "description": "Coffee Shop", "amount": -150.5, "category": "Food", "transactionId": "", "notes": ""}
    ],
    "summary": {"totalCredits": 0, "totalDebits": 150.5}
}"#;

/// A statement whose summary section carries no totals
const NO_TOTALS_STATEMENT: &str = r#"{
    "transactions": [
        {"date": "2024-02-01", "description": "Metro Card Top-up", "amount": -500, "category": "Travel", "transactionId": "MTR-22", "notes": "monthly pass"}
    ],
    "summary": {"statementPeriod": "01 Feb 2024 - 29 Feb 2024"}
}"#;

/// Models listing endpoint (health check)
async fn handle_models() -> Json<serde_json::Value> {
    Json(json!({
        "models": [
            {"name": "models/gemini-3-flash-preview"}
        ]
    }))
}

/// generateContent endpoint
async fn handle_generate_content(Json(request): Json<GenerateContentRequest>) -> Response {
    let marker = uploaded_marker(&request);

    if marker.contains("HTTP-ERROR") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "mock extraction service unavailable",
        )
            .into_response();
    }

    let text = if marker.contains("MALFORMED") {
        "Sorry, I could not read any transactions from this statement."
    } else if marker.contains("NO-TOTALS") {
        NO_TOTALS_STATEMENT
    } else {
        COFFEE_SHOP_STATEMENT
    };

    Json(json!({
        "candidates": [
            {"content": {"parts": [{"text": text}]}}
        ]
    }))
    .into_response()
}

/// Decode the uploaded statement bytes from the request's inline data part
fn uploaded_marker(request: &GenerateContentRequest) -> String {
    let encoded = request
        .contents
        .iter()
        .flat_map(|content| content.parts.iter())
        .find_map(|part| part.inline_data.as_ref().map(|data| data.data.as_str()))
        .unwrap_or("");

    let bytes = STANDARD.decode(encoded).unwrap_or_default();
    String::from_utf8_lossy(&bytes).to_string()
}

// Request types for the mock server

#[derive(Debug, Deserialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Deserialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart {
    #[serde(default)]
    inline_data: Option<RequestInlineData>,
    #[serde(default)]
    #[allow(dead_code)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestInlineData {
    #[allow(dead_code)]
    mime_type: String,
    data: String,
}
