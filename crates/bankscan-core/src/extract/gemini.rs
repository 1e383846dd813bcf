//! Gemini backend implementation
//!
//! Talks to the Gemini `generateContent` API with structured output enabled,
//! sending the statement file inline as base64 alongside the fixed extraction
//! contract.
//!
//! # Configuration
//!
//! Environment variables:
//! - `GEMINI_API_KEY`: API key (required)
//! - `GEMINI_MODEL`: Model name (default: gemini-3-flash-preview)
//! - `GEMINI_HOST`: API host override, mainly for tests
//!   (default: https://generativelanguage.googleapis.com)

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::ExtractionResult;

use super::contract::{response_schema, SYSTEM_INSTRUCTION, USER_PROMPT};
use super::decode::decode_extraction;
use super::ExtractionBackend;

/// Default API host
pub const DEFAULT_HOST: &str = "https://generativelanguage.googleapis.com";

/// Default extraction model
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Gemini backend
///
/// One `generateContent` call per statement. There is no retry or timeout
/// policy here: a failed call is reported once and the user re-runs.
#[derive(Clone)]
pub struct GeminiBackend {
    http_client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiBackend {
    /// Create a new Gemini backend
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Create a new instance with a different model
    ///
    /// Used for runtime model override (e.g. `--model` on the CLI)
    pub fn with_model(&self, model: &str) -> Self {
        Self {
            http_client: self.http_client.clone(),
            base_url: self.base_url.clone(),
            model: model.to_string(),
            api_key: self.api_key.clone(),
        }
    }

    /// Create from environment variables
    ///
    /// Required: `GEMINI_API_KEY`
    /// Optional: `GEMINI_MODEL` (default: gemini-3-flash-preview)
    /// Optional: `GEMINI_HOST` (default: https://generativelanguage.googleapis.com)
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY").ok()?;
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let host = std::env::var("GEMINI_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Some(Self::new(&host, &model, &api_key))
    }

    /// Make a generateContent request and return the concatenated text parts
    async fn generate_content(&self, file_data: &[u8], mime_type: &str) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(file_data);

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: mime_type.to_string(),
                            data: encoded,
                        },
                    },
                    Part::Text {
                        text: USER_PROMPT.to_string(),
                    },
                ],
            }],
            system_instruction: Content {
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Extraction(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let content_response: GenerateContentResponse = response.json().await?;

        let text: String = content_response
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| Error::Extraction("No candidates in Gemini response".into()))?;

        if text.is_empty() {
            return Err(Error::Extraction("Empty text in Gemini response".into()));
        }

        Ok(text)
    }
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

/// A content block (parts of one turn)
#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

/// A content part: inline file data or text
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

/// Inline base64 file payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Structured-output configuration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

/// Gemini generateContent response envelope
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl ExtractionBackend for GeminiBackend {
    async fn extract_statement(
        &self,
        file_data: &[u8],
        mime_type: &str,
    ) -> Result<ExtractionResult> {
        let response = self.generate_content(file_data, mime_type).await?;
        debug!("Gemini extraction response: {}", response);

        decode_extraction(&response)
    }

    async fn health_check(&self) -> bool {
        if let Ok(resp) = self
            .http_client
            .get(format!("{}/v1beta/models", self.base_url))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
        {
            return resp.status().is_success();
        }
        false
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_new() {
        let backend = GeminiBackend::new(DEFAULT_HOST, "gemini-3-flash-preview", "key-123");
        assert_eq!(backend.model(), "gemini-3-flash-preview");
        assert_eq!(backend.host(), "https://generativelanguage.googleapis.com");
    }

    #[test]
    fn test_backend_new_trims_trailing_slash() {
        let backend = GeminiBackend::new("http://localhost:8080/", "gemini-3-flash-preview", "k");
        assert_eq!(backend.host(), "http://localhost:8080");
    }

    #[test]
    fn test_backend_with_model() {
        let backend = GeminiBackend::new(DEFAULT_HOST, DEFAULT_MODEL, "key-123");
        let pro = backend.with_model("gemini-3-pro");
        assert_eq!(pro.model(), "gemini-3-pro");
        assert_eq!(pro.host(), backend.host());
    }

    #[test]
    fn test_backend_from_env_missing_key() {
        std::env::remove_var("GEMINI_API_KEY");
        let result = GeminiBackend::from_env();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let backend = GeminiBackend::new("http://localhost:1", DEFAULT_MODEL, "k");
        let healthy = backend.health_check().await;
        assert!(!healthy);
    }

    #[test]
    fn test_generate_content_request_serialization() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type: "application/pdf".to_string(),
                            data: "YWJj".to_string(),
                        },
                    },
                    Part::Text {
                        text: USER_PROMPT.to_string(),
                    },
                ],
            }],
            system_instruction: Content {
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["contents"][0]["parts"][0]["inlineData"]["mimeType"],
            "application/pdf"
        );
        assert_eq!(json["contents"][0]["parts"][0]["inlineData"]["data"], "YWJj");
        assert_eq!(json["contents"][0]["parts"][1]["text"], USER_PROMPT);
        assert_eq!(
            json["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert!(json["generationConfig"]["responseSchema"]["properties"]["transactions"]
            .is_object());
        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("financial auditor"));
    }

    #[test]
    fn test_generate_content_response_deserialization() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "{\"transactions\": []"}, {"text": ", \"summary\": {}}"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }],
            "modelVersion": "gemini-3-flash-preview"
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.candidates.len(), 1);
        let text: String = response.candidates[0]
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.clone())
            .collect();
        assert_eq!(text, "{\"transactions\": [], \"summary\": {}}");
    }

    #[test]
    fn test_empty_candidates_deserialization() {
        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(response.candidates.is_empty());
    }
}
