//! Gemini `generateContent` client.
//!
//! # Responsibility
//! - Implement [`TextGenerator`] over the Google Generative Language API.
//! - Read credentials and model selection from the environment.
//!
//! # Invariants
//! - Requests are synchronous; the caller's request model is single-threaded
//!   and blocking by design.
//! - Only the non-streaming endpoint is used; reply text is the first
//!   candidate's parts concatenated.

use super::{ChatMessage, GenerateError, Role, TextGenerator};
use log::{debug, warn};
use serde::Deserialize;
use std::time::Duration;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variables checked for the API credential, in order.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_GENERATIVE_AI_API_KEY"];
/// Environment variable overriding the model name.
const MODEL_VAR: &str = "GEMINI_MODEL";

/// Blocking Gemini client.
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

impl GeminiClient {
    /// Creates a client with an explicit key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            api_key: api_key.into(),
            model: model.into(),
            client,
        }
    }

    /// Creates a client from the environment.
    ///
    /// # Errors
    /// - `GenerateError::MissingApiKey` when no credential variable is set.
    pub fn from_env() -> Result<Self, GenerateError> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok())
            .filter(|value| !value.trim().is_empty())
            .ok_or(GenerateError::MissingApiKey)?;
        let model = std::env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Ok(Self::new(api_key, model))
    }

    /// Active model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request_body(system: &str, messages: &[ChatMessage]) -> serde_json::Value {
        let contents: Vec<serde_json::Value> = messages
            .iter()
            .map(|message| {
                let role = match message.role {
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                serde_json::json!({
                    "role": role,
                    "parts": [{ "text": message.content }],
                })
            })
            .collect();

        serde_json::json!({
            "system_instruction": { "parts": [{ "text": system }] },
            "contents": contents,
        })
    }

    fn endpoint(&self) -> String {
        format!("{GEMINI_API_BASE}/models/{}:generateContent", self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, system: &str, messages: &[ChatMessage]) -> Result<String, GenerateError> {
        let body = Self::build_request_body(system, messages);
        debug!(
            "event=generate_request module=llm model={} turns={}",
            self.model,
            messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|err| GenerateError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .ok()
                .and_then(|envelope| envelope.error)
                .and_then(|error| error.message)
                .unwrap_or(text);
            warn!(
                "event=generate_failed module=llm status={} model={}",
                status.as_u16(),
                self.model
            );
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: GenerateContentResponse = response
            .json()
            .map_err(|err| GenerateError::Transport(err.to_string()))?;

        let text: String = decoded
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerateError::EmptyReply);
        }
        Ok(text)
    }
}
