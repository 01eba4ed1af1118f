//! Client for the Google Generative Language `generateContent` API.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{AdvisorError, TextGenerator};
use crate::domain::{Config, Status};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// A [`TextGenerator`] backed by a Gemini model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Creates a client for the model and endpoint in `config`.
    ///
    /// A missing key is not an error here; requests made without one fail
    /// with [`AdvisorError::MissingApiKey`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config, api_key: Option<String>) -> Result<Self, AdvisorError> {
        let http = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    /// Creates a client, reading the key from [`API_KEY_VAR`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_env(config: &Config) -> Result<Self, AdvisorError> {
        Self::new(config, std::env::var(API_KEY_VAR).ok())
    }

    /// The URL requests are posted to.
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, AdvisorError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::MissingApiKey)?;

        tracing::debug!("Requesting assessment from {}", self.model);
        let response: GenerateResponse = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(prompt))
            .send()?
            .error_for_status()?
            .json()?;

        response.text().ok_or(AdvisorError::EmptyReply)
    }
}

/// The request payload, asking for JSON constrained to the assessment shape.
#[must_use]
pub fn request_body(prompt: &str) -> Value {
    let statuses: Vec<_> = Status::VARIANTS.iter().map(|s| s.as_str()).collect();

    json!({
        "contents": [
            { "role": "user", "parts": [{ "text": prompt }] }
        ],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "status": { "type": "STRING", "enum": statuses },
                    "message": { "type": "STRING" },
                    "recommendation": { "type": "STRING" }
                },
                "required": ["status", "message", "recommendation"]
            }
        }
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// The concatenated text of the first candidate, if it has any.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}
