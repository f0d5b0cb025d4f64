//! Google Gemini narrator over the Generative Language REST API.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::NarrativeError;
use crate::{NarrationRequest, Narrator};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// The blocking HTTP client is built per call, on the caller's thread, so the
/// narrator itself can be created and dropped inside an async runtime.
#[derive(Debug, Clone)]
pub struct GeminiNarrator {
    token: Option<String>,
    base_url: String,
    default_model: String,
}

impl GeminiNarrator {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Reads `GEMINI_TOKEN` and `GEMINI_MODEL`. A missing token is reported on
    /// each narration rather than here.
    pub fn from_env() -> Self {
        let mut narrator = Self::new(std::env::var("GEMINI_TOKEN").ok());
        if let Ok(model) = std::env::var("GEMINI_MODEL")
            && !model.is_empty()
        {
            narrator.default_model = model;
        }
        narrator
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    fn joined_text(self) -> String {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

impl Narrator for GeminiNarrator {
    fn narrate(&self, request: &NarrationRequest<'_>) -> Result<String, NarrativeError> {
        let token = self.token.as_deref().ok_or(NarrativeError::MissingToken)?;
        let model = request
            .options
            .model
            .as_deref()
            .unwrap_or(&self.default_model);

        let body = json!({
            "contents": [{ "parts": [{ "text": request.prompt }] }],
            "generationConfig": { "temperature": request.options.temperature },
        });

        debug!(model = %model, prompt_len = request.prompt.len(), "calling gemini");
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        let response = client
            .post(self.endpoint(model))
            .header(API_KEY_HEADER, token)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(status = status.as_u16(), "gemini request failed");
            return Err(NarrativeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json()?;
        if parsed.candidates.is_empty() {
            return Err(NarrativeError::EmptyResponse);
        }
        Ok(parsed.joined_text())
    }

    fn name(&self) -> &str {
        "GeminiNarrator"
    }
}
