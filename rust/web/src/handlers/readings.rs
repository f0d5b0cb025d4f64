use crate::errors::{ApiError, IntoErrorResponse};
use arcana_engine::{DrawError, SeedInput};
use arcana_oracle::{ImageExt, NarrationOptions, Oracle, ReadingRequest, DEFAULT_TEMPERATURE};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::{self, Response};
use warp::Reply;

/// Body of `POST /v1/readings`.
///
/// `num_cards` and `seed` are loosely typed so that negative counts and
/// non-integer seeds surface as `invalid_parameter` rather than as a parse
/// failure of the whole body.
#[derive(Debug, Deserialize)]
pub struct CreateReadingRequest {
    pub num_cards: i64,
    #[serde(default)]
    pub spread: Option<String>,
    #[serde(default)]
    pub seed: serde_json::Value,
    #[serde(default = "default_orientation_prob")]
    pub orientation_prob: f64,
    #[serde(default)]
    pub deck_type: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub explain_with_llm: bool,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default)]
    pub image_ext: Option<String>,
}

fn default_orientation_prob() -> f64 {
    arcana_engine::draw::DEFAULT_ORIENTATION_PROB
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

impl CreateReadingRequest {
    pub fn into_reading_request(self) -> Result<ReadingRequest, DrawError> {
        let num_cards = usize::try_from(self.num_cards).map_err(|_| {
            DrawError::InvalidParameter(format!(
                "num_cards must be between 1 and 78, got {}",
                self.num_cards
            ))
        })?;
        let image_ext = match self.image_ext.as_deref() {
            Some(ext) => ImageExt::from_str(ext).map_err(DrawError::InvalidParameter)?,
            None => ImageExt::default(),
        };

        let mut req = ReadingRequest::new(num_cards);
        req.spread = self.spread;
        req.seed = SeedInput::from_json(&self.seed)?;
        req.orientation_prob = self.orientation_prob;
        if let Some(deck_type) = self.deck_type {
            req.deck_type = deck_type;
        }
        req.question = self.question;
        req.explain_with_llm = self.explain_with_llm;
        req.narration = NarrationOptions {
            model: self.model,
            temperature: self.temperature,
        };
        req.image_ext = image_ext;
        Ok(req)
    }
}

/// Creates a reading.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/v1/readings`
///
/// # Request Format
/// ```json
/// {
///   "num_cards": 3,
///   "spread": "three_card",      // Optional
///   "seed": "demo-seed",         // Optional: integer or text
///   "orientation_prob": 0.5,     // Optional
///   "question": "What next?",    // Optional
///   "explain_with_llm": false    // Optional
/// }
/// ```
///
/// # Response Format
/// - **Success (200 OK)**: the reading (`meta`, `cards`, `llm`)
/// - **Error (4xx/5xx)**: JSON error response with error code and message
///
/// # Error Cases
/// - `invalid_request` (400): body is not valid JSON for this shape
/// - `invalid_parameter` (400): count, probability, seed, deck or image extension rejected
/// - `spread_not_found` (404)
/// - `spread_card_count_mismatch` (422)
/// - `internal_error` (500)
///
/// Narration failures are not errors: they are reported in `llm.error` next to
/// the cards. Narrated readings run on the blocking pool because narrators may
/// perform network I/O.
pub async fn create_reading(oracle: Arc<Oracle>, body: Bytes) -> Response {
    match perform(oracle, body).await {
        Ok(response) => response,
        Err(err) => err.into_http_response(),
    }
}

async fn perform(oracle: Arc<Oracle>, body: Bytes) -> Result<Response, ApiError> {
    let request: CreateReadingRequest =
        serde_json::from_slice(&body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    let req = request.into_reading_request()?;

    let reading = if req.explain_with_llm {
        tokio::task::spawn_blocking(move || oracle.perform_reading(&req))
            .await
            .map_err(|e| ApiError::TaskFailed(e.to_string()))??
    } else {
        oracle.perform_reading(&req)?
    };

    Ok(reply::with_status(reply::json(&reading), StatusCode::OK).into_response())
}
