use thiserror::Error;

/// Failure of a narrative collaborator. These never abort a reading; they are
/// reported next to the drawn cards.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("Missing GEMINI_TOKEN in environment")]
    MissingToken,
    #[error("Unknown narrator: {0}")]
    UnknownNarrator(String),
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Narrator returned no text")]
    EmptyResponse,
}

/// Request URLs are dropped so endpoints and credentials never reach a report.
impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        NarrativeError::Http(err.without_url())
    }
}

impl NarrativeError {
    pub fn kind(&self) -> &'static str {
        match self {
            NarrativeError::MissingToken => "MissingToken",
            NarrativeError::UnknownNarrator(_) => "UnknownNarrator",
            NarrativeError::Http(_) => "HttpError",
            NarrativeError::Api { .. } => "ApiError",
            NarrativeError::EmptyResponse => "EmptyResponse",
        }
    }

    /// `"<kind>: <message>"`, the shape reported in `llm.error`.
    pub fn report(&self) -> String {
        format!("{}: {}", self.kind(), self)
    }
}
