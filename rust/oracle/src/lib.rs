//! # arcana-oracle: Readings Around the Draw Engine
//!
//! Turns a raw draw into a reading: attaches card image paths and, when asked,
//! produces narrative commentary through a pluggable [`Narrator`].
//!
//! ## Core Components
//!
//! - [`Oracle`] - Draw + image paths + optional narration
//! - [`Narrator`] - Trait for narrative collaborators
//! - [`template`] - Offline, deterministic narrator
//! - [`gemini`] - Google Gemini narrator
//! - [`create_narrator`] - Factory for narrators by name
//!
//! ## Quick Start
//!
//! ```rust
//! use arcana_oracle::{create_narrator, Oracle, ReadingRequest};
//!
//! let narrator = create_narrator("template").unwrap();
//! let oracle = Oracle::standard().with_narrator(narrator);
//!
//! let mut req = ReadingRequest::new(1);
//! req.spread = Some("single".into());
//! req.explain_with_llm = true;
//!
//! let reading = oracle.perform_reading(&req).unwrap();
//! assert!(reading.llm.response_text.is_some());
//! ```

pub mod assets;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod reading;
pub mod template;

pub use assets::{AssetResolver, ImageExt};
pub use error::NarrativeError;
pub use reading::{LlmOutcome, Oracle, Reading, ReadingCard, ReadingMeta, ReadingRequest};

use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Model selection and sampling options forwarded to a narrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationOptions {
    pub model: Option<String>,
    pub temperature: f64,
}

impl Default for NarrationOptions {
    fn default() -> Self {
        Self {
            model: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Everything a narrator may use: the rendered prompt plus the structured cards.
#[derive(Debug, Clone, Copy)]
pub struct NarrationRequest<'a> {
    pub prompt: &'a str,
    pub question: Option<&'a str>,
    pub cards: &'a [ReadingCard],
    pub options: &'a NarrationOptions,
}

/// Trait for narrative collaborators that comment on a reading.
///
/// # Example Implementation
///
/// ```rust
/// use arcana_oracle::{NarrationRequest, Narrator, NarrativeError};
///
/// struct Terse;
///
/// impl Narrator for Terse {
///     fn narrate(&self, request: &NarrationRequest<'_>) -> Result<String, NarrativeError> {
///         Ok(format!("{} cards. Trust yourself.", request.cards.len()))
///     }
///
///     fn name(&self) -> &str {
///         "Terse"
///     }
/// }
/// ```
pub trait Narrator: Send + Sync {
    /// Produce free-text commentary. Blocking; async callers should move this
    /// onto a blocking thread.
    fn narrate(&self, request: &NarrationRequest<'_>) -> Result<String, NarrativeError>;

    fn name(&self) -> &str;
}

/// Factory for narrators by kind.
///
/// - `"template"` - [`template::TemplateNarrator`]
/// - `"gemini"` - [`gemini::GeminiNarrator`] configured from `GEMINI_TOKEN` / `GEMINI_MODEL`
///
/// ```rust
/// use arcana_oracle::create_narrator;
///
/// assert_eq!(create_narrator("template").unwrap().name(), "TemplateNarrator");
/// assert!(create_narrator("oracle-bones").is_err());
/// ```
pub fn create_narrator(kind: &str) -> Result<Box<dyn Narrator>, NarrativeError> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "template" => Ok(Box::new(template::TemplateNarrator::new())),
        "gemini" => Ok(Box::new(gemini::GeminiNarrator::from_env())),
        other => Err(NarrativeError::UnknownNarrator(other.to_string())),
    }
}
