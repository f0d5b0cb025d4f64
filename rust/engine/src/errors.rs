use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("Spread '{0}' is not registered")]
    SpreadNotFound(String),
    #[error("Spread '{spread}' expects {expected} cards, got {actual}")]
    SpreadCardCountMismatch {
        spread: String,
        expected: usize,
        actual: usize,
    },
    /// A drawn id did not resolve in the card registry. Never expected with a valid deck.
    #[error("Card '{0}' is missing from the registry")]
    UnknownCard(String),
}

impl DrawError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        DrawError::InvalidParameter(msg.into())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Card registry must hold {expected} cards, got {actual}")]
    CardCount { expected: usize, actual: usize },
    #[error("Duplicate card id: {0}")]
    DuplicateCard(String),
    #[error("Duplicate spread id: {0}")]
    DuplicateSpread(String),
    #[error("Spread '{0}' has no positions")]
    EmptySpread(String),
}
