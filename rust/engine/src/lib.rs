//! # arcana-engine: Tarot Draw Engine Core
//!
//! Draws cards from the 78-card Rider-Waite-Smith deck, gives each card an
//! upright or reversed orientation, and binds the drawn cards to the positions
//! of a named spread. Seeded draws are reproducible bit-for-bit.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card definitions and the read-only card registry
//! - [`spreads`] - Spread layouts and the spread registry
//! - [`seed`] - Seed input and normalization (integer or hashed text)
//! - [`rng`] - ChaCha20-backed random source scoped to one draw
//! - [`deck`] - Deck construction and the Fisher-Yates shuffle
//! - [`draw`] - Validation, orchestration and the draw result types
//! - [`errors`] - Error types for draws and registry construction
//!
//! ## Quick Start
//!
//! ```rust
//! use arcana_engine::draw::{draw, DrawRequest, Orientation};
//!
//! let result = draw(&DrawRequest::new(5).spread("five_card").seed(2024u64)).unwrap();
//! assert_eq!(result.cards.len(), 5);
//! assert_eq!(result.cards[0].position.as_deref(), Some("issue"));
//!
//! // probability 1.0 reverses every card
//! let all_reversed = draw(&DrawRequest::new(10).orientation_prob(1.0)).unwrap();
//! assert!(all_reversed
//!     .cards
//!     .iter()
//!     .all(|c| c.orientation == Orientation::Reversed));
//! ```
//!
//! ## Errors
//!
//! ```rust
//! use arcana_engine::draw::{draw, DrawRequest};
//! use arcana_engine::errors::DrawError;
//!
//! let err = draw(&DrawRequest::new(5).spread("three_card")).unwrap_err();
//! assert!(matches!(err, DrawError::SpreadCardCountMismatch { expected: 3, actual: 5, .. }));
//! ```

pub mod cards;
pub mod deck;
pub mod draw;
pub mod errors;
pub mod rng;
pub mod seed;
pub mod spreads;

pub use cards::{CardDefinition, CardRegistry, Suit, DECK_SIZE};
pub use deck::DeckType;
pub use draw::{draw, DrawEngine, DrawRequest, DrawResult, DrawnCard, Orientation};
pub use errors::{DrawError, RegistryError};
pub use seed::SeedInput;
pub use spreads::{SpreadDefinition, SpreadRegistry};
