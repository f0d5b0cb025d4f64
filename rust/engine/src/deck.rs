use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::CardRegistry;
use crate::errors::DrawError;
use crate::rng::DrawRng;

/// Supported deck types. Only the Rider-Waite-Smith deck is registered.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeckType {
    #[default]
    Rws,
}

impl DeckType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeckType::Rws => "rws",
        }
    }
}

impl fmt::Display for DeckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeckType {
    type Err = DrawError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rws" => Ok(DeckType::Rws),
            other => Err(DrawError::invalid(format!(
                "Unsupported deck_type: {}",
                other
            ))),
        }
    }
}

/// Ordered card ids of a deck, in registry order.
pub fn build_deck(registry: &CardRegistry, deck_type: DeckType) -> Vec<&str> {
    match deck_type {
        DeckType::Rws => registry.ids(),
    }
}

/// Fisher-Yates shuffle into a new vector; the input is left untouched.
///
/// Walks `i` from the last index down to 1 and swaps it with a `j` drawn
/// uniformly from `[0, i]`.
///
/// ```
/// use arcana_engine::deck::fisher_yates;
/// use arcana_engine::rng::DrawRng;
///
/// let items = vec![1, 2, 3, 4, 5];
/// let shuffled = fisher_yates(&items, &mut DrawRng::seeded(9));
/// assert_eq!(items, vec![1, 2, 3, 4, 5]);
///
/// let mut sorted = shuffled.clone();
/// sorted.sort();
/// assert_eq!(sorted, items);
/// ```
pub fn fisher_yates<T: Clone>(items: &[T], rng: &mut DrawRng) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.index_inclusive(i);
        out.swap(i, j);
    }
    out
}
