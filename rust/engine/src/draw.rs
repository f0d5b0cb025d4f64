use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::{CardRegistry, Suit};
use crate::deck::{build_deck, fisher_yates, DeckType};
use crate::errors::DrawError;
use crate::rng::DrawRng;
use crate::seed::SeedInput;
use crate::spreads::{SpreadDefinition, SpreadRegistry};

pub const DEFAULT_ORIENTATION_PROB: f64 = 0.5;

/// Upright or reversed state of a drawn card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Upright,
    Reversed,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Upright => "upright",
            Orientation::Reversed => "reversed",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a single draw.
///
/// ```
/// use arcana_engine::draw::DrawRequest;
///
/// let req = DrawRequest::new(3).spread("three_card").seed("demo-seed");
/// assert_eq!(req.count, 3);
/// assert_eq!(req.deck_type, "rws");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRequest {
    pub count: usize,
    #[serde(default)]
    pub spread: Option<String>,
    #[serde(default)]
    pub seed: SeedInput,
    #[serde(default = "default_orientation_prob")]
    pub orientation_prob: f64,
    #[serde(default = "default_deck_type")]
    pub deck_type: String,
}

fn default_orientation_prob() -> f64 {
    DEFAULT_ORIENTATION_PROB
}

fn default_deck_type() -> String {
    DeckType::default().as_str().to_string()
}

impl DrawRequest {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            spread: None,
            seed: SeedInput::Unseeded,
            orientation_prob: DEFAULT_ORIENTATION_PROB,
            deck_type: default_deck_type(),
        }
    }

    pub fn spread(mut self, id: impl Into<String>) -> Self {
        self.spread = Some(id.into());
        self
    }

    pub fn seed(mut self, seed: impl Into<SeedInput>) -> Self {
        self.seed = seed.into();
        self
    }

    pub fn orientation_prob(mut self, p: f64) -> Self {
        self.orientation_prob = p;
        self
    }

    pub fn deck_type(mut self, deck_type: impl Into<String>) -> Self {
        self.deck_type = deck_type.into();
        self
    }
}

/// A card as drawn: registry metadata copied at draw time plus draw state.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DrawnCard {
    pub card_id: String,
    pub card_name: String,
    pub suit: Suit,
    pub rank: String,
    pub orientation: Orientation,
    /// Spread position label; `None` when no spread was used
    pub position: Option<String>,
    /// Zero-based draw order
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawMeta {
    pub num_cards: usize,
    pub orientation_prob: f64,
}

/// Outcome of one draw. Serializes to the wire shape consumed by the API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    /// Normalized seed actually used, `None` for an unseeded draw
    pub seed: Option<u64>,
    pub spread: Option<String>,
    pub deck_type: DeckType,
    pub meta: DrawMeta,
    pub cards: Vec<DrawnCard>,
}

/// Draw engine bound to a pair of read-only registries.
///
/// # Examples
///
/// ```
/// use arcana_engine::draw::{DrawEngine, DrawRequest};
///
/// let engine = DrawEngine::standard();
/// let req = DrawRequest::new(3).spread("three_card").seed("demo-seed");
///
/// let first = engine.draw(&req).unwrap();
/// let again = engine.draw(&req).unwrap();
/// assert_eq!(first, again);
///
/// let positions: Vec<_> = first.cards.iter().map(|c| c.position.as_deref()).collect();
/// assert_eq!(positions, [Some("past"), Some("present"), Some("future")]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DrawEngine<'a> {
    cards: &'a CardRegistry,
    spreads: &'a SpreadRegistry,
}

impl DrawEngine<'static> {
    pub fn standard() -> Self {
        Self::new(CardRegistry::standard(), SpreadRegistry::standard())
    }
}

impl<'a> DrawEngine<'a> {
    pub fn new(cards: &'a CardRegistry, spreads: &'a SpreadRegistry) -> Self {
        Self { cards, spreads }
    }

    pub fn cards(&self) -> &'a CardRegistry {
        self.cards
    }

    pub fn spreads(&self) -> &'a SpreadRegistry {
        self.spreads
    }

    pub fn draw(&self, req: &DrawRequest) -> Result<DrawResult, DrawError> {
        let (deck_type, spread) = self.validate(req)?;

        let seed = req.seed.normalize();
        let mut rng = DrawRng::from_seed(seed);

        let deck = build_deck(self.cards, deck_type);
        let shuffled = fisher_yates(&deck, &mut rng);

        let mut cards = Vec::with_capacity(req.count);
        for (index, &card_id) in shuffled.iter().take(req.count).enumerate() {
            // one roll per card, in index order, right after the shuffle
            let orientation = if rng.unit() < req.orientation_prob {
                Orientation::Reversed
            } else {
                Orientation::Upright
            };
            let position = spread.map(|s| s.positions[index].clone());
            cards.push(self.resolve(card_id, orientation, position, index)?);
        }

        debug!(
            count = req.count,
            spread = spread.map(|s| s.id.as_str()).unwrap_or("-"),
            seeded = seed.is_some(),
            "cards drawn"
        );

        Ok(DrawResult {
            seed,
            spread: spread.map(|s| s.id.clone()),
            deck_type,
            meta: DrawMeta {
                num_cards: req.count,
                orientation_prob: req.orientation_prob,
            },
            cards,
        })
    }

    fn validate(
        &self,
        req: &DrawRequest,
    ) -> Result<(DeckType, Option<&'a SpreadDefinition>), DrawError> {
        if req.count == 0 {
            return Err(DrawError::invalid("num_cards must be a positive integer"));
        }
        if !(0.0..=1.0).contains(&req.orientation_prob) {
            return Err(DrawError::invalid(
                "orientation_prob must be within [0.0, 1.0]",
            ));
        }
        let deck_type: DeckType = req.deck_type.parse()?;
        let deck_size = self.cards.len();
        if req.count > deck_size {
            return Err(DrawError::invalid(format!(
                "num_cards cannot exceed deck size ({}); got {}",
                deck_size, req.count
            )));
        }

        let spread = match req.spread.as_deref() {
            Some(id) => {
                let def = self.spreads.get(id)?;
                if def.card_count() != req.count {
                    return Err(DrawError::SpreadCardCountMismatch {
                        spread: def.id.clone(),
                        expected: def.card_count(),
                        actual: req.count,
                    });
                }
                Some(def)
            }
            None => None,
        };
        Ok((deck_type, spread))
    }

    fn resolve(
        &self,
        card_id: &str,
        orientation: Orientation,
        position: Option<String>,
        index: usize,
    ) -> Result<DrawnCard, DrawError> {
        let def = self
            .cards
            .get(card_id)
            .ok_or_else(|| DrawError::UnknownCard(card_id.to_string()))?;
        Ok(DrawnCard {
            card_id: def.id.clone(),
            card_name: def.name.clone(),
            suit: def.suit,
            rank: def.rank.clone(),
            orientation,
            position,
            index,
        })
    }
}

/// Draws with the process-wide registries.
pub fn draw(req: &DrawRequest) -> Result<DrawResult, DrawError> {
    DrawEngine::standard().draw(req)
}
