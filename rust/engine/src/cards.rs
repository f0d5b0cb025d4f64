use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

/// Number of cards in the Rider-Waite-Smith deck.
pub const DECK_SIZE: usize = 78;

/// One of the five suits of a tarot deck: the major arcana plus the four minor suits.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    /// Major arcana (trumps 0 through 21)
    Major,
    /// Wands
    Wands,
    /// Cups
    Cups,
    /// Swords
    Swords,
    /// Pentacles
    Pentacles,
}

impl Suit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Major => "major",
            Suit::Wands => "wands",
            Suit::Cups => "cups",
            Suit::Swords => "swords",
            Suit::Pentacles => "pentacles",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Suit::Major => "Major Arcana",
            Suit::Wands => "Wands",
            Suit::Cups => "Cups",
            Suit::Swords => "Swords",
            Suit::Pentacles => "Pentacles",
        }
    }

    pub fn parse(s: &str) -> Option<Suit> {
        match s.trim().to_ascii_lowercase().as_str() {
            "major" => Some(Suit::Major),
            "wands" => Some(Suit::Wands),
            "cups" => Some(Suit::Cups),
            "swords" => Some(Suit::Swords),
            "pentacles" => Some(Suit::Pentacles),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn minor_suits() -> [Suit; 4] {
    [Suit::Wands, Suit::Cups, Suit::Swords, Suit::Pentacles]
}

/// Rank tokens of a minor suit paired with their display names, in deck order.
pub fn minor_ranks() -> [(&'static str, &'static str); 14] {
    [
        ("ace", "Ace"),
        ("2", "Two"),
        ("3", "Three"),
        ("4", "Four"),
        ("5", "Five"),
        ("6", "Six"),
        ("7", "Seven"),
        ("8", "Eight"),
        ("9", "Nine"),
        ("10", "Ten"),
        ("page", "Page"),
        ("knight", "Knight"),
        ("queen", "Queen"),
        ("king", "King"),
    ]
}

const MAJOR_ARCANA: [&str; 22] = [
    "The Fool",
    "The Magician",
    "The High Priestess",
    "The Empress",
    "The Emperor",
    "The Hierophant",
    "The Lovers",
    "The Chariot",
    "Strength",
    "The Hermit",
    "Wheel of Fortune",
    "Justice",
    "The Hanged Man",
    "Death",
    "Temperance",
    "The Devil",
    "The Tower",
    "The Star",
    "The Moon",
    "The Sun",
    "Judgement",
    "The World",
];

/// Immutable definition of a single card, owned by the [`CardRegistry`].
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Stable identifier, e.g. `major_00_the_fool` or `minor_wands_ace`
    pub id: String,
    /// Display name, e.g. "The Fool" or "Ace of Wands"
    pub name: String,
    /// Suit of the card
    pub suit: Suit,
    /// "0".."21" for majors; "ace", "2".."10", "page", "knight", "queen", "king" for minors
    pub rank: String,
}

impl CardDefinition {
    pub fn major(number: usize, name: &str) -> Self {
        Self {
            id: format!("major_{:02}_{}", number, slug(name)),
            name: name.to_string(),
            suit: Suit::Major,
            rank: number.to_string(),
        }
    }

    pub fn minor(suit: Suit, rank: &str, rank_name: &str) -> Self {
        Self {
            id: format!("minor_{}_{}", suit.as_str(), rank),
            name: format!("{} of {}", rank_name, suit.display_name()),
            suit,
            rank: rank.to_string(),
        }
    }

    pub fn is_major(&self) -> bool {
        self.suit == Suit::Major
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Full Rider-Waite-Smith catalog in stable order: majors 0..21, then wands, cups,
/// swords, pentacles from ace to king.
pub fn rider_waite_smith() -> Vec<CardDefinition> {
    let mut v = Vec::with_capacity(DECK_SIZE);
    for (number, name) in MAJOR_ARCANA.iter().enumerate() {
        v.push(CardDefinition::major(number, name));
    }
    for suit in minor_suits() {
        for (rank, rank_name) in minor_ranks() {
            v.push(CardDefinition::minor(suit, rank, rank_name));
        }
    }
    v
}

/// Read-only catalog of card definitions with constant-time lookup by id.
///
/// # Examples
///
/// ```
/// use arcana_engine::cards::{CardRegistry, Suit};
///
/// let registry = CardRegistry::standard();
/// assert_eq!(registry.len(), 78);
///
/// let fool = registry.get("major_00_the_fool").expect("registered");
/// assert_eq!(fool.name, "The Fool");
/// assert_eq!(fool.suit, Suit::Major);
/// ```
#[derive(Debug, Clone)]
pub struct CardRegistry {
    cards: Vec<CardDefinition>,
    index: HashMap<String, usize>,
}

impl CardRegistry {
    /// Builds a registry, rejecting catalogs that are not exactly [`DECK_SIZE`] unique cards.
    pub fn from_definitions(cards: Vec<CardDefinition>) -> Result<Self, RegistryError> {
        if cards.len() != DECK_SIZE {
            return Err(RegistryError::CardCount {
                expected: DECK_SIZE,
                actual: cards.len(),
            });
        }
        let mut index = HashMap::with_capacity(cards.len());
        for (i, card) in cards.iter().enumerate() {
            if index.insert(card.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateCard(card.id.clone()));
            }
        }
        Ok(Self { cards, index })
    }

    pub fn rider_waite_smith() -> Result<Self, RegistryError> {
        Self::from_definitions(rider_waite_smith())
    }

    /// Process-wide registry, built on first use.
    ///
    /// # Panics
    ///
    /// Panics if the built-in catalog violates its invariants. This is a startup
    /// failure, not a recoverable condition.
    pub fn standard() -> &'static CardRegistry {
        static REGISTRY: OnceLock<CardRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| match CardRegistry::rider_waite_smith() {
            Ok(registry) => registry,
            Err(e) => panic!("built-in card catalog is corrupt: {}", e),
        })
    }

    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }

    pub fn get(&self, id: &str) -> Option<&CardDefinition> {
        self.index.get(id).map(|&i| &self.cards[i])
    }

    pub fn ids(&self) -> Vec<&str> {
        self.cards.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn by_suit(&self, suit: Suit) -> impl Iterator<Item = &CardDefinition> {
        self.cards.iter().filter(move |c| c.suit == suit)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_78_unique_ids() {
        let cards = rider_waite_smith();
        assert_eq!(cards.len(), DECK_SIZE);
        let ids: HashSet<_> = cards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn ids_follow_naming_scheme() {
        let r = CardRegistry::standard();
        assert_eq!(r.cards()[0].id, "major_00_the_fool");
        assert_eq!(r.cards()[2].id, "major_02_the_high_priestess");
        assert_eq!(r.cards()[10].id, "major_10_wheel_of_fortune");
        assert_eq!(r.cards()[21].id, "major_21_the_world");
        assert_eq!(r.cards()[22].id, "minor_wands_ace");
        assert_eq!(r.cards()[77].id, "minor_pentacles_king");
    }

    #[test]
    fn minor_names_and_ranks() {
        let r = CardRegistry::standard();
        let two = r.get("minor_cups_2").unwrap();
        assert_eq!(two.name, "Two of Cups");
        assert_eq!(two.rank, "2");
        assert_eq!(two.suit, Suit::Cups);

        let page = r.get("minor_swords_page").unwrap();
        assert_eq!(page.name, "Page of Swords");
    }

    #[test]
    fn major_rank_is_its_number() {
        let r = CardRegistry::standard();
        let world = r.get("major_21_the_world").unwrap();
        assert_eq!(world.rank, "21");
        assert!(world.is_major());
    }

    #[test]
    fn suit_counts() {
        let r = CardRegistry::standard();
        assert_eq!(r.by_suit(Suit::Major).count(), 22);
        for suit in minor_suits() {
            assert_eq!(r.by_suit(suit).count(), 14, "{suit}");
        }
    }

    #[test]
    fn short_catalog_is_rejected() {
        let mut cards = rider_waite_smith();
        cards.pop();
        let err = CardRegistry::from_definitions(cards).unwrap_err();
        assert_eq!(
            err,
            RegistryError::CardCount {
                expected: 78,
                actual: 77
            }
        );
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut cards = rider_waite_smith();
        cards[77] = cards[0].clone();
        let err = CardRegistry::from_definitions(cards).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCard("major_00_the_fool".into()));
    }

    #[test]
    fn slug_strips_apostrophes_and_hyphens() {
        assert_eq!(slug("King's Cross-Road"), "kings_cross_road");
        assert_eq!(slug("Rider\u{2019}s Card"), "riders_card");
    }

    #[test]
    fn suit_serializes_lowercase() {
        let json = serde_json::to_string(&Suit::Pentacles).unwrap();
        assert_eq!(json, "\"pentacles\"");
        assert_eq!(Suit::parse("Wands"), Some(Suit::Wands));
        assert_eq!(Suit::parse("coins"), None);
    }
}
