//! Offline narrator.
//!
//! Builds commentary from suit themes and orientation alone. Output depends only
//! on the cards, so it is stable for a seeded draw and needs no network access.

use arcana_engine::{Orientation, Suit};

use crate::error::NarrativeError;
use crate::{NarrationRequest, Narrator};

/// Rule-based narrator used when no model is configured, and in tests.
///
/// # Example
///
/// ```rust
/// use arcana_oracle::template::TemplateNarrator;
/// use arcana_oracle::Narrator;
///
/// let narrator = TemplateNarrator::new();
/// assert_eq!(narrator.name(), "TemplateNarrator");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    pub fn new() -> Self {
        Self
    }
}

fn theme(suit: Suit) -> &'static str {
    match suit {
        Suit::Major => "a turning point that shapes the larger story",
        Suit::Wands => "drive, ambition and the will to act",
        Suit::Cups => "feelings, relationships and intuition",
        Suit::Swords => "thought, conflict and hard truths",
        Suit::Pentacles => "work, money and the body",
    }
}

fn stance(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Upright => "flows outward and asks to be engaged directly",
        Orientation::Reversed => "is blocked or turned inward and asks for patience",
    }
}

impl Narrator for TemplateNarrator {
    fn narrate(&self, request: &NarrationRequest<'_>) -> Result<String, NarrativeError> {
        let mut out = Vec::with_capacity(request.cards.len() + 5);
        if let Some(q) = request.question.map(str::trim).filter(|q| !q.is_empty()) {
            out.push(format!("Question: {}", q));
            out.push(String::new());
        }

        for c in request.cards {
            let card = &c.card;
            let slot = card
                .position
                .as_deref()
                .map(|p| format!(" in the {} position", p.replace('_', " ")))
                .unwrap_or_default();
            out.push(format!(
                "{}. {} ({}){}: speaks to {}; its energy {}.",
                card.index + 1,
                card.card_name,
                card.orientation,
                slot,
                theme(card.suit),
                stance(card.orientation)
            ));
        }

        let reversed = request
            .cards
            .iter()
            .filter(|c| c.card.orientation == Orientation::Reversed)
            .count();
        let majors = request
            .cards
            .iter()
            .filter(|c| c.card.suit == Suit::Major)
            .count();

        out.push(String::new());
        out.push("Advice:".to_string());
        out.push(if majors * 2 > request.cards.len() {
            "- Much of this is larger than day-to-day choices; look at the long arc.".to_string()
        } else {
            "- The situation is within reach of practical, everyday action.".to_string()
        });
        out.push(if reversed * 2 > request.cards.len() {
            "- Slow down and clear what is stuck before pushing forward.".to_string()
        } else {
            "- Momentum is available; commit to one concrete next step.".to_string()
        });
        out.push("- Revisit this reading after that step and note what changed.".to_string());

        Ok(out.join("\n"))
    }

    fn name(&self) -> &str {
        "TemplateNarrator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NarrationOptions;
    use crate::reading::ReadingCard;
    use arcana_engine::DrawnCard;

    fn card(index: usize, suit: Suit, orientation: Orientation) -> ReadingCard {
        ReadingCard {
            card: DrawnCard {
                card_id: format!("test_{}", index),
                card_name: format!("Card {}", index),
                suit,
                rank: "1".into(),
                orientation,
                position: Some("near_future".into()),
                index,
            },
            image_path: String::new(),
        }
    }

    #[test]
    fn one_line_per_card_plus_advice() {
        let cards = vec![
            card(0, Suit::Cups, Orientation::Upright),
            card(1, Suit::Major, Orientation::Reversed),
        ];
        let options = NarrationOptions::default();
        let req = NarrationRequest {
            prompt: "",
            question: Some("career?"),
            cards: &cards,
            options: &options,
        };
        let text = TemplateNarrator::new().narrate(&req).unwrap();
        assert!(text.starts_with("Question: career?"));
        assert!(text.contains("1. Card 0 (upright) in the near future position: speaks to feelings"));
        assert!(text.contains("2. Card 1 (reversed)"));
        assert!(text.contains("Advice:"));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 3);
    }

    #[test]
    fn output_is_deterministic() {
        let cards = vec![card(0, Suit::Swords, Orientation::Reversed)];
        let options = NarrationOptions::default();
        let req = NarrationRequest {
            prompt: "",
            question: None,
            cards: &cards,
            options: &options,
        };
        let n = TemplateNarrator::new();
        assert_eq!(n.narrate(&req).unwrap(), n.narrate(&req).unwrap());
    }
}
