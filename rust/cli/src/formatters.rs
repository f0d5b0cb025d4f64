//! Reading, card and spread formatters for terminal display.
//!
//! Pure functions that turn engine and oracle values into text. Orientation
//! markers use Unicode arrows, with an ASCII fallback for terminals that don't
//! render them.
//!
//! ## Example
//!
//! ```rust
//! use arcana_engine::SpreadRegistry;
//! use arcana_cli::formatters::format_spread;
//!
//! let spread = SpreadRegistry::standard().get("three_card").unwrap();
//! assert_eq!(
//!     format_spread(spread),
//!     "three_card (3 cards): Three Card (Past / Present / Future) - past, present, future"
//! );
//! ```

use arcana_engine::{CardDefinition, Orientation, SpreadDefinition};
use arcana_oracle::{Reading, ReadingCard};

/// Check if the terminal supports Unicode symbols by detecting modern terminal environments.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn orientation_marker(orientation: Orientation) -> &'static str {
    match (orientation, supports_unicode()) {
        (Orientation::Upright, true) => "↑",
        (Orientation::Reversed, true) => "↓",
        (Orientation::Upright, false) => "^",
        (Orientation::Reversed, false) => "v",
    }
}

/// One line per drawn card, e.g. ` 1. The Fool ↑ upright [past]`.
pub fn format_reading_card(card: &ReadingCard) -> String {
    let c = &card.card;
    let mut line = format!(
        "{:>2}. {} {} {}",
        c.index + 1,
        c.card_name,
        orientation_marker(c.orientation),
        c.orientation
    );
    if let Some(pos) = &c.position {
        line.push_str(&format!(" [{}]", pos));
    }
    line
}

/// Full text rendering of a reading: header, cards, then narration if any.
pub fn format_reading(reading: &Reading, show_images: bool) -> String {
    let meta = &reading.meta;
    let mut lines = Vec::with_capacity(reading.cards.len() + 8);
    lines.push(format!(
        "Spread: {} | Seed: {} | Deck: {} | Reversed prob: {}",
        meta.spread.as_deref().unwrap_or("-"),
        meta.seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".to_string()),
        meta.deck_type,
        meta.orientation_prob
    ));
    if let Some(q) = &meta.question {
        lines.push(format!("Question: {}", q));
    }
    lines.push(String::new());
    for card in &reading.cards {
        lines.push(format_reading_card(card));
        if show_images {
            lines.push(format!("    {}", card.image_path));
        }
    }

    if let Some(text) = &reading.llm.response_text {
        lines.push(String::new());
        lines.push(text.clone());
    }
    if let Some(error) = &reading.llm.error {
        lines.push(String::new());
        lines.push(format!("Narration unavailable ({})", error));
    }
    lines.join("\n")
}

pub fn format_spread(spread: &SpreadDefinition) -> String {
    format!(
        "{} ({} {}): {} - {}",
        spread.id,
        spread.card_count(),
        if spread.card_count() == 1 { "card" } else { "cards" },
        spread.name,
        spread.positions.join(", ")
    )
}

pub fn format_card_definition(card: &CardDefinition) -> String {
    format!("{:<28} {}", card.id, card.name)
}
