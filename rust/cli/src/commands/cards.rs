//! Cards command handler: lists the card registry, optionally one suit only.

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::formatters::format_card_definition;
use arcana_engine::{CardDefinition, CardRegistry, Suit};
use std::io::Write;

pub fn handle_cards_command(
    suit: Option<&str>,
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let registry = CardRegistry::standard();
    let cards: Vec<&CardDefinition> = match suit {
        Some(s) => {
            let suit = Suit::parse(s).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "unknown suit '{}' (expected major, wands, cups, swords or pentacles)",
                    s
                ))
            })?;
            registry.by_suit(suit).collect()
        }
        None => registry.cards().iter().collect(),
    };

    match format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&cards)?)?,
        OutputFormat::Text => {
            for card in cards {
                writeln!(out, "{}", format_card_definition(card))?;
            }
        }
    }
    Ok(())
}
