//! Spreads command handler: lists the registered spreads in registration order.

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::formatters::format_spread;
use arcana_engine::SpreadRegistry;
use std::io::Write;

pub fn handle_spreads_command(format: OutputFormat, out: &mut dyn Write) -> Result<(), CliError> {
    let spreads = SpreadRegistry::standard().list();
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({ "spreads": spreads });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
        OutputFormat::Text => {
            for spread in spreads {
                writeln!(out, "{}", format_spread(spread))?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lists_every_spread_in_order() {
        let mut out = Vec::new();
        handle_spreads_command(OutputFormat::Text, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let ids: Vec<&str> = text
            .lines()
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(ids, vec!["single", "three_card", "five_card", "celtic_cross"]);
    }

    #[test]
    fn json_has_positions() {
        let mut out = Vec::new();
        handle_spreads_command(OutputFormat::Json, &mut out).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let three = &json["spreads"][1];
        assert_eq!(three["id"], "three_card");
        assert_eq!(three["positions"], serde_json::json!(["past", "present", "future"]));
    }
}
