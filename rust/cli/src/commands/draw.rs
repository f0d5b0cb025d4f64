//! Draw command handler.
//!
//! Builds a [`ReadingRequest`] from the command-line flags, falling back to the
//! resolved configuration for anything not given, and prints the reading as text
//! or JSON. With `--narrate`, the configured narrator comments on the cards.

use crate::cli::OutputFormat;
use crate::config;
use crate::error::CliError;
use crate::formatters;
use crate::ui;
use arcana_engine::{SeedInput, SpreadRegistry};
use arcana_oracle::{AssetResolver, ImageExt, Oracle, ReadingRequest, create_narrator};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

/// Flags of the `draw` subcommand. `None` means "use the configured value".
#[derive(Debug, Clone, Default)]
pub struct DrawArgs {
    pub cards: Option<usize>,
    pub spread: Option<String>,
    pub seed: Option<String>,
    pub reversed_prob: Option<f64>,
    pub deck: Option<String>,
    pub question: Option<String>,
    pub narrate: bool,
    pub narrator: Option<String>,
    pub image_ext: Option<String>,
    pub assets: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Handle the draw command.
///
/// # Errors
///
/// - `CliError::Config` if the configuration cannot be resolved
/// - `CliError::InvalidInput` for an unknown image extension or narrator kind
/// - `CliError::Draw` when the engine rejects the request
pub fn handle_draw_command(
    args: DrawArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let config::ConfigResolved { config, .. } =
        config::load_with_sources().map_err(|e| CliError::Config(e.to_string()))?;

    let num_cards = match (args.cards, args.spread.as_deref()) {
        (Some(n), _) => n,
        (None, Some(id)) => SpreadRegistry::standard().get(id)?.card_count(),
        (None, None) => 1,
    };

    let image_ext = match args.image_ext.as_deref() {
        Some(ext) => ImageExt::from_str(ext).map_err(CliError::InvalidInput)?,
        None => config.image_ext,
    };

    let mut req = ReadingRequest::new(num_cards);
    req.spread = args.spread;
    req.seed = args
        .seed
        .as_deref()
        .map(SeedInput::from_arg)
        .unwrap_or(config.seed);
    req.orientation_prob = args.reversed_prob.unwrap_or(config.orientation_prob);
    req.deck_type = args.deck.unwrap_or(config.deck_type);
    req.question = args.question;
    req.explain_with_llm = args.narrate;
    req.image_ext = image_ext;

    let mut oracle = Oracle::standard().with_assets(AssetResolver::new(
        args.assets.unwrap_or(config.assets_dir),
    ));
    match (args.narrate, args.narrator) {
        (true, narrator) => {
            let kind = narrator.unwrap_or(config.narrator);
            let narrator =
                create_narrator(&kind).map_err(|e| CliError::InvalidInput(e.to_string()))?;
            oracle = oracle.with_narrator(narrator);
        }
        (false, Some(_)) => ui::warn_flag_ignored(err, "narrator", "narrate")?,
        (false, None) => {}
    }

    let reading = oracle.perform_reading(&req)?;
    match args.format {
        OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&reading)?)?,
        OutputFormat::Text => writeln!(out, "{}", formatters::format_reading(&reading, false))?,
    }
    Ok(())
}
