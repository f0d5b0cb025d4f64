//! Command-line argument definitions.
//!
//! Flags that also exist in the configuration file (`--seed`, `--reversed-prob`,
//! `--deck`, `--image-ext`, `--assets`, `--narrator`) are optional here; when
//! omitted, the resolved configuration supplies the value.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "arcana",
    version,
    about = "Arcana tarot draw CLI",
    propagate_version = true
)]
pub struct ArcanaCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Output format shared by the listing commands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Draw cards and print the reading
    Draw {
        /// Number of cards; defaults to the spread's size, or 1 without a spread
        #[arg(long)]
        cards: Option<usize>,
        /// Spread id (see `arcana spreads`)
        #[arg(long)]
        spread: Option<String>,
        /// Integer or free-text seed
        #[arg(long)]
        seed: Option<String>,
        /// Probability in [0, 1] that a card is reversed
        #[arg(long = "reversed-prob")]
        reversed_prob: Option<f64>,
        /// Deck type
        #[arg(long)]
        deck: Option<String>,
        /// Question to frame the reading
        #[arg(long)]
        question: Option<String>,
        /// Ask the narrator for commentary
        #[arg(long)]
        narrate: bool,
        /// Narrator kind: template or gemini
        #[arg(long)]
        narrator: Option<String>,
        /// Card image extension: png, jpg or webp
        #[arg(long = "image-ext")]
        image_ext: Option<String>,
        /// Assets root used for image paths
        #[arg(long)]
        assets: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the available spreads
    Spreads {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List the card registry
    Cards {
        /// Only show one suit: major, wands, cups, swords or pentacles
        #[arg(long)]
        suit: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the normalized numeric form of a seed
    Seed { value: String },
    /// Print a sample of the draw generator's output
    Rng {
        #[arg(long)]
        seed: Option<String>,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
