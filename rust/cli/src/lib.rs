//! # Arcana CLI Library
//!
//! Command-line front end for the Arcana tarot draw engine.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["arcana", "draw", "--spread", "three_card", "--seed", "demo-seed"];
//! let code = arcana_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `draw`: Draw cards, optionally bound to a spread and narrated
//! - `spreads`: List the available spreads
//! - `cards`: List the card registry
//! - `seed`: Show the numeric form of a seed
//! - `rng`: Print a sample of the draw generator
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
#[macro_use]
mod macros;
pub mod ui;

use cli::{ArcanaCli, Commands};
use commands::{
    DrawArgs, handle_cards_command, handle_cfg_command, handle_draw_command,
    handle_rng_command, handle_seed_command, handle_spreads_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["draw", "spreads", "cards", "seed", "rng", "cfg"];

/// Main entry point for the CLI application.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["arcana", "seed", "42"];
/// let code = arcana_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ArcanaCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Draw {
            cards,
            spread,
            seed,
            reversed_prob,
            deck,
            question,
            narrate,
            narrator,
            image_ext,
            assets,
            format,
        } => handle_draw_command(
            DrawArgs {
                cards,
                spread,
                seed,
                reversed_prob,
                deck,
                question,
                narrate,
                narrator,
                image_ext,
                assets,
                format,
            },
            out,
            err,
        ),
        Commands::Spreads { format } => handle_spreads_command(format, out),
        Commands::Cards { suit, format } => handle_cards_command(suit.as_deref(), format, out),
        Commands::Seed { value } => handle_seed_command(&value, out),
        Commands::Rng { seed } => handle_rng_command(seed.as_deref(), out),
        // cfg writes its own diagnostics
        Commands::Cfg => match handle_cfg_command(out, err) {
            Ok(()) => return exit_code::SUCCESS,
            Err(_) => return exit_code::ERROR,
        },
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        if write!(out, "{}", e).is_err() {
            return exit_code::ERROR;
        }
        return exit_code::SUCCESS;
    }

    write_or_exit!(err, "{}", e);
    write_or_exit!(err, "Arcana Tarot CLI");
    write_or_exit!(err, "Usage: arcana <command> [options]\n");
    write_or_exit!(err, "Commands:");
    for c in COMMANDS {
        write_or_exit!(err, "  {}", c);
    }
    write_or_exit!(err, "\nFor full help, run: arcana --help");
    exit_code::ERROR
}
