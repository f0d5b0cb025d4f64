//! Command handler modules for the Arcana CLI.
//!
//! Each command lives in its own module with the same shape:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Output streams (`&mut dyn Write`) passed in, so handlers are testable with `Vec<u8>`
//! - Errors propagated via the `CliError` enum

mod cards;
mod cfg;
mod draw;
mod rng;
mod seed;
mod spreads;

pub use cards::handle_cards_command;
pub use cfg::handle_cfg_command;
pub use draw::{DrawArgs, handle_draw_command};
pub use rng::handle_rng_command;
pub use seed::handle_seed_command;
pub use spreads::handle_spreads_command;
