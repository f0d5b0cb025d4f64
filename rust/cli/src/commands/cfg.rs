//! Configuration command handler.
//!
//! Displays the resolved configuration with the source of each value
//! (default, configuration file, or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "seed": {
//!     "value": null,
//!     "source": "default"
//!   },
//!   "orientation_prob": {
//!     "value": 0.5,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails, after writing the
/// reason to `err`.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "normalized": config.seed.normalize(),
            "source": sources.seed,
        },
        "orientation_prob": {
            "value": config.orientation_prob,
            "source": sources.orientation_prob,
        },
        "deck_type": {
            "value": config.deck_type,
            "source": sources.deck_type,
        },
        "image_ext": {
            "value": config.image_ext,
            "source": sources.image_ext,
        },
        "assets_dir": {
            "value": config.assets_dir,
            "source": sources.assets_dir,
        },
        "narrator": {
            "value": config.narrator,
            "source": sources.narrator,
        }
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;
    Ok(())
}
