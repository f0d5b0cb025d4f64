//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Warn that a flag only matters together with another one.
pub fn warn_flag_ignored(err: &mut dyn Write, flag: &str, needs: &str) -> std::io::Result<()> {
    display_warning(
        err,
        &format!("--{} has no effect without --{}.", flag, needs),
    )
}
