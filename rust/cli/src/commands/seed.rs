//! Seed command handler.
//!
//! Prints the numeric seed a value normalizes to, which is the value reported as
//! `meta.seed` by a draw seeded with the same input.

use crate::error::CliError;
use arcana_engine::SeedInput;
use std::io::Write;

pub fn handle_seed_command(value: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = SeedInput::from_arg(value);
    let kind = match seed {
        SeedInput::Integer(_) => "integer",
        _ => "text",
    };
    // from_arg never yields Unseeded
    let normalized = seed.normalize().unwrap_or_default();
    writeln!(out, "{} ({})", normalized, kind)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(value: &str) -> String {
        let mut out = Vec::new();
        handle_seed_command(value, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn integers_pass_through() {
        assert_eq!(run("42"), "42 (integer)\n");
    }

    #[test]
    fn text_is_hashed() {
        assert_eq!(run("abc"), format!("{} (text)\n", 0xba7816bf8f01cfeau64));
    }

    #[test]
    fn negative_numbers_are_text() {
        assert!(run("-5").ends_with("(text)\n"));
    }
}
