//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use anyhow::Result;
use kwic_engine::{DerivedKey, UnitMode};
use std::io::{self, Write};

/// Print the requested listing to stdout
pub fn execute(what: ListCommands) -> Result<()> {
    let stdout = io::stdout();
    write_listing(what, &mut stdout.lock())
}

/// Write the requested listing
pub fn write_listing<W: Write>(what: ListCommands, out: &mut W) -> Result<()> {
    match what {
        ListCommands::Modes => {
            writeln!(out, "Unit modes:")?;
            for (mode, description) in [
                (UnitMode::Word, "Unicode words; punctuation and whitespace are dropped"),
                (UnitMode::Character, "every character, including spaces and punctuation"),
            ] {
                writeln!(out, "  {:<10} {}", mode.as_str(), description)?;
            }
        }
        ListCommands::Formats => {
            writeln!(out, "Output formats:")?;
            for format in OutputFormat::ALL {
                writeln!(out, "  {:<10} {}", format.name(), format.description())?;
            }
        }
        ListCommands::Keys => {
            writeln!(out, "Grouping keys:")?;
            for key in DerivedKey::ALL {
                writeln!(out, "  {:<10} column '{}'", key.to_string(), key.column())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(what: ListCommands) -> String {
        let mut out = Vec::new();
        write_listing(what, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_list_modes() {
        let out = listing(ListCommands::Modes);
        assert!(out.contains("word"));
        assert!(out.contains("character"));
    }

    #[test]
    fn test_list_formats() {
        let out = listing(ListCommands::Formats);
        for name in ["text", "json", "csv", "tsv", "markdown"] {
            assert!(out.contains(name), "missing {name}");
        }
    }

    #[test]
    fn test_list_keys() {
        let out = listing(ListCommands::Keys);
        assert!(out.contains("following"));
        assert!(out.contains("post_word"));
        assert!(out.contains("keyword_key"));
    }
}
