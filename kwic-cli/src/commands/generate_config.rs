//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file, at least the unit mode");
        println!("2. Validate your configuration:");
        println!("   kwic validate --config {}", self.output.display());
        println!("3. Use it for searching:");
        println!(
            "   kwic search -i 'corpus/*.txt' -p word --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Template configuration content
    pub fn template() -> &'static str {
        r#"# kwic configuration
#
# Command-line flags override every value set here.

[search]
# What a unit is: "word" or "character". There is no default.
unit_mode = "word"

# Units of context on each side of a match
context = 5

# Distinguish upper and lower case in literals and phrases
case_sensitive = false

# Fail on the first unreadable document instead of skipping it
strict = false

[output]
# text, json, csv, tsv or markdown
format = "text"

# Indent JSON output
pretty_json = true

[performance]
# Worker threads; remove to use all cores
# threads = 4

# Corpus size (KB) from which documents are processed in parallel
parallel_threshold_kb = 1024

# Recover the speaker of each match from markers such as <HAMLET>.
# Uncomment to enable.
# [speaker]
# open = "<"
# close = ">"
# context = 200
"#
    }
}
