//! Validate config command implementation
//!
//! Loads a configuration file the same way a run does and prints what it
//! would do, without touching any data.

use crate::config::{load_config, TransformSpec};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Configuration file to validate
    #[arg(short, long, env = "CLOAK_CONFIG")]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(config_path = %self.config.display(), "Validating configuration");

        println!("Validating configuration file: {}", self.config.display());
        println!();

        let config = match load_config(&self.config) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Header: {}", config.file_format.has_header());
        println!("  Delimiter: {:?}", config.file_format.delimiter_char());
        println!(
            "  Tokenizer key: {}",
            if config.tokenizer_key.is_some() {
                "configured"
            } else {
                "not configured"
            }
        );
        println!("  Columns:");
        for (index, transform) in &config.column_rules {
            match transform {
                TransformSpec::Hash { max_length } => {
                    println!("    {}: HASH (length {})", index.one_based(), max_length)
                }
                TransformSpec::Date => println!("    {}: DATE (not compiled)", index.one_based()),
            }
        }

        let needs_key = config
            .column_rules
            .values()
            .any(|t| matches!(t, TransformSpec::Hash { .. }));
        if needs_key && config.tokenizer_key.is_none() {
            println!();
            println!(
                "Warning: HASH columns need Tokenizer.Key or {}",
                crate::config::TOKEN_KEY_ENV
            );
        }
        println!();
        Ok(0)
    }
}
