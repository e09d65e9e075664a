//! Init command implementation
//!
//! Writes a sample configuration file to start from.

use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Sample configuration written by `cloak init`
pub const SAMPLE_CONFIG: &str = r#"# Cloak configuration
#
# Column numbers start at 1.

File:
  Header: true
  Delimiter: ","

Columns:
  1:
    transform:
      type: HASH
      length: 10
  3:
    transform:
      type: HASH
      length: 40
  4:
    transform:
      type: DATE

# The key can also come from the CLOAK_TOKEN_KEY environment variable,
# which takes precedence over this value.
Tokenizer:
  Key: "replace-with-a-long-random-secret"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cloak.yaml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output.display(), "Initializing configuration file");

        if self.output.exists() && !self.force {
            println!("Configuration file already exists: {}", self.output.display());
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, SAMPLE_CONFIG) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output.display());
                println!();
                println!("Next steps:");
                println!("  1. Edit {} to match your source file", self.output.display());
                println!("  2. Set CLOAK_TOKEN_KEY (or put it in a .env file)");
                println!("  3. Validate: cloak validate-config -c {}", self.output.display());
                println!(
                    "  4. Run: cloak deidentify -s <source> -c {}",
                    self.output.display()
                );
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{CloakConfig, RawConfig};
    use tempfile::tempdir;

    #[test]
    fn test_sample_config_is_valid() {
        let raw: RawConfig = serde_yaml::from_str(SAMPLE_CONFIG).unwrap();
        let config = CloakConfig::from_raw(raw).unwrap();
        assert_eq!(config.column_rules.len(), 3);
        assert!(config.file_format.has_header());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("cloak.yaml");
        fs::write(&output, "keep me").unwrap();

        let args = InitArgs {
            output: output.clone(),
            force: false,
        };
        assert_eq!(args.execute().unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "keep me");

        let args = InitArgs {
            output: output.clone(),
            force: true,
        };
        assert_eq!(args.execute().unwrap(), 0);
        assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE_CONFIG);
    }
}
