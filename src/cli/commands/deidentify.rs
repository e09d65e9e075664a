//! Deidentify command implementation
//!
//! Runs one source file through the de-identification pipeline and prints
//! the paths of the files it wrote.

use crate::core::deidentify::{deidentify, DeidentifyOptions};
use crate::core::policy::UnsupportedTransformPolicy;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the deidentify command
#[derive(Args, Debug)]
pub struct DeidentifyArgs {
    /// Delimited source file to de-identify
    #[arg(short, long)]
    pub source: PathBuf,

    /// Configuration file (YAML, or TOML with a .toml extension)
    #[arg(short, long, env = "CLOAK_CONFIG")]
    pub config: PathBuf,

    /// Directory for the policy and de-identified files
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// What to do when a column's transform cannot be compiled
    #[arg(
        long,
        value_enum,
        default_value_t = UnsupportedTransformPolicy::Stop,
        env = "CLOAK_ON_UNSUPPORTED"
    )]
    pub on_unsupported: UnsupportedTransformPolicy,

    /// Append a JSON audit record of the run to this file
    #[arg(long)]
    pub audit_log: Option<PathBuf>,
}

impl DeidentifyArgs {
    /// Execute the deidentify command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let options = DeidentifyOptions {
            output_dir: self.output_dir.clone(),
            on_unsupported: self.on_unsupported,
            audit_log: self.audit_log.clone(),
        };

        match deidentify(&self.source, &self.config, &options) {
            Ok(outcome) => {
                println!("No PHI file: {}", outcome.output_path.display());
                println!("Policy: {}", outcome.policy_path.display());
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, source = %self.source.display(), "De-identification failed");
                eprintln!("Error: {e}");
                Ok(e.exit_code())
            }
        }
    }
}
