//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Cloak using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Cloak - de-identify delimited data files
#[derive(Parser, Debug)]
#[command(name = "cloak")]
#[command(version, about, long_about = None)]
#[command(author = "Cloak Contributors")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, env = "CLOAK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Also write JSON logs to rotating files in this directory
    #[arg(long, global = true, env = "CLOAK_LOG_DIR")]
    pub log_dir: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// De-identify a source file according to a configuration
    Deidentify(commands::deidentify::DeidentifyArgs),

    /// Validate a configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Write a sample configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::policy::UnsupportedTransformPolicy;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parse_deidentify() {
        let cli = Cli::parse_from([
            "cloak",
            "deidentify",
            "--source",
            "source.csv",
            "--config",
            "config.yaml",
        ]);
        match cli.command {
            Commands::Deidentify(args) => {
                assert_eq!(args.source, PathBuf::from("source.csv"));
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert_eq!(args.output_dir, PathBuf::from("."));
                assert_eq!(args.on_unsupported, UnsupportedTransformPolicy::Stop);
                assert!(args.audit_log.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_on_unsupported_skip() {
        let cli = Cli::parse_from([
            "cloak",
            "deidentify",
            "-s",
            "a.csv",
            "-c",
            "c.yaml",
            "--on-unsupported",
            "skip",
        ]);
        match cli.command {
            Commands::Deidentify(args) => {
                assert_eq!(args.on_unsupported, UnsupportedTransformPolicy::Skip)
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_deidentify_requires_source() {
        let result = Cli::try_parse_from(["cloak", "deidentify", "--config", "c.yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from([
            "cloak",
            "--log-level",
            "debug",
            "validate-config",
            "-c",
            "x.yaml",
        ]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["cloak", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
