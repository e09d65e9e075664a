// Cloak - Config-driven de-identification of delimited data
// Copyright (c) 2025 Cloak Contributors
// Licensed under the MIT License

use clap::Parser;
use cloak::cli::{Cli, Commands};
use cloak::config::LoggingConfig;
use cloak::logging::init_logging;
use std::process;

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = match cli.log_dir {
        Some(ref dir) => LoggingConfig {
            local_enabled: true,
            local_path: dir.clone(),
            ..LoggingConfig::default()
        },
        None => LoggingConfig::default(),
    };
    let guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Cloak starting");

    let exit_code = match execute_command(&cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    // process::exit skips destructors, so flush file logs first
    drop(guard);
    process::exit(exit_code);
}

fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Deidentify(args) => args.execute(),
        Commands::ValidateConfig(args) => args.execute(),
        Commands::Init(args) => args.execute(),
    }
}
