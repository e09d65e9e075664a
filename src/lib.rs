// Cloak - Config-driven de-identification of delimited data
// Copyright (c) 2025 Cloak Contributors
// Licensed under the MIT License

//! # Cloak - config-driven de-identification
//!
//! Cloak reads a delimited text file, replaces the values of selected columns
//! with deterministic tokens, and writes the result next to a machine-readable
//! policy describing what was done.
//!
//! ## Overview
//!
//! - **Configuration**: a YAML (or TOML) file names columns by 1-based number
//!   and says which transform applies to each
//! - **Policy compilation**: column numbers are resolved to column names and
//!   turned into an `auto_<MMDDYYYY_HHMMSS>.yaml` policy document
//! - **Application**: the policy is applied by a [`anonymization::PolicyEngine`];
//!   the built-in engine tokenizes with HMAC-SHA256
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Table I/O, policy compilation and run coordination
//! - [`anonymization`] - Policy engine, tokenizer and audit log
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration loading and normalization
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cloak::core::deidentify::{deidentify, DeidentifyOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let outcome = deidentify("source.csv", "cloak.yaml", &DeidentifyOptions::default())?;
//!     println!("No PHI file: {}", outcome.output_path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`domain::CloakError`]. The CLI maps each
//! variant to a process exit code through [`domain::CloakError::exit_code`].

pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
