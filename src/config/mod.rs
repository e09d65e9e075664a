//! Configuration management for Cloak.
//!
//! A configuration file tells Cloak how the source file is laid out and what
//! to do with each column. YAML is the native format; files ending in
//! `.toml` are read as TOML with the same structure.
//!
//! # Example Configuration
//!
//! ```yaml
//! File:
//!   Header: true
//!   Delimiter: ","
//! Columns:
//!   1:
//!     transform:
//!       type: HASH
//!       length: 10
//!   4:
//!     transform:
//!       type: DATE
//! Tokenizer:
//!   Key: "${CLOAK_TOKEN_KEY}"
//! ```
//!
//! Column numbers start at 1 in the file and are stored 0-based in
//! [`CloakConfig::column_rules`].
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted on load. `CLOAK_TOKEN_KEY`
//! overrides `Tokenizer.Key` when set.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, TOKEN_KEY_ENV};
pub use schema::{CloakConfig, FileFormat, TransformSpec};
pub use secret::{secret_string, SecretString, SecretValue};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Write JSON logs to rolling files
    pub local_enabled: bool,

    /// Directory for log files
    pub local_path: String,

    /// Rotation: "daily" or "hourly"
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: "./logs".to_string(),
            local_rotation: "daily".to_string(),
        }
    }
}
