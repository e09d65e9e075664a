//! Configuration loader with YAML/TOML parsing and environment variable overrides

use super::schema::{CloakConfig, RawConfig};
use super::secret::secret_string;
use crate::domain::errors::CloakError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Environment variable that overrides `Tokenizer.Key`
pub const TOKEN_KEY_ENV: &str = "CLOAK_TOKEN_KEY";

/// Loads and normalizes a configuration file
///
/// This function:
/// 1. Reads the file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses YAML, or TOML when the file ends in `.toml`
/// 4. Validates the document and converts 1-based column keys to 0-based indices
/// 5. Applies the `CLOAK_TOKEN_KEY` override
///
/// # Errors
///
/// Returns [`CloakError::ConfigParse`] if the file is missing, unreadable,
/// references unset variables, or does not match the schema. Returns
/// [`CloakError::ConfigValue`] for invalid column keys, delimiters or
/// transform parameters.
///
/// # Examples
///
/// ```no_run
/// use cloak::config::loader::load_config;
///
/// let config = load_config("config_header.yaml").expect("Failed to load config");
/// println!("{} column rules", config.column_rules.len());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CloakConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CloakError::ConfigParse(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CloakError::ConfigParse(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let raw = parse_document(path, &contents)?;
    let mut config = CloakConfig::from_raw(raw)?;

    apply_env_overrides(&mut config);

    tracing::debug!(
        config_path = %path.display(),
        has_header = config.file_format.has_header(),
        delimiter = %config.file_format.delimiter_char(),
        column_rules = config.column_rules.len(),
        tokenizer_key = config.tokenizer_key.is_some(),
        "Configuration loaded"
    );

    Ok(config)
}

fn parse_document(path: &Path, contents: &str) -> Result<RawConfig> {
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(contents)
            .map_err(|e| CloakError::ConfigParse(format!("Failed to parse TOML: {e}")))
    } else {
        serde_yaml::from_str(contents)
            .map_err(|e| CloakError::ConfigParse(format!("Failed to parse YAML: {e}")))
    }
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CloakError::ConfigParse(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(CloakError::ConfigParse(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides
fn apply_env_overrides(config: &mut CloakConfig) {
    if let Ok(val) = std::env::var(TOKEN_KEY_ENV) {
        tracing::debug!("Tokenizer key taken from {}", TOKEN_KEY_ENV);
        config.tokenizer_key = Some(secret_string(val));
    }
}
