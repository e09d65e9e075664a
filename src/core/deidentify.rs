//! De-identification coordinator - runs one source file end to end
//!
//! The sequence is strictly linear:
//!
//! 1. Load and normalize the configuration
//! 2. Load the source table with the configured format
//! 3. Resolve column numbers to names and compile the policy
//! 4. Create the output directory if needed and write the policy file
//! 5. Parse the policy file back and hand it to the engine
//! 6. Write the transformed table
//!
//! Any failure aborts the run. Files already written are left in place, so a
//! policy file can outlive a run that failed later on.

use crate::anonymization::audit::{hash_file, AuditLogger, AuditRecord};
use crate::anonymization::{parse_policy, AnonymizationEngine, PolicyEngine};
use crate::config::load_config;
use crate::core::policy::{compile_policy, write_policy, UnsupportedTransformPolicy};
use crate::core::table::{load_table, write_table};
use crate::domain::{CloakError, Result};
use chrono::{Local, Utc};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Suffix added to the source file stem for the output file
pub const OUTPUT_SUFFIX: &str = "_nophi";

/// Options for a run
#[derive(Debug, Clone)]
pub struct DeidentifyOptions {
    /// Directory receiving the policy and output files
    pub output_dir: PathBuf,

    /// Handling of unsupported transform types during compilation
    pub on_unsupported: UnsupportedTransformPolicy,

    /// Append a JSON audit record here after a successful run
    pub audit_log: Option<PathBuf>,
}

impl Default for DeidentifyOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            on_unsupported: UnsupportedTransformPolicy::default(),
            audit_log: None,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeidentifyOutcome {
    /// De-identified data file
    pub output_path: PathBuf,

    /// Policy document handed to the engine
    pub policy_path: PathBuf,

    /// Data rows written
    pub rows: usize,

    /// Columns the policy transformed, in rule order
    pub transformed_columns: Vec<String>,
}

/// Output file name for a source path: `<stem>_nophi<.ext>`
///
/// # Examples
///
/// ```
/// use cloak::core::deidentify::output_file_name;
/// use std::path::Path;
///
/// assert_eq!(output_file_name(Path::new("in/source.csv")).unwrap(), "source_nophi.csv");
/// assert_eq!(output_file_name(Path::new("extract")).unwrap(), "extract_nophi");
/// ```
pub fn output_file_name(source: &Path) -> Result<OsString> {
    let stem = source.file_stem().ok_or_else(|| {
        CloakError::FileRead(format!("Source path has no file name: {}", source.display()))
    })?;
    let mut name = stem.to_os_string();
    name.push(OUTPUT_SUFFIX);
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(name)
}

/// De-identifies `source` according to the configuration at `config_path`
///
/// Uses the built-in [`AnonymizationEngine`].
///
/// # Examples
///
/// ```no_run
/// use cloak::core::deidentify::{deidentify, DeidentifyOptions};
///
/// let outcome = deidentify(
///     "test_files/source_header.csv",
///     "test_files/config_header.yaml",
///     &DeidentifyOptions::default(),
/// )?;
/// println!("No PHI file: {}", outcome.output_path.display());
/// # Ok::<(), cloak::domain::CloakError>(())
/// ```
pub fn deidentify(
    source: impl AsRef<Path>,
    config_path: impl AsRef<Path>,
    options: &DeidentifyOptions,
) -> Result<DeidentifyOutcome> {
    deidentify_with_engine(source, config_path, options, &AnonymizationEngine::new())
}

/// De-identifies `source` using the given policy engine
pub fn deidentify_with_engine(
    source: impl AsRef<Path>,
    config_path: impl AsRef<Path>,
    options: &DeidentifyOptions,
    engine: &dyn PolicyEngine,
) -> Result<DeidentifyOutcome> {
    let start = Instant::now();
    let source = source.as_ref();
    let config_path = config_path.as_ref();

    tracing::info!(
        source = %source.display(),
        config = %config_path.display(),
        output_dir = %options.output_dir.display(),
        "Starting de-identification"
    );

    let config = load_config(config_path)?;
    let table = load_table(source, &config.file_format)?;

    let policy = compile_policy(&config, &table, options.on_unsupported)?;

    fs::create_dir_all(&options.output_dir).map_err(|e| {
        CloakError::Io(format!(
            "Failed to create output directory {}: {}",
            options.output_dir.display(),
            e
        ))
    })?;
    let policy_path = write_policy(&policy, &options.output_dir, &Local::now())?;

    let policy = parse_policy(&policy_path)?;
    let transformed = engine.apply(&policy, table)?;

    let output_path = options.output_dir.join(output_file_name(source)?);
    write_table(&transformed, &output_path, &config.file_format)?;

    let outcome = DeidentifyOutcome {
        output_path,
        policy_path,
        rows: transformed.len(),
        transformed_columns: policy
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    if let Some(ref audit_path) = options.audit_log {
        let logger = AuditLogger::new(audit_path)?;
        logger.log_run(&AuditRecord {
            timestamp: Utc::now(),
            source_path: source.display().to_string(),
            source_sha256: hash_file(source)?,
            output_path: outcome.output_path.display().to_string(),
            policy_path: outcome.policy_path.display().to_string(),
            rows: outcome.rows,
            transformed_columns: outcome.transformed_columns.clone(),
            on_unsupported: options.on_unsupported.to_string(),
        })?;
    }

    tracing::info!(
        output_path = %outcome.output_path.display(),
        policy_path = %outcome.policy_path.display(),
        rows = outcome.rows,
        duration_ms = start.elapsed().as_millis() as u64,
        "De-identification complete"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("source.csv", "source_nophi.csv")]
    #[test_case("dir/sub/source_header.csv", "source_header_nophi.csv")]
    #[test_case("archive.tar.txt", "archive.tar_nophi.txt")]
    #[test_case("noext", "noext_nophi")]
    fn test_output_file_name(source: &str, expected: &str) {
        assert_eq!(output_file_name(Path::new(source)).unwrap(), expected);
    }

    #[test]
    fn test_output_file_name_requires_file_name() {
        assert!(output_file_name(Path::new("/")).is_err());
    }

    #[test]
    fn test_default_options() {
        let options = DeidentifyOptions::default();
        assert_eq!(options.output_dir, PathBuf::from("."));
        assert_eq!(options.on_unsupported, UnsupportedTransformPolicy::Stop);
        assert!(options.audit_log.is_none());
    }
}
