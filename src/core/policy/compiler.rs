//! Rule compilation
//!
//! Turns the index-keyed column rules of a [`CloakConfig`] into a
//! name-keyed [`PolicyDocument`], and persists that document for the engine.

use super::document::{PolicyDocument, PolicyRule, TransformAction};
use crate::config::{CloakConfig, TransformSpec};
use crate::domain::{CloakError, ColumnIndex, Result, Table};
use chrono::{DateTime, Local};
use secrecy::ExposeSecret;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// What compilation does when it reaches a transform it cannot express
///
/// `Stop` ends compilation at the first unsupported column, dropping every
/// later column as well, supported or not. `Skip` drops only the unsupported
/// column. `Stop` is the default so that existing pipelines produce the same
/// policies they always have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum UnsupportedTransformPolicy {
    #[default]
    Stop,
    Skip,
}

impl fmt::Display for UnsupportedTransformPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedTransformPolicy::Stop => write!(f, "stop"),
            UnsupportedTransformPolicy::Skip => write!(f, "skip"),
        }
    }
}

/// A column rule after its index was resolved against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub index: ColumnIndex,
    pub name: String,
    pub transform: TransformSpec,
}

/// Resolves every configured column index to the table's column name
///
/// Output order follows ascending column index.
///
/// # Errors
///
/// [`CloakError::IndexOutOfRange`] if an index is at or beyond the table width.
pub fn resolve_column_names(config: &CloakConfig, table: &Table) -> Result<Vec<ResolvedColumn>> {
    config
        .column_rules
        .iter()
        .map(|(index, transform)| {
            let name = table
                .column_name(index.get())
                .ok_or_else(|| CloakError::IndexOutOfRange {
                    column: index.one_based(),
                    width: table.width(),
                })?;
            Ok(ResolvedColumn {
                index: *index,
                name: name.to_string(),
                transform: *transform,
            })
        })
        .collect()
}

/// Compiles the configured column rules into a policy document
///
/// HASH columns become `tokenizer` rules carrying the configured key. Any
/// other kind is unsupported and handled per `on_unsupported`.
///
/// # Errors
///
/// - [`CloakError::IndexOutOfRange`] from column resolution
/// - [`CloakError::ConfigValue`] if a HASH rule is compiled without a tokenizer key
/// - [`CloakError::UnsupportedTransform`] if no rule was compiled and an
///   unsupported column was reached
pub fn compile_policy(
    config: &CloakConfig,
    table: &Table,
    on_unsupported: UnsupportedTransformPolicy,
) -> Result<PolicyDocument> {
    let columns = resolve_column_names(config, table)?;
    let mut document = PolicyDocument::new();
    let mut first_unsupported: Option<&ResolvedColumn> = None;

    for (position, column) in columns.iter().enumerate() {
        match column.transform {
            TransformSpec::Hash { max_length } => {
                let key = config
                    .tokenizer_key
                    .as_ref()
                    .filter(|k| !k.expose_secret().is_blank())
                    .ok_or_else(|| {
                        CloakError::ConfigValue(format!(
                            "column {} ('{}') uses HASH but no tokenizer key is configured; \
                             set Tokenizer.Key or {}",
                            column.index.one_based(),
                            column.name,
                            crate::config::TOKEN_KEY_ENV
                        ))
                    })?;
                document.rules.push(PolicyRule::single(
                    column.name.clone(),
                    TransformAction::Tokenizer {
                        max_token_len: Some(max_length),
                        key: key.clone(),
                    },
                ));
            }
            unsupported => {
                first_unsupported.get_or_insert(column);
                match on_unsupported {
                    UnsupportedTransformPolicy::Stop => {
                        let omitted: Vec<&str> =
                            columns[position..].iter().map(|c| c.name.as_str()).collect();
                        tracing::warn!(
                            column = %column.name,
                            transform = unsupported.kind_name(),
                            omitted = ?omitted,
                            "Unsupported transform; compilation stopped and remaining columns were left untransformed"
                        );
                        break;
                    }
                    UnsupportedTransformPolicy::Skip => {
                        tracing::warn!(
                            column = %column.name,
                            transform = unsupported.kind_name(),
                            "Unsupported transform; column skipped"
                        );
                    }
                }
            }
        }
    }

    if document.rules.is_empty() {
        if let Some(column) = first_unsupported {
            return Err(CloakError::UnsupportedTransform {
                column: column.name.clone(),
                kind: column.transform.kind_name().to_string(),
            });
        }
    }

    tracing::info!(
        rules = document.rules.len(),
        columns = ?document.column_names(),
        on_unsupported = %on_unsupported,
        "Policy compiled"
    );

    Ok(document)
}

/// File name for a policy compiled at `now`: `auto_<MMDDYYYY_HHMMSS>.yaml`
pub fn policy_file_name(now: &DateTime<Local>) -> String {
    format!("auto_{}.yaml", now.format("%m%d%Y_%H%M%S"))
}

/// Writes a policy document into `dir` and returns the path written
///
/// An existing file with the same name is overwritten.
pub fn write_policy(
    document: &PolicyDocument,
    dir: impl AsRef<Path>,
    now: &DateTime<Local>,
) -> Result<PathBuf> {
    let path = dir.as_ref().join(policy_file_name(now));
    let yaml = serde_yaml::to_string(document)?;
    fs::write(&path, yaml).map_err(|e| {
        CloakError::Io(format!("Failed to write policy {}: {}", path.display(), e))
    })?;

    tracing::info!(policy_path = %path.display(), rules = document.rules.len(), "Policy written");
    Ok(path)
}
