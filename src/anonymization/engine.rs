//! Policy application engine
//!
//! This module provides [`AnonymizationEngine`], which applies a parsed
//! [`PolicyDocument`] to a [`Table`]. Each rule must match exactly one column
//! by name; its actions are applied in order to every cell of that column.
//!
//! Policies reach the engine through a file, mirroring how they are handed
//! over in a run:
//!
//! ```no_run
//! use cloak::anonymization::{parse_policy, AnonymizationEngine, PolicyEngine};
//! use cloak::domain::Table;
//!
//! # fn example(table: Table) -> cloak::domain::Result<()> {
//! let policy = parse_policy("auto_03072021_090502.yaml")?;
//! let transformed = AnonymizationEngine::new().apply(&policy, table)?;
//! println!("{} rows transformed", transformed.len());
//! # Ok(())
//! # }
//! ```

use crate::anonymization::anonymizer;
use crate::core::policy::{PolicyDocument, POLICY_VERSION};
use crate::domain::{CloakError, Result, Table};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Applies policy documents to tables
///
/// Implementations must be deterministic: the same policy and table always
/// produce the same output.
pub trait PolicyEngine {
    /// Returns a new table with every matched column transformed
    fn apply(&self, policy: &PolicyDocument, table: Table) -> Result<Table>;
}

/// Reads a policy document from disk
///
/// # Errors
///
/// [`CloakError::Transform`] if the file cannot be read or is not a valid policy
pub fn parse_policy(path: impl AsRef<Path>) -> Result<PolicyDocument> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| {
        CloakError::Transform(format!("Failed to read policy {}: {}", path.display(), e))
    })?;
    serde_yaml::from_str(&contents).map_err(|e| {
        CloakError::Transform(format!("Invalid policy {}: {}", path.display(), e))
    })
}

/// Default engine backed by the built-in anonymization strategies
#[derive(Debug, Default, Clone, Copy)]
pub struct AnonymizationEngine;

impl AnonymizationEngine {
    /// Create a new engine
    pub fn new() -> Self {
        Self
    }
}

impl PolicyEngine for AnonymizationEngine {
    fn apply(&self, policy: &PolicyDocument, mut table: Table) -> Result<Table> {
        let start = Instant::now();

        if policy.version != POLICY_VERSION {
            return Err(CloakError::Transform(format!(
                "Unsupported policy version {} (expected {})",
                policy.version, POLICY_VERSION
            )));
        }

        for rule in &policy.rules {
            let position = match table.positions_of(&rule.matcher.name).as_slice() {
                [position] => *position,
                [] => {
                    return Err(CloakError::Transform(format!(
                        "Policy rule matches column '{}', which is not in the table",
                        rule.matcher.name
                    )))
                }
                many => {
                    return Err(CloakError::Transform(format!(
                        "Policy rule matches {} columns named '{}'",
                        many.len(),
                        rule.matcher.name
                    )))
                }
            };

            for action in &rule.actions {
                let strategy = anonymizer::for_action(&action.transform);
                let mut failure = None;
                table.map_column(position, |cell| match strategy.anonymize(cell) {
                    Ok(v) => v,
                    Err(e) => {
                        failure.get_or_insert(e);
                        String::new()
                    }
                });
                if let Some(e) = failure {
                    return Err(e);
                }
                tracing::debug!(
                    column = %rule.matcher.name,
                    action = strategy.name(),
                    "Action applied"
                );
            }
        }

        tracing::info!(
            policy = %policy.label,
            rules = policy.rules.len(),
            rows = table.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Policy applied"
        );

        Ok(table)
    }
}
