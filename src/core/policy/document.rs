//! Policy document model
//!
//! The on-disk shape is:
//!
//! ```yaml
//! label: auto_generated
//! version: 1
//! rules:
//! - match:
//!     name: b
//!   actions:
//!   - transform:
//!       type: tokenizer
//!       max_token_len: 10
//!       key: <tokenization key>
//! ```

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Label stamped on every compiled policy
pub const POLICY_LABEL: &str = "auto_generated";

/// Policy format version
pub const POLICY_VERSION: u32 = 1;

/// Declarative policy consumed by a [`PolicyEngine`](crate::anonymization::PolicyEngine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub label: String,
    pub version: u32,
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

impl PolicyDocument {
    /// Empty policy with the standard label and version
    pub fn new() -> Self {
        Self {
            label: POLICY_LABEL.to_string(),
            version: POLICY_VERSION,
            rules: Vec::new(),
        }
    }

    /// Names of the columns the policy touches, in rule order
    pub fn column_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.matcher.name.as_str()).collect()
    }
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Binds a column name to the actions applied to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyRule {
    #[serde(rename = "match")]
    pub matcher: RuleMatch,
    pub actions: Vec<PolicyAction>,
}

impl PolicyRule {
    /// Rule with a single transform action
    pub fn single(column: impl Into<String>, transform: TransformAction) -> Self {
        Self {
            matcher: RuleMatch {
                name: column.into(),
            },
            actions: vec![PolicyAction { transform }],
        }
    }
}

/// Column match criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMatch {
    pub name: String,
}

/// One action within a rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyAction {
    pub transform: TransformAction,
}

/// Transform carried by an action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransformAction {
    /// Keyed deterministic tokenization
    #[serde(rename = "tokenizer")]
    Tokenizer {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_token_len: Option<usize>,
        key: SecretString,
    },
}
