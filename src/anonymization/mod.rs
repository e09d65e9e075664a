//! Anonymization module for Cloak
//!
//! This module applies compiled policies to tables. It is the only part of
//! the crate that touches cell values.
//!
//! # Architecture
//!
//! - **Engine**: [`PolicyEngine`] trait and the default [`AnonymizationEngine`]
//! - **Anonymizers**: one strategy per policy action type (keyed tokenization)
//! - **Audit**: JSON-lines record of each run, without any cell values
//!
//! # Usage
//!
//! ```rust,ignore
//! use cloak::anonymization::{parse_policy, AnonymizationEngine, PolicyEngine};
//!
//! let policy = parse_policy(&policy_path)?;
//! let transformed = AnonymizationEngine::new().apply(&policy, table)?;
//! ```

pub mod anonymizer;
pub mod audit;
pub mod engine;

pub use audit::{AuditLogger, AuditRecord};
pub use engine::{parse_policy, AnonymizationEngine, PolicyEngine};
