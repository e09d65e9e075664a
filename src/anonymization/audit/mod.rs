//! Audit logging module
//!
//! Provides a JSON-lines audit trail of de-identification runs.

pub mod logger;

pub use logger::{hash_file, AuditLogger, AuditRecord};
