//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - human-readable console output on stderr
//! - optional JSON log files with rotation
//!
//! Log events carry paths, counts and column names. They never carry cell
//! values or the tokenization key.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
