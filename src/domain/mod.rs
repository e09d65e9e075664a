//! Domain models and types for Cloak.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Column identifiers** ([`ColumnIndex`]), the single place where
//!   user-facing 1-based column numbers become 0-based positions
//! - **The table model** ([`Table`]) that every stage reads or produces
//! - **Error types** ([`CloakError`]) and the [`Result`] alias
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, CloakError>`]:
//!
//! ```rust,no_run
//! use cloak::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = cloak::config::load_config("config.yaml")?;
//!     println!("{} column rules", config.column_rules.len());
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod table;

pub use errors::CloakError;
pub use ids::ColumnIndex;
pub use result::Result;
pub use table::Table;
