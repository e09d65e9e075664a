//! Core business logic for Cloak.
//!
//! # Modules
//!
//! - [`table`] - Delimited-file loading and writing
//! - [`policy`] - Column resolution, policy compilation and persistence
//! - [`deidentify`] - End-to-end coordination of a run
//!
//! # Workflow
//!
//! 1. **Load Config**: parse and normalize column rules (1-based to 0-based)
//! 2. **Load Table**: read the source with the configured delimiter and header flag
//! 3. **Compile**: resolve column numbers to names and build the policy
//! 4. **Persist**: write `auto_<MMDDYYYY_HHMMSS>.yaml`
//! 5. **Apply**: run the policy through the engine
//! 6. **Write**: save `<stem>_nophi<ext>`
//!
//! # Example
//!
//! ```rust,no_run
//! use cloak::core::deidentify::{deidentify, DeidentifyOptions};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let outcome = deidentify("source.csv", "config.yaml", &DeidentifyOptions::default())?;
//! println!("No PHI file: {}", outcome.output_path.display());
//! println!("Policy: {}", outcome.policy_path.display());
//! # Ok(())
//! # }
//! ```

pub mod deidentify;
pub mod policy;
pub mod table;
