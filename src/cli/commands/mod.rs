//! CLI command implementations

pub mod deidentify;
pub mod init;
pub mod validate;
