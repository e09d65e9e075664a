//! Audit logger for de-identification runs

use crate::domain::{CloakError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One audit line per run
///
/// Records where data came from and went to. Never holds cell values or the
/// tokenization key.
#[derive(Debug, Clone, Serialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    pub source_path: String,
    /// SHA-256 of the source file bytes
    pub source_sha256: String,
    pub output_path: String,
    pub policy_path: String,
    pub rows: usize,
    pub transformed_columns: Vec<String>,
    pub on_unsupported: String,
}

/// Appends [`AuditRecord`]s as JSON lines
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create a new audit logger, creating the parent directory if needed
    pub fn new(log_path: impl Into<PathBuf>) -> Result<Self> {
        let log_path = log_path.into();
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                CloakError::Io(format!(
                    "Failed to create audit log directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(Self { log_path })
    }

    /// Append one record
    pub fn log_run(&self, record: &AuditRecord) -> Result<()> {
        let json_line = serde_json::to_string(record)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                CloakError::Io(format!(
                    "Failed to open audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;
        writeln!(file, "{json_line}")?;
        Ok(())
    }
}

/// SHA-256 of a file's contents, lowercase hex
pub fn hash_file(path: impl AsRef<Path>) -> Result<String> {
    let bytes = std::fs::read(path.as_ref())?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record() -> AuditRecord {
        AuditRecord {
            timestamp: Utc::now(),
            source_path: "source.csv".to_string(),
            source_sha256: "abc".to_string(),
            output_path: "source_nophi.csv".to_string(),
            policy_path: "auto_01012024_000000.yaml".to_string(),
            rows: 2,
            transformed_columns: vec!["b".to_string()],
            on_unsupported: "stop".to_string(),
        }
    }

    #[test]
    fn test_log_run_appends_json_lines() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("audit").join("runs.log");
        let logger = AuditLogger::new(&log_path).unwrap();

        logger.log_run(&record()).unwrap();
        logger.log_run(&record()).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["rows"], 2);
        assert_eq!(parsed["transformed_columns"][0], "b");
    }

    #[test]
    fn test_hash_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "abc").unwrap();
        assert_eq!(
            hash_file(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
