//! Domain error types
//!
//! Every fallible operation in the crate reports through [`CloakError`].
//! Variants map one-to-one onto the failure conditions a run can hit, and
//! none of them carry third-party error types.

use thiserror::Error;

/// Main Cloak error type
#[derive(Debug, Error)]
pub enum CloakError {
    /// The configuration document is missing, malformed, or lacks a required field
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    /// The configuration parsed but holds an invalid value (bad column key, delimiter, ...)
    #[error("Configuration value error: {0}")]
    ConfigValue(String),

    /// The source file does not exist, cannot be read, or holds no data
    #[error("File read error: {0}")]
    FileRead(String),

    /// A record's cell count differs from the table width
    #[error("Malformed row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A column rule references a column beyond the table width (`column` is 1-based)
    #[error("Column {column} is out of range for a table with {width} columns")]
    IndexOutOfRange { column: usize, width: usize },

    /// Compilation produced no rules because every reached column had an unsupported transform
    #[error("Unsupported transform type '{kind}' for column '{column}'; policy would be empty")]
    UnsupportedTransform { column: String, kind: String },

    /// The policy engine could not parse or apply a policy
    #[error("Transform error: {0}")]
    Transform(String),

    /// I/O errors outside source loading
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization errors (policy documents, audit records)
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CloakError {
    /// Process exit code for this error
    ///
    /// 2 for configuration problems, 3 for input data problems,
    /// 4 for transformation problems, 5 for anything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CloakError::ConfigParse(_) | CloakError::ConfigValue(_) => 2,
            CloakError::FileRead(_)
            | CloakError::MalformedRow { .. }
            | CloakError::IndexOutOfRange { .. } => 3,
            CloakError::UnsupportedTransform { .. } | CloakError::Transform(_) => 4,
            CloakError::Io(_) | CloakError::Serialization(_) => 5,
        }
    }
}

impl From<std::io::Error> for CloakError {
    fn from(err: std::io::Error) -> Self {
        CloakError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CloakError {
    fn from(err: serde_json::Error) -> Self {
        CloakError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for CloakError {
    fn from(err: serde_yaml::Error) -> Self {
        CloakError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CloakError {
    fn from(err: toml::de::Error) -> Self {
        CloakError::ConfigParse(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for CloakError {
    fn from(err: csv::Error) -> Self {
        match err.kind() {
            csv::ErrorKind::Io(_) => CloakError::FileRead(err.to_string()),
            _ => CloakError::Serialization(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_malformed_row_display() {
        let err = CloakError::MalformedRow {
            line: 3,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Malformed row at line 3: expected 3 fields, found 2"
        );
    }

    #[test]
    fn test_index_out_of_range_display() {
        let err = CloakError::IndexOutOfRange {
            column: 9,
            width: 3,
        };
        assert!(err.to_string().contains("Column 9"));
        assert!(err.to_string().contains("3 columns"));
    }

    #[test_case(CloakError::ConfigParse("x".into()), 2; "config parse")]
    #[test_case(CloakError::ConfigValue("x".into()), 2; "config value")]
    #[test_case(CloakError::FileRead("x".into()), 3; "file read")]
    #[test_case(CloakError::IndexOutOfRange { column: 1, width: 1 }, 3; "out of range")]
    #[test_case(CloakError::Transform("x".into()), 4; "transform")]
    #[test_case(CloakError::Io("x".into()), 5; "io")]
    fn test_exit_codes(err: CloakError, expected: i32) {
        assert_eq!(err.exit_code(), expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: CloakError = io_err.into();
        assert!(matches!(err, CloakError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: CloakError = toml_err.into();
        assert!(matches!(err, CloakError::ConfigParse(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [unclosed").unwrap_err();
        let err: CloakError = yaml_err.into();
        assert!(matches!(err, CloakError::Serialization(_)));
    }
}
