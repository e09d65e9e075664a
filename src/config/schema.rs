//! Configuration schema types
//!
//! Two layers live here. The `Raw*` types mirror the document users write
//! (PascalCase sections, 1-based column keys). [`CloakConfig`] is the
//! normalized model the rest of the crate works with: 0-based column indices,
//! a validated delimiter and a typed transform per column.

use crate::config::SecretString;
use crate::domain::{CloakError, ColumnIndex, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// Configuration document as written by the user
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfig {
    /// File format section
    #[serde(rename = "File")]
    pub file: RawFileSection,

    /// Column rules keyed by 1-based column number, in document order
    #[serde(rename = "Columns", deserialize_with = "deserialize_column_entries")]
    pub columns: Vec<(RawColumnKey, RawColumnRule)>,

    /// Optional tokenizer settings
    #[serde(rename = "Tokenizer", default)]
    pub tokenizer: Option<RawTokenizerSection>,
}

/// `File` section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawFileSection {
    /// Whether the first record is a header
    #[serde(rename = "Header")]
    pub header: bool,

    /// Field delimiter, a one-character string
    #[serde(rename = "Delimiter")]
    pub delimiter: String,
}

/// A column key as it appeared in the document
///
/// YAML allows `1:` as well as `"1":`; TOML always produces text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawColumnKey {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for RawColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawColumnKey::Integer(i) => write!(f, "{i}"),
            RawColumnKey::Float(x) => write!(f, "{x}"),
            RawColumnKey::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Per-column entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawColumnRule {
    pub transform: RawTransform,
}

/// Transform descriptor before validation
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTransform {
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub length: Option<i64>,
}

/// `Tokenizer` section
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTokenizerSection {
    #[serde(rename = "Key")]
    pub key: SecretString,
}

fn deserialize_column_entries<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<(RawColumnKey, RawColumnRule)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(RawColumnKey, RawColumnRule)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of column numbers to column rules")
        }

        fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// Transform requested for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformSpec {
    /// Keyed hash tokenization, truncated to `max_length` characters
    Hash { max_length: usize },
    /// Date generalization; accepted in configuration, not compiled into policies
    Date,
}

impl TransformSpec {
    /// Configuration-facing name of the transform kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            TransformSpec::Hash { .. } => "HASH",
            TransformSpec::Date => "DATE",
        }
    }

    fn from_raw(column: ColumnIndex, raw: &RawTransform) -> Result<Self> {
        match raw.kind.trim().to_ascii_uppercase().as_str() {
            "HASH" => {
                let length = raw.length.ok_or_else(|| {
                    CloakError::ConfigValue(format!(
                        "column {}: HASH transform requires a length",
                        column.one_based()
                    ))
                })?;
                if length < 1 {
                    return Err(CloakError::ConfigValue(format!(
                        "column {}: HASH length must be at least 1, got {}",
                        column.one_based(),
                        length
                    )));
                }
                Ok(TransformSpec::Hash {
                    max_length: length as usize,
                })
            }
            "DATE" => Ok(TransformSpec::Date),
            other => Err(CloakError::ConfigValue(format!(
                "column {}: unknown transform type '{}' (expected HASH or DATE)",
                column.one_based(),
                other
            ))),
        }
    }
}

/// Delimiter and header convention of the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFormat {
    has_header: bool,
    delimiter: u8,
}

impl FileFormat {
    /// Creates a format; the delimiter must be a single ASCII character
    pub fn new(has_header: bool, delimiter: char) -> std::result::Result<Self, String> {
        if !delimiter.is_ascii() {
            return Err(format!("delimiter '{delimiter}' is not an ASCII character"));
        }
        if delimiter == '\n' || delimiter == '\r' || delimiter == '"' {
            return Err(format!("delimiter {delimiter:?} is not allowed"));
        }
        Ok(Self {
            has_header,
            delimiter: delimiter as u8,
        })
    }

    /// Whether the first record holds column names
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Delimiter byte
    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Delimiter as a character, for display
    pub fn delimiter_char(&self) -> char {
        self.delimiter as char
    }
}

/// Normalized Cloak configuration
#[derive(Debug, Clone)]
pub struct CloakConfig {
    /// Source file format
    pub file_format: FileFormat,

    /// Transform per 0-based column, iterated in ascending column order
    pub column_rules: BTreeMap<ColumnIndex, TransformSpec>,

    /// Key for tokenization; required only when a HASH rule is compiled
    pub tokenizer_key: Option<SecretString>,
}

impl CloakConfig {
    /// Validates a raw document and normalizes it
    ///
    /// Every column key is decremented exactly once. Keys that are not
    /// positive integers, or two keys naming the same column, are rejected.
    pub fn from_raw(raw: RawConfig) -> Result<Self> {
        let mut chars = raw.file.delimiter.chars();
        let delimiter = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(CloakError::ConfigValue(format!(
                    "File.Delimiter must be exactly one character, got '{}'",
                    raw.file.delimiter
                )))
            }
        };
        let file_format = FileFormat::new(raw.file.header, delimiter)
            .map_err(|e| CloakError::ConfigValue(format!("File.Delimiter: {e}")))?;

        let mut column_rules = BTreeMap::new();
        for (key, rule) in &raw.columns {
            let index = column_index_from_key(key)?;
            let spec = TransformSpec::from_raw(index, &rule.transform)?;
            if column_rules.insert(index, spec).is_some() {
                return Err(CloakError::ConfigValue(format!(
                    "column {} is configured more than once",
                    index.one_based()
                )));
            }
        }

        Ok(Self {
            file_format,
            column_rules,
            tokenizer_key: raw.tokenizer.map(|t| t.key),
        })
    }
}

fn column_index_from_key(key: &RawColumnKey) -> Result<ColumnIndex> {
    let parsed = match key {
        RawColumnKey::Integer(i) => ColumnIndex::from_one_based(*i),
        RawColumnKey::Text(s) => ColumnIndex::parse_one_based(s),
        RawColumnKey::Float(_) => Err(format!("column key '{key}' is not an integer")),
    };
    parsed.map_err(|e| CloakError::ConfigValue(format!("Columns: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<CloakConfig> {
        let raw: RawConfig = serde_yaml::from_str(yaml).unwrap();
        CloakConfig::from_raw(raw)
    }

    #[test]
    fn test_integer_and_text_keys() {
        let config = parse(
            r#"
File: {Header: true, Delimiter: ","}
Columns:
  1: {transform: {type: HASH, length: 10}}
  "3": {transform: {type: DATE}}
"#,
        )
        .unwrap();

        let keys: Vec<usize> = config.column_rules.keys().map(|k| k.get()).collect();
        assert_eq!(keys, vec![0, 2]);
        assert_eq!(
            config.column_rules[&ColumnIndex::new(0)],
            TransformSpec::Hash { max_length: 10 }
        );
        assert_eq!(config.column_rules[&ColumnIndex::new(2)], TransformSpec::Date);
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let result = parse(
            r#"
File: {Header: true, Delimiter: ","}
Columns:
  1: {transform: {type: HASH, length: 10}}
  "1": {transform: {type: HASH, length: 5}}
"#,
        );
        assert!(matches!(result, Err(CloakError::ConfigValue(_))));
    }

    #[test]
    fn test_float_key_rejected() {
        let result = parse(
            r#"
File: {Header: true, Delimiter: ","}
Columns:
  1.5: {transform: {type: HASH, length: 10}}
"#,
        );
        assert!(matches!(result, Err(CloakError::ConfigValue(_))));
    }

    #[test]
    fn test_hash_requires_length() {
        let result = parse(
            r#"
File: {Header: true, Delimiter: ","}
Columns:
  1: {transform: {type: HASH}}
"#,
        );
        assert!(matches!(result, Err(CloakError::ConfigValue(_))));
    }

    #[test]
    fn test_transform_type_is_case_insensitive() {
        let config = parse(
            r#"
File: {Header: false, Delimiter: "|"}
Columns:
  2: {transform: {type: hash, length: 4}}
"#,
        )
        .unwrap();
        assert_eq!(config.file_format.delimiter(), b'|');
        assert!(!config.file_format.has_header());
        assert_eq!(
            config.column_rules[&ColumnIndex::new(1)],
            TransformSpec::Hash { max_length: 4 }
        );
    }

    #[test]
    fn test_unknown_transform_rejected() {
        let result = parse(
            r#"
File: {Header: true, Delimiter: ","}
Columns:
  1: {transform: {type: SCRAMBLE}}
"#,
        );
        assert!(matches!(result, Err(CloakError::ConfigValue(_))));
    }

    #[test]
    fn test_multi_character_delimiter_rejected() {
        let result = parse(
            r#"
File: {Header: true, Delimiter: ",,"}
Columns: {}
"#,
        );
        assert!(matches!(result, Err(CloakError::ConfigValue(_))));
    }

    #[test]
    fn test_file_format_rejects_non_ascii() {
        assert!(FileFormat::new(true, '§').is_err());
        assert!(FileFormat::new(true, '\t').is_ok());
    }

    #[test]
    fn test_missing_columns_section_fails_to_parse() {
        let result = serde_yaml::from_str::<RawConfig>("File: {Header: true, Delimiter: \",\"}\n");
        assert!(result.is_err());
    }
}
