//! Column identifier types with validation
//!
//! Users count columns from 1; everything inside the crate counts from 0.
//! [`ColumnIndex`] is the only place that conversion happens.

use std::fmt;

/// Zero-based column index
///
/// # Examples
///
/// ```
/// use cloak::domain::ids::ColumnIndex;
///
/// let index = ColumnIndex::from_one_based(2).unwrap();
/// assert_eq!(index.get(), 1);
/// assert_eq!(index.one_based(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColumnIndex(usize);

impl ColumnIndex {
    /// Creates an index from a zero-based position
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Converts a user-facing 1-based column number
    ///
    /// Returns `Err` for zero and negative numbers.
    pub fn from_one_based(column: i64) -> Result<Self, String> {
        if column < 1 {
            return Err(format!("column numbers start at 1, got {column}"));
        }
        usize::try_from(column - 1)
            .map(Self)
            .map_err(|_| format!("column number {column} is too large"))
    }

    /// Parses a user-facing 1-based column key such as `"3"`
    pub fn parse_one_based(key: &str) -> Result<Self, String> {
        let column: i64 = key
            .trim()
            .parse()
            .map_err(|_| format!("column key '{key}' is not an integer"))?;
        Self::from_one_based(column)
    }

    /// Returns the zero-based position
    pub fn get(&self) -> usize {
        self.0
    }

    /// Returns the user-facing 1-based column number
    pub fn one_based(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for ColumnIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
