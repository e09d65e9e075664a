//! In-memory table model
//!
//! A [`Table`] is an ordered list of rows of raw text cells plus the ordered
//! column names. Cells are never coerced: `"007"` stays `"007"`.

/// Rows of text cells with named columns
///
/// Every row has exactly as many cells as there are column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    column_names: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table, checking that every row matches the column count
    ///
    /// # Examples
    ///
    /// ```
    /// use cloak::domain::Table;
    ///
    /// let table = Table::new(
    ///     vec!["id".to_string(), "name".to_string()],
    ///     vec![vec!["1".to_string(), "John".to_string()]],
    /// ).unwrap();
    /// assert_eq!(table.width(), 2);
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn new(column_names: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, String> {
        let width = column_names.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(format!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                width
            ));
        }
        Ok(Self { column_names, rows })
    }

    /// Positional column names `"0", "1", ...` for headerless data
    pub fn positional_names(width: usize) -> Vec<String> {
        (0..width).map(|i| i.to_string()).collect()
    }

    /// Column names in order
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Name of the column at a zero-based position
    pub fn column_name(&self, index: usize) -> Option<&str> {
        self.column_names.get(index).map(String::as_str)
    }

    /// Positions of every column carrying `name`
    pub fn positions_of(&self, name: &str) -> Vec<usize> {
        self.column_names
            .iter()
            .enumerate()
            .filter(|(_, n)| n.as_str() == name)
            .map(|(i, _)| i)
            .collect()
    }

    /// Data rows (the header is never part of this)
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.column_names.len()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replaces every cell of one column with `f(cell)`
    ///
    /// Out-of-range positions leave the table untouched.
    pub fn map_column<F>(&mut self, position: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        if position >= self.width() {
            return;
        }
        for row in &mut self.rows {
            let replaced = f(&row[position]);
            row[position] = replaced;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![
                vec!["1".into(), "John".into(), "2020-01-01".into()],
                vec!["2".into(), "Jane".into(), "2020-02-01".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let result = Table::new(vec!["a".into(), "b".into()], vec![vec!["1".into()]]);
        assert!(result.is_err());
    }

    #[test]
    fn test_positional_names() {
        assert_eq!(Table::positional_names(3), vec!["0", "1", "2"]);
        assert!(Table::positional_names(0).is_empty());
    }

    #[test]
    fn test_positions_of() {
        let table = Table::new(vec!["x".into(), "y".into(), "x".into()], vec![]).unwrap();
        assert_eq!(table.positions_of("x"), vec![0, 2]);
        assert!(table.positions_of("z").is_empty());
    }

    #[test]
    fn test_map_column() {
        let mut table = sample();
        table.map_column(1, |v| v.to_uppercase());
        assert_eq!(table.rows()[0], vec!["1", "JOHN", "2020-01-01"]);
        assert_eq!(table.rows()[1], vec!["2", "JANE", "2020-02-01"]);
    }

    #[test]
    fn test_map_column_out_of_range_is_noop() {
        let mut table = sample();
        let before = table.clone();
        table.map_column(7, |_| "x".to_string());
        assert_eq!(table, before);
    }
}
