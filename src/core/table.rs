//! Delimited-file loading and writing
//!
//! Cells are read and written as raw text. Width is enforced on load: a
//! record with the wrong number of fields aborts the whole load, because the
//! position of every cell matters when column numbers are resolved to names.

use crate::config::FileFormat;
use crate::domain::{CloakError, Result, Table};
use csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Reads a delimited file into a [`Table`]
///
/// With a header, the first record supplies column names and is not a data
/// row. Repeated header names get a `.N` suffix (`name`, `name.1`) so every
/// column name is unique. Without a header, columns are named `"0", "1", ...`
/// and every record is data.
///
/// # Errors
///
/// - [`CloakError::FileRead`] if the file is missing, unreadable, not UTF-8, or empty
/// - [`CloakError::MalformedRow`] if a record's field count differs from the width
pub fn load_table(path: impl AsRef<Path>, format: &FileFormat) -> Result<Table> {
    let path = path.as_ref();

    let mut reader = ReaderBuilder::new()
        .delimiter(format.delimiter())
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_path(path)
        .map_err(|e| {
            CloakError::FileRead(format!("Failed to open {}: {}", path.display(), e))
        })?;

    let mut records = reader.records();
    let first = match records.next() {
        Some(record) => read_record(path, record)?,
        None => {
            return Err(CloakError::FileRead(format!(
                "{} contains no records",
                path.display()
            )))
        }
    };

    let width = first.len();
    let (column_names, mut rows) = if format.has_header() {
        (unique_column_names(first.iter()), Vec::new())
    } else {
        (
            Table::positional_names(width),
            vec![first.iter().map(str::to_string).collect()],
        )
    };

    for record in records {
        let record = read_record(path, record)?;
        if record.len() != width {
            return Err(CloakError::MalformedRow {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: width,
                found: record.len(),
            });
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    let table = Table::new(column_names, rows).map_err(CloakError::FileRead)?;

    tracing::debug!(
        source = %path.display(),
        columns = table.width(),
        rows = table.len(),
        has_header = format.has_header(),
        "Source table loaded"
    );

    Ok(table)
}

/// Suffixes repeated names with `.1`, `.2`, ... skipping names already taken
fn unique_column_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut counts: HashMap<&'a str, usize> = HashMap::new();

    names
        .map(|name| {
            let count = counts.entry(name).or_insert(0);
            let mut unique = name.to_string();
            while taken.contains(&unique) {
                *count += 1;
                unique = format!("{name}.{count}");
            }
            taken.insert(unique.clone());
            unique
        })
        .collect()
}

fn read_record(path: &Path, record: csv::Result<StringRecord>) -> Result<StringRecord> {
    record.map_err(|e| CloakError::FileRead(format!("Failed to read {}: {}", path.display(), e)))
}

/// Writes a [`Table`] with the given delimiter and header convention
///
/// The header row is written only when the format declares one. Records end
/// in `\n` and fields are quoted only when they need to be.
pub fn write_table(table: &Table, path: impl AsRef<Path>, format: &FileFormat) -> Result<()> {
    let path = path.as_ref();

    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .terminator(Terminator::Any(b'\n'))
        .from_path(path)
        .map_err(|e| CloakError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    let write_err =
        |e: csv::Error| CloakError::Io(format!("Failed to write {}: {}", path.display(), e));
    if format.has_header() {
        writer.write_record(table.column_names()).map_err(write_err)?;
    }
    for row in table.rows() {
        writer.write_record(row).map_err(write_err)?;
    }
    writer
        .flush()
        .map_err(|e| CloakError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    tracing::debug!(
        output = %path.display(),
        rows = table.len(),
        "Table written"
    );

    Ok(())
}
