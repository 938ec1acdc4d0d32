//! Tabular rendering of raw records
//!
//! The column schema is fixed by the first record's key order; every later
//! record is laid out against it, missing keys becoming empty cells rather
//! than new columns. Output is CSV with standard double-quote escaping.

use crate::output::traits::OutputResult;
use crate::storage::RawRecord;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// An in-memory table: fixed columns plus one row of cells per record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Builds a table from raw records.
///
/// The first record fixes the columns, in its key order. Keys a later
/// record does not carry render as empty cells; keys outside the schema are
/// dropped. An empty input produces an empty table.
pub fn build_table(records: &[RawRecord]) -> Table {
    let columns: Vec<String> = match records.first() {
        Some(first) => first.keys().cloned().collect(),
        None => Vec::new(),
    };

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).map(cell_text).unwrap_or_default())
                .collect()
        })
        .collect();

    Table { columns, rows }
}

/// Renders one JSON value as cell text: strings verbatim, null empty.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Writes a table as CSV to `path`, header row first.
///
/// The file is created or truncated, so re-consolidating the same records
/// overwrites rather than appends.
pub fn write_csv(table: &Table, path: &Path) -> OutputResult<()> {
    let mut file = std::fs::File::create(path)?;

    write_row(&mut file, &table.columns)?;
    for row in &table.rows {
        write_row(&mut file, row)?;
    }

    file.flush()?;
    Ok(())
}

fn write_row<W: Write>(mut w: W, row: &[String]) -> std::io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, ",")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains(',') || cell.contains('"') || cell.contains('\n') || cell.contains('\r')
}
