use std::path::Path;

use ndarray::Array2;

use super::model::RunFile;
use crate::error::{ReplicaError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load one replication file: a delimited numeric matrix with one row per
/// iteration and one column per output. There is no header row.
///
/// The delimiter is taken from the first non-empty line: comma, semicolon,
/// tab, or otherwise runs of spaces. Empty fields read as `0.0` and short
/// rows are padded with zeros up to the widest row.
pub fn load_run(path: &Path) -> Result<RunFile> {
    let text = std::fs::read_to_string(path).map_err(|source| ReplicaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let data = parse_matrix(&text, path)?;
    log::debug!(
        "Loaded {} ({} rows x {} columns)",
        path.display(),
        data.nrows(),
        data.ncols()
    );
    Ok(RunFile {
        path: path.to_path_buf(),
        data,
    })
}

// ---------------------------------------------------------------------------
// Delimited text parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Byte(u8),
    Whitespace,
}

fn detect_delimiter(text: &str) -> Delimiter {
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    [b',', b';', b'\t']
        .into_iter()
        .find(|&b| first.contains(b as char))
        .map(Delimiter::Byte)
        .unwrap_or(Delimiter::Whitespace)
}

fn parse_matrix(text: &str, path: &Path) -> Result<Array2<f64>> {
    let rows = match detect_delimiter(text) {
        Delimiter::Byte(byte) => delimited_rows(text, byte, path)?,
        Delimiter::Whitespace => whitespace_rows(text, path)?,
    };

    let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut data = Array2::<f64>::zeros((rows.len(), ncols));
    for (r, row) in rows.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            data[[r, c]] = value;
        }
    }
    Ok(data)
}

/// Rows split on a single delimiter byte by the csv reader.
fn delimited_rows(text: &str, delimiter: u8, path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| ReplicaError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line() as usize);
        rows.push(parse_row(record.iter(), path, line)?);
    }
    Ok(rows)
}

/// Rows split on runs of spaces and tabs.
fn whitespace_rows(text: &str, path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace().peekable();
        if fields.peek().is_none() {
            continue;
        }
        rows.push(parse_row(fields, path, i + 1)?);
    }
    Ok(rows)
}

/// Parse one row; `line` is the 1-based line number in the file.
fn parse_row<'a>(
    fields: impl Iterator<Item = &'a str>,
    path: &Path,
    line: usize,
) -> Result<Vec<f64>> {
    fields
        .enumerate()
        .map(|(col_no, field)| parse_field(field, path, line, col_no))
        .collect()
}

fn parse_field(field: &str, path: &Path, line: usize, column: usize) -> Result<f64> {
    if field.is_empty() {
        return Ok(0.0);
    }
    field.parse::<f64>().map_err(|_| ReplicaError::Parse {
        path: path.to_path_buf(),
        row: line,
        column: column + 1,
        value: field.to_string(),
    })
}
