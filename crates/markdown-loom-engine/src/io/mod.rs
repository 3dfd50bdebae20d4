//! File and CSV collaborators.
//!
//! The template engine reads referenced files for `{[path]}`
//! substitution and loads CSV for the `csv` component through these
//! narrow entry points. Decoding is BOM-aware and falls back to lossy
//! UTF-8, so stray bytes never fail a load.

use std::fs;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("CSV source could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),
}

/// Reads a file as text, honoring a BOM when present.
pub fn read_text(path: &Path) -> Result<String, std::io::Error> {
    let bytes = fs::read(path)?;
    Ok(decode(&bytes))
}

fn decode(bytes: &[u8]) -> String {
    if let Some((encoding, bom_length)) = encoding_rs::Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_length..]);
        return text.into_owned();
    }
    String::from_utf8_lossy(bytes).into_owned()
}

/// Loads CSV rows from a file path or from CSV text, trimming each cell.
pub fn load_csv(source: &str) -> Result<Vec<Vec<String>>, CsvError> {
    let path = Path::new(source);
    let text = if path.is_file() {
        read_text(path)?
    } else {
        source.to_string()
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.trim().to_string()).collect());
    }
    Ok(rows)
}

fn is_numeric(cell: &str) -> bool {
    cell.parse::<f64>().is_ok()
}

fn escape_csv_cell(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// Renders rows as human-readable CSV: cells padded per column, numeric
/// cells right-aligned.
pub fn aligned_csv(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    let escaped: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..columns)
                .map(|i| escape_csv_cell(row.get(i).map(String::as_str).unwrap_or("").trim()))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            escaped
                .iter()
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
                + 1
        })
        .collect();

    escaped
        .iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, width)| {
                    if is_numeric(cell) {
                        format!("{cell:>width$}")
                    } else {
                        format!("{cell:<width$}")
                    }
                })
                .collect();
            cells.join(",").trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
