use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use csv::{ReaderBuilder, StringRecord};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{NumericTable, Signal};

/// Errors that can occur while turning a file into a [`Signal`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("no row with at least two numeric fields in the first {scanned} rows")]
    NoNumericData { scanned: usize },

    #[error("only {found} numeric column(s) found, at least 2 are required")]
    TooFewColumns { found: usize },

    #[error("no fully numeric rows left after cleaning")]
    NoNumericRows,

    #[error("column index {requested} is out of range for a table with {available} column(s)")]
    InsufficientColumns { requested: usize, available: usize },
}

/// How delimited text is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Field delimiter for text files (`.tsv` always uses a tab).
    pub delimiter: u8,
    /// How many leading rows may be skipped while looking for numeric data.
    pub max_scan_rows: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_scan_rows: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the `(x, y)` pair at the given 0-based column indices.
pub fn load_signal(
    path: &Path,
    x_column: usize,
    y_column: usize,
    options: &LoadOptions,
) -> Result<Signal, LoadError> {
    let table = read_numeric_table(path, options)?;
    let signal = table.select(x_column, y_column)?;
    log::debug!(
        "Loaded {} samples from {} (columns {x_column}, {y_column})",
        signal.len(),
        path.display()
    );
    Ok(signal)
}

/// Load one column of a file by 0-based index.
pub fn load_column(path: &Path, column: usize, options: &LoadOptions) -> Result<Vec<f64>, LoadError> {
    let table = read_numeric_table(path, options)?;
    table.column(column).ok_or(LoadError::InsufficientColumns {
        requested: column,
        available: table.width(),
    })
}

/// Read a file into a fully numeric table.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` / `.pq` – any flat table; every column is coerced to `f64`
/// * `.tsv`             – tab-delimited text
/// * anything else      – delimited text using `options.delimiter`
pub fn read_numeric_table(path: &Path, options: &LoadOptions) -> Result<NumericTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "tsv" => load_delimited(
            path,
            &LoadOptions {
                delimiter: b'\t',
                ..*options
            },
        ),
        _ => load_delimited(path, options),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// Instrument exports often start with free-form metadata lines.  The data
/// starts at the first row holding at least two numeric fields; the last
/// non-empty row before it is taken as the header unless it is narrower than
/// that first data row.
fn load_delimited(path: &Path, options: &LoadOptions) -> Result<NumericTable, LoadError> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(file);

    let records = reader
        .records()
        .collect::<Result<Vec<StringRecord>, csv::Error>>()?;

    parse_records(&records, options.max_scan_rows)
}

fn parse_records(records: &[StringRecord], max_scan_rows: usize) -> Result<NumericTable, LoadError> {
    let start = records
        .iter()
        .take(max_scan_rows)
        .position(|record| numeric_field_count(record) >= 2)
        .ok_or(LoadError::NoNumericData {
            scanned: records.len().min(max_scan_rows),
        })?;

    let data = &records[start..];

    // A candidate narrower than the first data row is a metadata line that
    // happens to contain the delimiter, not a header.
    let header = records[..start]
        .iter()
        .rev()
        .find(|r| !is_blank(r))
        .filter(|r| r.len() >= data[0].len());

    if let Some(header) = header {
        let table = build_table(header_names(header), data);
        if table.width() >= 2 && !table.is_empty() {
            return Ok(table);
        }
        log::debug!(
            "Header row gives {} column(s) and {} row(s); retrying without header",
            table.width(),
            table.len()
        );
    }

    let width = data[0].len();
    let table = build_table(default_names(width), data);
    if table.width() < 2 {
        return Err(LoadError::TooFewColumns {
            found: table.width(),
        });
    }
    if table.is_empty() {
        return Err(LoadError::NoNumericRows);
    }
    Ok(table)
}

/// Coerce every data row across the full table width.  A row with a single
/// non-numeric or missing cell is dropped as a whole.
fn build_table(columns: Vec<String>, data: &[StringRecord]) -> NumericTable {
    let width = columns.len();
    let mut dropped = 0usize;

    let rows: Vec<Vec<f64>> = data
        .iter()
        .filter(|record| !is_blank(record))
        .filter_map(|record| {
            let row = (0..width)
                .map(|i| record.get(i).and_then(parse_cell))
                .collect::<Option<Vec<f64>>>();
            if row.is_none() {
                dropped += 1;
            }
            row
        })
        .collect();

    if dropped > 0 {
        log::debug!("Dropped {dropped} row(s) containing non-numeric cells");
    }

    NumericTable { columns, rows }
}

fn parse_cell(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn numeric_field_count(record: &StringRecord) -> usize {
    record.iter().filter(|cell| parse_cell(cell).is_some()).count()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn header_names(record: &StringRecord) -> Vec<String> {
    record
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim().trim_matches('\u{feff}');
            if name.is_empty() {
                format!("Column {}", i + 1)
            } else {
                name.to_string()
            }
        })
        .collect()
}

fn default_names(width: usize) -> Vec<String> {
    (1..=width).map(|i| format!("Column {i}")).collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table.  Column names come from the schema; each cell
/// is coerced to `f64` under the same row-dropping rule as text files.
fn load_parquet(path: &Path) -> Result<NumericTable, LoadError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    if columns.len() < 2 {
        return Err(LoadError::TooFewColumns {
            found: columns.len(),
        });
    }

    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let values = batch
                .columns()
                .iter()
                .map(|col| cell_as_f64(col, row))
                .collect::<Option<Vec<f64>>>();
            match values {
                Some(values) => rows.push(values),
                None => dropped += 1,
            }
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {dropped} parquet row(s) containing non-numeric cells");
    }
    if rows.is_empty() {
        return Err(LoadError::NoNumericRows);
    }

    Ok(NumericTable { columns, rows })
}

/// Extract a single finite value from an Arrow column at a given row.
fn cell_as_f64(col: &Arc<dyn Array>, row: usize) -> Option<f64> {
    if col.is_null(row) {
        return None;
    }
    let value = match col.data_type() {
        DataType::Float64 => col.as_any().downcast_ref::<Float64Array>()?.value(row),
        DataType::Float32 => col.as_any().downcast_ref::<Float32Array>()?.value(row) as f64,
        DataType::Int64 => col.as_any().downcast_ref::<Int64Array>()?.value(row) as f64,
        DataType::Int32 => col.as_any().downcast_ref::<Int32Array>()?.value(row) as f64,
        DataType::Utf8 => parse_cell(col.as_string::<i32>().value(row))?,
        DataType::LargeUtf8 => parse_cell(col.as_string::<i64>().value(row))?,
        _ => return None,
    };
    Some(value).filter(|v| v.is_finite())
}
