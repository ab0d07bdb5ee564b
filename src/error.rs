// Error kinds shared across table construction, series derivation, chart
// option building and dashboard persistence.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A referenced category or value column does not exist in the table.
    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    /// The table has zero data rows; derivation refuses to produce vacuous
    /// series (callers skip chart rendering instead).
    #[error("Table has no rows")]
    EmptyTable,

    /// A chart-type tag outside the supported set.
    #[error("Unsupported chart type '{0}'")]
    UnsupportedChartType(String),

    /// Ingestion could not open the input file.
    #[error("Cannot read file '{path}': {source}")]
    FileNotReadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A dashboard document could not be written out.
    #[error("Cannot write file '{path}': {source}")]
    FileNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Columns handed to `Table::new` disagree on row count.
    #[error("Column '{name}' has {actual} rows, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// The input carried no header row / no columns at all.
    #[error("No columns found in input")]
    NoColumns,

    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed dashboard document: {0}")]
    MalformedDashboard(#[from] serde_json::Error),

    /// Structural problems in non-CSV table input (ragged rows, non-object
    /// JSON items, unsupported JSON value types).
    #[error("Malformed table data: {0}")]
    MalformedData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
