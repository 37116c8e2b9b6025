//! Typed failures for the parse → cache → match pipeline.
//!
//! "No matching row" is never an error: lookups answer with a sentinel
//! string instead (see [`crate::NOT_FOUND`] and [`crate::EMPTY_AVERAGE`]).

use std::path::PathBuf;

/// The table text could not be turned into a [`crate::ParsedTable`].
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A data record carries a different number of fields than the header.
    #[error("line {line}: expected {expected} fields (from header), found {found}")]
    FieldCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// The header names the same column twice.
    #[error("duplicate column `{column}` in header")]
    DuplicateColumn { column: String },

    /// The record reader itself failed (e.g. invalid UTF-8).
    #[error("reading CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// A lookup or aggregation could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// The query's keys are not exactly the table's key columns.
    #[error(
        "key mismatch: missing [{}], unexpected [{}]",
        missing.join(", "),
        unexpected.join(", ")
    )]
    KeyMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },

    /// A matched row's value is not an integer.
    #[error("line {line}: value `{value}` is not an integer")]
    ValueFormat { value: String, line: u64 },

    /// The table has rows but no value column to answer from.
    #[error("table has no `{column}` column")]
    MissingValueColumn { column: String },

    #[error(transparent)]
    Table(#[from] TableError),
}

/// Settings file problems.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("reading settings {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing settings: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("`{field}` must be non-zero")]
    ZeroWeight { field: &'static str },
}
