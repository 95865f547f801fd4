use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read metadata for source file '{0}'")]
    SourceMetadata(PathBuf, #[source] std::io::Error),

    // Errors while reading the delimited file itself
    #[error("Failed to open source file '{0}'")]
    CsvOpen(PathBuf, #[source] PolarsError),
    #[error("Failed to parse '{0}' as tabular data")]
    CsvParse(PathBuf, #[source] PolarsError),

    #[error("Column '{column}' in '{path}' could not be read as text")]
    ColumnRead {
        path: PathBuf,
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("No valid observations remain in '{0}' after cleaning")]
    Empty(PathBuf),
}
