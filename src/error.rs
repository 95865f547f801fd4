use crate::dataset::error::DatasetError;
use crate::metrics::error::FitError;
use polars::error::PolarsError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HurricaneError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error(transparent)]
    Fit(#[from] FitError),

    #[error("Failed to build plot frame")]
    FrameBuild(#[from] PolarsError),

    #[error("Failed to encode response payload")]
    Encode(#[from] serde_json::Error),
}

/// The closed set of failure categories a boundary layer has to tell apart.
///
/// Each kind maps to exactly one HTTP status via [`ErrorKind::status_code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The source file is missing, unreadable or not a delimited table.
    Load,
    /// A required column is absent from the header.
    MissingColumn,
    /// Every row was dropped while cleaning.
    EmptyDataset,
    /// Fewer than two distinct X values were available for a fit.
    InsufficientData,
    /// Anything that is not a property of the input data.
    Unexpected,
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::MissingColumn | ErrorKind::EmptyDataset | ErrorKind::InsufficientData => 400,
            ErrorKind::Load | ErrorKind::Unexpected => 500,
        }
    }
}

impl HurricaneError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HurricaneError::Dataset(e) => match e {
                DatasetError::MissingColumn { .. } => ErrorKind::MissingColumn,
                DatasetError::Empty(_) => ErrorKind::EmptyDataset,
                DatasetError::SourceMetadata(..)
                | DatasetError::CsvOpen(..)
                | DatasetError::CsvParse(..)
                | DatasetError::ColumnRead { .. } => ErrorKind::Load,
            },
            HurricaneError::Fit(e) => match e {
                FitError::InsufficientData { .. } | FitError::NoUsableObservations { .. } => {
                    ErrorKind::InsufficientData
                }
                FitError::LengthMismatch { .. }
                | FitError::NonFiniteInput { .. }
                | FitError::InvalidHoldOutFraction(_) => ErrorKind::Unexpected,
            },
            HurricaneError::FrameBuild(_) | HurricaneError::Encode(_) => ErrorKind::Unexpected,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// The `{"error": "..."}` body a boundary layer sends alongside [`Self::status_code`].
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
