use crate::types::fit_config::FitTarget;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("A linear fit needs at least {required} distinct X values, found {found}")]
    InsufficientData { required: usize, found: usize },

    #[error("No observations usable for the {target} fit")]
    NoUsableObservations { target: FitTarget },

    #[error("X and Y must have equal length (got {x_len} and {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("Non-finite value at row {row} of the fit input")]
    NonFiniteInput { row: usize },

    #[error("Hold-out fraction must lie strictly between 0 and 1, got {0}")]
    InvalidHoldOutFraction(f64),
}
