mod config;
mod dataset;
mod error;
mod metrics;
mod pipeline;
mod response;
mod types;

pub use config::*;
pub use error::{ErrorBody, ErrorKind, HurricaneError};
pub use pipeline::HurricanePipeline;

pub use dataset::cache::DatasetCache;
pub use dataset::cleaner::{clean, parse_compact_timestamp, parse_pressure};
pub use dataset::error::DatasetError;
pub use dataset::loader::DatasetLoader;

pub use metrics::error::FitError;
pub use metrics::regression::{fit_linear_trend, Evaluation, FitResult, MIN_DISTINCT_X};
pub use metrics::wind::{derive_wind_speed, DEFAULT_ENVIRONMENTAL_PRESSURE_HPA, KNOTS_TO_MPS};

pub use response::{
    present, records, GraphData, PlotHandoff, Presentation, Report, ResponseShape, TrendReport,
};

pub use types::dataset::Dataset;
pub use types::fit_config::{
    FitConfig, FitTarget, HoldOut, DEFAULT_HOLD_OUT_FRACTION, DEFAULT_SPLIT_SEED,
};
pub use types::observation::{Observation, RawRow};
