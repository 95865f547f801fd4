//! Pipeline configuration.

use crate::metrics::wind::DEFAULT_ENVIRONMENTAL_PRESSURE_HPA;
use bon::Builder;
use std::path::PathBuf;

pub const DEFAULT_TIMESTAMP_COLUMN: &str = "Date";
pub const DEFAULT_PRESSURE_COLUMN: &str = "Pressure";
pub const DEFAULT_SEPARATOR: u8 = b',';

/// Everything a [`crate::HurricanePipeline`] needs to know about its source.
///
/// Only `source_path` is required; the rest falls back to the usual track file
/// layout (`Date` / `Pressure` columns, comma separated) and a 1013 hPa
/// environment.
///
/// # Examples
///
/// ```
/// use hurricane_metrics::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .source_path("data/katrina.csv")
///     .environmental_pressure_hpa(1010.0)
///     .build();
///
/// assert_eq!(config.pressure_column, "Pressure");
/// assert_eq!(config.environmental_pressure_hpa, 1010.0);
/// assert!(!config.cache);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct PipelineConfig {
    #[builder(into)]
    pub source_path: PathBuf,

    #[builder(into, default = DEFAULT_TIMESTAMP_COLUMN.to_string())]
    pub timestamp_column: String,

    #[builder(into, default = DEFAULT_PRESSURE_COLUMN.to_string())]
    pub pressure_column: String,

    #[builder(default = DEFAULT_SEPARATOR)]
    pub separator: u8,

    /// Baseline pressure the wind estimate measures the deficit against.
    #[builder(default = DEFAULT_ENVIRONMENTAL_PRESSURE_HPA)]
    pub environmental_pressure_hpa: f64,

    /// Keep cleaned datasets between calls while the file is unchanged.
    #[builder(default)]
    pub cache: bool,
}

impl PipelineConfig {
    /// Default configuration for the file at `source_path`.
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self::builder().source_path(source_path).build()
    }
}
