use chrono::NaiveDateTime;
use serde::Serialize;

/// Compact `YYYYMMDDHH` layout used by the source files, e.g. `2005082918`.
pub(crate) const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H";

/// One cleaned row of a hurricane track.
///
/// `wind_speed_mps` stays `None` until [`crate::Dataset::derive_wind_speed`] runs,
/// and afterwards for every row whose pressure is outside `(0, P_env)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub timestamp: NaiveDateTime,
    pub pressure_hpa: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed_mps: Option<f64>,
}

impl Observation {
    pub fn new(timestamp: NaiveDateTime, pressure_hpa: f64) -> Self {
        Self {
            timestamp,
            pressure_hpa,
            wind_speed_mps: None,
        }
    }
}

/// A row as read from the source file, before any type normalization.
/// Cells that were null in the file are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub timestamp: Option<String>,
    pub pressure: Option<String>,
}

impl RawRow {
    pub fn new(timestamp: impl Into<String>, pressure: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            pressure: Some(pressure.into()),
        }
    }
}

impl From<&Observation> for RawRow {
    fn from(observation: &Observation) -> Self {
        RawRow::new(
            observation
                .timestamp
                .format(COMPACT_TIMESTAMP_FORMAT)
                .to_string(),
            observation.pressure_hpa.to_string(),
        )
    }
}
