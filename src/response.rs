//! Presentation adapters between the pipeline and whatever serves its results.
//!
//! The pipeline itself never decides how a result leaves the process. A caller
//! picks a [`ResponseShape`] and [`present`] turns a [`Report`] into either a
//! JSON document or a [`PlotHandoff`] for an image renderer.

use crate::error::HurricaneError;
use crate::metrics::regression::FitResult;
use crate::types::dataset::Dataset;
use crate::types::fit_config::FitTarget;
use crate::types::observation::Observation;
use polars::prelude::DataFrame;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

const LABEL_FORMAT: &str = "%Y-%m-%d %H:00";

/// A fitted line together with the configuration it was fitted for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendReport {
    pub target: FitTarget,
    #[serde(flatten)]
    pub fit: FitResult,
}

/// The outcome of one pipeline request.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub dataset: Dataset,
    pub trend: Option<TrendReport>,
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = if self.trend.is_some() { 2 } else { 1 };
        let mut state = serializer.serialize_struct("Report", fields)?;
        state.serialize_field("observations", self.dataset.observations())?;
        if let Some(trend) = &self.trend {
            state.serialize_field("trend", trend)?;
        }
        state.end()
    }
}

impl Report {
    pub fn to_json(&self) -> Result<Value, HurricaneError> {
        Ok(serde_json::to_value(self)?)
    }

    /// The enriched rows as a plotting-friendly frame, plus the fitted line if any.
    pub fn plot_handoff(&self) -> Result<PlotHandoff, HurricaneError> {
        Ok(PlotHandoff {
            frame: self.dataset.to_dataframe()?,
            trend: self.trend,
        })
    }
}

/// The plain list-of-records payload.
pub fn records(observations: &[Observation]) -> Result<Value, HurricaneError> {
    Ok(serde_json::to_value(observations)?)
}

/// Label/value series in the shape a line chart consumes: `{"labels": [...], "data": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphData {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl GraphData {
    /// Pressure over time, one point per observation.
    pub fn pressure(dataset: &Dataset) -> Self {
        dataset
            .iter()
            .map(|o| (label(o), o.pressure_hpa))
            .unzip::<_, _, Vec<_>, Vec<_>>()
            .into()
    }

    /// Wind speed over time. Observations without a wind estimate are left out.
    pub fn wind_speed(dataset: &Dataset) -> Self {
        dataset
            .iter()
            .filter_map(|o| o.wind_speed_mps.map(|wind| (label(o), wind)))
            .unzip::<_, _, Vec<_>, Vec<_>>()
            .into()
    }
}

impl From<(Vec<String>, Vec<f64>)> for GraphData {
    fn from((labels, data): (Vec<String>, Vec<f64>)) -> Self {
        Self { labels, data }
    }
}

fn label(observation: &Observation) -> String {
    observation.timestamp.format(LABEL_FORMAT).to_string()
}

/// What a renderer receives: columns `timestamp`, `pressure_hpa`,
/// `wind_speed_mps`, and the trend to overlay.
#[derive(Debug, Clone)]
pub struct PlotHandoff {
    pub frame: DataFrame,
    pub trend: Option<TrendReport>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    Json,
    Image,
}

impl ResponseShape {
    pub fn content_type(&self) -> &'static str {
        match self {
            ResponseShape::Json => "application/json",
            ResponseShape::Image => "image/png",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Presentation {
    Json(Value),
    Plot(PlotHandoff),
}

pub fn present(report: &Report, shape: ResponseShape) -> Result<Presentation, HurricaneError> {
    match shape {
        ResponseShape::Json => Ok(Presentation::Json(report.to_json()?)),
        ResponseShape::Image => Ok(Presentation::Plot(report.plot_handoff()?)),
    }
}
