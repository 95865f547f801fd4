//! Named regression setups.
//!
//! Historically the service fitted two different lines: pressure over time,
//! and wind speed over pressure. Both are the same least-squares fit applied to
//! different columns, so they are modelled as two [`FitTarget`]s that can be
//! combined with or without a held-out evaluation split.

use bon::Builder;
use serde::Serialize;
use std::fmt;

/// Share of rows held out for evaluation when a split is requested.
pub const DEFAULT_HOLD_OUT_FRACTION: f64 = 0.2;
/// Seed for the row shuffle that picks the held-out rows.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Which pair of columns a linear trend is fitted over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FitTarget {
    /// X = days since the earliest observation, Y = pressure in hPa.
    PressureTrend,
    /// X = pressure in hPa, Y = derived wind speed in m/s.
    /// Only observations with a defined wind speed take part.
    WindFromPressure,
}

impl FitTarget {
    fn name(&self) -> &'static str {
        match self {
            FitTarget::PressureTrend => "pressure_trend",
            FitTarget::WindFromPressure => "wind_from_pressure",
        }
    }
}

impl fmt::Display for FitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parameters of a held-out split.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoldOut {
    /// Share of rows, strictly between 0 and 1, used for evaluation only.
    pub fraction: f64,
    pub seed: u64,
}

impl Default for HoldOut {
    fn default() -> Self {
        Self {
            fraction: DEFAULT_HOLD_OUT_FRACTION,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

/// A fit target plus an optional held-out split.
///
/// # Examples
///
/// ```
/// use hurricane_metrics::{FitConfig, FitTarget, HoldOut};
///
/// let trend = FitConfig::pressure_trend();
/// assert_eq!(trend.hold_out, None);
///
/// let custom = FitConfig::builder()
///     .target(FitTarget::PressureTrend)
///     .hold_out(HoldOut { fraction: 0.25, seed: 7 })
///     .build();
/// assert_eq!(custom.hold_out.map(|h| h.seed), Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder)]
pub struct FitConfig {
    pub target: FitTarget,
    pub hold_out: Option<HoldOut>,
}

impl FitConfig {
    /// Days since the first observation against pressure, fitted on every row.
    pub fn pressure_trend() -> Self {
        Self {
            target: FitTarget::PressureTrend,
            hold_out: None,
        }
    }

    /// Pressure against wind speed with 20% of rows held out (seed 42).
    pub fn wind_from_pressure() -> Self {
        Self {
            target: FitTarget::WindFromPressure,
            hold_out: Some(HoldOut::default()),
        }
    }
}
