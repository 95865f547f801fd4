use crate::metrics::wind::derive_wind_speed;
use crate::types::fit_config::FitTarget;
use crate::types::observation::{Observation, RawRow};
use chrono::NaiveDateTime;
use polars::df;
use polars::prelude::*;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// An ordered sequence of cleaned [`Observation`]s.
///
/// Row order is the order of the source file. Every observation holds a parsed
/// timestamp and a finite pressure; wind speed is filled in by
/// [`Dataset::derive_wind_speed`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn into_observations(self) -> Vec<Observation> {
        self.observations
    }

    /// Fills `wind_speed_mps` for every observation relative to `environmental_pressure_hpa`.
    pub fn derive_wind_speed(&mut self, environmental_pressure_hpa: f64) {
        for observation in &mut self.observations {
            observation.wind_speed_mps =
                derive_wind_speed(observation.pressure_hpa, environmental_pressure_hpa);
        }
    }

    /// Number of observations with a defined wind speed.
    pub fn wind_speed_count(&self) -> usize {
        self.iter().filter(|o| o.wind_speed_mps.is_some()).count()
    }

    /// Converts back to raw text rows, using the same layout the loader expects.
    pub fn to_raw_rows(&self) -> Vec<RawRow> {
        self.iter().map(RawRow::from).collect()
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.iter().map(|o| o.timestamp).min()
    }

    /// Fractional days between each observation and the earliest one.
    pub fn days_since_first(&self) -> Vec<f64> {
        let Some(first) = self.first_timestamp() else {
            return Vec::new();
        };
        self.iter()
            .map(|o| (o.timestamp - first).num_seconds() as f64 / SECONDS_PER_DAY)
            .collect()
    }

    /// Aligned X and Y columns for `target`.
    ///
    /// For [`FitTarget::WindFromPressure`] only observations with a derived wind
    /// speed are included.
    pub fn fit_series(&self, target: FitTarget) -> (Vec<f64>, Vec<f64>) {
        match target {
            FitTarget::PressureTrend => (
                self.days_since_first(),
                self.iter().map(|o| o.pressure_hpa).collect(),
            ),
            FitTarget::WindFromPressure => self
                .iter()
                .filter_map(|o| o.wind_speed_mps.map(|wind| (o.pressure_hpa, wind)))
                .unzip(),
        }
    }

    /// Builds a `DataFrame` with `timestamp`, `pressure_hpa` and `wind_speed_mps`
    /// columns, for handing to a plotting collaborator.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let timestamps: Vec<NaiveDateTime> = self.iter().map(|o| o.timestamp).collect();
        let pressures: Vec<f64> = self.iter().map(|o| o.pressure_hpa).collect();
        let wind_speeds: Vec<Option<f64>> = self.iter().map(|o| o.wind_speed_mps).collect();

        df!(
            "timestamp" => timestamps,
            "pressure_hpa" => pressures,
            "wind_speed_mps" => wind_speeds
        )
    }
}

impl From<Vec<Observation>> for Dataset {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2005, 8, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn katrina() -> Dataset {
        Dataset::new(vec![
            Observation::new(at(28, 0), 941.0),
            Observation::new(at(28, 12), 907.0),
            Observation::new(at(29, 0), 910.0),
            Observation::new(at(30, 0), 1015.0),
        ])
    }

    #[test]
    fn test_derive_wind_speed_leaves_weak_rows_undefined() {
        let mut dataset = katrina();
        dataset.derive_wind_speed(1013.0);

        assert_eq!(dataset.wind_speed_count(), 3);
        assert!(dataset.observations()[3].wind_speed_mps.is_none());
        let strongest = dataset.observations()[1].wind_speed_mps.unwrap();
        assert!((strongest - 10.0 * 106f64.sqrt() * 0.514).abs() < 1e-9);
    }

    #[test]
    fn test_days_since_first_uses_hour_resolution() {
        let days = katrina().days_since_first();
        assert_eq!(days, vec![0.0, 0.5, 1.0, 2.0]);
    }

    #[test]
    fn test_days_since_first_measures_from_earliest_row() {
        let dataset = Dataset::new(vec![
            Observation::new(at(29, 0), 920.0),
            Observation::new(at(28, 0), 950.0),
        ]);
        assert_eq!(dataset.days_since_first(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_wind_series_skips_undefined_rows() {
        let mut dataset = katrina();
        dataset.derive_wind_speed(1013.0);

        let (x, y) = dataset.fit_series(FitTarget::WindFromPressure);
        assert_eq!(x, vec![941.0, 907.0, 910.0]);
        assert_eq!(y.len(), 3);
        assert!(y.iter().all(|w| *w > 0.0));
    }

    #[test]
    fn test_to_dataframe_keeps_nulls() -> Result<(), Box<dyn std::error::Error>> {
        let mut dataset = katrina();
        dataset.derive_wind_speed(1013.0);

        let df = dataset.to_dataframe()?;
        assert_eq!(df.height(), 4);
        assert_eq!(df.width(), 3);
        assert_eq!(df.column("wind_speed_mps")?.null_count(), 1);
        assert!(matches!(
            df.column("timestamp")?.dtype(),
            DataType::Datetime(_, None)
        ));
        Ok(())
    }
}
