use crate::types::dataset::Dataset;
use crate::types::observation::{Observation, RawRow};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

/// Parses a compact `YYYYMMDDHH` timestamp such as `2005082918`.
///
/// Surrounding whitespace is ignored. Anything else that is not exactly ten
/// digits forming a real calendar date and an hour in `0..=23` yields `None`.
pub fn parse_compact_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.len() != 10 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = value[0..4].parse().ok()?;
    let month: u32 = value[4..6].parse().ok()?;
    let day: u32 = value[6..8].parse().ok()?;
    let hour: u32 = value[8..10].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)
}

/// Parses a pressure cell. NaN and infinities count as non-numeric.
pub fn parse_pressure(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|pressure| pressure.is_finite())
}

/// Normalizes raw rows into a [`Dataset`], dropping every row whose timestamp or
/// pressure does not parse. Surviving rows keep their original order.
///
/// An empty result is not an error here; callers decide how to report it.
pub fn clean(rows: &[RawRow]) -> Dataset {
    let observations: Vec<Observation> = rows
        .iter()
        .filter_map(|row| {
            let timestamp = row.timestamp.as_deref().and_then(parse_compact_timestamp)?;
            let pressure = row.pressure.as_deref().and_then(parse_pressure)?;
            Some(Observation::new(timestamp, pressure))
        })
        .collect();

    let dropped = rows.len() - observations.len();
    if dropped > 0 {
        debug!(
            "Dropped {} of {} rows with an unparseable timestamp or pressure",
            dropped,
            rows.len()
        );
    }
    Dataset::new(observations)
}
