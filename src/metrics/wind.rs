//! Pressure–wind relationship for tropical cyclones.
//!
//! Maximum sustained wind is estimated from the pressure deficit (environmental
//! pressure minus central pressure) with a square-root law:
//!
//! ```text
//! v [kt]  = 10 * sqrt(P_env - P_c)
//! v [m/s] = v [kt] * 0.514
//! ```

/// Reference pressure of an undisturbed atmosphere, in hPa.
pub const DEFAULT_ENVIRONMENTAL_PRESSURE_HPA: f64 = 1013.0;

/// Empirical factor turning `sqrt(deficit in hPa)` into knots.
const PRESSURE_WIND_COEFFICIENT: f64 = 10.0;

/// Knots to meters per second.
pub const KNOTS_TO_MPS: f64 = 0.514;

/// Estimates wind speed in m/s for a central `pressure_hpa`.
///
/// Returns `None` unless `0 < pressure_hpa < environmental_pressure_hpa`; a zero
/// or negative deficit has no wind estimate, which is not the same as calm air.
///
/// # Examples
///
/// ```
/// use hurricane_metrics::derive_wind_speed;
///
/// let wind = derive_wind_speed(950.0, 1013.0).unwrap();
/// assert!((wind - 40.80).abs() < 0.01);
///
/// assert_eq!(derive_wind_speed(1013.0, 1013.0), None);
/// assert_eq!(derive_wind_speed(1050.0, 1013.0), None);
/// ```
pub fn derive_wind_speed(pressure_hpa: f64, environmental_pressure_hpa: f64) -> Option<f64> {
    if !(pressure_hpa > 0.0 && pressure_hpa < environmental_pressure_hpa) {
        return None;
    }
    let deficit = environmental_pressure_hpa - pressure_hpa;
    Some(PRESSURE_WIND_COEFFICIENT * deficit.sqrt() * KNOTS_TO_MPS)
}
