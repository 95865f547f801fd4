//! Ordinary least-squares fit of a straight line `y = slope * x + intercept`,
//! optionally evaluated on a seeded held-out share of the rows.

use crate::metrics::error::FitError;
use crate::types::fit_config::HoldOut;
use log::debug;
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashSet;

/// Minimum number of distinct X values that pins down a line.
pub const MIN_DISTINCT_X: usize = 2;

/// Error metrics over the held-out rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    pub mean_squared_error: f64,
    pub r_squared: f64,
    pub rows: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    /// Rows the line was fitted on.
    pub train_rows: usize,
    /// Present only when the fit was made with a held-out split.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

impl FitResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits `y` against `x` by least squares.
///
/// With `hold_out` set, `ceil(fraction * n)` rows chosen by a shuffle seeded with
/// `hold_out.seed` are kept out of the fit and used to compute MSE and R². The
/// same seed and input order always select the same rows.
///
/// # Errors
///
/// * [`FitError::InsufficientData`] if the rows used for fitting have fewer than
///   two distinct X values, or X values too close together to fix a finite slope.
/// * [`FitError::NonFiniteInput`] if any X or Y is NaN or infinite.
/// * [`FitError::LengthMismatch`] if `x` and `y` differ in length.
/// * [`FitError::InvalidHoldOutFraction`] if the fraction is not strictly inside `(0, 1)`.
///
/// # Examples
///
/// ```
/// use hurricane_metrics::fit_linear_trend;
///
/// let fit = fit_linear_trend(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0], None).unwrap();
/// assert_eq!(fit.slope, 2.0);
/// assert_eq!(fit.intercept, 1.0);
/// assert!(fit.evaluation.is_none());
/// ```
pub fn fit_linear_trend(
    x: &[f64],
    y: &[f64],
    hold_out: Option<HoldOut>,
) -> Result<FitResult, FitError> {
    if x.len() != y.len() {
        return Err(FitError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    if let Some(row) = x
        .iter()
        .zip(y)
        .position(|(xi, yi)| !xi.is_finite() || !yi.is_finite())
    {
        return Err(FitError::NonFiniteInput { row });
    }

    let Some(hold_out) = hold_out else {
        let (slope, intercept) = least_squares(x, y)?;
        return Ok(FitResult {
            slope,
            intercept,
            train_rows: x.len(),
            evaluation: None,
        });
    };

    let (train, test) = partition(x.len(), hold_out)?;
    let (train_x, train_y) = select(x, y, &train);
    let (test_x, test_y) = select(x, y, &test);
    debug!(
        "Fitting on {} rows, holding out {} (seed {})",
        train.len(),
        test.len(),
        hold_out.seed
    );

    let (slope, intercept) = least_squares(&train_x, &train_y)?;
    let predictions: Vec<f64> = test_x.iter().map(|x| slope * x + intercept).collect();

    Ok(FitResult {
        slope,
        intercept,
        train_rows: train.len(),
        evaluation: Some(evaluate(&test_y, &predictions)),
    })
}

/// Splits row indices `0..n` into (train, test), both sorted ascending.
pub(crate) fn partition(n: usize, hold_out: HoldOut) -> Result<(Vec<usize>, Vec<usize>), FitError> {
    let fraction = hold_out.fraction;
    if !(fraction > 0.0 && fraction < 1.0) {
        return Err(FitError::InvalidHoldOutFraction(fraction));
    }

    let test_len = ((n as f64) * fraction).ceil() as usize;
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(hold_out.seed);
    indices.shuffle(&mut rng);

    let mut test = indices[..test_len.min(n)].to_vec();
    let mut train = indices[test_len.min(n)..].to_vec();
    test.sort_unstable();
    train.sort_unstable();
    Ok((train, test))
}

fn select(x: &[f64], y: &[f64], rows: &[usize]) -> (Vec<f64>, Vec<f64>) {
    rows.iter().map(|&i| (x[i], y[i])).unzip()
}

fn least_squares(x: &[f64], y: &[f64]) -> Result<(f64, f64), FitError> {
    let distinct = x.iter().map(|v| OrderedFloat(*v)).collect::<HashSet<_>>().len();
    if distinct < MIN_DISTINCT_X {
        return Err(FitError::InsufficientData {
            required: MIN_DISTINCT_X,
            found: distinct,
        });
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (sxy, sxx) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(sxy, sxx), (xi, yi)| {
            let dx = xi - mean_x;
            (sxy + dx * (yi - mean_y), sxx + dx * dx)
        });

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    // Distinct X values can still collapse to zero spread in floating point.
    if sxx == 0.0 || !slope.is_finite() || !intercept.is_finite() {
        return Err(FitError::InsufficientData {
            required: MIN_DISTINCT_X,
            found: 1,
        });
    }
    Ok((slope, intercept))
}

fn evaluate(actual: &[f64], predicted: &[f64]) -> Evaluation {
    let n = actual.len() as f64;
    let ss_res: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    let mean = actual.iter().sum::<f64>() / n;
    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();

    // Constant held-out Y: perfect predictions score 1, anything else 0.
    let r_squared = if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    };

    Evaluation {
        mean_squared_error: ss_res / n,
        r_squared,
        rows: actual.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let y = x.iter().map(|x| 2.0 * x + 1.0).collect();
        (x, y)
    }

    #[test]
    fn test_noiseless_line_is_exact() -> Result<(), FitError> {
        let fit = fit_linear_trend(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0, 5.0, 7.0], None)?;
        assert_eq!(fit.slope, 2.0);
        assert_eq!(fit.intercept, 1.0);
        assert_eq!(fit.train_rows, 4);
        assert_eq!(fit.evaluation, None);
        assert_eq!(fit.predict(10.0), 21.0);
        Ok(())
    }

    #[test]
    fn test_noisy_fit_minimises_residuals() -> Result<(), FitError> {
        // sxy = 3, sxx = 5 around the means (2.5, 2.5)
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 1.0, 4.0, 3.0];
        let fit = fit_linear_trend(&x, &y, None)?;
        assert!((fit.slope - 0.6).abs() < 1e-12, "slope {}", fit.slope);
        assert!((fit.intercept - 1.0).abs() < 1e-12, "intercept {}", fit.intercept);
        Ok(())
    }

    #[test]
    fn test_single_distinct_x_is_insufficient() {
        let err = fit_linear_trend(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0], None).unwrap_err();
        assert_eq!(
            err,
            FitError::InsufficientData {
                required: 2,
                found: 1
            }
        );

        let err = fit_linear_trend(&[], &[], None).unwrap_err();
        assert_eq!(
            err,
            FitError::InsufficientData {
                required: 2,
                found: 0
            }
        );
    }

    #[test]
    fn test_vanishing_x_spread_is_insufficient() {
        let err = fit_linear_trend(&[0.0, 1e-200], &[1.0, 2.0], None).unwrap_err();
        assert!(
            matches!(err, FitError::InsufficientData { .. }),
            "expected InsufficientData, got {err:?}"
        );
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let err = fit_linear_trend(&[0.0, 1.0, f64::NAN], &[1.0, 2.0, 3.0], None).unwrap_err();
        assert_eq!(err, FitError::NonFiniteInput { row: 2 });

        let err = fit_linear_trend(&[0.0, 1.0], &[f64::INFINITY, 2.0], None).unwrap_err();
        assert_eq!(err, FitError::NonFiniteInput { row: 0 });

        let err = fit_linear_trend(
            &[0.0, 1.0, 2.0, f64::NEG_INFINITY],
            &[1.0, 2.0, 3.0, 4.0],
            Some(HoldOut::default()),
        )
        .unwrap_err();
        assert_eq!(err, FitError::NonFiniteInput { row: 3 });
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = fit_linear_trend(&[0.0, 1.0], &[1.0], None).unwrap_err();
        assert_eq!(err, FitError::LengthMismatch { x_len: 2, y_len: 1 });
    }

    #[test]
    fn test_hold_out_fraction_must_be_open_interval() {
        let (x, y) = line(10);
        for fraction in [0.0, 1.0, -0.5, f64::NAN] {
            let err = fit_linear_trend(&x, &y, Some(HoldOut { fraction, seed: 1 })).unwrap_err();
            assert!(matches!(err, FitError::InvalidHoldOutFraction(_)));
        }
    }

    #[test]
    fn test_partition_is_reproducible() -> Result<(), FitError> {
        let hold_out = HoldOut::default();
        let first = partition(25, hold_out)?;
        let second = partition(25, hold_out)?;
        assert_eq!(first, second);

        let (train, test) = first;
        assert_eq!(test.len(), 5);
        assert_eq!(train.len(), 20);
        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..25).collect::<Vec<_>>());
        Ok(())
    }

    #[test]
    fn test_hold_out_rounds_up() -> Result<(), FitError> {
        let (train, test) = partition(11, HoldOut::default())?;
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);
        Ok(())
    }

    #[test]
    fn test_held_out_metrics_on_exact_line() -> Result<(), FitError> {
        let (x, y) = line(10);
        let fit = fit_linear_trend(&x, &y, Some(HoldOut::default()))?;
        let evaluation = fit.evaluation.expect("split requested");

        assert_eq!(fit.train_rows, 8);
        assert_eq!(evaluation.rows, 2);
        assert!((fit.slope - 2.0).abs() < 1e-9);
        assert!((fit.intercept - 1.0).abs() < 1e-9);
        assert!(evaluation.mean_squared_error < 1e-18);
        assert!((evaluation.r_squared - 1.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_held_out_metrics_match_hand_computation() {
        let evaluation = evaluate(&[1.0, 3.0], &[2.0, 3.0]);
        assert_eq!(evaluation.mean_squared_error, 0.5);
        // ss_res = 1, ss_tot = 2
        assert_eq!(evaluation.r_squared, 0.5);
    }

    #[test]
    fn test_constant_held_out_target() {
        assert_eq!(evaluate(&[4.0, 4.0], &[4.0, 4.0]).r_squared, 1.0);
        assert_eq!(evaluate(&[4.0, 4.0], &[3.0, 5.0]).r_squared, 0.0);
    }

    #[test]
    fn test_split_leaving_too_few_training_rows() {
        // Two rows with a 0.5 share held out leaves a single training row.
        let err = fit_linear_trend(
            &[0.0, 1.0],
            &[0.0, 1.0],
            Some(HoldOut {
                fraction: 0.5,
                seed: 3,
            }),
        )
        .unwrap_err();
        assert!(matches!(err, FitError::InsufficientData { found: 1, .. }));
    }
}
