//! Least-squares polynomial trendline fitting.
//!
//! Fits a polynomial of degree 1 to 4 against the integer index of each
//! observation and evaluates it back at every index, producing a smoothed
//! curve the same length as the input.

use crate::error::{AnalysisError, Result};

/// Degree of the fitted trend polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendDegree {
    /// Degree 1 (straight line).
    #[default]
    Linear,
    /// Degree 2.
    Quadratic,
    /// Degree 3.
    Cubic,
    /// Degree 4.
    Quartic,
}

impl TrendDegree {
    /// Polynomial order (1 for linear through 4 for quartic).
    pub fn order(self) -> usize {
        match self {
            TrendDegree::Linear => 1,
            TrendDegree::Quadratic => 2,
            TrendDegree::Cubic => 3,
            TrendDegree::Quartic => 4,
        }
    }
}

impl TryFrom<u8> for TrendDegree {
    type Error = AnalysisError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(TrendDegree::Linear),
            2 => Ok(TrendDegree::Quadratic),
            3 => Ok(TrendDegree::Cubic),
            4 => Ok(TrendDegree::Quartic),
            other => Err(AnalysisError::InvalidParameter(format!(
                "trend degree must be 1 to 4, got {other}"
            ))),
        }
    }
}

/// Fits a polynomial trend to a series and evaluates it at every index.
///
/// The x-coordinate of observation i is i itself (0..n-1), not its date.
/// The coefficients come from ordinary least squares via the normal
/// equations XᵗX·c = Xᵗy, solved by Gaussian elimination with partial
/// pivoting. For degree 4 on long series XᵗX can be ill-conditioned.
///
/// # Errors
///
/// [`AnalysisError::InsufficientData`] when the series has fewer points
/// than coefficients (the system is underdetermined), and
/// [`AnalysisError::ComputationError`] when elimination meets a near-zero
/// pivot. An empty series returns an empty trend.
///
/// # Examples
///
/// ```
/// use minewatch::trend::{fit_trend, TrendDegree};
///
/// let trend = fit_trend(&[2.0, 4.0, 6.0, 8.0, 10.0], TrendDegree::Linear).unwrap();
/// assert!((trend[4] - 10.0).abs() < 1e-8);
/// ```
pub fn fit_trend(values: &[f64], degree: TrendDegree) -> Result<Vec<f64>> {
    let n = values.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let num_params = degree.order() + 1;
    if n < num_params {
        return Err(AnalysisError::InsufficientData {
            needed: num_params,
            got: n,
        });
    }

    let coeffs = polyfit(values, degree.order())?;
    Ok((0..n).map(|i| evaluate(&coeffs, i as f64)).collect())
}

/// Least-squares polynomial coefficients (constant term first) for
/// y against x = 0..n-1.
fn polyfit(y: &[f64], degree: usize) -> Result<Vec<f64>> {
    let num_params = degree + 1;

    // Accumulate X'X and X'y directly from the Vandermonde rows
    // [1, x, x^2, ..., x^degree].
    let mut xtx = vec![vec![0.0; num_params]; num_params];
    let mut xty = vec![0.0; num_params];

    let mut powers = vec![0.0; num_params];
    for (idx, &y_obs) in y.iter().enumerate() {
        let x = idx as f64;
        powers[0] = 1.0;
        for j in 1..num_params {
            powers[j] = powers[j - 1] * x;
        }

        for i in 0..num_params {
            for j in 0..num_params {
                xtx[i][j] += powers[i] * powers[j];
            }
            xty[i] += powers[i] * y_obs;
        }
    }

    solve_linear_system(&xtx, &xty).ok_or_else(|| {
        AnalysisError::ComputationError("singular normal-equations system".to_string())
    })
}

/// Solve a linear system Ax = b using Gaussian elimination with partial
/// pivoting. Returns `None` when no usable pivot remains.
fn solve_linear_system(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // Augmented matrix [A | b]
    let mut aug: Vec<Vec<f64>> = a
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut r = row.clone();
            r.push(b[i]);
            r
        })
        .collect();

    for col in 0..n {
        // Find pivot
        let mut max_row = col;
        let mut max_val = aug[col][col].abs();
        for row in (col + 1)..n {
            if aug[row][col].abs() > max_val {
                max_val = aug[row][col].abs();
                max_row = row;
            }
        }

        if max_val < 1e-14 {
            return None; // Singular matrix
        }

        aug.swap(col, max_row);

        // Eliminate below the pivot
        for row in (col + 1)..n {
            let factor = aug[row][col] / aug[col][col];
            for j in col..=n {
                aug[row][j] -= factor * aug[col][j];
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = aug[i][n];
        for j in (i + 1)..n {
            sum -= aug[i][j] * x[j];
        }
        x[i] = sum / aug[i][i];
    }

    Some(x)
}

/// Evaluate a polynomial with coefficients in ascending-power order.
fn evaluate(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_fit_reproduces_straight_line() {
        let values = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let trend = fit_trend(&values, TrendDegree::Linear).unwrap();

        assert_eq!(trend.len(), values.len());
        for (&fitted, &original) in trend.iter().zip(values.iter()) {
            assert_relative_eq!(fitted, original, epsilon = 1e-8);
        }
    }

    #[test]
    fn linear_fit_negative_slope() {
        let values: Vec<f64> = (0..10).map(|i| 100.0 - 3.0 * i as f64).collect();
        let trend = fit_trend(&values, TrendDegree::Linear).unwrap();

        for (&fitted, &original) in trend.iter().zip(values.iter()) {
            assert_relative_eq!(fitted, original, epsilon = 1e-7);
        }
    }

    #[test]
    fn quadratic_fit_reproduces_parabola() {
        // y = x^2 - 3x + 2
        let values: Vec<f64> = (0..8)
            .map(|i| {
                let x = i as f64;
                x * x - 3.0 * x + 2.0
            })
            .collect();
        let trend = fit_trend(&values, TrendDegree::Quadratic).unwrap();

        for (&fitted, &original) in trend.iter().zip(values.iter()) {
            assert_relative_eq!(fitted, original, epsilon = 1e-7);
        }
    }

    #[test]
    fn quartic_fit_smooths_noise() {
        let values: Vec<f64> = (0..60)
            .map(|i| {
                let x = i as f64;
                0.01 * x * x + 5.0 * (x * 0.9).sin()
            })
            .collect();
        let trend = fit_trend(&values, TrendDegree::Quartic).unwrap();

        assert_eq!(trend.len(), values.len());
        assert!(trend.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn constant_series_fits_flat_line() {
        let trend = fit_trend(&[5.0; 12], TrendDegree::Linear).unwrap();
        for fitted in trend {
            assert_relative_eq!(fitted, 5.0, epsilon = 1e-8);
        }
    }

    #[test]
    fn empty_series_yields_empty_trend() {
        let trend = fit_trend(&[], TrendDegree::Cubic).unwrap();
        assert!(trend.is_empty());
    }

    #[test]
    fn too_few_points_is_an_error() {
        let err = fit_trend(&[1.0, 2.0, 3.0], TrendDegree::Quartic).unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientData { needed: 5, got: 3 });
    }

    #[test]
    fn exact_interpolation_when_points_equal_params() {
        // Two points, degree 1: the line passes through both
        let trend = fit_trend(&[1.0, 7.0], TrendDegree::Linear).unwrap();
        assert_relative_eq!(trend[0], 1.0, epsilon = 1e-8);
        assert_relative_eq!(trend[1], 7.0, epsilon = 1e-8);
    }

    #[test]
    fn degree_conversion() {
        assert_eq!(TrendDegree::try_from(1).unwrap(), TrendDegree::Linear);
        assert_eq!(TrendDegree::try_from(4).unwrap(), TrendDegree::Quartic);
        assert!(TrendDegree::try_from(0).is_err());
        assert!(TrendDegree::try_from(5).is_err());
        assert_eq!(TrendDegree::default().order(), 1);
    }

    #[test]
    fn solve_rejects_singular_system() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let b = vec![1.0, 2.0];
        assert!(solve_linear_system(&a, &b).is_none());
    }
}
