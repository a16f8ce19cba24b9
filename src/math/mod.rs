//! Numeric utilities for curve analysis

pub mod savgol;

use nalgebra::{DMatrix, DVector};

use crate::error::{AnalysisError, AnalysisResult};

pub type Mat = DMatrix<f64>;
pub type Vec = DVector<f64>;

pub use savgol::savgol_filter;

/// Relative cutoff below which a singular value counts as zero
const RANK_TOLERANCE: f64 = 1e-12;

/// Build the Vandermonde matrix with ascending powers `[1, x, x², ...]`
pub fn vandermonde(x: &[f64], degree: usize) -> Mat {
    Mat::from_fn(x.len(), degree + 1, |i, j| x[i].powi(j as i32))
}

/// Least-squares polynomial fit.
///
/// Returns coefficients in ascending order of power, so `c[1]` is the slope
/// of a linear fit. Fails if the system is rank deficient (for instance all
/// x values identical) or has fewer points than coefficients.
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> AnalysisResult<Vec> {
    if x.len() != y.len() {
        return Err(AnalysisError::LengthMismatch {
            strain: x.len(),
            stress: y.len(),
        });
    }
    let n_coef = degree + 1;
    if x.len() < n_coef {
        return Err(AnalysisError::NumericFailure(format!(
            "degree {} fit needs at least {} points, got {}",
            degree,
            n_coef,
            x.len()
        )));
    }

    let a = vandermonde(x, degree);
    let b = Vec::from_column_slice(y);
    solve_least_squares(a, &b)
}

/// Solve `min |A c - b|` through SVD, rejecting rank deficient systems
pub fn solve_least_squares(a: Mat, b: &Vec) -> AnalysisResult<Vec> {
    let n_coef = a.ncols();
    let svd = a.svd(true, true);
    let max_sv = svd.singular_values.max();
    if !max_sv.is_finite() || max_sv <= 0.0 {
        return Err(AnalysisError::NumericFailure(
            "least-squares system is degenerate".to_string(),
        ));
    }
    let eps = RANK_TOLERANCE * max_sv;
    if svd.rank(eps) < n_coef {
        return Err(AnalysisError::NumericFailure(
            "singular least-squares fit".to_string(),
        ));
    }
    let coefficients = svd
        .solve(b, eps)
        .map_err(|e| AnalysisError::NumericFailure(e.to_string()))?;
    if coefficients.iter().any(|c| !c.is_finite()) {
        return Err(AnalysisError::NumericFailure(
            "fit produced non-finite coefficients".to_string(),
        ));
    }
    Ok(coefficients)
}

/// Evaluate a polynomial with ascending coefficients (Horner's method)
pub fn polyval(coefficients: &Vec, x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Trapezoidal integral of `y` over `x`, in sample order.
///
/// Fewer than two samples integrate to zero. Non-monotonic `x` contributes
/// signed areas, as the trapezoid rule does.
pub fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (ys[0] + ys[1]) * (xs[1] - xs[0]))
        .sum()
}

/// Index of the first maximum, `None` for empty input
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first value closest to `target`
pub fn argmin_distance(values: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        let d = (v - target).abs();
        match best {
            Some((_, b)) if d >= b => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Maximum of a slice, `None` for empty input
pub fn max_value(values: &[f64]) -> Option<f64> {
    argmax(values).map(|i| values[i])
}
