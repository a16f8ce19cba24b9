//! Savitzky-Golay smoothing
//!
//! Interior samples are convolved with the least-squares smoothing
//! coefficients of a centred window. The first and last `window / 2`
//! samples are taken from a polynomial fitted to the first and last full
//! window, which is the "interp" edge mode of common signal libraries.

use super::{polyfit, polyval, vandermonde};
use crate::error::{AnalysisError, AnalysisResult};

/// Smoothing coefficients for the centre of a window of length `window`
pub fn savgol_coefficients(window: usize, polyorder: usize) -> AnalysisResult<Vec<f64>> {
    validate(window, polyorder)?;
    let half = (window / 2) as f64;
    let positions: Vec<f64> = (0..window).map(|i| i as f64 - half).collect();

    let a = vandermonde(&positions, polyorder);
    let ata = a.transpose() * &a;
    let inverse = ata.try_inverse().ok_or_else(|| {
        AnalysisError::NumericFailure("Savitzky-Golay normal matrix is singular".to_string())
    })?;
    let projection = inverse * a.transpose();

    Ok(projection.row(0).iter().copied().collect())
}

/// Smooth `y` with a Savitzky-Golay filter. Output has the length of `y`.
pub fn savgol_filter(y: &[f64], window: usize, polyorder: usize) -> AnalysisResult<Vec<f64>> {
    validate(window, polyorder)?;
    let n = y.len();
    if n < window {
        return Err(AnalysisError::InsufficientData(format!(
            "window of {} exceeds {} samples",
            window, n
        )));
    }

    let coefficients = savgol_coefficients(window, polyorder)?;
    let half = window / 2;
    let mut smoothed = vec![0.0; n];

    for i in half..n - half {
        smoothed[i] = coefficients
            .iter()
            .zip(&y[i - half..=i + half])
            .map(|(c, v)| c * v)
            .sum();
    }

    let local_x: Vec<f64> = (0..window).map(|i| i as f64).collect();

    let head = polyfit(&local_x, &y[..window], polyorder)?;
    for (i, value) in smoothed.iter_mut().enumerate().take(half) {
        *value = polyval(&head, i as f64);
    }

    let tail = polyfit(&local_x, &y[n - window..], polyorder)?;
    for i in 0..half {
        let local = window - half + i;
        smoothed[n - half + i] = polyval(&tail, local as f64);
    }

    if smoothed.iter().any(|v| !v.is_finite()) {
        return Err(AnalysisError::NumericFailure(
            "smoothing produced non-finite values".to_string(),
        ));
    }
    Ok(smoothed)
}

fn validate(window: usize, polyorder: usize) -> AnalysisResult<()> {
    if window % 2 == 0 {
        return Err(AnalysisError::NumericFailure(format!(
            "window length must be odd, got {}",
            window
        )));
    }
    if polyorder >= window {
        return Err(AnalysisError::NumericFailure(format!(
            "polynomial order {} must be less than window length {}",
            polyorder, window
        )));
    }
    Ok(())
}
