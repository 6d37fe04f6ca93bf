//! The numeric transforms behind each normalization method.
//!
//! Every function returns a vector of the same length as its `y` input.
//! A zero denominator yields all zeros; a failure is an explicit
//! [`TransformError`], never a partial vector.

use super::error::TransformError;

fn zeros(len: usize) -> Vec<f64> {
    vec![0.0; len]
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

fn divide_by(y: &[f64], denominator: f64) -> Vec<f64> {
    if denominator == 0.0 {
        return zeros(y.len());
    }
    y.iter().map(|&v| v / denominator).collect()
}

/// Trapezoidal integral of `y` over `x`. Zero for fewer than two points.
pub fn trapz(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[1] + ys[0]) / 2.0)
        .sum()
}

// ---------------------------------------------------------------------------
// y only
// ---------------------------------------------------------------------------

/// `(y - min) / (max - min)`.
pub fn min_max(y: &[f64]) -> Vec<f64> {
    let min = min_of(y);
    let range = max_of(y) - min;
    if range == 0.0 {
        return zeros(y.len());
    }
    y.iter().map(|&v| (v - min) / range).collect()
}

/// `y / max(y)`.
pub fn max(y: &[f64]) -> Vec<f64> {
    divide_by(y, max_of(y))
}

/// `y / ‖y‖₂`.
pub fn vector(y: &[f64]) -> Vec<f64> {
    let norm = y.iter().map(|v| v * v).sum::<f64>().sqrt();
    divide_by(y, norm)
}

/// `(y - mean) / std`, population standard deviation.
pub fn z_score(y: &[f64]) -> Vec<f64> {
    if y.is_empty() {
        return Vec::new();
    }
    let n = y.len() as f64;
    let mean = y.iter().sum::<f64>() / n;
    let var = y.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    let std = var.sqrt();
    if std == 0.0 {
        return zeros(y.len());
    }
    y.iter().map(|&v| (v - mean) / std).collect()
}

/// `y / sum(y)`.
pub fn total_intensity(y: &[f64]) -> Vec<f64> {
    divide_by(y, y.iter().sum())
}

// ---------------------------------------------------------------------------
// x and y
// ---------------------------------------------------------------------------

/// `y / trapz(y, x)`.
pub fn auc(x: &[f64], y: &[f64]) -> Vec<f64> {
    divide_by(y, trapz(y, x))
}

/// Divide the full `y` by the integral over the points with `start <= x <= end`.
///
/// The matching points are integrated in order as one series, so gaps in the
/// mask are bridged by a single trapezoid.
pub fn auc_interval(x: &[f64], y: &[f64], start: f64, end: f64) -> Vec<f64> {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(xi, _)| **xi >= start && **xi <= end)
        .map(|(&xi, &yi)| (xi, yi))
        .unzip();
    divide_by(y, trapz(&ys, &xs))
}

// ---------------------------------------------------------------------------
// y with parameters or an auxiliary series
// ---------------------------------------------------------------------------

/// `y / y[index]`.
pub fn reference_peak(y: &[f64], index: usize) -> Result<Vec<f64>, TransformError> {
    let peak = *y.get(index).ok_or(TransformError::IndexOutOfRange {
        index,
        len: y.len(),
    })?;
    Ok(divide_by(y, peak))
}

/// Least-squares fit `y ≈ beta * reference + alpha`, returning `beta * y + alpha`.
pub fn msc(y: &[f64], reference: &[f64]) -> Result<Vec<f64>, TransformError> {
    if y.len() != reference.len() {
        return Err(TransformError::LengthMismatch {
            series: "reference",
            signal: y.len(),
            auxiliary: reference.len(),
        });
    }
    let (beta, alpha) = linear_fit(reference, y).ok_or(TransformError::SingularFit)?;
    Ok(y.iter().map(|&v| beta * v + alpha).collect())
}

/// Ordinary least squares `ys ≈ slope * xs + intercept`.
fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    if xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let (sxx, sxy) = xs
        .iter()
        .zip(ys.iter())
        .fold((0.0, 0.0), |(sxx, sxy), (&x, &y)| {
            let dx = x - mean_x;
            (sxx + dx * dx, sxy + dx * (y - mean_y))
        });
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;
    (slope.is_finite() && intercept.is_finite()).then_some((slope, intercept))
}

/// Subtract `baseline`, then divide by the maximum of the corrected signal.
pub fn baseline_correction(y: &[f64], baseline: &[f64]) -> Result<Vec<f64>, TransformError> {
    if y.len() != baseline.len() {
        return Err(TransformError::LengthMismatch {
            series: "baseline",
            signal: y.len(),
            auxiliary: baseline.len(),
        });
    }
    let corrected: Vec<f64> = y.iter().zip(baseline).map(|(v, b)| v - b).collect();
    Ok(divide_by(&corrected, max_of(&corrected)))
}

/// Divide each `y[i]` by the maximum over `y[i - window ..= i + window]`,
/// clamped to the signal bounds. A local maximum of zero gives zero.
pub fn moving_window(y: &[f64], window_size: usize) -> Result<Vec<f64>, TransformError> {
    if window_size < 1 {
        return Err(TransformError::InvalidWindow(window_size));
    }
    let n = y.len();
    Ok((0..n)
        .map(|i| {
            let start = i.saturating_sub(window_size);
            let end = i.saturating_add(window_size).saturating_add(1).min(n);
            let local_max = max_of(&y[start..end]);
            if local_max == 0.0 {
                0.0
            } else {
                y[i] / local_max
            }
        })
        .collect())
}
