use ndarray::{s, Array2, Array3, Axis};

use crate::error::ConfigError;

/// Per output and iteration, the minimum (`[.., .., 0]`) and maximum
/// (`[.., .., 1]`) over replications.
pub fn envelope(values: &Array3<f64>) -> Array3<f64> {
    let (outputs, iters, _) = values.dim();
    let mut bounds = Array3::<f64>::zeros((outputs, iters, 2));
    for o in 0..outputs {
        for i in 0..iters {
            let reps = values.slice(s![o, i, ..]);
            bounds[[o, i, 0]] = reps.iter().copied().fold(f64::INFINITY, f64::min);
            bounds[[o, i, 1]] = reps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        }
    }
    bounds
}

/// Mean over replications, shaped `[output, iteration]`.
pub fn replication_mean(values: &Array3<f64>) -> Array2<f64> {
    let (outputs, iters, reps) = values.dim();
    if reps == 0 {
        return Array2::zeros((outputs, iters));
    }
    values.sum_axis(Axis(2)) / reps as f64
}

/// Trailing moving average of width `window` along each row.
///
/// The result has `iters - window` columns; column `j` averages
/// `series[.., j + 1 ..= j + window]`, so the windows end at iterations
/// `window + 1 ..= iters` (1-based). A window of 0 returns the series as is.
pub fn moving_average(series: &Array2<f64>, window: usize) -> Result<Array2<f64>, ConfigError> {
    let (outputs, iters) = series.dim();
    if window > iters {
        return Err(ConfigError::WindowTooLarge { window, iters });
    }
    if window == 0 {
        return Ok(series.clone());
    }

    let len = iters - window;
    let mut out = Array2::<f64>::zeros((outputs, len));
    for o in 0..outputs {
        let row = series.row(o);
        for j in 0..len {
            out[[o, j]] = row.slice(s![j + 1..=j + window]).sum() / window as f64;
        }
    }
    Ok(out)
}
