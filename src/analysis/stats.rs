//! Descriptive statistics over plain numeric slices.
//!
//! Every function is total: an empty slice yields 0 instead of NaN.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Element at index `n / 2` of the ascending values.
///
/// For an even count this is the upper of the two middle values, not
/// their average.
pub fn upper_median(values: &[u64]) -> u64 {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    sorted[sorted.len() / 2]
}

/// Population standard deviation (divides by `n`).
pub fn population_std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Count values whose z-score magnitude exceeds `threshold`.
///
/// A zero standard deviation is replaced by 1, so constant input has no
/// outliers.
pub fn zscore_outliers(values: &[f64], threshold: f64) -> usize {
    let m = mean(values);
    let std = population_std(values);
    let divisor = if std == 0.0 { 1.0 } else { std };

    values
        .iter()
        .filter(|v| ((*v - m) / divisor).abs() > threshold)
        .count()
}

/// Pearson correlation coefficient.
///
/// Returns 0 when either series has no variance. Pairs beyond the shorter
/// slice are ignored.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = mean(xs);
    let my = mean(ys);

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
