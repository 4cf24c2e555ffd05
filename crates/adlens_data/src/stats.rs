//! Descriptive statistics over `f64` slices.
//!
//! Empty inputs yield `0.0` rather than `NaN` so summaries stay
//! JSON-serializable.

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of all values.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Median (mean of the two middle values for even lengths).
pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Sample standard deviation with `n - 1` degrees of freedom.
///
/// ```
/// use adlens_data::stats::std_dev;
///
/// let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
/// assert!((sd - 2.138).abs() < 1e-3);
/// assert_eq!(std_dev(&[1.0]), 0.0);
/// ```
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Smallest value.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Largest value.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Quantile with linear interpolation between closest ranks.
///
/// Matches the default method of common dataframe libraries.
///
/// ```
/// use adlens_data::stats::quantile;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile(&values, 0.25), 1.75);
/// assert_eq!(quantile(&values, 0.5), 2.5);
/// assert_eq!(quantile(&values, 1.0), 4.0);
/// ```
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Percent change from `early` to `recent`.
///
/// ```
/// use adlens_data::stats::percent_change;
///
/// assert_eq!(percent_change(2.0, 1.5), Some(-25.0));
/// assert_eq!(percent_change(0.0, 1.0), None);
/// ```
pub fn percent_change(early: f64, recent: f64) -> Option<f64> {
    if early == 0.0 || !early.is_finite() || !recent.is_finite() {
        return None;
    }
    Some((recent - early) / early * 100.0)
}

/// Size of each early/recent window for `n` rows.
pub fn window_len(n: usize, fraction: f64) -> usize {
    ((n as f64 * fraction).floor() as usize).max(1).min(n)
}

/// Means of the first and last windows of already-ordered values.
///
/// Returns `None` for empty input.
pub fn window_means(values: &[f64], fraction: f64) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let k = window_len(values.len(), fraction);
    let early = mean(&values[..k]);
    let recent = mean(&values[values.len() - k..]);
    Some((early, recent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(min(&[]), 0.0);
        assert_eq!(max(&[]), 0.0);
        assert_eq!(quantile(&[], 0.75), 0.0);
    }

    #[test]
    fn median_of_odd_and_even_lengths() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn windows_have_at_least_one_row() {
        assert_eq!(window_len(3, 0.25), 1);
        assert_eq!(window_len(12, 0.25), 3);
        assert_eq!(window_means(&[1.0, 2.0, 3.0], 0.25), Some((1.0, 3.0)));
        assert_eq!(window_means(&[5.0], 0.25), Some((5.0, 5.0)));
        assert_eq!(window_means(&[], 0.25), None);
    }

    #[test]
    fn percent_change_rejects_non_finite_baseline() {
        assert_eq!(percent_change(f64::NAN, 1.0), None);
        assert_eq!(percent_change(f64::INFINITY, 1.0), None);
        assert_eq!(percent_change(4.0, 5.0), Some(25.0));
    }
}
