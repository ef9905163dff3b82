//! Basic descriptive statistics for xy-curves.
use std::collections::HashMap;
use std::ops::RangeInclusive;

/// The arithmetic mean of `values`, or 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// The population standard deviation of `values`
pub fn std(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mu = mean(values);
    let variance = values.iter().map(|v| (*v - mu).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// The index of the value in `values` nearest to `target`
pub fn nearest(values: &[f64], target: f64) -> usize {
    let mut best_i = 0;
    let mut best_d = f64::INFINITY;
    for (i, v) in values.iter().enumerate() {
        let d = (*v - target).abs();
        if d < best_d {
            best_d = d;
            best_i = i;
        }
    }
    best_i
}

/// Estimate the full width at half maximum of the most intense peak.
///
/// Locates the y value nearest to half the global maximum anywhere along
/// the curve and doubles its x distance from the apex. A coarse estimate
/// that assumes a single dominant, roughly symmetric peak. An empty
/// curve has width 0.
pub fn fwhm(xs: &[f64], ys: &[f64]) -> f64 {
    if ys.is_empty() {
        return 0.0;
    }
    let apex = crate::arrayops::ArrayPair::wrap(xs, ys).argmax();
    let max_y = ys[apex];
    let max_x = xs[apex];
    let half_idx = nearest(ys, max_y / 2.0);
    (xs[half_idx] - max_x).abs() * 2.0
}

/// Expand inclusive integer ranges into a per-key map.
///
/// Later entries overwrite earlier ones where ranges overlap.
pub fn expand_ranges<V: Clone>(entries: &[(RangeInclusive<i64>, V)]) -> HashMap<i64, V> {
    let mut result = HashMap::new();
    for (range, value) in entries {
        for key in range.clone() {
            result.insert(key, value.clone());
        }
    }
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arrayops::gridspace;
    use crate::shapes::gaussian;

    #[test]
    fn test_mean_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&values), 5.0);
        assert_eq!(std(&values), 2.0);
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std(&[]), 0.0);
    }

    #[test]
    fn test_nearest() {
        let values = [1.0, 3.0, 8.0, 4.0];
        assert_eq!(nearest(&values, 3.4), 1);
        assert_eq!(nearest(&values, 100.0), 2);
    }

    #[test]
    fn test_fwhm_gaussian() {
        // For a gaussian, FWHM = 2 sqrt(2 ln 2) sigma ~= 2.355 sigma
        let sigma = 0.5;
        let xs = gridspace(95.0, 105.0, 0.001);
        let ys: Vec<f64> = xs.iter().map(|x| gaussian(*x, 10.0, 100.0, sigma)).collect();
        let width = fwhm(&xs, &ys);
        let expected = 2.0 * (2.0 * 2f64.ln()).sqrt() * sigma;
        assert!((width - expected).abs() < 0.01, "width {width} vs {expected}");
    }

    #[test]
    fn test_fwhm_empty() {
        assert_eq!(fwhm(&[], &[]), 0.0);
    }

    #[test]
    fn test_expand_ranges() {
        let table = expand_ranges(&[(1..=3, "low"), (3..=4, "high"), (10..=10, "lone")]);
        assert_eq!(table.len(), 5);
        assert_eq!(table[&1], "low");
        assert_eq!(table[&3], "high");
        assert_eq!(table[&10], "lone");
        assert!(!table.contains_key(&5));
    }
}
