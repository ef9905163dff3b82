//! Synthetic spectra shared across module tests.
use crate::arrayops::gridspace;
use crate::shapes::gaussian;

/// A profile spectrum over m/z 100..110 with a dominant peak at 102
/// (amplitude 100) and a minor peak at 108 (amplitude 40), both with
/// sigma 0.1.
pub fn gaussian_mixture() -> (Vec<f64>, Vec<f64>) {
    let xs = gridspace(100.0, 110.0, 0.02);
    let ys = xs
        .iter()
        .map(|x| gaussian(*x, 100.0, 102.0, 0.1) + gaussian(*x, 40.0, 108.0, 0.1))
        .collect();
    (xs, ys)
}
