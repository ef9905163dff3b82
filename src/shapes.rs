//! Sigmoid and gaussian curve primitives used as fitting shapes.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::arrayops::ArrayPair;
use crate::stats;

/// The general five parameter sigmoid `d + a / (b + e^(c (t - e)))`
pub fn sigmoid(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64) -> f64 {
    d + a / (b + (c * (t - e)).exp())
}

/// The four parameter logistic `a + b / (1 + e^(c (t - d)))`
pub fn simple_sigmoid(t: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    a + b / (1.0 + (c * (t - d)).exp())
}

/// [`simple_sigmoid`] with its output multiplied by `e`
pub fn scaled_sigmoid(t: f64, a: f64, b: f64, c: f64, d: f64, e: f64) -> f64 {
    e * simple_sigmoid(t, a, b, c, d)
}

/// The two parameter unit logistic `1 / (1 + e^(a (t - b)))`
pub fn rigid_sigmoid(t: f64, a: f64, b: f64) -> f64 {
    1.0 / (1.0 + (a * (t - b)).exp())
}

/// [`rigid_sigmoid`] shifted by a constant bias `c`
pub fn rigid_sigmoid_with_bias(t: f64, a: f64, b: f64, c: f64) -> f64 {
    c + rigid_sigmoid(t, a, b)
}

/// The gaussian bell `a e^(-(x - mu)^2 / (2 sigma^2))`
pub fn gaussian(x: f64, a: f64, mu: f64, sigma: f64) -> f64 {
    a * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

const FWHM_OVER_SIGMA: f64 = 2.355;

/// Gaussian peak shape model
///
/// ```math
/// y = a\exp\left({\frac{-(\mu - x)^2}{2\sigma^2}}\right)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaussianShape {
    pub mu: f64,
    pub sigma: f64,
    pub amplitude: f64,
}

impl GaussianShape {
    pub fn new(mu: f64, sigma: f64, amplitude: f64) -> Self {
        Self {
            mu,
            sigma,
            amplitude,
        }
    }

    /// Given observed data, compute some initial parameters
    pub fn guess(data: &ArrayPair<'_>) -> Self {
        if data.is_empty() {
            return Self::new(1.0, 1.0, 1.0);
        }
        let idx = data.argmax();
        let mu = data.xs[idx];
        let amplitude = data.ys[idx];

        let width = stats::fwhm(&data.xs, &data.ys);
        let mut sigma = width / FWHM_OVER_SIGMA;
        if sigma.is_nan() || sigma == 0.0 {
            let (lo, hi) = data.x_bounds();
            sigma = (hi - lo) / 2.0 / FWHM_OVER_SIGMA;
        }
        Self::new(mu, sigma, amplitude)
    }

    pub fn density(&self, x: f64) -> f64 {
        gaussian(x, self.amplitude, self.mu, self.sigma)
    }

    /// Evaluate the shape over an x axis
    pub fn profile(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.density(*x)).collect()
    }

    /// Mean squared error between the model and observed data
    pub fn score(&self, data: &ArrayPair<'_>) -> f64 {
        if data.is_empty() {
            return 0.0;
        }
        data.iter()
            .map(|(x, y)| (y - self.density(x)).powi(2))
            .sum::<f64>()
            / data.len() as f64
    }
}
