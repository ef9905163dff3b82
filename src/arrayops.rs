use std::borrow::Cow;
use std::iter::Sum;

use num_traits::{Float, ToPrimitive};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pair of x/y coordinate arrays that may either borrow or own
/// their storage.
#[derive(Debug, Default, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArrayPair<'a> {
    /// The x axis, e.g. m/z
    pub xs: Cow<'a, [f64]>,
    /// The paired signal magnitude, e.g. intensity
    pub ys: Cow<'a, [f64]>,
}

impl<'a> ArrayPair<'a> {
    pub fn new(xs: Cow<'a, [f64]>, ys: Cow<'a, [f64]>) -> Self {
        assert_eq!(
            xs.len(),
            ys.len(),
            "x array length ({}) must equal y array length ({})",
            xs.len(),
            ys.len()
        );
        Self { xs, ys }
    }

    /// Borrow both slices without copying
    pub fn wrap(xs: &'a [f64], ys: &'a [f64]) -> Self {
        Self::new(Cow::Borrowed(xs), Cow::Borrowed(ys))
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.xs.get(i)?, *self.ys.get(i)?))
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// The index of the most intense point
    pub fn argmax(&self) -> usize {
        let mut best_i = 0;
        let mut best_y = -f64::INFINITY;
        for (i, y) in self.ys.iter().copied().enumerate() {
            if y > best_y {
                best_y = y;
                best_i = i;
            }
        }
        best_i
    }

    pub fn max_y(&self) -> f64 {
        let (_, max) = minmax(&self.ys);
        max
    }

    /// The span of the x axis, `(min, max)`
    pub fn x_bounds(&self) -> (f64, f64) {
        minmax(&self.xs)
    }

    /// Copy any borrowed storage, producing a pair free of its source
    pub fn into_owned(self) -> ArrayPair<'static> {
        ArrayPair {
            xs: Cow::Owned(self.xs.into_owned()),
            ys: Cow::Owned(self.ys.into_owned()),
        }
    }
}

impl From<(Vec<f64>, Vec<f64>)> for ArrayPair<'static> {
    fn from(value: (Vec<f64>, Vec<f64>)) -> Self {
        Self::new(Cow::Owned(value.0), Cow::Owned(value.1))
    }
}

impl<'a> From<(&'a [f64], &'a [f64])> for ArrayPair<'a> {
    fn from(value: (&'a [f64], &'a [f64])) -> Self {
        Self::wrap(value.0, value.1)
    }
}

/// The minimum and maximum values of `values` in a single pass.
///
/// An empty slice produces `(inf, -inf)`.
pub fn minmax<T: Float>(values: &[T]) -> (T, T) {
    let mut max = -T::infinity();
    let mut min = T::infinity();

    for v in values.iter() {
        if *v > max {
            max = *v;
        }
        if *v < min {
            min = *v;
        }
    }
    (min, max)
}

/// Create an evenly spaced grid from `start` to `end` with spacing `step`
pub fn gridspace<T: Float + ToPrimitive>(start: T, end: T, step: T) -> Vec<T> {
    let distance = end - start;
    let steps = (distance / step).to_usize().unwrap_or_default();
    let mut result = Vec::with_capacity(steps);
    for i in 0..steps {
        result.push(start + T::from(i).unwrap() * step);
    }
    result
}

/// Integrate `ys` over `xs` using the trapezoid rule
pub fn trapz<T: Float + Sum>(xs: &[T], ys: &[T]) -> T {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| {
            let delta = x[1] - x[0];
            delta * T::from(0.5).unwrap() * (y[1] + y[0])
        })
        .sum()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_array_pair_basics() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [5.0, 20.0, 10.0, 1.0];
        let pair = ArrayPair::wrap(&xs, &ys);
        assert_eq!(pair.len(), 4);
        assert!(!pair.is_empty());
        assert_eq!(pair.get(1), Some((2.0, 20.0)));
        assert_eq!(pair.get(4), None);
        assert_eq!(pair.argmax(), 1);
        assert_eq!(pair.max_y(), 20.0);
        assert_eq!(pair.x_bounds(), (1.0, 4.0));
    }

    #[test]
    fn test_into_owned_outlives_source() {
        let owned = {
            let xs = vec![1.0, 2.0];
            let ys = vec![3.0, 4.0];
            ArrayPair::wrap(&xs, &ys).into_owned()
        };
        assert_eq!(owned.get(1), Some((2.0, 4.0)));
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_panics() {
        let xs = [1.0, 2.0];
        let ys = [1.0];
        ArrayPair::wrap(&xs, &ys);
    }

    #[test]
    fn test_minmax() {
        let values = [3.0, -1.0, 7.5, 0.0];
        assert_eq!(minmax(&values), (-1.0, 7.5));
        let empty: [f64; 0] = [];
        let (min, max) = minmax(&empty);
        assert!(min.is_infinite() && min > 0.0);
        assert!(max.is_infinite() && max < 0.0);
    }

    #[test]
    fn test_gridspace() {
        let grid = gridspace(0.0, 1.0, 0.25);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn test_trapz_linear() {
        // y = 2x integrates to x^2, and the trapezoid rule is exact for a line
        let xs: Vec<f64> = gridspace(0.0, 10.0, 0.01);
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x).collect();
        let area = trapz(&xs, &ys);
        let expected = xs.last().unwrap().powi(2);
        assert!((area - expected).abs() < 1e-9);
    }

    #[test]
    fn test_trapz_degenerate() {
        assert_eq!(trapz::<f64>(&[], &[]), 0.0);
        assert_eq!(trapz(&[1.0], &[5.0]), 0.0);
    }
}
