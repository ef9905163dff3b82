//! Crop, threshold, normalize and scale coordinate sequences.
use thiserror::Error;

use crate::arrayops::minmax;

/// All the ways a sequence transformation can fail
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransformError {
    #[error("no sample found beyond the lower bound {0}")]
    LowerBoundNotFound(f64),
    #[error("no sample found beyond the upper bound {0}")]
    UpperBoundNotFound(f64),
    #[error("cannot normalize an empty sequence")]
    EmptySequence,
    #[error("cannot normalize a sequence with zero span")]
    ZeroSpan,
}

/// Crop `xs` and `ys` to the window spanned by `x_from` and `x_to`.
///
/// The bounds may be given in either order. The window covers the first
/// sample whose x exceeds the lower bound up to, but not including, the
/// first sample whose x exceeds the upper bound. Fails when either
/// boundary lies at or beyond the end of the data.
pub fn cut_xy(
    xs: &[f64],
    ys: &[f64],
    x_from: f64,
    x_to: f64,
) -> Result<(Vec<f64>, Vec<f64>), TransformError> {
    let (x_from, x_to) = if x_from <= x_to {
        (x_from, x_to)
    } else {
        (x_to, x_from)
    };
    let from_idx = xs
        .iter()
        .position(|x| *x > x_from)
        .ok_or(TransformError::LowerBoundNotFound(x_from))?;
    let to_idx = xs
        .iter()
        .position(|x| *x > x_to)
        .ok_or(TransformError::UpperBoundNotFound(x_to))?;
    Ok((xs[from_idx..to_idx].to_vec(), ys[from_idx..to_idx].to_vec()))
}

/// Replace every value at or below `thresh` with `floor`
pub fn threshold(ys: &[f64], thresh: f64, floor: f64) -> Vec<f64> {
    ys.iter()
        .map(|y| if *y > thresh { *y } else { floor })
        .collect()
}

/// Min-max rescale `ys` onto the interval [0, 1]
pub fn norm(ys: &[f64]) -> Result<Vec<f64>, TransformError> {
    if ys.is_empty() {
        return Err(TransformError::EmptySequence);
    }
    let (min, max) = minmax(ys);
    let span = max - min;
    if span == 0.0 {
        return Err(TransformError::ZeroSpan);
    }
    Ok(ys.iter().map(|y| (*y - min) / span).collect())
}

/// Multiply every value by `factor`
pub fn scale(ys: &[f64], factor: f64) -> Vec<f64> {
    ys.iter().map(|y| *y * factor).collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    const XS: [f64; 6] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
    const YS: [f64; 6] = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];

    #[test]
    fn test_cut_xy() {
        let (xs, ys) = cut_xy(&XS, &YS, 1.5, 4.5).unwrap();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(ys, vec![20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_cut_xy_swapped_bounds() {
        let forward = cut_xy(&XS, &YS, 1.5, 4.5).unwrap();
        let reversed = cut_xy(&XS, &YS, 4.5, 1.5).unwrap();
        assert_eq!(forward, reversed);
    }

    #[test]
    fn test_cut_xy_out_of_range() {
        assert_eq!(
            cut_xy(&XS, &YS, 7.0, 9.0),
            Err(TransformError::LowerBoundNotFound(7.0))
        );
        assert_eq!(
            cut_xy(&XS, &YS, 2.0, 6.0),
            Err(TransformError::UpperBoundNotFound(6.0))
        );
    }

    #[rstest]
    #[case(0.0, 0.0, vec![1.0, 0.0, 2.0, 0.0])]
    #[case(1.0, -1.0, vec![-1.0, -1.0, 2.0, -1.0])]
    fn test_threshold(#[case] thresh: f64, #[case] floor: f64, #[case] expected: Vec<f64>) {
        let ys = [1.0, -0.5, 2.0, 0.0];
        assert_eq!(threshold(&ys, thresh, floor), expected);
    }

    #[test]
    fn test_norm() {
        let normed = norm(&YS).unwrap();
        assert_eq!(normed[0], 0.0);
        assert_eq!(normed[5], 1.0);
        assert!((normed[2] - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_norm_failures() {
        assert_eq!(norm(&[]), Err(TransformError::EmptySequence));
        assert_eq!(norm(&[3.0, 3.0, 3.0]), Err(TransformError::ZeroSpan));
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(&[1.0, -2.0], 2.5), vec![2.5, -5.0]);
    }
}
