//! Confidence ellipses for parameter pairs.
//!
//! ## Purpose
//! Trace the n-sigma confidence contour of two estimators from their 2x2
//! covariance block. The contour is the image of an n-sigma circle under
//! the Cholesky factor of the block, shifted to the estimator pair.
use crate::errors::{FitError, FitResult};
use crate::fit::FitOutcome;
use crate::minimize::types::Curvature;
use nalgebra::{Cholesky, Matrix2, Vector2};
use ndarray::Array2;
use std::f64::consts::TAU;

/// Default number of points on the ellipse contour.
pub const DEFAULT_ELLIPSE_POINTS: usize = 100;

/// Confidence ellipse of the estimator pair `(xindex, yindex)`.
///
/// Returns an array of shape `(npoints, 2)` whose rows are `(x, y)` points
/// tracing the contour. The first and last rows coincide so the contour
/// plots as a closed curve.
///
/// # Errors
/// - [`FitError::ParameterOutOfRange`] if either index exceeds the
///   parameter count or the two indices coincide.
/// - [`FitError::InvalidNsigma`] if `nsigma` is not a finite positive
///   number.
/// - [`FitError::InvalidEllipsePoints`] if `npoints < 2`; the contour
///   needs at least a start and an end.
/// - [`FitError::NotPositiveDefinite`] if the 2x2 covariance block has no
///   Cholesky factorization. The variances are reported to help diagnose
///   which parameter degenerated.
pub fn confidence_ellipse(
    outcome: &FitOutcome, covariance: &Curvature, xindex: usize, yindex: usize, nsigma: f64,
    npoints: usize,
) -> FitResult<Array2<f64>> {
    let npar = outcome.estimators.len();
    if xindex >= npar {
        return Err(FitError::ParameterOutOfRange { index: xindex, npar });
    }
    if yindex >= npar || yindex == xindex {
        return Err(FitError::ParameterOutOfRange { index: yindex, npar });
    }
    if !(nsigma.is_finite() && nsigma > 0.0) {
        return Err(FitError::InvalidNsigma { nsigma });
    }
    if npoints < 2 {
        return Err(FitError::InvalidEllipsePoints { npoints });
    }

    let var_x = covariance[[xindex, xindex]];
    let var_y = covariance[[yindex, yindex]];
    let cov_xy = covariance[[xindex, yindex]];
    let block = Matrix2::new(var_x, cov_xy, cov_xy, var_y);
    let chol = Cholesky::new(block)
        .ok_or(FitError::NotPositiveDefinite { var_x, var_y })?;
    let factor = chol.l();
    let center = Vector2::new(outcome.estimators[xindex], outcome.estimators[yindex]);

    let mut contour = Array2::<f64>::zeros((npoints, 2));
    for k in 0..npoints {
        // The endpoint angle is exactly TAU so the contour closes.
        let angle = TAU * k as f64 / (npoints - 1) as f64;
        let circle = Vector2::new(nsigma * angle.cos(), nsigma * angle.sin());
        let point = center + factor * circle;
        contour[[k, 0]] = point.x;
        contour[[k, 1]] = point.y;
    }
    Ok(contour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use std::collections::HashMap;

    fn outcome() -> FitOutcome {
        FitOutcome::new(
            array![2.0, 1.0],
            0.0,
            "Terminated(SolverConverged)".to_string(),
            3,
            HashMap::new(),
            Array2::<f64>::eye(2),
        )
        .unwrap()
    }

    // Shoelace formula over the closed contour.
    fn polygon_area(contour: &Array2<f64>) -> f64 {
        let n = contour.nrows();
        let mut twice_area = 0.0;
        for k in 0..n - 1 {
            twice_area += contour[[k, 0]] * contour[[k + 1, 1]]
                - contour[[k + 1, 0]] * contour[[k, 1]];
        }
        (twice_area / 2.0).abs()
    }

    #[test]
    // Purpose
    // -------
    // Verify the contour is centered on the estimator pair, closes on
    // itself, and for a diagonal covariance stays on the axis-aligned
    // ellipse with semi-axes nsigma * sqrt(var).
    fn diagonal_covariance_yields_axis_aligned_ellipse() {
        // Arrange
        let outcome = outcome();
        let covariance = array![[4.0, 0.0], [0.0, 1.0]];

        // Act
        let contour =
            confidence_ellipse(&outcome, &covariance, 0, 1, 1.0, 64).unwrap();

        // Assert: closed and on the ellipse ((x-2)/2)^2 + (y-1)^2 = 1.
        assert_eq!(contour.shape(), &[64, 2]);
        assert!((contour[[0, 0]] - contour[[63, 0]]).abs() < 1e-12);
        assert!((contour[[0, 1]] - contour[[63, 1]]).abs() < 1e-12);
        for k in 0..64 {
            let u = (contour[[k, 0]] - 2.0) / 2.0;
            let v = contour[[k, 1]] - 1.0;
            assert!((u * u + v * v - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the enclosed area scales with nsigma squared, which pins down
    // the overall normalization of the transform.
    fn area_scales_with_nsigma_squared() {
        // Arrange: correlated block with determinant 0.75.
        let outcome = outcome();
        let covariance = array![[1.0, 0.5], [0.5, 1.0]];

        // Act
        let one_sigma =
            confidence_ellipse(&outcome, &covariance, 0, 1, 1.0, 400).unwrap();
        let two_sigma =
            confidence_ellipse(&outcome, &covariance, 0, 1, 2.0, 400).unwrap();

        // Assert: exact areas are pi * nsigma^2 * sqrt(det); the polygon
        // approximation at 400 points is good to well under a percent.
        let expected = std::f64::consts::PI * 0.75f64.sqrt();
        assert!((polygon_area(&one_sigma) - expected).abs() / expected < 1e-3);
        assert!(
            (polygon_area(&two_sigma) - 4.0 * expected).abs() / (4.0 * expected) < 1e-3
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify a non-positive-definite block is rejected with the variances
    // attached for diagnosis.
    fn non_positive_definite_block_is_rejected() {
        // Arrange: correlation above one.
        let outcome = outcome();
        let covariance = array![[1.0, 2.0], [2.0, 1.0]];

        // Act
        let err = confidence_ellipse(&outcome, &covariance, 0, 1, 1.0, 10)
            .expect_err("Indefinite block should be rejected");

        // Assert
        assert!(matches!(
            err,
            FitError::NotPositiveDefinite { var_x, var_y } if var_x == 1.0 && var_y == 1.0
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify index and argument validation: out-of-range index, repeated
    // index, bad nsigma, too few points.
    fn invalid_arguments_are_rejected() {
        // Arrange
        let outcome = outcome();
        let covariance = array![[1.0, 0.0], [0.0, 1.0]];

        // Act / Assert
        assert!(matches!(
            confidence_ellipse(&outcome, &covariance, 2, 1, 1.0, 10),
            Err(FitError::ParameterOutOfRange { index: 2, npar: 2 })
        ));
        assert!(matches!(
            confidence_ellipse(&outcome, &covariance, 0, 0, 1.0, 10),
            Err(FitError::ParameterOutOfRange { index: 0, npar: 2 })
        ));
        assert!(matches!(
            confidence_ellipse(&outcome, &covariance, 0, 1, -1.0, 10),
            Err(FitError::InvalidNsigma { .. })
        ));
        assert!(matches!(
            confidence_ellipse(&outcome, &covariance, 0, 1, 1.0, 1),
            Err(FitError::InvalidEllipsePoints { npoints: 1 })
        ));
    }
}
