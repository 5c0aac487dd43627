//! Parameter-level summary statistics derived from a fit outcome.
//!
//! ## Purpose
//! Turn the inverse curvature stored on a
//! [`FitOutcome`](crate::fit::FitOutcome) into the quantities users
//! actually read off a fit report: the covariance matrix, per-parameter
//! standard errors, the correlation matrix, the degrees of freedom, and
//! the goodness-of-fit p-value.
//!
//! ## Conventions
//! - Cost functions in this crate are scaled so that twice the inverse
//!   curvature estimates the covariance; see [`crate::cost`].
//! - Degrees of freedom are signed so over-parameterized fits surface as
//!   a negative count instead of a panic or a silent wrap.
use crate::errors::{FitError, FitResult};
use crate::fit::FitOutcome;
use crate::minimize::types::Curvature;
use ndarray::Array1;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Estimated covariance matrix of the parameter estimators.
///
/// Twice the inverse curvature at the optimum. The factor of two matches
/// the deviance scaling of the crate's cost functions.
pub fn covariance(outcome: &FitOutcome) -> Curvature {
    outcome.inverse_curvature.mapv(|v| 2.0 * v)
}

/// Standard errors of the estimators.
///
/// Square roots of the covariance diagonal. A non-positive-definite
/// curvature estimate produces NaN entries here rather than an error;
/// the NaN is the honest report of an ill-determined parameter.
pub fn std_errors(outcome: &FitOutcome) -> Array1<f64> {
    covariance(outcome).diag().mapv(f64::sqrt)
}

/// Correlation matrix of the estimators.
///
/// Covariance normalized by the outer product of the standard errors.
/// Entries involving a zero-error parameter are explicitly NaN.
pub fn correlation(outcome: &FitOutcome) -> Curvature {
    let cov = covariance(outcome);
    let errors = std_errors(outcome);
    let npar = errors.len();
    let mut corr = cov;
    for i in 0..npar {
        for j in 0..npar {
            let scale = errors[i] * errors[j];
            if scale == 0.0 {
                corr[[i, j]] = f64::NAN;
            } else {
                corr[[i, j]] /= scale;
            }
        }
    }
    corr
}

/// Number of degrees of freedom of the fit.
///
/// Data points minus free parameters, signed so callers can detect
/// over-parameterized fits.
pub fn ndof(num_points: usize, num_par: usize) -> i64 {
    num_points as i64 - num_par as i64
}

/// Goodness-of-fit p-value.
///
/// Right tail of the chi-squared distribution with `ndof` degrees of
/// freedom evaluated at the deviance.
///
/// # Errors
/// - [`FitError::InvalidNdof`] if `ndof` is not positive; the chi-squared
///   reference distribution is undefined there.
/// - [`FitError::NonFiniteCost`] if `deviance` is NaN or infinite.
pub fn pvalue(deviance: f64, ndof: i64) -> FitResult<f64> {
    if ndof <= 0 {
        return Err(FitError::InvalidNdof { ndof });
    }
    if !deviance.is_finite() {
        return Err(FitError::NonFiniteCost { value: deviance });
    }
    let chi2 = ChiSquared::new(ndof as f64)
        .map_err(|_| FitError::InvalidNdof { ndof })?;
    Ok(1.0 - chi2.cdf(deviance))
}
