//! Validation helpers for the minimizer-integration layer.
//!
//! This module centralizes common consistency checks used across the
//! minimize interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Seed validation**: [`validate_seed`] enforces a non-empty, finite
//!   initial parameter vector.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Estimator validation**: [`validate_estimators`] ensures a candidate
//!   best-parameter vector exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks cost outputs for
//!   finiteness.
//! - **Curvature validation**: [`validate_curvature`] checks shape and
//!   finiteness of a curvature matrix.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`FitError`] variants, making higher-level code more uniform.
use crate::errors::{FitError, FitResult};
use crate::minimize::types::{Curvature, Grad, Par};

/// Validate the optional gradient-norm tolerance.
///
/// - Accepts `None` (no stopping rule on gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`FitError::InvalidTolGrad`] if the value is non-finite or <= 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> FitResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(FitError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(FitError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance (for convergence).
///
/// - Accepts `None` (no stopping rule on cost change).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`FitError::InvalidTolCost`] if the value is non-finite or <= 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> FitResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(FitError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(FitError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a seed parameter vector.
///
/// Checks:
/// - the seed is non-empty (its length fixes the fit dimension)
/// - every element is finite (`NaN` or infinities are rejected)
///
/// # Errors
/// - [`FitError::EmptySeed`] if the seed has length 0.
/// - [`FitError::InvalidSeed`] with the index/value of the first offending
///   element.
pub fn validate_seed(seed: &Par) -> FitResult<()> {
    if seed.is_empty() {
        return Err(FitError::EmptySeed);
    }
    for (index, &value) in seed.iter().enumerate() {
        if !value.is_finite() {
            return Err(FitError::InvalidSeed {
                index,
                value,
                reason: "Seed elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or infinities are rejected)
///
/// # Errors
/// - [`FitError::GradientDimMismatch`] if length does not match `dim`.
/// - [`FitError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> FitResult<()> {
    if grad.len() != dim {
        return Err(FitError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(FitError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector.
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Returns
/// The owned `Par` if valid.
///
/// # Errors
/// - [`FitError::MissingEstimators`] if no vector was provided.
/// - [`FitError::InvalidEstimator`] if any element is non-finite.
pub fn validate_estimators(estimators: Option<Par>) -> FitResult<Par> {
    match estimators {
        Some(e) => {
            for (index, &value) in e.iter().enumerate() {
                if !value.is_finite() {
                    return Err(FitError::InvalidEstimator {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(e)
        }
        None => Err(FitError::MissingEstimators),
    }
}

/// Validate that a scalar cost value is finite.
///
/// # Errors
/// Returns [`FitError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> FitResult<()> {
    if !value.is_finite() {
        return Err(FitError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate the shape and entries of a curvature matrix.
///
/// # Checks
/// 1. Matrix dimensions must equal `dim × dim`.
/// 2. All entries must be finite (no NaN or infinities).
///
/// # Errors
/// - [`FitError::CurvatureDimMismatch`] if dimensions do not match `dim`.
/// - [`FitError::InvalidCurvature`] if any entry is non-finite, with
///   offending row/col indices and value.
pub fn validate_curvature(curvature: &Curvature, dim: usize) -> FitResult<()> {
    if curvature.nrows() != dim || curvature.ncols() != dim {
        return Err(FitError::CurvatureDimMismatch {
            expected: dim,
            found: (curvature.nrows(), curvature.ncols()),
        });
    }
    for ((i, j), &value) in curvature.indexed_iter() {
        if !value.is_finite() {
            return Err(FitError::InvalidCurvature { row: i, col: j, value });
        }
    }
    Ok(())
}
