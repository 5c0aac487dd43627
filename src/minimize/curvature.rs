//! Observed curvature at the optimum and its pseudo-inverse.
//!
//! Purpose
//! -------
//! Fulfill the inverse-curvature half of the minimizer contract: after the
//! solver converges, approximate the Hessian of the cost at the best
//! parameter vector by finite differences and invert it through a
//! symmetric eigendecomposition with eigenvalue truncation. The resulting
//! matrix is the `inverse_curvature` stored on the fit outcome, which the
//! diagnostics layer rescales into the parameter covariance.
//!
//! Key behaviors
//! -------------
//! - Build a finite-difference gradient of the cost and differentiate it
//!   again with `central_hessian`, falling back to `forward_hessian` when
//!   the central approximation fails validation.
//! - Symmetrize the accepted curvature matrix in-place.
//! - Pseudo-invert via `nalgebra::symmetric_eigen`, discarding eigenvalues
//!   at or below [`EIGEN_EPS`]; no explicit matrix inverse is formed.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned inverse curvature is symmetric positive semi-definite by
//!   construction (truncation discards non-positive directions), and its
//!   dimension equals `par.len()`.
//! - Errors raised by the cost during finite differencing are captured and
//!   surfaced as typed [`FitError`](crate::errors::FitError) values, never
//!   as silent NaN entries.
use std::cell::RefCell;

use crate::cost::CostModel;
use crate::errors::FitResult;
use crate::minimize::{
    adapter::CostAdapter,
    types::{Curvature, Grad, Par, EIGEN_EPS},
    validation::validate_curvature,
};
use argmin::core::{CostFunction, Error};
use finitediff::FiniteDiff;
use nalgebra::DMatrix;
use ndarray::Array2;

/// Compute the inverse-curvature matrix of the cost at `par`.
///
/// Wires together the finite-difference curvature ([`observed_curvature`])
/// and the eigen-truncated pseudo-inverse ([`pseudo_inverse`]), capturing
/// any cost-evaluation error raised inside the FD closures.
///
/// # Errors
/// - Any [`crate::errors::FitError`] raised by the cost during finite
///   differencing (e.g., a domain violation just outside the optimum).
/// - `CurvatureDimMismatch` / `InvalidCurvature` when both the central and
///   forward difference curvatures fail validation.
pub fn inverse_curvature<M: CostModel>(
    problem: &CostAdapter<'_, M>, par: &Par,
) -> FitResult<Curvature> {
    let closure_err: RefCell<Option<Error>> = RefCell::new(None);
    let cost_func = |par: &Par| -> f64 {
        match problem.cost(par) {
            Ok(val) => val,
            Err(e) => {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                f64::NAN
            }
        }
    };
    let grad_func = |par: &Par| -> Grad { par.central_diff(&cost_func) };
    let curvature = observed_curvature(&grad_func, par);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    let curvature = curvature?;
    Ok(pseudo_inverse(&curvature))
}

/// Finite-difference curvature (Hessian) of the cost at `par`.
///
/// Central-difference curvature is attempted first; any validation failure
/// (shape or finiteness) causes an automatic fallback to a
/// forward-difference curvature. The accepted matrix is symmetrized
/// in-place before being returned.
///
/// # Errors
/// - `CurvatureDimMismatch` when the forward-difference curvature
///   dimensions do not match `par.len()`.
/// - `InvalidCurvature` when it contains any NaN or infinite entries.
pub fn observed_curvature<F: Fn(&Par) -> Grad>(f: &F, par: &Par) -> FitResult<Curvature> {
    let dim = par.len();
    let mut central = par.central_hessian(f);
    match validate_curvature(&central, dim) {
        Ok(_) => {
            symmetrize(&mut central);
            Ok(central)
        }
        Err(_) => {
            let mut forward = par.forward_hessian(f);
            validate_curvature(&forward, dim)?;
            symmetrize(&mut forward);
            Ok(forward)
        }
    }
}

/// Pseudo-inverse of a symmetric curvature matrix via eigendecomposition.
///
/// With `C = Q Λ Qᵀ`, the inverse entry is
/// `inv[i, j] = Σ_{k: λ_k > EIGEN_EPS} Q[i, k]·Q[j, k] / λ_k`.
/// Eigenvalues at or below [`EIGEN_EPS`] are treated as numerically
/// nonpositive and excluded, which keeps the result positive semi-definite
/// and inflates variances along weakly identified directions.
pub fn pseudo_inverse(curvature: &Curvature) -> Curvature {
    let n = curvature.nrows();
    let mut curvature_nalg = DMatrix::<f64>::zeros(n, n);
    for j in 0..n {
        for i in 0..n {
            curvature_nalg[(i, j)] = curvature[[i, j]];
        }
    }
    let eigen_decomp = curvature_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let mut inverse = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            inverse[[i, j]] = eigenvals
                .iter()
                .enumerate()
                .filter(|(_, lambda)| **lambda > EIGEN_EPS)
                .map(|(k, &lambda)| q[(i, k)] * q[(j, k)] / lambda)
                .sum();
        }
    }
    inverse
}

// In-place symmetrization over the strict lower triangle; the diagonal is
// left untouched.
fn symmetrize(curvature: &mut Curvature) {
    for i in 0..curvature.nrows() {
        for j in 0..i {
            let avg = 0.5 * (curvature[[i, j]] + curvature[[j, i]]);
            curvature[[i, j]] = avg;
            curvature[[j, i]] = avg;
        }
    }
}
