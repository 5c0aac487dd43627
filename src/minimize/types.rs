//! minimize::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! minimizer-integration layer. The rest of the crate refers to these
//! aliases instead of `ndarray` and Argmin generics, so the backend can
//! evolve in one place.
//!
//! Conventions
//! -----------
//! - `Par` and `Grad` are conceptually column vectors with length equal to
//!   the number of free parameters.
//! - `Cost` is always a scalar `f64` on the deviance scale (twice the
//!   negative log-likelihood); the cost variants in [`crate::cost`] own
//!   that convention.
//! - `Curvature` is a dense square matrix with dimension
//!   `par.len() × par.len()`.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector for cost minimization.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the crate.
pub type Par = Array1<f64>;

/// Gradient vector of the cost with respect to the parameters.
///
/// Alias for `ndarray::Array1<f64>`, matching the shape of `Par`.
pub type Grad = Array1<f64>;

/// Dense curvature (Hessian) matrix of the cost at a point.
///
/// Alias for `ndarray::Array2<f64>`; `n × n` for `n = Par.len()`.
pub type Curvature = Array2<f64>;

/// Scalar objective value: the cost on the deviance scale.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Eigenvalues with magnitude at most this threshold are treated as zero
/// when pseudo-inverting the observed curvature.
pub const EIGEN_EPS: f64 = 1e-12;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Par, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Par, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Par, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Par, Grad, Cost>;
