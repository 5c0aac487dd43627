//! cost — statistical cost functions over a dataset and a user model.
//!
//! Purpose
//! -------
//! Define the [`CostModel`] capability interface and its two concrete
//! variants, [`LeastSquares`] and [`PoissonDeviance`]. A cost model owns an
//! immutable dataset, references a caller-supplied pure model function, and
//! evaluates a scalar fit statistic for a candidate parameter vector. The
//! fitting session and every diagnostic consume cost models only through
//! the trait, never branching on the concrete variant.
//!
//! Key behaviors
//! -------------
//! - Evaluate the chi-square cost `Σ ((y − model(x, par)) / ysigma)²`
//!   ([`LeastSquares`]) or the saturated-model Poisson deviance
//!   ([`PoissonDeviance`]) for a candidate parameter vector.
//! - Evaluate the model on an arbitrary x-grid ([`CostModel::eval`]) for
//!   prediction curves and finite-difference gradients.
//! - Validate the dataset/seed pair once, before any fit, via
//!   [`CostModel::check`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Constructing a cost model is pure data capture and never fails; every
//!   contract violation surfaces at `check` or `cost` time as a
//!   [`FitError`](crate::errors::FitError).
//! - The model function is pure: `(x, par) -> y` of matching length, with
//!   no side effects. A wrong-length output is reported as
//!   `ModelLengthMismatch`.
//! - **Scale convention**: every implementation of [`CostModel`] must be
//!   defined on the *twice negative log-likelihood* (deviance) scale. The
//!   diagnostics layer rescales the minimizer's inverse curvature by a
//!   factor of 2 to obtain the parameter covariance, and that factor is
//!   only correct under this convention. A variant on another scale must
//!   not implement this trait without rescaling its cost.
//!
//! Downstream usage
//! ----------------
//! - [`crate::fit::FitSession`] drives the minimization of `cost` and
//!   stores the resulting outcome.
//! - [`crate::diagnostics`] re-evaluates `eval` and `cost` for prediction
//!   curves, propagated error bands, and cost-surface scans.

pub mod least_squares;
pub mod poisson;

use crate::errors::FitResult;
use crate::minimize::types::{Cost, Par};
use ndarray::Array1;

pub use self::least_squares::LeastSquares;
pub use self::poisson::PoissonDeviance;

/// Capability interface shared by all cost-function variants.
///
/// Implementations own their dataset, reference the caller's model, and are
/// immutable for their whole life; all mutability lives in the fitting
/// session. The cost must be finite for valid inputs and defined on the
/// deviance scale (see the module docs for the ×2 covariance convention).
pub trait CostModel {
    /// Evaluate the scalar cost at `par`.
    ///
    /// # Errors
    /// Returns a domain error (non-positive sigma, non-positive Poisson
    /// expectation, wrong-length model output) describing the offending
    /// index and value.
    fn cost(&self, par: &Par) -> FitResult<Cost>;

    /// Evaluate the model on an arbitrary x-grid at `par`.
    fn eval(&self, x: &Array1<f64>, par: &Par) -> Array1<f64>;

    /// Number of data points in the owned dataset.
    fn num_points(&self) -> usize;

    /// Validate the dataset and a candidate seed before fitting.
    ///
    /// Called once by `FitSession::fit`; checks sequence lengths, per-point
    /// domain constraints, and seed finiteness.
    fn check(&self, seed: &Par) -> FitResult<()>;
}
