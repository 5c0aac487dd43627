//! likefit — parametric model fitting with likelihood-based diagnostics.
//!
//! Purpose
//! -------
//! Fit parametric models to data by minimizing a deviance-scaled cost
//! function (chi-squared least squares or Poisson deviance) and answer the
//! statistical questions that follow a fit: parameter covariance and
//! correlation, standard errors, goodness-of-fit p-values, prediction
//! bands, confidence ellipses, and cost-surface scans.
//!
//! Key behaviors
//! -------------
//! - Cost functions implement [`cost::CostModel`] and are minimized with
//!   L-BFGS through the `argmin` ecosystem ([`minimize`]).
//! - A [`fit::FitSession`] owns the model, runs the fit, and exposes every
//!   diagnostic in [`diagnostics`] as a method.
//! - Gradients and Hessians are finite-differenced; the covariance comes
//!   from an eigenvalue-truncated pseudo-inverse of the observed
//!   curvature.
//!
//! Invariants & assumptions
//! ------------------------
//! - Cost functions are deviance scaled: twice the negative log-likelihood
//!   up to a model-independent constant, so the covariance is twice the
//!   inverse curvature and the deviance is chi-squared distributed under
//!   the fitted model.
//! - A stored fit outcome always comes from a run that met the convergence
//!   policy; failed runs surface as typed errors and publish nothing.
//!
//! Conventions
//! -----------
//! - Vectors and matrices are `ndarray` types via the aliases in
//!   [`minimize::types`].
//! - All fallible operations return [`errors::FitResult`]; no panics in
//!   library code.
//!
//! Downstream usage
//! ----------------
//! - Typical flow: build a [`cost::LeastSquares`] or
//!   [`cost::PoissonDeviance`], wrap it in a [`fit::FitSession`], call
//!   [`fit`](fit::FitSession::fit), then read diagnostics off the session.
//! - The lower-level [`minimize`] and [`diagnostics`] modules stay public
//!   for callers composing their own pipelines.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in each module and by the
//!   end-to-end pipeline tests under `tests/`.

pub mod cost;
pub mod diagnostics;
pub mod errors;
pub mod fit;
pub mod minimize;

pub use cost::{CostModel, LeastSquares, PoissonDeviance};
pub use errors::{FitError, FitResult};
pub use fit::{FitOutcome, FitSession};
pub use minimize::{FitOptions, LineSearcher, Tolerances};
