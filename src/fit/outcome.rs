//! Validated result of a successful minimization.
use crate::errors::FitResult;
use crate::minimize::types::{Cost, Curvature, FnEvalMap, Par};
use crate::minimize::validation::{validate_curvature, validate_value};

/// Outcome of a successful fit.
///
/// ## Purpose
/// Bundle everything the diagnostics layer needs about a completed
/// minimization: the estimated parameters, the cost at the optimum, the
/// optimizer's own accounting, and the inverse curvature of the cost
/// surface at the optimum.
///
/// ## Invariants
/// - `estimators` is non-empty with finite entries.
/// - `deviance` is finite.
/// - `inverse_curvature` is square with side `estimators.len()` and finite
///   entries.
/// - An outcome only exists for runs that satisfied the convergence
///   policy, so `converged` is always `true` on a constructed value; it is
///   kept as an explicit field so callers serializing or logging outcomes
///   do not have to encode that policy themselves.
///
/// ## Downstream usage
/// Stored inside [`FitSession`](crate::fit::FitSession) and consumed by
/// every function in [`crate::diagnostics`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// Parameter values at the optimum.
    pub estimators: Par,

    /// Cost function value at the optimum.
    pub deviance: Cost,

    /// Whether the run met the convergence policy. Always `true` for a
    /// constructed outcome.
    pub converged: bool,

    /// Native termination status reported by the optimizer.
    pub status: String,

    /// Number of optimizer iterations performed.
    pub iterations: usize,

    /// Per-operation function evaluation counts (cost, gradient, ...).
    pub fn_evals: FnEvalMap,

    /// Inverse of the observed curvature (Hessian) at the optimum.
    pub inverse_curvature: Curvature,
}

impl FitOutcome {
    /// Build a validated outcome from raw optimizer output.
    ///
    /// # Errors
    /// - [`FitError::NonFiniteCost`](crate::errors::FitError::NonFiniteCost)
    ///   if `deviance` is NaN or infinite.
    /// - [`FitError::CurvatureDimMismatch`](crate::errors::FitError::CurvatureDimMismatch)
    ///   or [`FitError::InvalidCurvature`](crate::errors::FitError::InvalidCurvature)
    ///   if the inverse curvature does not match the parameter dimension or
    ///   holds non-finite entries.
    pub fn new(
        estimators: Par, deviance: Cost, status: String, iterations: usize, fn_evals: FnEvalMap,
        inverse_curvature: Curvature,
    ) -> FitResult<Self> {
        validate_value(deviance)?;
        validate_curvature(&inverse_curvature, estimators.len())?;
        Ok(Self {
            estimators,
            deviance,
            converged: true,
            status,
            iterations,
            fn_evals,
            inverse_curvature,
        })
    }
}
