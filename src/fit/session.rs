//! Stateful fitting session over a cost model.
use crate::cost::CostModel;
use crate::diagnostics;
use crate::errors::{FitError, FitResult};
use crate::fit::FitOutcome;
use crate::minimize::builders::{build_lbfgs_hager_zhang, build_lbfgs_more_thuente};
use crate::minimize::types::{Cost, Curvature, Par};
use crate::minimize::validation::validate_seed;
use crate::minimize::{run_lbfgs, CostAdapter, FitOptions, LineSearcher};
use ndarray::{Array1, Array2};

/// A fitting session: a cost model plus the outcome of its latest
/// successful fit.
///
/// ## Purpose
/// The main user-facing entry point of the crate. Owns the cost model,
/// drives the minimization through [`fit`](Self::fit), and exposes every
/// post-fit diagnostic as a method so callers never juggle outcomes,
/// covariances, and model closures by hand.
///
/// ## Key behaviors
/// - [`fit`](Self::fit) validates the seed against the model before any
///   optimizer work starts, so domain errors surface with their typed
///   variants instead of mid-run solver failures.
/// - A failed fit leaves the previous outcome untouched; only a run that
///   meets the convergence policy replaces the stored outcome.
/// - Every diagnostic accessor returns [`FitError::NotFitted`] until a
///   fit has succeeded.
///
/// ## Concurrency
/// The session is single-threaded by design. `fit` takes `&mut self`;
/// diagnostics take `&self` and never mutate, so a fitted session can be
/// shared immutably.
#[derive(Debug)]
pub struct FitSession<M: CostModel> {
    model: M,
    outcome: Option<FitOutcome>,
}

impl<M: CostModel> FitSession<M> {
    /// Create a session over a cost model. No fitting happens yet.
    pub fn new(model: M) -> Self {
        Self { model, outcome: None }
    }

    /// The underlying cost model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Run the minimization from `seed` and store the outcome.
    ///
    /// Returns the optimizer's native termination status string for
    /// logging.
    ///
    /// # Errors
    /// - Seed validation errors ([`FitError::EmptySeed`],
    ///   [`FitError::InvalidSeed`]) and any domain error from the model's
    ///   own [`check`](CostModel::check), before optimization starts.
    /// - [`FitError::ConvergenceFailure`] if the run ends without meeting
    ///   the convergence policy; the stored outcome is left unchanged.
    /// - Any error from the curvature computation at the optimum.
    pub fn fit(&mut self, seed: Par, opts: &FitOptions) -> FitResult<String> {
        validate_seed(&seed)?;
        self.model.check(&seed)?;
        let problem = CostAdapter::new(&self.model);
        let outcome = match opts.line_searcher {
            LineSearcher::MoreThuente => {
                let solver = build_lbfgs_more_thuente(opts)?;
                run_lbfgs(seed, opts, problem, solver)?
            }
            LineSearcher::HagerZhang => {
                let solver = build_lbfgs_hager_zhang(opts)?;
                run_lbfgs(seed, opts, problem, solver)?
            }
        };
        let status = outcome.status.clone();
        self.outcome = Some(outcome);
        Ok(status)
    }

    /// Outcome of the latest successful fit.
    ///
    /// # Errors
    /// - [`FitError::NotFitted`] if no fit has succeeded yet.
    pub fn outcome(&self) -> FitResult<&FitOutcome> {
        self.outcome.as_ref().ok_or(FitError::NotFitted)
    }

    /// Fitted parameter values.
    pub fn estimators(&self) -> FitResult<&Par> {
        Ok(&self.outcome()?.estimators)
    }

    /// Cost function value at the optimum.
    pub fn deviance(&self) -> FitResult<Cost> {
        Ok(self.outcome()?.deviance)
    }

    /// Covariance matrix of the estimators.
    pub fn covariance(&self) -> FitResult<Curvature> {
        Ok(diagnostics::covariance(self.outcome()?))
    }

    /// Standard errors of the estimators.
    pub fn std_errors(&self) -> FitResult<Array1<f64>> {
        Ok(diagnostics::std_errors(self.outcome()?))
    }

    /// Correlation matrix of the estimators.
    pub fn correlation(&self) -> FitResult<Curvature> {
        Ok(diagnostics::correlation(self.outcome()?))
    }

    /// Degrees of freedom: data points minus fitted parameters.
    pub fn ndof(&self) -> FitResult<i64> {
        let outcome = self.outcome()?;
        Ok(diagnostics::ndof(self.model.num_points(), outcome.estimators.len()))
    }

    /// Goodness-of-fit p-value against the chi-squared reference.
    pub fn pvalue(&self) -> FitResult<f64> {
        diagnostics::pvalue(self.deviance()?, self.ndof()?)
    }

    /// Finite-difference gradient of the model at the points `x`, shape
    /// `(npar, x.len())`.
    pub fn gradient(&self, x: &Array1<f64>) -> FitResult<Array2<f64>> {
        let outcome = self.outcome()?;
        let errors = diagnostics::std_errors(outcome);
        diagnostics::model_gradient(outcome, &errors, |x, p| self.model.eval(x, p), x)
    }

    /// Model prediction at the points `x` using the fitted estimators.
    pub fn predict(&self, x: &Array1<f64>) -> FitResult<Array1<f64>> {
        Ok(diagnostics::predict(self.outcome()?, |x, p| self.model.eval(x, p), x))
    }

    /// One-sigma uncertainty band of the prediction at the points `x`.
    pub fn prediction_error(&self, x: &Array1<f64>) -> FitResult<Array1<f64>> {
        let gradient = self.gradient(x)?;
        let covariance = self.covariance()?;
        diagnostics::prediction_error(&gradient, &covariance)
    }

    /// `nsigma` confidence ellipse of the estimator pair
    /// `(xindex, yindex)`, traced with `npoints` contour points.
    pub fn confidence_ellipse(
        &self, xindex: usize, yindex: usize, nsigma: f64, npoints: usize,
    ) -> FitResult<Array2<f64>> {
        let outcome = self.outcome()?;
        let covariance = diagnostics::covariance(outcome);
        diagnostics::confidence_ellipse(outcome, &covariance, xindex, yindex, nsigma, npoints)
    }

    /// Cost profile along parameter `index`, other parameters held at
    /// their estimators.
    pub fn scan_cost(&self, index: usize, values: &Array1<f64>) -> FitResult<Array1<f64>> {
        diagnostics::scan_cost(self.outcome()?, &self.model, index, values)
    }

    /// Cost surface over the parameter pair `(xindex, yindex)`, shape
    /// `(pary.len(), parx.len())`.
    pub fn scan_cost_surface(
        &self, xindex: usize, parx: &Array1<f64>, yindex: usize, pary: &Array1<f64>,
    ) -> FitResult<Array2<f64>> {
        diagnostics::scan_cost_surface(self.outcome()?, &self.model, xindex, parx, yindex, pary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::LeastSquares;
    use ndarray::array;

    fn affine(x: &Array1<f64>, par: &Par) -> Array1<f64> {
        x.mapv(|v| par[0] + par[1] * v)
    }

    fn session() -> FitSession<LeastSquares<fn(&Array1<f64>, &Par) -> Array1<f64>>> {
        FitSession::new(LeastSquares::new(
            array![0.0, 1.0, 2.0, 3.0],
            array![1.1, 2.9, 5.1, 6.9],
            array![0.1, 0.1, 0.1, 0.1],
            affine as fn(&Array1<f64>, &Par) -> Array1<f64>,
        ))
    }

    #[test]
    // Purpose
    // -------
    // Verify every diagnostic accessor refuses to answer before any fit
    // has succeeded.
    fn accessors_before_fit_return_not_fitted() {
        // Arrange
        let session = session();

        // Act / Assert
        assert!(matches!(session.outcome(), Err(FitError::NotFitted)));
        assert!(matches!(session.estimators(), Err(FitError::NotFitted)));
        assert!(matches!(session.covariance(), Err(FitError::NotFitted)));
        assert!(matches!(session.pvalue(), Err(FitError::NotFitted)));
        assert!(matches!(
            session.predict(&array![1.0]),
            Err(FitError::NotFitted)
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify a full fit on near-linear data recovers the generating
    // parameters and unlocks the diagnostics.
    fn fit_recovers_affine_parameters() {
        // Arrange
        let mut session = session();

        // Act
        let status = session
            .fit(array![0.0, 0.0], &FitOptions::default())
            .expect("Affine fit should converge");

        // Assert
        assert!(!status.is_empty());
        let estimators = session.estimators().unwrap();
        assert!((estimators[0] - 1.0).abs() < 0.2);
        assert!((estimators[1] - 2.0).abs() < 0.1);
        assert_eq!(session.ndof().unwrap(), 2);
        let p = session.pvalue().unwrap();
        assert!(p > 0.0 && p < 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Verify an invalid seed is rejected before the optimizer runs and
    // leaves the session unfitted.
    fn invalid_seed_is_rejected_upfront() {
        // Arrange
        let mut session = session();

        // Act
        let err = session
            .fit(array![f64::NAN, 0.0], &FitOptions::default())
            .expect_err("NaN seed should be rejected");

        // Assert
        assert!(matches!(err, FitError::InvalidSeed { index: 0, .. }));
        assert!(matches!(session.outcome(), Err(FitError::NotFitted)));
    }
}
