//! Integration tests for the full fitting pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: from a cost model over real data,
//!   through L-BFGS minimization, to the complete diagnostic surface of a
//!   fitted session.
//! - Exercise both cost families (least squares and Poisson deviance) and
//!   both line searches in realistic regimes, not just toy edge cases.
//!
//! Coverage
//! --------
//! - `cost`:
//!   - `LeastSquares` and `PoissonDeviance` fitted on synthetic data
//!     generated from known parameters.
//! - `fit::FitSession`:
//!   - Fitting, re-fitting, and every diagnostic accessor.
//! - `diagnostics`:
//!   - Covariance against the analytic linear-regression solution,
//!     correlation structure, p-value sanity, prediction bands,
//!     confidence ellipses, and cost scans.
//! - `minimize`:
//!   - Option handling, both line searches, and the convergence policy.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (input
//!   validators, pseudo-inverse edge cases, adapter fallbacks) — these
//!   are covered by unit tests in their modules.
use likefit::{
    FitError, FitOptions, FitSession, LeastSquares, LineSearcher, PoissonDeviance, Tolerances,
};
use ndarray::{array, Array1};

/// Purpose
/// -------
/// Build a least-squares session over the canonical five-point affine
/// dataset y = 2x + 1 with unit uncertainties.
///
/// Returns
/// -------
/// - An unfitted session whose exact solution is estimators (2, 1), zero
///   deviance, and three degrees of freedom. The model order is
///   (slope, intercept).
fn affine_session() -> FitSession<LeastSquares<fn(&Array1<f64>, &Array1<f64>) -> Array1<f64>>> {
    fn affine(x: &Array1<f64>, par: &Array1<f64>) -> Array1<f64> {
        x.mapv(|v| par[0] * v + par[1])
    }
    FitSession::new(LeastSquares::new(
        array![0.0, 1.0, 2.0, 3.0, 4.0],
        array![1.0, 3.0, 5.0, 7.0, 9.0],
        Array1::from_elem(5, 1.0),
        affine as fn(&Array1<f64>, &Array1<f64>) -> Array1<f64>,
    ))
}

#[test]
// Purpose
// -------
// Fit the exact affine dataset and check the estimators, deviance, and
// degrees of freedom against the analytic solution.
fn least_squares_fit_recovers_exact_affine_solution() {
    // Arrange
    let mut session = affine_session();

    // Act
    let status = session
        .fit(array![1.0, 1.0], &FitOptions::default())
        .expect("Exact affine fit should converge");

    // Assert
    assert!(status.contains("Terminated"));
    let estimators = session.estimators().unwrap();
    assert!((estimators[0] - 2.0).abs() < 1e-4);
    assert!((estimators[1] - 1.0).abs() < 1e-4);
    assert!(session.deviance().unwrap() < 1e-6);
    assert_eq!(session.ndof().unwrap(), 3);
}

#[test]
// Purpose
// -------
// Check the fitted covariance against the closed-form weighted linear
// regression covariance for unit uncertainties:
// cov = (X' X)^-1 with X the design matrix of (x, 1) rows.
fn least_squares_covariance_matches_analytic_regression() {
    // Arrange: for x = 0..4, X'X = [[30, 10], [10, 5]] and
    // (X'X)^-1 = [[0.1, -0.2], [-0.2, 0.6]].
    let mut session = affine_session();
    session
        .fit(array![1.0, 0.0], &FitOptions::default())
        .expect("Exact affine fit should converge");

    // Act
    let cov = session.covariance().unwrap();
    let errors = session.std_errors().unwrap();
    let corr = session.correlation().unwrap();

    // Assert: finite differencing is good to a few parts in 1e4 here.
    assert!((cov[[0, 0]] - 0.1).abs() < 1e-3);
    assert!((cov[[1, 1]] - 0.6).abs() < 1e-3);
    assert!((cov[[0, 1]] + 0.2).abs() < 1e-3);
    assert!((errors[0] - 0.1f64.sqrt()).abs() < 1e-3);
    assert!((errors[1] - 0.6f64.sqrt()).abs() < 1e-3);
    // Slope and intercept trade off against each other.
    assert!(corr[[0, 1]] < 0.0);
    assert!((corr[[0, 1]] - corr[[1, 0]]).abs() < 1e-12);
    assert!((corr[[0, 0]] - 1.0).abs() < 1e-9);
}

#[test]
// Purpose
// -------
// Fit noisy affine data and sanity-check the p-value, the prediction
// band, the confidence ellipse, and the cost scans on one session.
fn diagnostics_work_together_on_noisy_data() {
    // Arrange: y = 2x + 1 with fixed perturbations within one sigma.
    fn affine(x: &Array1<f64>, par: &Array1<f64>) -> Array1<f64> {
        x.mapv(|v| par[0] * v + par[1])
    }
    let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let y = array![1.2, 2.8, 5.1, 6.9, 9.2, 10.9];
    let mut session = FitSession::new(LeastSquares::new(
        x.clone(),
        y,
        Array1::from_elem(6, 0.2),
        affine as fn(&Array1<f64>, &Array1<f64>) -> Array1<f64>,
    ));
    session
        .fit(array![1.0, 0.0], &FitOptions::default())
        .expect("Noisy affine fit should converge");

    // Act / Assert: p-value is a proper probability for a decent fit.
    let p = session.pvalue().unwrap();
    assert!(p > 0.001 && p < 1.0);

    // Prediction runs through the fitted line; the band is positive and
    // grows away from the data's center of mass.
    let grid = array![0.0, 2.5, 5.0, 8.0];
    let yfit = session.predict(&grid).unwrap();
    let band = session.prediction_error(&grid).unwrap();
    let estimators = session.estimators().unwrap().clone();
    for k in 0..grid.len() {
        let expected = estimators[0] * grid[k] + estimators[1];
        assert!((yfit[k] - expected).abs() < 1e-10);
        assert!(band[k] > 0.0);
    }
    assert!(band[3] > band[1]);

    // The one-sigma ellipse of (slope, intercept) is a closed contour
    // centered on the estimators.
    let ellipse = session.confidence_ellipse(0, 1, 1.0, 50).unwrap();
    assert_eq!(ellipse.shape(), &[50, 2]);
    assert!((ellipse[[0, 0]] - ellipse[[49, 0]]).abs() < 1e-10);
    let center_x = ellipse.column(0).sum() / 50.0;
    assert!((center_x - estimators[0]).abs() < 0.05);

    // Cost scans bottom out at the fitted values.
    let deviance = session.deviance().unwrap();
    let slopes = array![
        estimators[0] - 0.1,
        estimators[0],
        estimators[0] + 0.1
    ];
    let profile = session.scan_cost(0, &slopes).unwrap();
    assert!((profile[1] - deviance).abs() < 1e-9);
    assert!(profile[0] > profile[1] && profile[2] > profile[1]);

    let intercepts = array![estimators[1] - 0.1, estimators[1], estimators[1] + 0.1];
    let surface = session.scan_cost_surface(0, &slopes, 1, &intercepts).unwrap();
    assert_eq!(surface.shape(), &[3, 3]);
    assert!((surface[[1, 1]] - deviance).abs() < 1e-9);
}

#[test]
// Purpose
// -------
// Fit a Poisson counting model with an exponential link, the standard
// shape for histogram fits where the rate must stay positive under any
// optimizer step.
fn poisson_fit_recovers_exponential_rate() {
    // Arrange: counts drawn once from mu(x) = exp(3 - 0.5 x) and frozen.
    fn rate(x: &Array1<f64>, par: &Array1<f64>) -> Array1<f64> {
        x.mapv(|v| (par[0] + par[1] * v).exp())
    }
    let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
    let y = array![21.0, 12.0, 8.0, 5.0, 2.0, 2.0, 1.0, 0.0];
    let mut session = FitSession::new(PoissonDeviance::new(
        x,
        y,
        rate as fn(&Array1<f64>, &Array1<f64>) -> Array1<f64>,
    ));

    // Act
    session
        .fit(array![2.0, 0.0], &FitOptions::default())
        .expect("Poisson fit should converge");

    // Assert: the decay rate comes out near the generating value and the
    // fit is acceptable by its own goodness-of-fit measure.
    let estimators = session.estimators().unwrap();
    assert!((estimators[0] - 3.0).abs() < 0.5);
    assert!((estimators[1] + 0.5).abs() < 0.2);
    assert_eq!(session.ndof().unwrap(), 6);
    let p = session.pvalue().unwrap();
    assert!(p > 0.01 && p < 1.0);
    let errors = session.std_errors().unwrap();
    assert!(errors.iter().all(|&e| e.is_finite() && e > 0.0));
}

#[test]
// Purpose
// -------
// Run the same least-squares fit under both line searches and check they
// agree on the optimum.
fn both_line_searches_reach_the_same_optimum() {
    // Arrange
    let tols = Tolerances::new(Some(1e-8), None, Some(500)).unwrap();
    let mt_opts = FitOptions::new(tols.clone(), LineSearcher::MoreThuente, false, None).unwrap();
    let hz_opts = FitOptions::new(tols, LineSearcher::HagerZhang, false, None).unwrap();

    // Act
    let mut mt_session = affine_session();
    mt_session.fit(array![0.5, 0.5], &mt_opts).expect("More-Thuente fit should converge");
    let mut hz_session = affine_session();
    hz_session.fit(array![0.5, 0.5], &hz_opts).expect("Hager-Zhang fit should converge");

    // Assert
    let mt = mt_session.estimators().unwrap();
    let hz = hz_session.estimators().unwrap();
    assert!((mt[0] - hz[0]).abs() < 1e-3);
    assert!((mt[1] - hz[1]).abs() < 1e-3);
}

#[test]
// Purpose
// -------
// Starve the optimizer of iterations and check the convergence policy:
// the failure is typed, carries diagnostics, and the session stays
// unfitted.
fn starved_fit_fails_without_publishing_an_outcome() {
    // Arrange
    let tols = Tolerances::new(Some(1e-12), None, Some(1)).unwrap();
    let opts = FitOptions::new(tols, LineSearcher::MoreThuente, false, None).unwrap();
    let mut session = affine_session();

    // Act: a distant seed cannot converge in one iteration.
    let err = session
        .fit(array![50.0, -50.0], &opts)
        .expect_err("One iteration from a distant seed must fail");

    // Assert
    match err {
        FitError::ConvergenceFailure { status, best_cost, .. } => {
            assert!(!status.is_empty());
            assert!(best_cost.is_finite());
        }
        other => panic!("Expected ConvergenceFailure, got {other:?}"),
    }
    assert!(matches!(session.outcome(), Err(FitError::NotFitted)));
}
