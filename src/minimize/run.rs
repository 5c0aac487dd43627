//! Execution helper that runs an `argmin` solver on a cost model and
//! returns a crate-friendly [`FitOutcome`].
use crate::cost::CostModel;
use crate::errors::{FitError, FitResult};
use crate::fit::FitOutcome;
use crate::minimize::{
    adapter::CostAdapter, curvature::inverse_curvature, options::FitOptions,
    validation::validate_estimators,
};
use crate::minimize::types::{Grad, Par};
use argmin::core::{Executor, IterState, State, TerminationReason, TerminationStatus};

/// Run an `argmin` optimization for a cost model.
///
/// This is the shared runner used by both line-search variants. It wires up:
/// - the cost model via [`CostAdapter`],
/// - the chosen solver (L-BFGS with Hager–Zhang or More–Thuente line
///   search),
/// - the initial seed,
/// - optional observers (behind the `obs_slog` feature),
/// - an optional iteration cap,
///   then executes the solve, derives the inverse curvature at the optimum,
///   and normalizes everything into a [`FitOutcome`].
///
/// # Convergence policy
/// Only `SolverConverged` and `TargetCostReached` terminations count as
/// success. Any other outcome (iteration cap, solver exit, interrupt, not
/// terminated) fails with [`FitError::ConvergenceFailure`] carrying the
/// native status string, iteration count, and best cost; no partial
/// estimator is published.
///
/// # Errors
/// - [`FitError::ConvergenceFailure`] as described above.
/// - Any `argmin` runtime error via the crate's `From<argmin::core::Error>`
///   conversion (which recovers typed domain errors raised inside the cost).
/// - Validation errors from estimator extraction, the inverse-curvature
///   computation, or [`FitOutcome::new`].
pub fn run_lbfgs<'a, M, S>(
    seed: Par, opts: &FitOptions, problem: CostAdapter<'a, M>, solver: S,
) -> FitResult<FitOutcome>
where
    M: CostModel,
    S: argmin::core::Solver<CostAdapter<'a, M>, IterState<Par, Grad, (), (), (), f64>>
        + Send
        + 'static,
{
    // The executor consumes the problem; keep a handle for the curvature
    // evaluation at the optimum.
    let curvature_problem = problem.clone();
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(seed));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter() as usize;
    let fn_evals = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let best_cost = result.get_best_cost();
    match &termination {
        TerminationStatus::Terminated(TerminationReason::SolverConverged)
        | TerminationStatus::Terminated(TerminationReason::TargetCostReached) => {}
        other => {
            return Err(FitError::ConvergenceFailure {
                status: format!("{other:?}"),
                iterations,
                best_cost,
            });
        }
    }
    let estimators = validate_estimators(result.take_best_param())?;
    let inverse = inverse_curvature(&curvature_problem, &estimators)?;
    FitOutcome::new(
        estimators,
        best_cost,
        format!("{termination:?}"),
        iterations,
        fn_evals,
        inverse,
    )
}
