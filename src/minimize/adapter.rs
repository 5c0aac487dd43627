//! Adapter that exposes a [`CostModel`] as an `argmin` problem.
//!
//! The cost is already the quantity to minimize, so no sign conventions are
//! involved. Cost models expose only a scalar cost, so the gradient the
//! solver needs is always obtained by finite-differencing the cost: central
//! differences first, falling back to forward differences when the central
//! approximation fails validation or an evaluation error was captured.
use std::cell::RefCell;

use crate::cost::CostModel;
use crate::errors::FitError;
use crate::minimize::{
    types::{Cost, Grad, Par},
    validation::validate_grad,
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a [`CostModel`] to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug)]
pub struct CostAdapter<'a, M: CostModel> {
    pub model: &'a M,
}

// Manual impl: the adapter only holds a shared reference, so it is clonable
// whether or not the model itself is.
impl<'a, M: CostModel> Clone for CostAdapter<'a, M> {
    fn clone(&self) -> Self {
        Self { model: self.model }
    }
}

impl<'a, M: CostModel> CostAdapter<'a, M> {
    /// Construct a new adapter over a cost model.
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }
}

impl<'a, M: CostModel> CostFunction for CostAdapter<'a, M> {
    type Param = Par;
    type Output = Cost;

    /// Evaluate the cost at `par`.
    ///
    /// - Calls the model's `cost(par)` and checks the result is finite.
    /// - Returns `Error(NonFiniteCost)` if the value is not finite.
    ///
    /// # Errors
    /// Propagates any [`FitError`] from the cost evaluation via `?`.
    fn cost(&self, par: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.model.cost(par)?;
        if !output.is_finite() {
            return Err((FitError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, M: CostModel> Gradient for CostAdapter<'a, M> {
    type Param = Par;
    type Gradient = Grad;

    /// Evaluate the finite-difference gradient of the cost at `par`.
    ///
    /// Behavior:
    /// - Try *central* differences first.
    /// - If any evaluation of the cost closure failed (captured via
    ///   `closure_err`), retry with *forward* differences.
    /// - Validate the FD gradient; if it fails (e.g., non-finite), retry
    ///   once with *forward* differences and validate again.
    ///
    /// Implementation notes:
    /// - The FD closure must return `f64`, so `?` cannot be used inside it;
    ///   the first error is captured in `closure_err` and the closure
    ///   returns `NaN`. After FD, the captured error is turned back into a
    ///   real error (or the forward-difference path is taken).
    ///
    /// # Errors
    /// - Propagates any error raised by cost evaluations performed during FD.
    /// - Returns validation errors if the gradient has wrong dimension or
    ///   non-finite entries.
    fn gradient(&self, par: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = par.len();
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let cost_func = |par: &Par| -> f64 {
            match self.cost(par) {
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
        let fd_grad = par.central_diff(&cost_func);
        if closure_err.borrow().is_some() {
            return run_fd_diff(par, &cost_func, &closure_err);
        }
        match validate_grad(&fd_grad, dim) {
            Ok(()) => Ok(fd_grad),
            Err(_) => run_fd_diff(par, &cost_func, &closure_err),
        }
    }
}

/// Compute a forward-difference gradient of `func` at `par`, with error
/// capture.
///
/// The FD closure can't return `Result`, so any error raised by `func` is
/// stored into `closure_err` and the closure returns `NaN`. This helper:
/// - clears `closure_err`,
/// - performs `forward_diff`,
/// - if an error was captured, returns it as `Err`,
/// - validates the resulting gradient,
/// - if validation succeeds, returns the gradient as `Ok(grad)`.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD
/// routine or by validation of the resulting gradient.
fn run_fd_diff<G: Fn(&Par) -> f64>(
    par: &Par, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = par.forward_diff(func);
    let dim = par.len();
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::LeastSquares;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cost forwarding through the adapter.
    // - Finite-difference gradients against an analytic chi-square gradient.
    // - Propagation of domain errors raised inside the FD closure.
    //
    // They intentionally DO NOT cover:
    // - Full solver runs (covered by the run and integration tests).
    // -------------------------------------------------------------------------

    fn linear(x: &Array1<f64>, par: &Par) -> Array1<f64> {
        x.mapv(|v| par[0] * v)
    }

    #[test]
    // Purpose
    // -------
    // Verify that the adapter's FD gradient matches the analytic gradient
    // of a one-parameter chi-square cost.
    //
    // Given
    // -----
    // - x = [1, 2], y = [2, 4], unit sigma, model par[0]·x.
    // - cost(a) = (2 − a)² + (4 − 2a)², so dcost/da = −2(2 − a) − 4(4 − 2a).
    //
    // Expect
    // ------
    // - At a = 1 the analytic derivative is −10; FD agrees to ~1e-5.
    fn gradient_matches_analytic_chi_square_derivative() {
        // Arrange
        let fit = LeastSquares::new(array![1.0, 2.0], array![2.0, 4.0], array![1.0, 1.0], linear);
        let adapter = CostAdapter::new(&fit);

        // Act
        let grad = adapter.gradient(&array![1.0]).expect("FD gradient should succeed");

        // Assert
        assert_eq!(grad.len(), 1);
        assert!((grad[0] - (-10.0)).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a domain error raised by the cost inside the FD closure
    // surfaces as a typed FitError instead of a NaN gradient.
    fn closure_domain_error_is_propagated() {
        // Arrange: zero sigma fails every cost evaluation.
        let fit = LeastSquares::new(array![1.0], array![2.0], array![0.0], linear);
        let adapter = CostAdapter::new(&fit);

        // Act
        let result = adapter.gradient(&array![1.0]);

        // Assert
        let err: FitError = result.expect_err("Zero sigma must fail the gradient").into();
        assert!(matches!(err, FitError::InvalidSigma { index: 0, .. }));
    }
}
