//! Finite-difference gradient of the model output with respect to the
//! estimated parameters.
use crate::errors::{FitError, FitResult};
use crate::fit::FitOutcome;
use crate::minimize::types::Par;
use ndarray::{Array1, Array2};

/// Step size for each parameter, as a fraction of its standard error.
///
/// Stepping proportionally to the parameter's own uncertainty keeps the
/// difference quotient well conditioned across wildly different parameter
/// scales.
const DELTA_FRACTION: f64 = 0.01;

/// Central finite-difference gradient of the model at the evaluation
/// points `x`.
///
/// Returns a matrix of shape `(npar, x.len())`: row `i` holds the partial
/// derivative of the model output with respect to parameter `i`, evaluated
/// at every point of `x`. The step for parameter `i` is
/// [`DELTA_FRACTION`] times its standard error.
///
/// # Errors
/// - [`FitError::DegenerateParameter`] if a parameter's step is zero or
///   NaN, which happens when its standard error is zero or undefined. A
///   gradient taken with such a step would be meaningless.
pub fn model_gradient<F>(
    outcome: &FitOutcome, errors: &Array1<f64>, model: F, x: &Array1<f64>,
) -> FitResult<Array2<f64>>
where
    F: Fn(&Array1<f64>, &Par) -> Array1<f64>,
{
    let npar = outcome.estimators.len();
    let mut grad = Array2::<f64>::zeros((npar, x.len()));
    for i in 0..npar {
        let step = DELTA_FRACTION * errors[i];
        // Catches both a zero step and a NaN standard error.
        if !(step > 0.0) {
            return Err(FitError::DegenerateParameter { index: i });
        }
        let mut par_up = outcome.estimators.clone();
        let mut par_down = outcome.estimators.clone();
        par_up[i] += step;
        par_down[i] -= step;
        let diff = (model(x, &par_up) - model(x, &par_down)) / (2.0 * step);
        grad.row_mut(i).assign(&diff);
    }
    Ok(grad)
}
