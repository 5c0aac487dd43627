//! Error propagation from parameter uncertainty to model predictions.
use crate::errors::FitResult;
use crate::fit::FitOutcome;
use crate::minimize::types::{Curvature, Par};
use ndarray::{Array1, Array2};

/// Model prediction at the evaluation points, using the fitted estimators.
pub fn predict<F>(outcome: &FitOutcome, model: F, x: &Array1<f64>) -> Array1<f64>
where
    F: Fn(&Array1<f64>, &Par) -> Array1<f64>,
{
    model(x, &outcome.estimators)
}

/// One-sigma uncertainty band of the model prediction.
///
/// First-order propagation: at each evaluation point `k` the prediction
/// variance is the quadratic form `g_k' C g_k` where `g_k` is the
/// parameter gradient column of [`model_gradient`] at that point and `C`
/// is the parameter covariance. Rounding can push a tiny variance
/// negative; it is clamped to zero before the square root.
///
/// [`model_gradient`]: crate::diagnostics::gradient::model_gradient
pub fn prediction_error(gradient: &Array2<f64>, covariance: &Curvature) -> FitResult<Array1<f64>> {
    let npar = gradient.nrows();
    let npoints = gradient.ncols();
    let mut band = Array1::<f64>::zeros(npoints);
    for k in 0..npoints {
        let mut var = 0.0;
        for i in 0..npar {
            for j in 0..npar {
                var += gradient[[i, k]] * covariance[[i, j]] * gradient[[j, k]];
            }
        }
        band[k] = var.max(0.0).sqrt();
    }
    Ok(band)
}
