//! Saturated-model Poisson deviance cost for counting data.
use crate::cost::CostModel;
use crate::errors::{FitError, FitResult};
use crate::minimize::types::{Cost, Par};
use crate::minimize::validation::validate_seed;
use ndarray::Array1;

/// Poisson deviance against the saturated model, for histogram-like counts.
///
/// With `mu = model(x, par)`, each point contributes
///
/// - `2·(mu − y) − 2·y·ln(mu / y)` when `y != 0`, and
/// - `2·mu` when `y == 0` (the well-defined limit of the first form as
///   `y → 0`).
///
/// The accumulation is branch-separated over the zero-count and
/// nonzero-count subsets; `mu` must stay strictly positive wherever
/// `y > 0`, otherwise the logarithm is undefined and the evaluation fails
/// with [`FitError::NonPositiveMu`]. The deviance is twice the
/// log-likelihood ratio against the saturated model, so it satisfies the
/// deviance-scale convention required by [`CostModel`].
pub struct PoissonDeviance<F> {
    x: Array1<f64>,
    y: Array1<f64>,
    model: F,
}

impl<F> PoissonDeviance<F>
where
    F: Fn(&Array1<f64>, &Par) -> Array1<f64>,
{
    /// Wrap a dataset and model into a Poisson deviance cost.
    ///
    /// Pure data capture: never fails. Shape and domain violations are
    /// reported by [`CostModel::check`] or at the first cost evaluation.
    pub fn new(x: Array1<f64>, y: Array1<f64>, model: F) -> Self {
        Self { x, y, model }
    }
}

impl<F> CostModel for PoissonDeviance<F>
where
    F: Fn(&Array1<f64>, &Par) -> Array1<f64>,
{
    fn cost(&self, par: &Par) -> FitResult<Cost> {
        let mu = (self.model)(&self.x, par);
        if mu.len() != self.y.len() {
            return Err(FitError::ModelLengthMismatch {
                expected: self.y.len(),
                found: mu.len(),
            });
        }
        let mut cost = 0.0;
        for i in 0..self.y.len() {
            let y = self.y[i];
            if y > 0.0 {
                if mu[i] <= 0.0 {
                    return Err(FitError::NonPositiveMu { index: i, mu: mu[i], y });
                }
                cost += 2.0 * (mu[i] - y) - 2.0 * y * (mu[i] / y).ln();
            } else if y == 0.0 {
                cost += 2.0 * mu[i];
            } else {
                return Err(FitError::InvalidCount {
                    index: i,
                    value: y,
                    reason: "Poisson counts must be non-negative.",
                });
            }
        }
        Ok(cost)
    }

    fn eval(&self, x: &Array1<f64>, par: &Par) -> Array1<f64> {
        (self.model)(x, par)
    }

    fn num_points(&self) -> usize {
        self.x.len()
    }

    fn check(&self, seed: &Par) -> FitResult<()> {
        if self.x.len() != self.y.len() {
            return Err(FitError::DataLengthMismatch { xs: self.x.len(), ys: self.y.len() });
        }
        for (index, &value) in self.y.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(FitError::InvalidCount {
                    index,
                    value,
                    reason: "Poisson counts must be finite and non-negative.",
                });
            }
        }
        validate_seed(seed)
    }
}
