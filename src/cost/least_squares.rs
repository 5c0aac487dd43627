//! Least-squares (chi-square) cost over Gaussian-distributed data.
use crate::cost::CostModel;
use crate::errors::{FitError, FitResult};
use crate::minimize::types::{Cost, Par};
use crate::minimize::validation::validate_seed;
use ndarray::Array1;

/// Chi-square cost for data with known per-point Gaussian uncertainties.
///
/// `cost(par) = Σ ((y - model(x, par)) / ysigma)²`
///
/// Every `ysigma` element must be finite and strictly positive; a zero or
/// negative sigma is a caller contract violation reported as
/// [`FitError::InvalidSigma`]. The chi-square statistic equals the Gaussian
/// deviance up to a parameter-independent constant, so it satisfies the
/// deviance-scale convention required by [`CostModel`].
pub struct LeastSquares<F> {
    x: Array1<f64>,
    y: Array1<f64>,
    ysigma: Array1<f64>,
    model: F,
}

impl<F> LeastSquares<F>
where
    F: Fn(&Array1<f64>, &Par) -> Array1<f64>,
{
    /// Wrap a dataset and model into a least-squares cost.
    ///
    /// Pure data capture: never fails. Shape and domain violations are
    /// reported by [`CostModel::check`] or at the first cost evaluation.
    pub fn new(x: Array1<f64>, y: Array1<f64>, ysigma: Array1<f64>, model: F) -> Self {
        Self { x, y, ysigma, model }
    }
}

impl<F> CostModel for LeastSquares<F>
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
            let sigma = self.ysigma[i];
            if !sigma.is_finite() || sigma <= 0.0 {
                return Err(FitError::InvalidSigma {
                    index: i,
                    value: sigma,
                    reason: "Sigma must be finite and strictly positive.",
                });
            }
            let residual = (self.y[i] - mu[i]) / sigma;
            cost += residual * residual;
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
        if self.ysigma.len() != self.x.len() {
            return Err(FitError::SigmaLengthMismatch {
                xs: self.x.len(),
                sigmas: self.ysigma.len(),
            });
        }
        for (index, &value) in self.ysigma.iter().enumerate() {
            if !value.is_finite() || value <= 0.0 {
                return Err(FitError::InvalidSigma {
                    index,
                    value,
                    reason: "Sigma must be finite and strictly positive.",
                });
            }
        }
        validate_seed(seed)
    }
}
