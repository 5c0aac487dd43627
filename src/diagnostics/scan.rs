//! Cost-surface scans over one or two parameters.
use crate::cost::CostModel;
use crate::errors::{FitError, FitResult};
use crate::fit::FitOutcome;
use ndarray::{Array1, Array2};

/// Cost profile along one parameter.
///
/// Evaluates the cost at each value of `values` substituted into parameter
/// `index`, holding every other parameter at its estimator.
///
/// # Errors
/// - [`FitError::ParameterOutOfRange`] if `index` exceeds the parameter
///   count.
/// - Any domain error the cost itself raises at a scanned point.
pub fn scan_cost<M: CostModel>(
    outcome: &FitOutcome, model: &M, index: usize, values: &Array1<f64>,
) -> FitResult<Array1<f64>> {
    let npar = outcome.estimators.len();
    if index >= npar {
        return Err(FitError::ParameterOutOfRange { index, npar });
    }
    let mut profile = Array1::<f64>::zeros(values.len());
    let mut par = outcome.estimators.clone();
    for (k, &value) in values.iter().enumerate() {
        par[index] = value;
        profile[k] = model.cost(&par)?;
    }
    Ok(profile)
}

/// Cost surface over a parameter pair.
///
/// Evaluates the cost on the grid `parx` x `pary` substituted into
/// parameters `xindex` and `yindex`, holding every other parameter at its
/// estimator. The result has shape `(pary.len(), parx.len())` so row `r`
/// is a sweep over `parx` at fixed `pary[r]`, matching the row-major
/// layout plotting libraries expect for a surface.
///
/// # Errors
/// - [`FitError::ParameterOutOfRange`] if either index exceeds the
///   parameter count or the two indices coincide.
/// - Any domain error the cost itself raises at a grid point.
pub fn scan_cost_surface<M: CostModel>(
    outcome: &FitOutcome, model: &M, xindex: usize, parx: &Array1<f64>, yindex: usize,
    pary: &Array1<f64>,
) -> FitResult<Array2<f64>> {
    let npar = outcome.estimators.len();
    if xindex >= npar {
        return Err(FitError::ParameterOutOfRange { index: xindex, npar });
    }
    if yindex >= npar || yindex == xindex {
        return Err(FitError::ParameterOutOfRange { index: yindex, npar });
    }
    let mut surface = Array2::<f64>::zeros((pary.len(), parx.len()));
    let mut par = outcome.estimators.clone();
    for (r, &py) in pary.iter().enumerate() {
        par[yindex] = py;
        for (c, &px) in parx.iter().enumerate() {
            par[xindex] = px;
            surface[[r, c]] = model.cost(&par)?;
        }
    }
    Ok(surface)
}
