use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for fitting and diagnostics operations.
pub type FitResult<T> = Result<T, FitError>;

#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    // ---- Fit state ----
    /// Diagnostics were requested before any successful fit.
    NotFitted,

    // ---- Convergence ----
    /// The minimizer terminated without converging; carries its native
    /// termination diagnostics.
    ConvergenceFailure {
        status: String,
        iterations: usize,
        best_cost: f64,
    },

    // ---- Data / domain ----
    /// x and y sequences have different lengths.
    DataLengthMismatch {
        xs: usize,
        ys: usize,
    },

    /// ysigma sequence length does not match the data length.
    SigmaLengthMismatch {
        xs: usize,
        sigmas: usize,
    },

    /// The model returned an output of the wrong length.
    ModelLengthMismatch {
        expected: usize,
        found: usize,
    },

    /// Per-point sigma must be finite and strictly positive.
    InvalidSigma {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Poisson counts must be finite and non-negative.
    InvalidCount {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Poisson expectation mu must be positive wherever the observed count is.
    NonPositiveMu {
        index: usize,
        mu: f64,
        y: f64,
    },

    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Seed / estimators ----
    /// The seed parameter vector is empty.
    EmptySeed,

    /// Seed elements must be finite.
    InvalidSeed {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// The minimizer did not report a best parameter vector.
    MissingEstimators,

    /// Estimated parameters must be finite.
    InvalidEstimator {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Diagnostics ----
    /// p-value is undefined for non-positive degrees of freedom.
    InvalidNdof {
        ndof: i64,
    },

    /// Zero finite-difference step: the parameter has zero estimated error.
    DegenerateParameter {
        index: usize,
    },

    /// Parameter index out of range for the fitted dimension.
    ParameterOutOfRange {
        index: usize,
        npar: usize,
    },

    /// 2x2 covariance sub-matrix is not positive-definite; carries its diagonal.
    NotPositiveDefinite {
        var_x: f64,
        var_y: f64,
    },

    /// nsigma must be finite and strictly positive.
    InvalidNsigma {
        nsigma: f64,
    },

    /// An ellipse needs at least two tessellation points to close.
    InvalidEllipsePoints {
        npoints: usize,
    },

    // ---- FitOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },

    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },

    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },

    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLbfgsMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Finite differences ----
    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite.
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Curvature matrix dimensions do not match parameter dimensions.
    CurvatureDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    /// Curvature values need to be finite.
    InvalidCurvature {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckpointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for FitError {}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Fit state ----
            FitError::NotFitted => {
                write!(f, "No successful fit available: call fit before querying diagnostics")
            }

            // ---- Convergence ----
            FitError::ConvergenceFailure { status, iterations, best_cost } => {
                write!(
                    f,
                    "Minimizer did not converge: {status} after {iterations} iterations \
                     (best cost {best_cost})"
                )
            }

            // ---- Data / domain ----
            FitError::DataLengthMismatch { xs, ys } => {
                write!(f, "Data length mismatch: {xs} x-values vs {ys} y-values")
            }
            FitError::SigmaLengthMismatch { xs, sigmas } => {
                write!(f, "Sigma length mismatch: {xs} x-values vs {sigmas} sigma values")
            }
            FitError::ModelLengthMismatch { expected, found } => {
                write!(f, "Model output length mismatch: expected {expected}, found {found}")
            }
            FitError::InvalidSigma { index, value, reason } => {
                write!(f, "Invalid sigma at index {index}: {value}: {reason}")
            }
            FitError::InvalidCount { index, value, reason } => {
                write!(f, "Invalid count at index {index}: {value}: {reason}")
            }
            FitError::NonPositiveMu { index, mu, y } => {
                write!(
                    f,
                    "Poisson deviance undefined at index {index}: mu = {mu} with observed \
                     count {y}"
                )
            }
            FitError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Seed / estimators ----
            FitError::EmptySeed => {
                write!(f, "Seed parameter vector is empty")
            }
            FitError::InvalidSeed { index, value, reason } => {
                write!(f, "Invalid seed at index {index}: {value}: {reason}")
            }
            FitError::MissingEstimators => {
                write!(f, "Missing estimated parameters")
            }
            FitError::InvalidEstimator { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }

            // ---- Diagnostics ----
            FitError::InvalidNdof { ndof } => {
                write!(f, "p-value undefined for ndof = {ndof}: need ndof > 0")
            }
            FitError::DegenerateParameter { index } => {
                write!(
                    f,
                    "Degenerate parameter {index}: zero estimated error gives a zero \
                     finite-difference step"
                )
            }
            FitError::ParameterOutOfRange { index, npar } => {
                write!(f, "Parameter index {index} out of range for {npar} parameters")
            }
            FitError::NotPositiveDefinite { var_x, var_y } => {
                write!(
                    f,
                    "Covariance sub-matrix is not positive-definite (diagonal {var_x}, {var_y})"
                )
            }
            FitError::InvalidNsigma { nsigma } => {
                write!(f, "Invalid nsigma {nsigma}: must be finite and positive")
            }
            FitError::InvalidEllipsePoints { npoints } => {
                write!(f, "Invalid ellipse tessellation count {npoints}: need at least 2")
            }

            // ---- FitOptions ----
            FitError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            FitError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost change tolerance {tol}: {reason}")
            }
            FitError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            FitError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            FitError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            FitError::InvalidLbfgsMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Finite differences ----
            FitError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            FitError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }
            FitError::CurvatureDimMismatch { expected, found } => {
                write!(
                    f,
                    "Curvature dimension mismatch: expected ({expected}, {expected}), \
                     found {found:?}"
                )
            }
            FitError::InvalidCurvature { row, col, value } => {
                write!(f, "Invalid curvature at ({row}, {col}): {value}, must be finite")
            }

            // ---- Argmin ----
            FitError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            FitError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            FitError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            FitError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            FitError::CheckpointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            FitError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            FitError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            FitError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            FitError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for FitError {
    fn from(original_err: Error) -> Self {
        // Errors raised inside cost/gradient closures travel through argmin as
        // boxed values; recover the typed variant when possible.
        let original_err = match original_err.downcast::<FitError>() {
            Ok(fit_err) => return fit_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => FitError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => FitError::NotImplemented { text },
                ArgminError::NotInitialized { text } => FitError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => FitError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => FitError::CheckpointNotFound { text },
                ArgminError::PotentialBug { text } => FitError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => FitError::ImpossibleError { text },
                _ => FitError::UnknownError,
            },
            Err(err) => FitError::BackendError { text: err.to_string() },
        }
    }
}
