//! diagnostics: post-fit statistics over a completed minimization.
//!
//! ## Purpose
//! Everything a user asks of a finished fit lives here: covariance,
//! standard errors, correlation, degrees of freedom and goodness-of-fit
//! p-values ([`summary`]), finite-difference model gradients
//! ([`gradient`]), error propagation to prediction bands
//! ([`propagation`]), confidence ellipses for parameter pairs
//! ([`ellipse`]), and cost-surface scans ([`scan`]).
//!
//! ## Conventions
//! - Every function consumes a [`FitOutcome`](crate::fit::FitOutcome) or
//!   quantities derived from one; none of them mutates fit state.
//! - [`FitSession`](crate::fit::FitSession) exposes thin wrappers over
//!   these functions so most users never import this module directly.
pub mod ellipse;
pub mod gradient;
pub mod propagation;
pub mod scan;
pub mod summary;

pub use ellipse::{confidence_ellipse, DEFAULT_ELLIPSE_POINTS};
pub use gradient::model_gradient;
pub use propagation::{predict, prediction_error};
pub use scan::{scan_cost, scan_cost_surface};
pub use summary::{correlation, covariance, ndof, pvalue, std_errors};
