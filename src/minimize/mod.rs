//! minimize: numerical minimization layer for cost models.
//!
//! ## Purpose
//! Bridge the crate's [`CostModel`](crate::cost::CostModel) abstraction to
//! the `argmin` optimization ecosystem. This module owns everything between
//! "here is a cost function and a seed" and "here is a validated optimum
//! with its inverse curvature": the argmin adapter, solver construction,
//! run orchestration, option validation, and the finite-difference
//! curvature machinery.
//!
//! ## Key behaviors
//! - Solvers are L-BFGS with a configurable line search (More–Thuente or
//!   Hager–Zhang), built in [`builders`].
//! - Gradients are central finite differences with a forward-difference
//!   fallback, implemented on the adapter in [`adapter`].
//! - The observed curvature (Hessian) at the optimum is finite-differenced
//!   and pseudo-inverted through an eigenvalue truncation in [`curvature`].
//! - [`run::run_lbfgs`] enforces the crate's convergence policy: anything
//!   short of solver convergence or target-cost attainment is an error,
//!   never a silently degraded outcome.
//!
//! ## Conventions
//! - Parameters, gradients, and curvature matrices use the `ndarray` type
//!   aliases in [`types`].
//! - All user-facing inputs are validated up front in [`validation`] and
//!   [`options`]; downstream code assumes validated values.
pub mod adapter;
pub mod builders;
pub mod curvature;
pub mod options;
pub mod run;
pub mod types;
pub mod validation;

pub use adapter::CostAdapter;
pub use options::{FitOptions, LineSearcher, Tolerances};
pub use run::run_lbfgs;
pub use types::{Cost, Curvature, FnEvalMap, Grad, Par};
