//! L-BFGS solver construction helpers.
//!
//! Small, focused builders that hide Argmin's generic wiring and apply
//! crate-level options (tolerances, memory size) so higher-level code can
//! request a configured solver without touching Argmin-specific types. The
//! builders do **not** set the initial parameter vector or `max_iters`;
//! those are runtime concerns applied by the runner.
use argmin::solver::quasinewton::LBFGS;

use crate::errors::FitResult;
use crate::minimize::{
    options::FitOptions,
    types::{
        Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Par,
        DEFAULT_LBFGS_MEM,
    },
};

/// Construct an L-BFGS solver with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (default [`DEFAULT_LBFGS_MEM`]) and wires any
/// present tolerances via [`configure_lbfgs`].
///
/// # Errors
/// Returns a [`crate::errors::FitError`] if Argmin rejects a tolerance
/// setting.
pub fn build_lbfgs_hager_zhang(opts: &FitOptions) -> FitResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct an L-BFGS solver with More–Thuente line search.
///
/// Consults `opts.lbfgs_mem` (default [`DEFAULT_LBFGS_MEM`]) and wires any
/// present tolerances via [`configure_lbfgs`].
///
/// # Errors
/// Returns a [`crate::errors::FitError`] if Argmin rejects a tolerance
/// setting.
pub fn build_lbfgs_more_thuente(opts: &FitOptions) -> FitResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional tolerances to an L-BFGS solver.
///
/// Generic over the line-search type so both builders share one wiring
/// path. When a tolerance is `None`, the corresponding `with_tolerance_*`
/// method is not called and Argmin's defaults remain in effect.
///
/// # Errors
/// Returns a [`crate::errors::FitError`] (via `From<argmin::core::Error>`)
/// when `with_tolerance_grad` or `with_tolerance_cost` rejects a value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Par, Grad, Cost>, opts: &FitOptions,
) -> FitResult<LBFGS<L, Par, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
