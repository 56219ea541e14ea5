//! loglik_optimizer::builders: L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Hide Argmin's generic wiring behind two builders, one per line search,
//! that apply the crate-level tolerances and memory size from
//! [`MLEOptions`].
//!
//! Conventions
//! -----------
//! - Builders do **not** set `theta0` or `max_iters`; the runner
//!   (`run_lbfgs`) owns those.
//! - `opts.lbfgs_mem = None` means [`DEFAULT_LBFGS_MEM`].
//! - Tolerances Argmin rejects come back as [`OptError`](crate::optimization::errors::OptError)
//!   through `From<argmin::core::Error>`.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search and the configured tolerances.
///
/// # Errors
/// - Argmin rejected `tol_grad` or `tol_cost`.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(HagerZhangLS::new(), mem), opts)
}

/// Construct L-BFGS with More–Thuente line search and the configured tolerances.
///
/// # Errors
/// - Argmin rejected `tol_grad` or `tol_cost`.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply optional gradient and cost-change tolerances to an L-BFGS solver.
///
/// A `None` tolerance leaves Argmin's default in place.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover construction of both solver variants, with and
    // without explicit L-BFGS memory and tolerances. End-to-end runs live in
    // the `api` tests and the integration suite.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Hager–Zhang builder succeeds with default and explicit memory.
    //
    // Given
    // -----
    // - Valid tolerances; `lbfgs_mem` of `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - Both builds return `Ok(_)`.
    fn build_optimizer_hager_zhang_accepts_default_and_explicit_memory() {
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        for mem in [None, Some(11)] {
            let opts = MLEOptions::new(tols, LineSearcher::HagerZhang, false, mem)
                .expect("MLEOptions should be valid");
            assert!(build_optimizer_hager_zhang(&opts).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // More–Thuente builder succeeds with default and explicit memory.
    //
    // Given
    // -----
    // - Valid tolerances; `lbfgs_mem` of `None` and `Some(9)`.
    //
    // Expect
    // ------
    // - Both builds return `Ok(_)`.
    fn build_optimizer_more_thuente_accepts_default_and_explicit_memory() {
        let tols = Tolerances::new(Some(1e-6), None, Some(30)).expect("Tolerances should be valid");
        for mem in [None, Some(9)] {
            let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, mem)
                .expect("MLEOptions should be valid");
            assert!(build_optimizer_more_thuente(&opts).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` is a no-op when no tolerances are set.
    //
    // Given
    // -----
    // - Only `max_iter` configured.
    //
    // Expect
    // ------
    // - `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("MLEOptions should be valid");

        assert!(configure_lbfgs(raw, &opts).is_ok());
    }
}
