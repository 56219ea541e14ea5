//! loglik_optimizer: argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide an Argmin-backed layer for **maximizing log-likelihoods** `ℓ(θ)`.
//! Models implement a single trait, [`LogLikelihood`], and call [`maximize`]
//! to run L-BFGS with a configurable line search, tolerances, and
//! finite-difference gradients.
//!
//! Key behaviors
//! -------------
//! - Convert `ℓ(θ)` into the Argmin cost `c(θ) = -ℓ(θ)` via
//!   [`adapter::ArgMinAdapter`].
//! - [`maximize`] validates the initial guess with [`LogLikelihood::check`],
//!   selects a solver via [`builders`], executes it via [`run::run_lbfgs`],
//!   and normalizes the result into an [`OptimOutcome`].
//! - [`finite_diff`] supplies validated FD gradients when a model has no
//!   analytic gradient (the capability filter never does).
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** `ℓ(θ)`; models never implement the
//!   cost directly.
//! - Model failures inside `value`/`grad` are returned as [`OptError`]
//!   values and survive the trip through Argmin unchanged.
//! - [`Tolerances`] and [`MLEOptions`] are validated on construction.
//!
//! Conventions
//! -----------
//! - Parameters live in unconstrained space as [`Theta`]. Mapping from box
//!   bounds to ℝ happens in the model layer.
//! - [`OptimOutcome::value`] is expressed as a log-likelihood, never a cost.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions ([`adapter`]), solver
//!   wiring ([`builders`]), FD fallbacks ([`finite_diff`]), validation, and
//!   end-to-end maximization of toy quadratics ([`api`]).
//!
//! [`OptError`]: crate::optimization::errors::OptError

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
