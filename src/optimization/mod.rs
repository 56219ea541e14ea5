//! optimization: MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used to fit the capability model: an
//! Argmin-backed log-likelihood optimizer, numerically stable transforms for
//! bounded parameters, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: maximize `ℓ(θ)` with L-BFGS and finite-difference
//!   gradients.
//! - `numerical_stability`: stable logistic/logit and the scaled-logistic box
//!   mapping between θ-space and bounded parameters.
//! - `errors`: normalize configuration issues, numerical failures, model
//!   errors, and backend solver errors into `OptError` / `OptResult<T>`.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; outcomes report
//!   `ℓ`.
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - Logging is limited to `tracing::debug!` at solver start; progress
//!   printing is delegated to the optional `obs_slog` observer.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use capability_tracking::optimization::prelude::*;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
