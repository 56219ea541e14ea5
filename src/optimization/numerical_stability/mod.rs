//! numerical_stability: numerically robust transforms for bounded parameters.
//!
//! Purpose
//! -------
//! Collect the small scalar transforms the capability model needs to move
//! between the unconstrained optimizer space and box-bounded model
//! parameters, and to evaluate the logistic observation curve without
//! overflow.
//!
//! Key behaviors
//! -------------
//! - Stable logistic and logit (`safe_logistic`, `safe_logit`).
//! - Scaled-logistic box mapping (`bounded_from_unconstrained`) and its
//!   inverse (`unconstrained_from_bounded`).
//! - A shared clamp tolerance (`LOGIT_EPS`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`; bounds satisfy `lower < upper`. Validation
//!   happens in the capability layer, not here.
//!
//! Conventions
//! -----------
//! - Pure functions only: no logging, no I/O, no global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] check agreement with naïve formulas,
//!   tail behavior, and the round trip of the box mapping.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    LOGIT_EPS, bounded_from_unconstrained, safe_logistic, safe_logit, unconstrained_from_bounded,
};

pub mod prelude {
    pub use super::transformations::{
        LOGIT_EPS, bounded_from_unconstrained, safe_logistic, safe_logit,
        unconstrained_from_bounded,
    };
}
