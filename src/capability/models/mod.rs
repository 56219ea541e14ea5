//! models: user-facing capability model.
//!
//! [`CapabilityModel`] implements [`LogLikelihood`] over the ensemble filter
//! and provides `fit` and `forecast`; [`CapabilityFit`] is the snapshot a fit
//! returns and caches.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood

pub mod capability;

pub use self::capability::{CapabilityFit, CapabilityModel};

pub mod prelude {
    pub use super::capability::{CapabilityFit, CapabilityModel};
}
