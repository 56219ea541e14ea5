//! Capability options: estimation-time configuration for the tracker.
//!
//! Purpose
//! -------
//! Collect the knobs that shape a filter run and a fit in one validated
//! value: ensemble size, parameter bounds for the θ-mapping, the noise
//! policy across likelihood evaluations, and the L-BFGS options.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ensemble_size >= 2`, checked by [`CapabilityOptions::new`].
//! - `bounds` and `mle_opts` have already been validated by their own
//!   constructors; no cross-field checks are done here.
//!
//! Downstream usage
//! ----------------
//! - Build once (or take `CapabilityOptions::default()`) and hand it to
//!   `CapabilityModel::new`.
use crate::{
    capability::{
        core::{params::ParamBounds, rng::NoisePolicy, validation::validate_ensemble_size},
        errors::CapabilityResult,
    },
    optimization::loglik_optimizer::MLEOptions,
};

/// Default number of ensemble particles.
pub const DEFAULT_ENSEMBLE_SIZE: usize = 100;

/// CapabilityOptions: configuration for filtering and fitting.
///
/// Fields
/// ------
/// - `ensemble_size`: `usize`
///   Number of particles per filter run.
/// - `bounds`: [`ParamBounds`]
///   Box constraints realised through the scaled-logistic θ-mapping.
/// - `noise`: [`NoisePolicy`]
///   How random draws are reused across likelihood evaluations.
/// - `mle_opts`: [`MLEOptions`]
///   Tolerances, iteration cap, and line search for L-BFGS.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityOptions {
    pub ensemble_size: usize,
    pub bounds: ParamBounds,
    pub noise: NoisePolicy,
    pub mle_opts: MLEOptions,
}

impl CapabilityOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `CapabilityError::InvalidEnsembleSize` when `ensemble_size < 2`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use capability_tracking::capability::core::{
    /// #     options::CapabilityOptions, params::ParamBounds, rng::NoisePolicy,
    /// # };
    /// # use capability_tracking::optimization::loglik_optimizer::MLEOptions;
    /// let opts = CapabilityOptions::new(
    ///     250,
    ///     ParamBounds::default(),
    ///     NoisePolicy::CommonRandomNumbers { seed: Some(7) },
    ///     MLEOptions::default(),
    /// )?;
    /// assert_eq!(opts.ensemble_size, 250);
    /// # Ok::<(), capability_tracking::capability::errors::CapabilityError>(())
    /// ```
    pub fn new(
        ensemble_size: usize, bounds: ParamBounds, noise: NoisePolicy, mle_opts: MLEOptions,
    ) -> CapabilityResult<CapabilityOptions> {
        validate_ensemble_size(ensemble_size)?;
        Ok(CapabilityOptions { ensemble_size, bounds, noise, mle_opts })
    }

    /// Same options with a different noise policy.
    pub fn with_noise(mut self, noise: NoisePolicy) -> CapabilityOptions {
        self.noise = noise;
        self
    }
}

impl Default for CapabilityOptions {
    /// 100 particles, default bounds, unseeded common random numbers, and
    /// default optimizer options.
    fn default() -> Self {
        CapabilityOptions {
            ensemble_size: DEFAULT_ENSEMBLE_SIZE,
            bounds: ParamBounds::default(),
            noise: NoisePolicy::default(),
            mle_opts: MLEOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::errors::CapabilityError;

    #[test]
    // Purpose
    // -------
    // `new` keeps its inputs and rejects single-particle ensembles.
    //
    // Given
    // -----
    // - Sizes 1 and 30 with default components.
    //
    // Expect
    // ------
    // - Size 1 fails with `InvalidEnsembleSize`; size 30 is stored as given.
    fn new_validates_ensemble_size() {
        let build = |n| {
            CapabilityOptions::new(
                n,
                ParamBounds::default(),
                NoisePolicy::Fresh { seed: Some(1) },
                MLEOptions::default(),
            )
        };
        assert_eq!(build(1), Err(CapabilityError::InvalidEnsembleSize { size: 1 }));
        let opts = build(30).expect("valid options");
        assert_eq!(opts.ensemble_size, 30);
        assert_eq!(opts.noise, NoisePolicy::Fresh { seed: Some(1) });
    }

    #[test]
    // Purpose
    // -------
    // Defaults are documented values.
    //
    // Given
    // -----
    // - `CapabilityOptions::default()`.
    //
    // Expect
    // ------
    // - 100 particles and unseeded common random numbers.
    fn default_options_are_documented_values() {
        let opts = CapabilityOptions::default();
        assert_eq!(opts.ensemble_size, DEFAULT_ENSEMBLE_SIZE);
        assert_eq!(opts.noise, NoisePolicy::CommonRandomNumbers { seed: None });
        assert_eq!(opts.bounds, ParamBounds::default());
    }
}
