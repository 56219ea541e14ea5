//! capability: latent capability tracking from irregular test scores.
//!
//! Purpose
//! -------
//! Estimate a latent scalar "capability" over time from scores in `[0, 1]`
//! observed at irregular times, using an ensemble Kalman filter with a
//! logistic observation model, fit the model's seven parameters by maximum
//! likelihood, and project capability forward.
//!
//! Key behaviors
//! -------------
//! - [`core`]: observations, parameters and bounds, the ensemble filter and
//!   its log-likelihood, and the closed-form forecaster.
//! - [`models`]: [`CapabilityModel`], which implements
//!   `LogLikelihood` and exposes `fit` / `forecast`.
//! - [`errors`]: [`CapabilityError`] / [`ParamError`] and result aliases.
//!
//! Model
//! -----
//! - State: `c_t = c_{t-Δ} + mu·Δ + sigma_omega·sqrt(Δ)·z`.
//! - Observation: `y_t = 1 / (1 + exp(-g (c_t - c0))) + sigma_nu·ε`.
//! - Prior: `c_0 ~ Normal(initial_c, sqrt(initial_variance))`.
//!
//! Downstream usage
//! ----------------
//! 1. Build [`Observations`] from times (e.g. weeks) and normalized scores.
//! 2. Build [`CapabilityOptions`] (ensemble size, bounds, noise policy,
//!    optimizer options) and a [`CapabilityModel`].
//! 3. `fit(&initial, &data)` returns a [`CapabilityFit`] with the trajectory.
//! 4. `forecast(times)` projects from the fitted final state.

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    CapabilityOptions, CapabilityParams, EstimateTrajectory, FilterOutput, ForecastResult,
    NoisePolicy, Observations, ParamBounds,
};
pub use self::errors::{CapabilityError, CapabilityResult, ParamError, ParamResult};
pub use self::models::{CapabilityFit, CapabilityModel};

pub mod prelude {
    pub use super::{
        CapabilityError, CapabilityFit, CapabilityModel, CapabilityOptions, CapabilityParams,
        CapabilityResult, EstimateTrajectory, FilterOutput, ForecastResult, NoisePolicy,
        Observations, ParamBounds, ParamError, ParamResult,
    };
}
