//! core: observation data, parameters, and the ensemble filter.
//!
//! Purpose
//! -------
//! Collect the building blocks of the capability tracker: validated
//! observations, the parameter set and its θ-mapping, the logistic
//! observation model, the particle ensemble and its propagator, the
//! perturbed-observation update, the filter driver, the forecaster, and the
//! random source. The model layer in `capability::models` ties these to the
//! optimizer.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are validated once, in [`Observations::new`]; the filter
//!   assumes clean input.
//! - Every stochastic function takes the random source as an explicit
//!   `&mut impl Rng` argument.
//! - Ensembles are owned by a single filter run.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; errors report the observation index as `step`.
//! - Reported variances use ddof 0; the Kalman cross-covariance uses ddof 1.
//! - No I/O here; the update step emits `tracing` trace events only.

pub mod data;
pub mod ensemble;
pub mod filter;
pub mod forecasts;
pub mod observation;
pub mod options;
pub mod params;
pub mod rng;
pub mod update;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::Observations;
pub use self::ensemble::Ensemble;
pub use self::filter::{EstimateTrajectory, FilterOutput, run_filter};
pub use self::forecasts::{ForecastResult, forecast};
pub use self::observation::{logistic, logistic_ensemble};
pub use self::options::{CapabilityOptions, DEFAULT_ENSEMBLE_SIZE};
pub use self::params::{BOUNDARY_NUDGE, CapabilityParams, N_PARAMS, PARAM_NAMES, ParamBounds};
pub use self::rng::{FilterRng, NoisePolicy, make_rng};
pub use self::update::{AssimilationStats, MIN_INNOVATION_VARIANCE, assimilate};

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use capability_tracking::capability::core::prelude::*;

pub mod prelude {
    pub use super::data::Observations;
    pub use super::filter::{EstimateTrajectory, FilterOutput, run_filter};
    pub use super::forecasts::ForecastResult;
    pub use super::options::CapabilityOptions;
    pub use super::params::{CapabilityParams, ParamBounds};
    pub use super::rng::{NoisePolicy, make_rng};
}
