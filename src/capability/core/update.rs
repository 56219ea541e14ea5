//! Perturbed-observation ensemble update.
//!
//! Each particle is pushed toward the observed score through a scalar Kalman
//! gain estimated from the ensemble itself:
//!
//! 1. `pred_i = logistic(x_i; g, c0) + sigma_nu · z_i`
//! 2. `P_yy = var(pred) + sigma_nu²` (ddof 0)
//! 3. `P_xy = cov(x, pred)` (ddof 1)
//! 4. `K = P_xy / P_yy`
//! 5. `x_i ← x_i + K (y - pred_i)`
//!
//! The measurement noise enters `P_yy` twice, once through the perturbed
//! predictions and once explicitly. The filter's likelihood is defined with
//! the same convention, so fitted parameters depend on it.
use crate::capability::{
    core::{
        ensemble::{Ensemble, mean, population_variance, sample_covariance},
        observation::logistic_ensemble,
        params::CapabilityParams,
        rng::standard_normal,
    },
    errors::{CapabilityError, CapabilityResult},
};
use ndarray::{Array1, ArrayView1};
use rand::Rng;

/// Smallest innovation variance accepted by the update.
///
/// Sits well below `sigma_nu² = 1e-6` at the default lower bound, so only a
/// collapsed ensemble with vanishing measurement noise falls under it.
pub const MIN_INNOVATION_VARIANCE: f64 = 1e-12;

/// Diagnostics from one assimilation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssimilationStats {
    pub gain: f64,
    pub p_xy: f64,
    pub p_yy: f64,
}

/// Noisy predicted scores `logistic(x) + sigma_nu · z`, one per particle.
pub fn perturbed_predictions<R: Rng + ?Sized>(
    particles: ArrayView1<f64>, params: &CapabilityParams, rng: &mut R,
) -> Array1<f64> {
    let mut pred = logistic_ensemble(particles, params.g, params.c0);
    pred.mapv_inplace(|p| p + params.sigma_nu * standard_normal(rng));
    pred
}

/// Innovation variance `var(pred) + sigma_nu²`, rejected when non-finite or
/// below `MIN_INNOVATION_VARIANCE`.
///
/// Errors
/// ------
/// - `CapabilityError::DegenerateEnsemble { step, p_yy }`.
pub fn innovation_variance(
    pred: ArrayView1<f64>, sigma_nu: f64, step: usize,
) -> CapabilityResult<f64> {
    let p_yy = population_variance(pred) + sigma_nu * sigma_nu;
    if !(p_yy >= MIN_INNOVATION_VARIANCE) || !p_yy.is_finite() {
        return Err(CapabilityError::DegenerateEnsemble { step, p_yy });
    }
    Ok(p_yy)
}

/// Assimilate the score `y` observed at filter step `step` into `ensemble`.
///
/// Errors
/// ------
/// - `CapabilityError::DegenerateEnsemble` when the innovation variance is
///   zero or near zero; the ensemble is left untouched in that case.
pub fn assimilate<R: Rng + ?Sized>(
    ensemble: &mut Ensemble, y: f64, params: &CapabilityParams, step: usize, rng: &mut R,
) -> CapabilityResult<AssimilationStats> {
    let pred = perturbed_predictions(ensemble.view(), params, rng);
    let p_yy = innovation_variance(pred.view(), params.sigma_nu, step)?;
    let p_xy = sample_covariance(ensemble.view(), pred.view());
    let gain = p_xy / p_yy;

    ensemble.particles.zip_mut_with(&pred, |x, &p| *x += gain * (y - p));

    tracing::trace!(step, y, gain, p_xy, p_yy, pred_mean = mean(pred.view()), "assimilated");
    Ok(AssimilationStats { gain, p_xy, p_yy })
}
