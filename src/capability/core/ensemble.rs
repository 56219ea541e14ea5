//! Ensemble of capability particles and the state propagator.
//!
//! Purpose
//! -------
//! Hold the `N` scalar particles that represent the filter's belief about
//! latent capability, draw the initial ensemble, and move it forward in time
//! under the random-walk-with-drift dynamics.
//!
//! Key behaviors
//! -------------
//! - [`Ensemble::initialize`] draws `N` i.i.d. particles from
//!   `Normal(initial_c, sqrt(initial_variance))`.
//! - [`Ensemble::propagate`] applies
//!   `x ← x + mu·Δt + sigma_omega·sqrt(Δt)·z` per particle.
//! - Moment helpers: population mean/variance (ddof 0) for reporting and
//!   [`sample_covariance`] (ddof 1) for the Kalman cross-covariance.
//!
//! Invariants & assumptions
//! ------------------------
//! - `N >= MIN_ENSEMBLE_SIZE` and fixed for the lifetime of the value.
//! - `Δt == 0` is a strict no-op and consumes no random draws, so the number
//!   of draws in a filter run depends only on the data layout, never on the
//!   parameter values.
//! - An ensemble belongs to a single filter run; it is rebuilt every run.
use crate::capability::{
    core::{
        params::CapabilityParams,
        rng::standard_normal,
        validation::{validate_ensemble_size, validate_time_step},
    },
    errors::CapabilityResult,
};
use ndarray::{Array1, ArrayView1, Zip};
use rand::Rng;

/// Scalar particle ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    /// Particle values.
    pub particles: Array1<f64>,
}

impl Ensemble {
    /// Draw an initial ensemble of `size` particles from
    /// `Normal(mean, sqrt(variance))`.
    ///
    /// A zero variance yields `size` identical particles.
    ///
    /// Errors
    /// ------
    /// - `CapabilityError::InvalidEnsembleSize` when `size < 2`.
    pub fn initialize<R: Rng + ?Sized>(
        mean: f64, variance: f64, size: usize, rng: &mut R,
    ) -> CapabilityResult<Ensemble> {
        validate_ensemble_size(size)?;
        let std = variance.max(0.0).sqrt();
        let particles = Array1::from_shape_simple_fn(size, || mean + std * standard_normal(rng));
        Ok(Ensemble { particles })
    }

    /// Build an ensemble from explicit particle values.
    pub fn from_particles(particles: Array1<f64>) -> CapabilityResult<Ensemble> {
        validate_ensemble_size(particles.len())?;
        Ok(Ensemble { particles })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.particles.view()
    }

    /// Ensemble mean.
    pub fn mean(&self) -> f64 {
        mean(self.particles.view())
    }

    /// Ensemble variance with ddof 0.
    pub fn variance(&self) -> f64 {
        population_variance(self.particles.view())
    }

    /// Advance every particle by `dt` under drift `mu` and diffusion
    /// `sigma_omega`.
    ///
    /// Errors
    /// ------
    /// - `CapabilityError::InvalidTimeStep` for negative or non-finite `dt`.
    pub fn propagate<R: Rng + ?Sized>(
        &mut self, dt: f64, params: &CapabilityParams, rng: &mut R,
    ) -> CapabilityResult<()> {
        validate_time_step(dt)?;
        if dt == 0.0 {
            return Ok(());
        }
        let drift = params.mu * dt;
        let diffusion = params.sigma_omega * dt.sqrt();
        self.particles.mapv_inplace(|x| x + drift + diffusion * standard_normal(rng));
        Ok(())
    }
}

/// Arithmetic mean. Returns `NaN` for an empty view.
///
/// Computed on data shifted by the first element, so a constant series
/// returns that constant exactly.
pub fn mean(x: ArrayView1<f64>) -> f64 {
    match x.first() {
        Some(&x0) => x0 + x.fold(0.0, |acc, &v| acc + (v - x0)) / x.len() as f64,
        None => f64::NAN,
    }
}

/// Variance with ddof 0. Exactly zero for a constant series.
pub fn population_variance(x: ArrayView1<f64>) -> f64 {
    let m = mean(x);
    x.fold(0.0, |acc, &v| acc + (v - m) * (v - m)) / x.len() as f64
}

/// Sample covariance of two equal-length series, ddof 1.
pub fn sample_covariance(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let (mx, my) = (mean(x), mean(y));
    let mut acc = 0.0;
    Zip::from(x).and(y).for_each(|&a, &b| acc += (a - mx) * (b - my));
    acc / (x.len() as f64 - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{core::rng::make_rng, errors::CapabilityError};
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Initial draws (size check, zero-variance collapse, seeded moments).
    // - Propagation: Δt = 0 no-op, drift-only motion, invalid Δt.
    // - Moment helpers against hand-computed values.
    // -------------------------------------------------------------------------

    fn params(mu: f64, sigma_omega: f64) -> CapabilityParams {
        CapabilityParams::new(mu, sigma_omega, 2.0, 0.0, 0.1, 0.0, 0.5).expect("valid params")
    }

    #[test]
    // Purpose
    // -------
    // Ensembles need at least two particles; zero variance collapses to the
    // mean.
    //
    // Given
    // -----
    // - size 1, then size 5 with variance 0 around 1.5.
    //
    // Expect
    // ------
    // - `InvalidEnsembleSize { size: 1 }`; five particles all equal to 1.5.
    fn initialize_checks_size_and_handles_zero_variance() {
        let mut rng = make_rng(Some(1));
        assert_eq!(
            Ensemble::initialize(0.0, 1.0, 1, &mut rng),
            Err(CapabilityError::InvalidEnsembleSize { size: 1 })
        );

        let ens = Ensemble::initialize(1.5, 0.0, 5, &mut rng).expect("valid ensemble");

        assert_eq!(ens.len(), 5);
        assert!(ens.particles.iter().all(|&x| x == 1.5));
        assert_eq!(ens.variance(), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // A large seeded draw has moments close to the requested ones.
    //
    // Given
    // -----
    // - 20 000 particles from Normal(-1, sqrt(0.25)).
    //
    // Expect
    // ------
    // - Mean ≈ -1 and variance ≈ 0.25 within sampling error.
    fn initialize_matches_requested_moments() {
        let mut rng = make_rng(Some(42));
        let ens = Ensemble::initialize(-1.0, 0.25, 20_000, &mut rng).expect("valid ensemble");
        assert_abs_diff_eq!(ens.mean(), -1.0, epsilon = 0.02);
        assert_abs_diff_eq!(ens.variance(), 0.25, epsilon = 0.02);
    }

    #[test]
    // Purpose
    // -------
    // Δt = 0 leaves the particles and the random stream untouched.
    //
    // Given
    // -----
    // - Two identically seeded streams; one is passed through a zero-step
    //   propagation first.
    //
    // Expect
    // ------
    // - Particles unchanged, and both streams yield the same next draw.
    fn propagate_zero_step_is_a_no_op() {
        let mut ens = Ensemble::from_particles(array![0.1, -0.3, 0.7]).expect("valid ensemble");
        let before = ens.clone();
        let mut used = make_rng(Some(9));
        let mut fresh = make_rng(Some(9));

        ens.propagate(0.0, &params(0.5, 0.4), &mut used).expect("zero step is valid");

        assert_eq!(ens, before);
        assert_eq!(standard_normal(&mut used), standard_normal(&mut fresh));
    }

    #[test]
    // Purpose
    // -------
    // Without diffusion, propagation is a deterministic shift by `mu·Δt`.
    //
    // Given
    // -----
    // - mu = 0.2, sigma_omega = 0, Δt = 2.5.
    //
    // Expect
    // ------
    // - Every particle moves by exactly 0.5; negative Δt is rejected.
    fn propagate_applies_drift() {
        let mut ens = Ensemble::from_particles(array![0.0, 1.0, -2.0]).expect("valid ensemble");
        let mut rng = make_rng(Some(3));

        ens.propagate(2.5, &params(0.2, 0.0), &mut rng).expect("valid step");

        for (got, want) in ens.particles.iter().zip([0.5, 1.5, -1.5]) {
            assert_abs_diff_eq!(*got, want, epsilon = 1e-12);
        }
        assert_eq!(
            ens.propagate(-1.0, &params(0.2, 0.0), &mut rng),
            Err(CapabilityError::InvalidTimeStep { value: -1.0 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Moment helpers use the documented degrees of freedom.
    //
    // Given
    // -----
    // - x = [1, 2, 3, 4], y = 2x.
    //
    // Expect
    // ------
    // - mean 2.5, population variance 1.25, sample covariance 10/3.
    fn moment_helpers_use_expected_ddof() {
        let x = array![1.0, 2.0, 3.0, 4.0];
        let y = &x * 2.0;
        assert_abs_diff_eq!(mean(x.view()), 2.5, epsilon = 1e-15);
        assert_abs_diff_eq!(population_variance(x.view()), 1.25, epsilon = 1e-15);
        assert_abs_diff_eq!(sample_covariance(x.view(), y.view()), 10.0 / 3.0, epsilon = 1e-12);
    }
}
