//! Capability model: filter log-likelihood, maximum-likelihood fit, and
//! forecasting.
//!
//! This module wires the ensemble filter to the `LogLikelihood` trait. The
//! optimizer works on an unconstrained θ ∈ ℝ⁷; each coordinate maps into
//! its parameter box through a scaled logistic, so L-BFGS with
//! finite-difference gradients honours the bounds without a constrained
//! solver.
//!
//! Key ideas:
//! - `value(θ)` maps θ → [`CapabilityParams`], runs the filter, and returns
//!   its log-likelihood.
//! - The random source per evaluation follows [`NoisePolicy`]: under common
//!   random numbers every evaluation of a fit restarts one ChaCha8 stream
//!   from the fit's seed, so `value` is deterministic in θ; under `Fresh` a
//!   stream held in a `RefCell` advances across evaluations.
//! - After the optimizer returns, the filter is re-run once at θ̂ to produce
//!   the reported trajectory and final state.
use crate::{
    capability::{
        core::{
            data::Observations,
            filter::{EstimateTrajectory, FilterOutput, run_filter},
            forecasts::{ForecastResult, forecast},
            options::CapabilityOptions,
            params::{CapabilityParams, N_PARAMS},
            rng::{FilterRng, NoisePolicy, make_rng},
            validation::validate_theta,
        },
        errors::{CapabilityError, CapabilityResult},
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{LogLikelihood, OptimOutcome, Theta, maximize},
    },
};
use ndarray::ArrayView1;
use rand::RngCore;
use std::cell::{Cell, RefCell};

/// Snapshot of a completed fit.
///
/// - `params`: fitted parameters in model space.
/// - `trajectory`: posterior mean/variance per observation at `params`.
/// - `log_likelihood`: filter log-likelihood of that re-run.
/// - `converged`, `status`, `iterations`: optimizer outcome.
/// - `final_mean`, `final_variance`, `last_time`: state the forecaster starts
///   from.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityFit {
    pub params: CapabilityParams,
    pub trajectory: EstimateTrajectory,
    pub log_likelihood: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub final_mean: f64,
    pub final_variance: f64,
    pub last_time: f64,
}

/// Ensemble-filter capability tracker with maximum-likelihood fitting.
///
/// # Notes
/// - Not thread-safe: the `Fresh` noise stream and the per-fit seed use
///   interior mutability so `LogLikelihood::value(&self, ..)` can draw.
/// - After `fit`, [`results`](Self::results) holds the raw optimizer outcome
///   and [`fitted`](Self::fitted) the re-run snapshot.
#[derive(Debug, Clone)]
pub struct CapabilityModel {
    /// Filter and optimizer configuration.
    pub options: CapabilityOptions,
    /// Stream for `Fresh` evaluations and for drawing unseeded fit seeds.
    stream: RefCell<FilterRng>,
    /// Seed every evaluation restarts from under common random numbers.
    crn_seed: Cell<u64>,
    /// Optimizer outcome (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Fit snapshot (populated after `fit`).
    pub fitted: Option<CapabilityFit>,
    /// Last forecast (populated after `forecast`).
    pub forecast: Option<ForecastResult>,
}

impl CapabilityModel {
    /// Construct an unfitted model.
    ///
    /// A seeded policy makes every filter run and fit reproducible; an
    /// unseeded one draws from OS entropy.
    pub fn new(options: CapabilityOptions) -> CapabilityModel {
        let mut stream = make_rng(options.noise.seed());
        let crn_seed = match options.noise {
            NoisePolicy::CommonRandomNumbers { seed: Some(seed) } => seed,
            _ => stream.next_u64(),
        };
        CapabilityModel {
            options,
            stream: RefCell::new(stream),
            crn_seed: Cell::new(crn_seed),
            results: None,
            fitted: None,
            forecast: None,
        }
    }

    /// Run the filter at `params` with this model's ensemble size and noise
    /// policy.
    ///
    /// Under common random numbers this uses the current fit seed, so calling
    /// it with the fitted parameters reproduces the fit's trajectory.
    pub fn filter(
        &self, params: &CapabilityParams, data: &Observations,
    ) -> CapabilityResult<FilterOutput> {
        let n = self.options.ensemble_size;
        match self.options.noise {
            NoisePolicy::CommonRandomNumbers { .. } => {
                run_filter(params, data, n, &mut make_rng(Some(self.crn_seed.get())))
            }
            NoisePolicy::Fresh { .. } => {
                run_filter(params, data, n, &mut *self.stream.borrow_mut())
            }
        }
    }

    /// Fit the model by maximum likelihood starting from `initial` and cache
    /// the results.
    ///
    /// ## Steps
    /// 1. Check `initial` against the bounds and map it to θ₀.
    /// 2. Under unseeded common random numbers, draw this fit's seed.
    /// 3. Maximize the filter log-likelihood with L-BFGS.
    /// 4. Map θ̂ back to parameters and re-run the filter once.
    ///
    /// ## Errors
    /// - `CapabilityError::Param` if `initial` lies outside the bounds.
    /// - Filter errors raised during optimization are mapped back to their
    ///   `CapabilityError` variants; solver failures become
    ///   `OptimizationFailed`.
    ///
    /// ## Notes
    /// - Reaching `max_iter` is not an error: the fit is returned with
    ///   `converged = false` and a warning is logged.
    pub fn fit(
        &mut self, initial: &CapabilityParams, data: &Observations,
    ) -> CapabilityResult<CapabilityFit> {
        let theta0 = initial.to_theta(&self.options.bounds)?;
        if let NoisePolicy::CommonRandomNumbers { seed: None } = self.options.noise {
            self.crn_seed.set(self.stream.get_mut().next_u64());
        }
        tracing::debug!(
            observations = data.len(),
            ensemble_size = self.options.ensemble_size,
            noise = ?self.options.noise,
            "starting capability fit"
        );

        let outcome = maximize(&*self, theta0, data, &self.options.mle_opts)?;
        let params = CapabilityParams::from_theta(outcome.theta_hat.view(), &self.options.bounds)?;
        let output = self.filter(&params, data)?;

        if !outcome.converged {
            tracing::warn!(
                status = %outcome.status,
                iterations = outcome.iterations,
                "capability fit did not converge"
            );
        }
        tracing::debug!(
            iterations = outcome.iterations,
            log_likelihood = output.log_likelihood,
            converged = outcome.converged,
            params = ?params.to_named_pairs(),
            "finished capability fit"
        );

        let fit = CapabilityFit {
            params,
            trajectory: output.trajectory,
            log_likelihood: output.log_likelihood,
            converged: outcome.converged,
            status: outcome.status.clone(),
            iterations: outcome.iterations,
            final_mean: output.final_mean,
            final_variance: output.final_variance,
            last_time: data.last_time(),
        };
        self.results = Some(outcome);
        self.fitted = Some(fit.clone());
        Ok(fit)
    }

    /// Forecast capability at `future_times` from the fitted final state and
    /// cache the result.
    ///
    /// ## Errors
    /// - `CapabilityError::ModelNotFitted` if called before `fit`.
    /// - `CapabilityError::InvalidForecastTime` for times before the last
    ///   observation or non-finite times.
    pub fn forecast(&mut self, future_times: ArrayView1<f64>) -> CapabilityResult<ForecastResult> {
        let fit = self.fitted.as_ref().ok_or(CapabilityError::ModelNotFitted)?;
        let result = forecast(
            &fit.params,
            fit.last_time,
            fit.final_mean,
            fit.final_variance,
            future_times,
        )?;
        self.forecast = Some(result.clone());
        Ok(result)
    }
}

impl LogLikelihood for CapabilityModel {
    type Data = Observations;

    /// Filter log-likelihood at θ.
    ///
    /// # Errors
    /// - Parameter mapping or filter errors, carried as `OptError` mirrors.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = CapabilityParams::from_theta(theta.view(), &self.options.bounds)?;
        Ok(self.filter(&params, data)?.log_likelihood)
    }

    /// Checks `θ.len() == 7` and that every entry is finite.
    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        validate_theta(theta.view(), N_PARAMS)?;
        Ok(())
    }
}
