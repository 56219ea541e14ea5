//! Capability model parameters, their box bounds, and the θ-space mapping.
//!
//! Purpose
//! -------
//! Represent the seven free scalars of the capability model, validate them,
//! and translate between model space and the unconstrained optimizer vector
//! θ used by the L-BFGS layer.
//!
//! Key behaviors
//! -------------
//! - [`CapabilityParams`] holds `(mu, sigma_omega, g, c0, sigma_nu,
//!   initial_c, initial_variance)` with finiteness and non-negative scale
//!   checks.
//! - [`ParamBounds`] holds one closed box per parameter (defaults below) and
//!   checks that a parameter set lies inside it.
//! - `to_theta` / `from_theta` apply a per-coordinate scaled logistic
//!   `v = lo + (hi - lo) · σ(θ)`, so any θ ∈ ℝ⁷ maps strictly inside the box.
//!
//! Invariants & assumptions
//! ------------------------
//! - Canonical order everywhere (arrays, θ, names) is [`PARAM_NAMES`].
//! - Values sitting exactly on a bound are nudged inward by
//!   [`BOUNDARY_NUDGE`] of the box width before the logit, keeping the
//!   logistic slope at θ₀ usable by the optimizer.
//!
//! Default bounds
//! --------------
//! | parameter          | lower  | upper |
//! |--------------------|--------|-------|
//! | `mu`               | -1     | 2     |
//! | `sigma_omega`      | 0.001  | 1     |
//! | `g`                | 0.1    | 10    |
//! | `c0`               | -2     | 2     |
//! | `sigma_nu`         | 0.001  | 1     |
//! | `initial_c`        | -5     | 2     |
//! | `initial_variance` | 0.001  | 1     |
use crate::{
    capability::{
        core::validation::{
            validate_bounds, validate_finite, validate_in_bounds, validate_scale, validate_theta,
        },
        errors::ParamResult,
    },
    optimization::{
        loglik_optimizer::Theta,
        numerical_stability::{bounded_from_unconstrained, unconstrained_from_bounded},
    },
};
use ndarray::ArrayView1;

/// Number of free parameters.
pub const N_PARAMS: usize = 7;

/// Parameter names in canonical order.
pub const PARAM_NAMES: [&str; N_PARAMS] =
    ["mu", "sigma_omega", "g", "c0", "sigma_nu", "initial_c", "initial_variance"];

/// Fraction of the box width kept between a starting value and its bound.
pub const BOUNDARY_NUDGE: f64 = 1e-6;

/// Indices of the scale-type parameters (must be `>= 0`).
const SCALE_INDICES: [usize; 3] = [1, 4, 6];

/// Parameters of the capability state-space model.
///
/// - `mu`: drift of latent capability per unit time.
/// - `sigma_omega`: process-noise scale; variance grows as `sigma_omega² Δt`.
/// - `g`: slope of the logistic observation curve.
/// - `c0`: midpoint of the logistic curve (capability giving a 50% score).
/// - `sigma_nu`: measurement-noise scale.
/// - `initial_c`: mean of the initial capability ensemble.
/// - `initial_variance`: variance of the initial capability ensemble.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapabilityParams {
    pub mu: f64,
    pub sigma_omega: f64,
    pub g: f64,
    pub c0: f64,
    pub sigma_nu: f64,
    pub initial_c: f64,
    pub initial_variance: f64,
}

impl CapabilityParams {
    /// Construct validated parameters.
    ///
    /// Errors
    /// ------
    /// - `ParamError::NonFiniteParam` for any NaN/±inf.
    /// - `ParamError::NegativeScale` if `sigma_omega`, `sigma_nu`, or
    ///   `initial_variance` is negative.
    pub fn new(
        mu: f64, sigma_omega: f64, g: f64, c0: f64, sigma_nu: f64, initial_c: f64,
        initial_variance: f64,
    ) -> ParamResult<CapabilityParams> {
        let values = [mu, sigma_omega, g, c0, sigma_nu, initial_c, initial_variance];
        CapabilityParams::from_array(values)
    }

    /// Construct from an array in canonical order, with the same checks as
    /// [`CapabilityParams::new`].
    pub fn from_array(values: [f64; N_PARAMS]) -> ParamResult<CapabilityParams> {
        for (i, (&name, &value)) in PARAM_NAMES.iter().zip(values.iter()).enumerate() {
            if SCALE_INDICES.contains(&i) {
                validate_scale(name, value)?;
            } else {
                validate_finite(name, value)?;
            }
        }
        let [mu, sigma_omega, g, c0, sigma_nu, initial_c, initial_variance] = values;
        Ok(CapabilityParams { mu, sigma_omega, g, c0, sigma_nu, initial_c, initial_variance })
    }

    /// Parameters as an array in canonical order.
    pub fn to_array(&self) -> [f64; N_PARAMS] {
        [
            self.mu,
            self.sigma_omega,
            self.g,
            self.c0,
            self.sigma_nu,
            self.initial_c,
            self.initial_variance,
        ]
    }

    /// `(name, value)` pairs for reporting.
    pub fn to_named_pairs(&self) -> [(&'static str, f64); N_PARAMS] {
        let values = self.to_array();
        std::array::from_fn(|i| (PARAM_NAMES[i], values[i]))
    }

    /// Map model-space parameters to the unconstrained vector θ.
    ///
    /// Errors
    /// ------
    /// - `ParamError::OutOfBounds` if any parameter lies outside `bounds`.
    pub fn to_theta(&self, bounds: &ParamBounds) -> ParamResult<Theta> {
        bounds.check(self)?;
        let values = self.to_array();
        let theta = (0..N_PARAMS)
            .map(|i| {
                let (lo, hi) = bounds.get(i);
                let margin = BOUNDARY_NUDGE * (hi - lo);
                unconstrained_from_bounded(values[i].clamp(lo + margin, hi - margin), lo, hi)
            })
            .collect();
        Ok(theta)
    }

    /// Map an unconstrained vector θ back to model-space parameters.
    ///
    /// Errors
    /// ------
    /// - `ParamError::ThetaLengthMismatch` / `InvalidThetaInput` if θ is not a
    ///   finite vector of length [`N_PARAMS`].
    pub fn from_theta(
        theta: ArrayView1<f64>, bounds: &ParamBounds,
    ) -> ParamResult<CapabilityParams> {
        validate_theta(theta, N_PARAMS)?;
        let values: [f64; N_PARAMS] = std::array::from_fn(|i| {
            let (lo, hi) = bounds.get(i);
            bounded_from_unconstrained(theta[i], lo, hi)
        });
        CapabilityParams::from_array(values)
    }
}

/// Closed box bounds, one `(lower, upper)` pair per parameter in canonical
/// order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    pub lower: [f64; N_PARAMS],
    pub upper: [f64; N_PARAMS],
}

impl ParamBounds {
    /// Construct validated bounds.
    ///
    /// Errors
    /// ------
    /// - `ParamError::InvalidBounds` if any pair is non-finite or has
    ///   `lower >= upper`.
    pub fn new(lower: [f64; N_PARAMS], upper: [f64; N_PARAMS]) -> ParamResult<ParamBounds> {
        for i in 0..N_PARAMS {
            validate_bounds(PARAM_NAMES[i], lower[i], upper[i])?;
        }
        Ok(ParamBounds { lower, upper })
    }

    /// `(lower, upper)` for parameter `i`.
    pub fn get(&self, i: usize) -> (f64, f64) {
        (self.lower[i], self.upper[i])
    }

    /// Check that every parameter lies inside its box.
    pub fn check(&self, params: &CapabilityParams) -> ParamResult<()> {
        for (i, value) in params.to_array().into_iter().enumerate() {
            validate_in_bounds(PARAM_NAMES[i], value, self.lower[i], self.upper[i])?;
        }
        Ok(())
    }
}

impl Default for ParamBounds {
    fn default() -> Self {
        ParamBounds {
            lower: [-1.0, 0.001, 0.1, -2.0, 0.001, -5.0, 0.001],
            upper: [2.0, 1.0, 10.0, 2.0, 1.0, 2.0, 1.0],
        }
    }
}
