//! Capability validation helpers: reusable checks for series, parameters,
//! and filter configuration.
//!
//! Purpose
//! -------
//! Centralize the small validation routines used across the capability
//! stack so constructors and the filter can fail fast with structured errors
//! before any random draws are made.
//!
//! Key behaviors
//! -------------
//! - Validate observation times (finite, non-negative, non-decreasing) and
//!   scores (finite, in `[0, 1]`).
//! - Validate ensemble size and propagation steps.
//! - Validate individual model parameters, box bounds, and unconstrained
//!   optimizer inputs θ.
//!
//! Conventions
//! -----------
//! - Indices are 0-based. The first offending element is reported.
//! - Functions return [`CapabilityResult`] or [`ParamResult`] and never
//!   panic on invalid inputs.
//! - No I/O and no logging.
use crate::capability::errors::{CapabilityError, CapabilityResult, ParamError, ParamResult};
use ndarray::ArrayView1;

/// Smallest ensemble for which a sample covariance is defined.
pub const MIN_ENSEMBLE_SIZE: usize = 2;

/// Validate observation times.
///
/// # Errors
/// - [`CapabilityError::NonFiniteTime`] for NaN/±inf.
/// - [`CapabilityError::NegativeTime`] for values below zero.
/// - [`CapabilityError::NonMonotonicTime`] if a time is smaller than its
///   predecessor. Equal consecutive times are allowed.
pub fn validate_times(times: ArrayView1<f64>) -> CapabilityResult<()> {
    let mut previous: Option<f64> = None;
    for (index, &value) in times.iter().enumerate() {
        if !value.is_finite() {
            return Err(CapabilityError::NonFiniteTime { index, value });
        }
        if value < 0.0 {
            return Err(CapabilityError::NegativeTime { index, value });
        }
        if let Some(prev) = previous {
            if value < prev {
                return Err(CapabilityError::NonMonotonicTime {
                    index,
                    previous: prev,
                    current: value,
                });
            }
        }
        previous = Some(value);
    }
    Ok(())
}

/// Validate normalized scores.
///
/// # Errors
/// - [`CapabilityError::NonFiniteScore`] for NaN/±inf.
/// - [`CapabilityError::ScoreOutOfRange`] outside `[0, 1]`.
pub fn validate_scores(scores: ArrayView1<f64>) -> CapabilityResult<()> {
    for (index, &value) in scores.iter().enumerate() {
        if !value.is_finite() {
            return Err(CapabilityError::NonFiniteScore { index, value });
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(CapabilityError::ScoreOutOfRange { index, value });
        }
    }
    Ok(())
}

/// Validate the number of ensemble particles.
///
/// # Errors
/// - [`CapabilityError::InvalidEnsembleSize`] when `size < MIN_ENSEMBLE_SIZE`.
pub fn validate_ensemble_size(size: usize) -> CapabilityResult<()> {
    if size < MIN_ENSEMBLE_SIZE {
        return Err(CapabilityError::InvalidEnsembleSize { size });
    }
    Ok(())
}

/// Validate a propagation step `Δt`.
///
/// # Errors
/// - [`CapabilityError::InvalidTimeStep`] if `Δt` is negative or non-finite.
pub fn validate_time_step(dt: f64) -> CapabilityResult<()> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(CapabilityError::InvalidTimeStep { value: dt });
    }
    Ok(())
}

/// Validate a location-type parameter (finite, any sign).
pub fn validate_finite(name: &'static str, value: f64) -> ParamResult<()> {
    if !value.is_finite() {
        return Err(ParamError::NonFiniteParam { name, value });
    }
    Ok(())
}

/// Validate a scale-type parameter (finite and `>= 0`).
///
/// Zero is accepted: a zero scale switches off the corresponding noise
/// source, which is how the fully deterministic configuration is expressed.
pub fn validate_scale(name: &'static str, value: f64) -> ParamResult<()> {
    validate_finite(name, value)?;
    if value < 0.0 {
        return Err(ParamError::NegativeScale { name, value });
    }
    Ok(())
}

/// Validate one `(lower, upper)` box.
///
/// # Errors
/// - [`ParamError::InvalidBounds`] if either end is non-finite or
///   `lower >= upper`.
pub fn validate_bounds(name: &'static str, lower: f64, upper: f64) -> ParamResult<()> {
    if !lower.is_finite() || !upper.is_finite() || lower >= upper {
        return Err(ParamError::InvalidBounds { name, lower, upper });
    }
    Ok(())
}

/// Validate that `value` lies in the closed box `[lower, upper]`.
pub fn validate_in_bounds(
    name: &'static str, value: f64, lower: f64, upper: f64,
) -> ParamResult<()> {
    if !(lower..=upper).contains(&value) {
        return Err(ParamError::OutOfBounds { name, value, lower, upper });
    }
    Ok(())
}

/// Validate an unconstrained optimizer vector θ.
///
/// # Errors
/// - [`ParamError::ThetaLengthMismatch`] if `theta.len() != expected`.
/// - [`ParamError::InvalidThetaInput`] for the first non-finite entry.
pub fn validate_theta(theta: ArrayView1<f64>, expected: usize) -> ParamResult<()> {
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    match theta.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ParamError::InvalidThetaInput { index, value: theta[index] }),
        None => Ok(()),
    }
}
