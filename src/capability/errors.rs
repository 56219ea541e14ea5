//! Errors for the capability tracker (input validation, filter numerics,
//! parameter checks, and optimizer failures).
//!
//! This module defines the model error type, [`CapabilityError`], and the
//! parameter error type, [`ParamError`]. Both implement `Display`/`Error`.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to positions in the observation
//!   sequence (or the forecast-time list for forecast errors).
//! - Filter steps are numbered by observation index, so step `0` is the
//!   assimilation of the first score.
//! - Optimizer/backend errors that have no model counterpart are normalized
//!   to [`CapabilityError::OptimizationFailed`] with a human-readable status.
use crate::optimization::errors::OptError;
use statrs::distribution::NormalError;

/// Result alias for capability operations that may produce [`CapabilityError`].
pub type CapabilityResult<T> = Result<T, CapabilityError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for capability tracking.
#[derive(Debug, Clone, PartialEq)]
pub enum CapabilityError {
    // ---- Input/data validation ----
    /// Observation series is empty.
    EmptySeries,

    /// `times` and `scores` differ in length.
    LengthMismatch { times: usize, scores: usize },

    /// A time stamp is NaN/±inf.
    NonFiniteTime { index: usize, value: f64 },

    /// A time stamp is negative.
    NegativeTime { index: usize, value: f64 },

    /// Time stamps must be non-decreasing.
    NonMonotonicTime { index: usize, previous: f64, current: f64 },

    /// A score is NaN/±inf.
    NonFiniteScore { index: usize, value: f64 },

    /// A score lies outside `[0, 1]`.
    ScoreOutOfRange { index: usize, value: f64 },

    // ---- Ensemble / filter numerics ----
    /// Ensemble must hold at least two particles.
    InvalidEnsembleSize { size: usize },

    /// Propagation step must be finite and non-negative.
    InvalidTimeStep { value: f64 },

    /// Innovation variance `P_yy` is zero, negative, or non-finite.
    DegenerateEnsemble { step: usize, p_yy: f64 },

    /// A per-step log-density is not finite.
    NonFiniteLikelihood { step: usize, value: f64 },

    // ---- Forecasting ----
    /// Forecast time is non-finite or precedes the last observation.
    InvalidForecastTime { index: usize, value: f64, last: f64 },

    // ---- Estimation / optimizer ----
    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    /// Model hasn't been fitted yet.
    ModelNotFitted,

    /// Parameter construction or validation failed.
    Param(ParamError),

    // ---- statrs distribution errors ----
    /// Wrapper for statrs::distribution::NormalError
    InvalidDistribution { reason: String },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for CapabilityError {}

impl std::fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            CapabilityError::EmptySeries => write!(f, "Observation series is empty."),
            CapabilityError::LengthMismatch { times, scores } => {
                write!(f, "times has {times} entries but scores has {scores}")
            }
            CapabilityError::NonFiniteTime { index, value } => {
                write!(f, "Time at index {index} is non-finite: {value}")
            }
            CapabilityError::NegativeTime { index, value } => {
                write!(f, "Time at index {index} is negative: {value}")
            }
            CapabilityError::NonMonotonicTime { index, previous, current } => {
                write!(
                    f,
                    "Times must be non-decreasing; index {index} has {current} after {previous}"
                )
            }
            CapabilityError::NonFiniteScore { index, value } => {
                write!(f, "Score at index {index} is non-finite: {value}")
            }
            CapabilityError::ScoreOutOfRange { index, value } => {
                write!(f, "Score at index {index} must lie in [0, 1]; got {value}")
            }
            // ---- Ensemble / filter numerics ----
            CapabilityError::InvalidEnsembleSize { size } => {
                write!(f, "Ensemble size must be at least 2; got {size}")
            }
            CapabilityError::InvalidTimeStep { value } => {
                write!(f, "Time step must be finite and >= 0; got {value}")
            }
            CapabilityError::DegenerateEnsemble { step, p_yy } => {
                write!(
                    f,
                    "Degenerate ensemble at step {step}: innovation variance is {p_yy}, \
                     cannot form a Kalman gain"
                )
            }
            CapabilityError::NonFiniteLikelihood { step, value } => {
                write!(f, "Log-likelihood contribution at step {step} is non-finite: {value}")
            }
            // ---- Forecasting ----
            CapabilityError::InvalidForecastTime { index, value, last } => {
                write!(
                    f,
                    "Forecast time at index {index} ({value}) must be finite and >= last \
                     observed time {last}"
                )
            }
            // ---- Estimation / optimizer ----
            CapabilityError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
            CapabilityError::ModelNotFitted => write!(f, "Model hasn't been fitted yet."),
            CapabilityError::Param(err) => write!(f, "Invalid parameters: {err}"),
            // ---- statrs distribution errors ----
            CapabilityError::InvalidDistribution { reason } => {
                write!(f, "Normal distribution could not be built: {reason}")
            }
            CapabilityError::UnknownError => write!(f, "An unknown error occurred."),
        }
    }
}

impl From<ParamError> for CapabilityError {
    fn from(err: ParamError) -> CapabilityError {
        CapabilityError::Param(err)
    }
}

impl From<NormalError> for CapabilityError {
    fn from(err: NormalError) -> CapabilityError {
        CapabilityError::InvalidDistribution { reason: err.to_string() }
    }
}

/// Map optimizer errors back into the model's vocabulary.
///
/// Mirror variants (errors that originated in the filter and travelled
/// through Argmin) are restored exactly; everything else becomes
/// [`CapabilityError::OptimizationFailed`].
impl From<OptError> for CapabilityError {
    fn from(err: OptError) -> CapabilityError {
        match err {
            OptError::InvalidEnsembleSize { size } => CapabilityError::InvalidEnsembleSize { size },
            OptError::InvalidTimeStep { value } => CapabilityError::InvalidTimeStep { value },
            OptError::DegenerateEnsemble { step, p_yy } => {
                CapabilityError::DegenerateEnsemble { step, p_yy }
            }
            OptError::NonFiniteLikelihood { step, value } => {
                CapabilityError::NonFiniteLikelihood { step, value }
            }
            OptError::InvalidDistribution { reason } => {
                CapabilityError::InvalidDistribution { reason }
            }
            OptError::NonFiniteParam { name, value } => {
                ParamError::NonFiniteParam { name, value }.into()
            }
            OptError::NegativeScale { name, value } => {
                ParamError::NegativeScale { name, value }.into()
            }
            OptError::OutOfBounds { name, value, lower, upper } => {
                ParamError::OutOfBounds { name, value, lower, upper }.into()
            }
            OptError::InvalidBounds { name, lower, upper } => {
                ParamError::InvalidBounds { name, lower, upper }.into()
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                ParamError::ThetaLengthMismatch { expected, actual }.into()
            }
            OptError::InvalidThetaInput { index, value } => {
                ParamError::InvalidThetaInput { index, value }.into()
            }
            other => CapabilityError::OptimizationFailed { status: other.to_string() },
        }
    }
}

/// Errors specific to parameter construction and validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Parameter must be finite.
    NonFiniteParam { name: &'static str, value: f64 },

    /// Scale parameters (`sigma_omega`, `sigma_nu`, `initial_variance`) must be >= 0.
    NegativeScale { name: &'static str, value: f64 },

    /// Parameter lies outside its box bounds.
    OutOfBounds { name: &'static str, value: f64, lower: f64, upper: f64 },

    /// Bounds must be finite with `lower < upper`.
    InvalidBounds { name: &'static str, lower: f64, upper: f64 },

    /// Theta length mismatch for CapabilityParams.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::NonFiniteParam { name, value } => {
                write!(f, "{name} must be finite, got {value}")
            }
            ParamError::NegativeScale { name, value } => {
                write!(f, "{name} must be >= 0, got {value}")
            }
            ParamError::OutOfBounds { name, value, lower, upper } => {
                write!(f, "{name} = {value} lies outside [{lower}, {upper}]")
            }
            ParamError::InvalidBounds { name, lower, upper } => {
                write!(
                    f,
                    "Bounds for {name} must be finite with lower < upper, got [{lower}, {upper}]"
                )
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::InvalidThetaInput { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
        }
    }
}
