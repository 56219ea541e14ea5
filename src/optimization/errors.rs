//! Unified error surface for the optimization layer.
//!
//! [`OptError`] collects optimizer configuration mistakes, gradient and
//! outcome validation failures, argmin backend errors, and mirror variants of
//! the capability-model errors. The mirror variants let a model error raised
//! inside [`LogLikelihood::value`](crate::optimization::loglik_optimizer::LogLikelihood::value)
//! travel through argmin (as an opaque `argmin::core::Error`) and come back
//! out as a typed value that the model layer can map back into
//! [`CapabilityError`].
use argmin::core::{ArgminError, Error};

use crate::capability::errors::{CapabilityError, ParamError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch { expected: usize, found: usize },

    /// Gradient elements need to be finite
    InvalidGradient { index: usize, value: f64, reason: &'static str },

    // ---- MLEOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad { tol: f64, reason: &'static str },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost { tol: f64, reason: &'static str },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter { max_iter: usize, reason: &'static str },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,
    /// Invalid line searcher name.
    InvalidLineSearch { name: String, reason: &'static str },
    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem { mem: usize, reason: &'static str },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost { value: f64 },

    // ---- Optimizer outcome ----
    /// Estimated parameters must be finite.
    InvalidThetaHat { index: usize, value: f64, reason: &'static str },
    /// Theta hat is missing
    MissingThetaHat,

    // ---- Argmin ----
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter { text: String },
    /// Wrapper for argmin::NotImplemented
    NotImplemented { text: String },
    /// Wrapper for argmin::NotInitialized
    NotInitialized { text: String },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated { text: String },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound { text: String },
    /// Wrapper for argmin::PotentialBug
    PotentialBug { text: String },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError { text: String },
    /// Wrapper for other argmin::Error types
    BackendError { text: String },

    // ---- Capability model errors ----
    /// Ensemble must hold at least two particles.
    InvalidEnsembleSize { size: usize },
    /// Propagation step must be finite and non-negative.
    InvalidTimeStep { value: f64 },
    /// Innovation variance collapsed to zero or became non-finite.
    DegenerateEnsemble { step: usize, p_yy: f64 },
    /// Per-step log-density was not finite.
    NonFiniteLikelihood { step: usize, value: f64 },
    /// Normal distribution could not be built.
    InvalidDistribution { reason: String },

    // ---- Param Errors ----
    /// Model parameter must be finite.
    NonFiniteParam { name: &'static str, value: f64 },
    /// Scale parameter must be non-negative.
    NegativeScale { name: &'static str, value: f64 },
    /// Model parameter outside its box.
    OutOfBounds { name: &'static str, value: f64, lower: f64, upper: f64 },
    /// Box bounds must be finite with lower < upper.
    InvalidBounds { name: &'static str, lower: f64, upper: f64 },
    /// Theta length mismatch for CapabilityParams.
    ThetaLengthMismatch { expected: usize, actual: usize },
    /// Unconstrained optimization input must have finite values.
    InvalidThetaInput { index: usize, value: f64 },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Capability model errors ----
            OptError::InvalidEnsembleSize { size } => {
                write!(f, "Ensemble size must be at least 2; got {size}")
            }
            OptError::InvalidTimeStep { value } => {
                write!(f, "Time step must be finite and >= 0; got {value}")
            }
            OptError::DegenerateEnsemble { step, p_yy } => {
                write!(f, "Degenerate ensemble at step {step}: innovation variance {p_yy}")
            }
            OptError::NonFiniteLikelihood { step, value } => {
                write!(f, "Non-finite log-likelihood contribution at step {step}: {value}")
            }
            OptError::InvalidDistribution { reason } => {
                write!(f, "Invalid normal distribution: {reason}")
            }

            // ---- Param Errors ----
            OptError::NonFiniteParam { name, value } => {
                write!(f, "Parameter {name} must be finite; got {value}")
            }
            OptError::NegativeScale { name, value } => {
                write!(f, "Scale parameter {name} must be >= 0; got {value}")
            }
            OptError::OutOfBounds { name, value, lower, upper } => {
                write!(f, "Parameter {name} = {value} lies outside [{lower}, {upper}]")
            }
            OptError::InvalidBounds { name, lower, upper } => {
                write!(
                    f,
                    "Bounds for {name} must be finite with lower < upper; got [{lower}, {upper}]"
                )
            }
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<CapabilityError> for OptError {
    fn from(err: CapabilityError) -> Self {
        match err {
            CapabilityError::InvalidEnsembleSize { size } => OptError::InvalidEnsembleSize { size },
            CapabilityError::InvalidTimeStep { value } => OptError::InvalidTimeStep { value },
            CapabilityError::DegenerateEnsemble { step, p_yy } => {
                OptError::DegenerateEnsemble { step, p_yy }
            }
            CapabilityError::NonFiniteLikelihood { step, value } => {
                OptError::NonFiniteLikelihood { step, value }
            }
            CapabilityError::InvalidDistribution { reason } => {
                OptError::InvalidDistribution { reason }
            }
            CapabilityError::Param(param_err) => param_err.into(),
            _ => OptError::UnknownError,
        }
    }
}

impl From<ParamError> for OptError {
    fn from(err: ParamError) -> Self {
        match err {
            ParamError::NonFiniteParam { name, value } => OptError::NonFiniteParam { name, value },
            ParamError::NegativeScale { name, value } => OptError::NegativeScale { name, value },
            ParamError::OutOfBounds { name, value, lower, upper } => {
                OptError::OutOfBounds { name, value, lower, upper }
            }
            ParamError::InvalidBounds { name, lower, upper } => {
                OptError::InvalidBounds { name, lower, upper }
            }
            ParamError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            ParamError::InvalidThetaInput { index, value } => {
                OptError::InvalidThetaInput { index, value }
            }
        }
    }
}
