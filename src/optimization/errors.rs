//! Errors for the bound-constrained minimizer (configuration checks,
//! gradient/solution validation, and backend failures).
//!
//! This module defines the optimizer error type, [`OptError`], used across
//! the minimizer facade. Argmin runtime errors are normalized into
//! dedicated wrapper variants via `From<argmin::core::Error>`, so callers
//! never handle raw backend errors.
//!
//! ## Conventions
//! - Validation variants carry the offending value plus a static reason
//!   string.
//! - [`OptError::GradientNotImplemented`] is a control-flow signal, not a
//!   failure: the adapter catches it and switches to finite differences.
//! - `From<argmin::core::Error>` first recovers an [`OptError`] that was
//!   wrapped on its way through the backend, so adapter-raised variants
//!   round-trip unchanged; remaining [`ArgminError`] values map to the
//!   wrapper variants, and anything else falls back to
//!   [`OptError::BackendError`] with the original message preserved.
use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

/// Unified error type for the minimizer facade.
///
/// Covers solver configuration, bounds, gradient/parameter/solution
/// validation, non-finite objective values, and wrapped Argmin backend
/// errors. Implements `Display`/`Error`.
#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- SolverOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// Invalid minimizer method name.
    InvalidMethod {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Bounds ----
    /// Lower and upper bound vectors must share one dimension.
    BoundsDimMismatch {
        lower: usize,
        upper: usize,
    },
    /// Bounds do not match the parameter dimension.
    BoundsParamsMismatch {
        expected: usize,
        found: usize,
    },
    /// A bound entry is NaN or inverted.
    InvalidBound {
        index: usize,
        lower: f64,
        upper: f64,
        reason: &'static str,
    },
    /// Bound penalty weight needs to be positive and finite.
    InvalidPenaltyWeight {
        weight: f64,
        reason: &'static str,
    },

    // ---- Objective ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    /// Parameter vector length does not match the objective dimension.
    ParamsDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Parameter entries fed to the objective must be finite.
    NonFiniteParam {
        index: usize,
        value: f64,
    },

    // ---- Optimizer outcome ----
    /// Solution parameters must be finite.
    InvalidSolution {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// The solver returned no best parameter vector.
    MissingSolution,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- SolverOptions ----
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
            OptError::InvalidMethod { name, reason } => {
                write!(f, "Invalid minimizer method '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Bounds ----
            OptError::BoundsDimMismatch { lower, upper } => {
                write!(f, "Bound dimension mismatch: lower has {lower}, upper has {upper}")
            }
            OptError::BoundsParamsMismatch { expected, found } => {
                write!(f, "Bounds expect dimension {expected}, parameters have {found}")
            }
            OptError::InvalidBound { index, lower, upper, reason } => {
                write!(f, "Invalid bound at index {index}: [{lower}, {upper}]: {reason}")
            }
            OptError::InvalidPenaltyWeight { weight, reason } => {
                write!(f, "Invalid bound penalty weight {weight}: {reason}")
            }

            // ---- Objective ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::ParamsDimMismatch { expected, found } => {
                write!(f, "Parameter dimension mismatch: expected {expected}, found {found}")
            }
            OptError::NonFiniteParam { index, value } => {
                write!(f, "Invalid parameter at index {index}: {value}, must be finite")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidSolution { index, value, reason } => {
                write!(f, "Invalid solution parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingSolution => {
                write!(f, "Missing solution parameters")
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

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // An `OptError` raised inside the adapter travels through argmin as
        // an `anyhow`-wrapped error; recover the original variant first so
        // the crate's own taxonomy survives the round trip.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(opt_err) => match opt_err {
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
