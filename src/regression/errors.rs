//! Errors for quantile regression (hyperparameter validation, data/shape
//! checks, fit-state guards, and propagated minimizer failures).
//!
//! This module defines the estimator error type, [`QuantileError`], used
//! across the public `fit`/`predict`/`score` surface and the internal
//! objective layer. It implements `Display`/`Error` and wraps the optimizer
//! error surface via `From<OptError>`.
//!
//! ## Conventions
//! - **Indices are 0-based.**
//! - Design, target, and weight entries must be **finite**; weights must be
//!   non-negative with a strictly positive sum.
//! - Hyperparameters are validated at fit time, one distinct variant per
//!   offending parameter, so callers can configure freely and learn about
//!   mistakes exactly when they matter.
//! - Minimizer/backend errors are wrapped unchanged in
//!   [`QuantileError::Optimization`].
use crate::optimization::errors::OptError;

/// Result alias for estimator operations that may produce [`QuantileError`].
pub type QuantileResult<T> = Result<T, QuantileError>;

/// Unified error type for quantile regression.
///
/// Covers hyperparameter validation, training-data shape and finiteness
/// checks, fitted-state guards, and wrapped optimizer failures.
#[derive(Debug, Clone, PartialEq)]
pub enum QuantileError {
    // ---- Hyperparameter validation ----
    /// `quantile` must lie in the closed interval [0, 1].
    InvalidQuantile { value: f64 },

    /// `alpha` must be finite and ≥ 0.
    InvalidAlpha { value: f64 },

    /// `l1_ratio` must lie in the closed interval [0, 1].
    InvalidL1Ratio { value: f64 },

    // ---- Input/data validation ----
    /// Training data contains no samples.
    NoSamples,

    /// Design matrix has no feature columns.
    NoFeatures,

    /// Design matrix and target disagree on the number of samples.
    SampleCountMismatch { x_samples: usize, y_samples: usize },

    /// Sample-weight vector length does not match the sample count.
    WeightCountMismatch { expected: usize, found: usize },

    /// A sample weight is negative or non-finite.
    InvalidWeight { index: usize, value: f64 },

    /// All sample weights are zero; the weighted loss is undefined.
    ZeroWeightSum,

    /// A design-matrix entry is NaN/±inf.
    NonFiniteDesign { row: usize, col: usize, value: f64 },

    /// A target entry is NaN/±inf.
    NonFiniteTarget { index: usize, value: f64 },

    // ---- Prediction-time validation ----
    /// Prediction input has a different feature count than the fitted model.
    FeatureCountMismatch { expected: usize, found: usize },

    /// `predict`/`score` called before a successful `fit`.
    NotFitted,

    // ---- Estimation / optimizer ----
    /// Wrapped minimizer failure (configuration, numeric, or backend).
    Optimization(OptError),
}

impl std::error::Error for QuantileError {}

impl std::fmt::Display for QuantileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Hyperparameter validation ----
            QuantileError::InvalidQuantile { value } => {
                write!(f, "Quantile must lie in [0, 1]; got: {value}")
            }
            QuantileError::InvalidAlpha { value } => {
                write!(f, "Regularization strength alpha must be finite and >= 0; got: {value}")
            }
            QuantileError::InvalidL1Ratio { value } => {
                write!(f, "l1_ratio must lie in [0, 1]; got: {value}")
            }
            // ---- Input/data validation ----
            QuantileError::NoSamples => {
                write!(f, "Training data contains no samples.")
            }
            QuantileError::NoFeatures => {
                write!(f, "Design matrix contains no feature columns.")
            }
            QuantileError::SampleCountMismatch { x_samples, y_samples } => {
                write!(
                    f,
                    "Design matrix has {x_samples} samples but target has {y_samples} samples."
                )
            }
            QuantileError::WeightCountMismatch { expected, found } => {
                write!(f, "Expected {expected} sample weights, found {found}.")
            }
            QuantileError::InvalidWeight { index, value } => {
                write!(
                    f,
                    "Sample weight at index {index} must be finite and non-negative; got: {value}"
                )
            }
            QuantileError::ZeroWeightSum => {
                write!(f, "Sample weights sum to zero; the weighted loss is undefined.")
            }
            QuantileError::NonFiniteDesign { row, col, value } => {
                write!(f, "Design entry at ({row}, {col}) is non-finite: {value}")
            }
            QuantileError::NonFiniteTarget { index, value } => {
                write!(f, "Target entry at index {index} is non-finite: {value}")
            }
            // ---- Prediction-time validation ----
            QuantileError::FeatureCountMismatch { expected, found } => {
                write!(
                    f,
                    "Model was fitted with {expected} features but input has {found} features."
                )
            }
            QuantileError::NotFitted => {
                write!(f, "Model has not been fitted yet; call fit first.")
            }
            // ---- Estimation / optimizer ----
            QuantileError::Optimization(inner) => {
                write!(f, "Optimization failed: {inner}")
            }
        }
    }
}

impl From<OptError> for QuantileError {
    /// Wrap a minimizer error without reinterpreting it.
    fn from(err: OptError) -> Self {
        QuantileError::Optimization(err)
    }
}
