//! Validation helpers for the bound-constrained minimizer.
//!
//! This module centralizes common consistency checks used across the
//! optimizer interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Parameter vectors**: [`validate_params`] rejects non-finite entries
//!   before they reach an objective; [`validate_solution`] ensures a
//!   candidate solution exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks cost outputs for
//!   finiteness.
//!
//! These helpers standardize error reporting by returning domain-specific
//! [`OptError`] variants, making higher-level code more uniform and easier
//! to debug.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::types::{Grad, Params},
};

/// Validate the optional gradient-norm tolerance.
///
/// - Accepts `None` (no stopping rule on gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance (for convergence).
///
/// - Accepts `None` (no stopping rule on cost change).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// Checks:
/// - `grad.len() == dim`
/// - every element is finite (`NaN` or `±∞` are rejected)
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate a parameter vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::ParamsDimMismatch`] if length does not match `dim`.
/// - [`OptError::NonFiniteParam`] with the index/value of the first
///   offending element.
pub fn validate_params(params: &Params, dim: usize) -> OptResult<()> {
    if params.len() != dim {
        return Err(OptError::ParamsDimMismatch { expected: dim, found: params.len() });
    }
    for (index, &value) in params.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::NonFiniteParam { index, value });
        }
    }
    Ok(())
}

/// Validate and unwrap a candidate solution vector.
///
/// Accepts only a present vector with all **finite** entries.
///
/// # Returns
/// The owned `Params` if valid.
///
/// # Errors
/// - [`OptError::MissingSolution`] if no vector was provided.
/// - [`OptError::InvalidSolution`] if any element is non-finite.
pub fn validate_solution(params: Option<Params>) -> OptResult<Params> {
    match params {
        Some(p) => {
            for (index, &value) in p.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidSolution {
                        index,
                        value,
                        reason: "Solution parameters must be finite.",
                    });
                }
            }
            Ok(p)
        }
        None => Err(OptError::MissingSolution),
    }
}

/// Validate that a scalar cost value is finite.
///
/// Negative values are fine as long as they are finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Ensure absent tolerances pass and invalid tolerances are rejected
    // with the matching error variant.
    //
    // Given
    // -----
    // - `None`, a valid tolerance, zero, and NaN.
    //
    // Expect
    // ------
    // - `None` and positive finite values are Ok; zero and NaN fail.
    fn verify_tol_grad_accepts_none_and_rejects_bad_values() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-8)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(verify_tol_grad(Some(f64::NAN)), Err(OptError::InvalidTolGrad { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure gradient validation reports both dimension and finiteness
    // violations.
    //
    // Given
    // -----
    // - A gradient of wrong length and one containing NaN.
    //
    // Expect
    // ------
    // - `GradientDimMismatch` and `InvalidGradient` respectively; a clean
    //   gradient passes.
    fn validate_grad_flags_dim_and_nan() {
        let good = array![1.0, -2.0];
        assert!(validate_grad(&good, 2).is_ok());

        let short = array![1.0];
        assert!(matches!(
            validate_grad(&short, 2),
            Err(OptError::GradientDimMismatch { expected: 2, found: 1 })
        ));

        let nan = array![1.0, f64::NAN];
        assert!(matches!(validate_grad(&nan, 2), Err(OptError::InvalidGradient { index: 1, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure solution unwrapping distinguishes missing from non-finite
    // vectors.
    //
    // Given
    // -----
    // - `None`, a finite vector, and a vector containing infinity.
    //
    // Expect
    // ------
    // - `MissingSolution`, Ok, and `InvalidSolution` respectively.
    fn validate_solution_covers_missing_and_non_finite() {
        assert!(matches!(validate_solution(None), Err(OptError::MissingSolution)));

        let fine = validate_solution(Some(array![0.5, 1.5])).expect("finite vector should pass");
        assert_eq!(fine, array![0.5, 1.5]);

        assert!(matches!(
            validate_solution(Some(array![0.0, f64::INFINITY])),
            Err(OptError::InvalidSolution { index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure parameter validation rejects wrong length and NaN entries.
    //
    // Given
    // -----
    // - Vectors of wrong length and with a NaN entry.
    //
    // Expect
    // ------
    // - `ParamsDimMismatch` and `NonFiniteParam` respectively.
    fn validate_params_flags_dim_and_nan() {
        assert!(validate_params(&array![0.0, 0.0], 2).is_ok());
        assert!(matches!(
            validate_params(&array![0.0], 2),
            Err(OptError::ParamsDimMismatch { expected: 2, found: 1 })
        ));
        assert!(matches!(
            validate_params(&array![f64::NAN, 0.0], 2),
            Err(OptError::NonFiniteParam { index: 0, .. })
        ));
    }
}
