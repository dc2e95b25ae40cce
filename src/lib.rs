//! quantreg — quantile linear regression with selectable quasi-Newton
//! backends.
//!
//! Purpose
//! -------
//! Serve as the crate root for a small estimator stack: a generic,
//! Argmin-backed bound-constrained minimizer (`optimization`) and a quantile
//! linear regression estimator built on top of it (`regression`), plus pure
//! scoring helpers (`metrics`).
//!
//! Key behaviors
//! -------------
//! - Fit coefficients and an intercept minimizing the weighted pinball
//!   (quantile) loss, optionally with elastic-net regularization and a
//!   non-negativity constraint on the coefficients.
//! - Expose three interchangeable minimizer backends (L-BFGS, BFGS, DFP)
//!   with configurable line searches and tolerances.
//! - Report fitted attributes (`coef`, `intercept`, `n_features_in`) plus
//!   the full solver outcome for diagnostics.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work lives in the inner modules; errors are
//!   surfaced as typed enums (`OptError`, `QuantileError`), never panics.
//! - Returned coefficients always satisfy the requested bounds exactly; the
//!   intercept is never penalized or bounded.
//!
//! Conventions
//! -----------
//! - Data is `ndarray`-based: `Array2<f64>` designs, `Array1<f64>` targets
//!   and weights.
//! - The optimizer minimizes costs directly; the estimator owns all
//!   statistical conventions (pinball branches, `sign(0) = 0`, constant-`y`
//!   R²).
//!
//! Downstream usage
//! ----------------
//! - Typical callers need only [`QuantileRegression`] and, for backend
//!   selection, [`Method`]; power users can implement
//!   [`Objective`](optimization::minimizer::Objective) and call
//!   [`minimize`](optimization::minimizer::minimize) directly.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; end-to-end statistical properties
//!   (recovery, calibration, regularization paths) are exercised in
//!   `tests/integration_quantile_regression.rs`.

pub mod metrics;
pub mod optimization;
pub mod regression;

// ---- Re-exports (primary public surface) ----------------------------------

pub use crate::optimization::minimizer::{Method, Solution, SolverOptions, Tolerances};
pub use crate::regression::{FittedAttributes, QuantileError, QuantileRegression, QuantileResult};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use quantreg::prelude::*;
//
// to import the main crate surface in a single line.

pub mod prelude {
    pub use crate::metrics::{mean_pinball_loss, r_squared};
    pub use crate::optimization::prelude::*;
    pub use crate::regression::{
        FittedAttributes, QuantileError, QuantileRegression, QuantileResult,
    };
}
