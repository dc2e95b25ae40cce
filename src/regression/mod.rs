//! regression — quantile linear regression on top of the bounded minimizer.
//!
//! Purpose
//! -------
//! Provide the estimator layer: validated training data, the pinball +
//! elastic-net objective, and the public [`QuantileRegression`] surface
//! (configure, `fit`, `predict`, `score`, fitted attributes).
//!
//! Key behaviors
//! -------------
//! - Validate training data once ([`data::DesignData`]) so the objective and
//!   driver can assume consistent shapes and finite entries.
//! - Evaluate the weighted pinball loss with an elastic-net penalty and its
//!   analytic sub-gradient ([`pinball::PinballObjective`]), with
//!   deterministic conventions at the kinks.
//! - Drive the bounded minimizer ([`quantile::QuantileRegression`]): zero
//!   start, per-coefficient non-negativity bounds when requested, backend
//!   and tolerance selection, and a fully overwritten fitted state.
//!
//! Invariants & assumptions
//! ------------------------
//! - Hyperparameters are validated at fit time; configuration is
//!   infallible.
//! - The intercept is never penalized and never bounded; it reports exactly
//!   0.0 when disabled.
//! - Errors bubble up as [`errors::QuantileResult`] /
//!   [`errors::QuantileError`]; minimizer failures arrive wrapped in
//!   [`errors::QuantileError::Optimization`]. No panics in library paths.
//!
//! Downstream usage
//! ----------------
//! - Callers construct a [`QuantileRegression`] via `Default` plus `with_*`
//!   builders, fit it on `ndarray` data, then predict and score. The
//!   minimizer backend is selectable per model via
//!   [`Method`](crate::optimization::minimizer::Method).
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover data validation, hand-computed loss and
//!   gradient values (with a finite-difference cross-check), and the
//!   fit/predict/score contract on tiny noiseless datasets.
//! - Statistical recovery properties (calibration, ridge paths,
//!   non-negativity) live in the integration tests under `tests/`.

pub mod data;
pub mod errors;
pub mod pinball;
pub mod quantile;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{QuantileError, QuantileResult};
pub use self::quantile::{FittedAttributes, QuantileRegression};
