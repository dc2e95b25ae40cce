//! minimizer — bound-constrained, argmin-powered smooth minimization.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **minimizing
//! smooth (or almost-everywhere smooth) costs** `f(x)` over per-variable box
//! bounds. Callers implement a single trait, [`Objective`], and invoke
//! [`minimize`] with a backend choice, bounds, tolerances, and a line
//! search; finite-difference fallbacks cover objectives without analytic
//! gradients.
//!
//! Key behaviors
//! -------------
//! - Fold box [`Bounds`] into the cost as a convex smoothed hinge penalty via
//!   [`adapter::BoundedProblem`], so the unconstrained Argmin backends can
//!   solve bounded problems; the final answer is projected back onto the
//!   box.
//! - Expose a single, user-facing entrypoint [`minimize`] that:
//!   - validates the initial guess with [`Objective::check`] and the bounds
//!     dimension,
//!   - selects a backend via [`builders`] based on [`traits::Method`] and
//!     [`traits::LineSearcher`],
//!   - executes the solver via [`run`], and
//!   - normalizes results into a [`Solution`].
//! - Fall back to robust finite differences (central, then forward) inside
//!   the adapter when [`Objective::grad`] is not implemented, with post-hoc
//!   validation and error capture.
//! - Centralize optimizer configuration ([`Tolerances`], [`SolverOptions`])
//!   and validation logic ([`validation`]) so downstream code can assume
//!   sane, finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always minimizes** the user cost `f(x)` directly; no
//!   sign flips happen anywhere in this layer.
//! - [`Objective::value`] and [`Objective::grad`] must treat invalid inputs
//!   as recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values, not panics.
//! - Vectors and matrices use the canonical aliases [`Params`], [`Grad`],
//!   [`types::Hessian`]; all are assumed finite whenever optimization
//!   proceeds.
//! - Configuration types ([`Tolerances`], [`SolverOptions`], [`Bounds`])
//!   are validated on construction and treated as internally consistent by
//!   the solver layer.
//!
//! Conventions
//! -----------
//! - Parameters live in the caller's natural space as [`Params`]
//!   (`Array1<f64>`); bounds are the only constraint mechanism and are
//!   handled entirely inside this layer.
//! - Returned [`Solution::params`] are always exactly feasible: the
//!   solver's best point is clamped onto the box before it is handed back.
//! - Errors bubble up as
//!   [`OptResult<T>`](crate::optimization::errors::OptResult); this module
//!   and its children never intentionally panic or use `unsafe`.
//!
//! Downstream usage
//! ----------------
//! - Model code implements [`Objective`] for its loss, then calls
//!   [`minimize`] with:
//!   - a loss instance `&F`,
//!   - an initial parameter vector [`Params`],
//!   - a [`Bounds`] instance (or [`Bounds::unbounded`]), and
//!   - a [`SolverOptions`] configuration plus a [`Method`] choice.
//! - Internal optimizer code:
//!   - uses [`adapter`] to bridge into Argmin,
//!   - uses [`builders`] to construct the backends with the chosen line
//!     search,
//!   - delegates execution to [`run`], and
//!   - relies on [`validation`] for derivative and state checks.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover:
//!   - penalty folding and gradient handling in [`adapter`],
//!   - solver construction and tolerance wiring in [`builders`],
//!   - penalty/projection behavior in [`bounds`] and validation in
//!     [`validation`],
//!   - configuration and solution invariants in [`traits`],
//!   - end-to-end backend behavior on toy problems in [`api`].
//! - Integration tests exercise [`minimize`] through the quantile
//!   regression estimator.

pub mod adapter;
pub mod api;
pub mod bounds;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::bounds::{Bounds, DEFAULT_PENALTY_SMOOTHING, DEFAULT_PENALTY_WEIGHT};
pub use self::traits::{LineSearcher, Method, Objective, Solution, SolverOptions, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Params};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use quantreg::optimization::minimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::minimize;
    pub use super::bounds::Bounds;
    pub use super::traits::{
        LineSearcher, Method, Objective, Solution, SolverOptions, Tolerances,
    };
    pub use super::types::{Cost, Grad, Params};
}
