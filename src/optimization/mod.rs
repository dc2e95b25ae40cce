//! optimization — bounded minimizer stack and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting, combining an
//! Argmin-backed bound-constrained minimizer with a single error/result
//! surface. Callers implement an objective, choose a backend and
//! tolerances, and obtain a feasible solution and diagnostics without
//! touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing smooth costs** `f(x)` over
//!   per-variable box bounds (`minimizer`), including configuration of
//!   solver backends, line searches, and stopping criteria.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate on `Array1<f64>` parameter vectors and assume that
//!   inputs are finite once validation has passed; invalid states are
//!   reported as `OptError`, not panics.
//! - Objective implementations are expected to treat domain violations as
//!   recoverable errors surfaced through the optimization layer.
//! - Bounds are the only constraint mechanism; they are enforced by a
//!   smoothed hinge penalty during the solve and by projection of the final
//!   answer, so downstream code can assume returned parameters are feasible.
//!
//! Conventions
//! -----------
//! - All solvers minimize the user cost directly; no sign conventions are
//!   imposed by this layer.
//! - Parameters and gradients are represented using `ndarray`-based aliases
//!   (`Params`, `Grad`, `Hessian`).
//! - Public optimization entrypoints that can fail return `OptResult<T>`;
//!   callers never see raw Argmin errors.
//! - This module and its submodules avoid I/O and logging by default; the
//!   optional `obs_slog` feature attaches a progress observer when callers
//!   opt in via `SolverOptions::verbose`.
//!
//! Downstream usage
//! ----------------
//! - Model code implements `Objective` for its loss and calls `minimize`
//!   with a starting point, bounds, backend choice, and `SolverOptions` to
//!   obtain a `Solution` (via `minimizer`).
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`, which forwards the submodule prelude and
//!   the core error types.
//!
//! Testing notes
//! -------------
//! - Unit tests in the submodules focus on local concerns:
//!   - `minimizer`: solver wiring, tolerance handling, penalty/projection
//!     behavior, and basic minimization on toy problems.
//!   - `errors`: conversions from backend errors into `OptError` and basic
//!     invariants of the error surface.
//! - Higher-level integration tests exercise end-to-end fitting workflows,
//!   verifying that configuration mistakes, numerical problems, and backend
//!   failures all surface as sensible `OptError` values.

pub mod errors;
pub mod minimizer;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use quantreg::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
}
