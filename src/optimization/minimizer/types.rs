//! minimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! bound-constrained minimizer. By defining these in one place, the rest
//! of the optimization code can stay agnostic to `ndarray` and Argmin
//! generics and can more easily evolve if the backend changes.
//!
//! Conventions
//! -----------
//! - `Params` and `Grad` are treated conceptually as column vectors with
//!   length equal to the number of free parameters.
//! - `Hessian` is a dense square matrix with dimension
//!   `params.len() × params.len()`; it holds the inverse-Hessian
//!   approximation carried by the dense quasi-Newton solvers.
//! - `Cost` is always a scalar `f64` in minimization space; the crate
//!   never flips signs between user objectives and solver costs.
//! - The solver aliases pair each backend with a line search using the
//!   common `(Params, Grad, Cost)` numeric shapes.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::{BFGS, DFP, LBFGS},
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector for the minimizer.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the optimizer.
pub type Params = Array1<f64>;

/// Gradient vector matching the shape of [`Params`].
pub type Grad = Array1<f64>;

/// Dense inverse-Hessian approximation used by BFGS and DFP.
///
/// Alias for `ndarray::Array2<f64>`; `n × n` for `n = Params.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value used by the optimizer.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Params, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Params, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Params, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Params, Grad, Cost>;

/// BFGS solver wired to the Hager–Zhang line search.
pub type BfgsHagerZhang = BFGS<HagerZhangLS, Cost>;

/// BFGS solver wired to the More–Thuente line search.
pub type BfgsMoreThuente = BFGS<MoreThuenteLS, Cost>;

/// DFP solver wired to the Hager–Zhang line search.
pub type DfpHagerZhang = DFP<HagerZhangLS, Cost>;

/// DFP solver wired to the More–Thuente line search.
pub type DfpMoreThuente = DFP<MoreThuenteLS, Cost>;
