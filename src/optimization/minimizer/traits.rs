//! Public API surface for bound-constrained minimization.
//!
//! - [`Objective`]: trait users implement for their problem.
//! - [`Method`]: choice of solver backend (L-BFGS, BFGS, DFP).
//! - [`SolverOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`LineSearcher`]: choice of line search used by every backend.
//! - [`Solution`]: normalized result returned by the high-level `minimize`
//!   API.
//!
//! Convention: the optimizer *minimizes* the user cost `f(x)` directly; no
//! sign flips happen anywhere in this layer. If an analytic gradient is
//! provided, it must be the gradient of `f`.
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::{
        bounds::Bounds,
        types::{Cost, FnEvalMap, Grad, Params},
        validation::{validate_solution, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::TerminationStatus;
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented objective interface.
///
/// The objective closes over its own fixed data (training matrices,
/// hyperparameters, etc.); the optimizer only ever hands it a candidate
/// parameter vector.
///
/// Required:
/// - `value(&Params) -> OptResult<Cost>`: evaluate `f(x)`.
///   - Errors: return a descriptive `OptError` for invalid inputs.
/// - `check(&Params) -> OptResult<()>`: validation hook to reject obviously
///   invalid starting points. Called once before optimization.
///
/// Optional:
/// - `grad(&Params) -> OptResult<Grad>`: analytic gradient `∇f(x)`.
///   If not implemented, robust finite differences are used automatically.
pub trait Objective {
    // Required methods
    fn value(&self, params: &Params) -> OptResult<Cost>;
    fn check(&self, params: &Params) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _params: &Params) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of solver backend for [`minimize`](crate::optimization::minimizer::minimize).
///
/// Variants:
/// - `LBfgs`: limited-memory BFGS (default).
/// - `Bfgs`: dense BFGS with an identity initial inverse Hessian.
/// - `Dfp`: Davidon–Fletcher–Powell, likewise dense.
///
/// All three solve the same bounded problem to comparable quality; exact
/// numerical agreement across backends is not guaranteed.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"lbfgs"`/`"l-bfgs"`, `"bfgs"`, `"dfp"`). Unknown names return
/// `OptError::InvalidMethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    LBfgs,
    Bfgs,
    Dfp,
}

impl FromStr for Method {
    type Err = OptError;

    /// Parse a backend choice from a string (case-insensitive).
    ///
    /// Accepts:
    /// - `"lbfgs"` or `"l-bfgs"`
    /// - `"bfgs"`
    /// - `"dfp"`
    /// - Any case variant (e.g., `"LBFGS"`, `"L-BFGS"`).
    ///
    /// Any other value returns `OptError::InvalidMethod` with a helpful message.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lbfgs" | "l-bfgs" => Ok(Method::LBfgs),
            "bfgs" => Ok(Method::Bfgs),
            "dfp" => Ok(Method::Dfp),
            _ => Err(OptError::InvalidMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'lbfgs', 'bfgs' or 'dfp'.",
            }),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::LBfgs => write!(f, "lbfgs"),
            Method::Bfgs => write!(f, "bfgs"),
            Method::Dfp => write!(f, "dfp"),
        }
    }
}

/// Choice of line search used inside every solver backend.
///
/// Variants:
/// - `MoreThuente`: More–Thuente line search.
/// - `HagerZhang`: Hager–Zhang line search.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    /// Parse a line-search choice from a string (case-insensitive).
    ///
    /// Accepts:
    /// - `"MoreThuente"`
    /// - `"HagerZhang"`
    /// - Any case variant (e.g., `"morethuente"`, `"HAGERZHANG"`).
    ///
    /// Any other value returns `OptError::InvalidLineSearch` with a helpful message.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher` — line-search algorithm used by the
///   solver backends.
/// - `verbose: bool` — if `true`, attaches an observer (behind the
///   `obs_slog` feature) and prints progress.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size; ignored by the
///   dense backends.
///
/// Default:
/// - `tols`: `tol_grad = 1e-8`, `tol_cost = None`, `max_iter = 500`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None` (uses default of 7)
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl SolverOptions {
    /// Create a new set of optimizer options.
    ///
    /// This constructor does not mutate values; validation of numeric fields is
    /// performed inside [`Tolerances::new`].
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::new(Some(1e-8), None, Some(500)).unwrap(),
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `minimize`.
///
/// - `params`: best parameter vector found, projected onto the bounds.
/// - `value`: best penalized cost value reported by the solver (evaluated
///   at the pre-projection point).
/// - `converged`: `true` if the solver reported a terminating status other
///   than `NotTerminated`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
/// - Keys follow argmin’s counters, e.g., cost_count, gradient_count, etc.
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub params: Params,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl Solution {
    /// Build a validated [`Solution`] from raw solver state.
    ///
    /// Performs:
    /// - `params` check via `validate_solution` (present and all finite),
    ///   then projection onto `bounds` so the result is exactly feasible.
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `params` or `value`.
    pub fn new(
        params_opt: Option<Params>, value: f64, converged: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>, bounds: &Bounds,
    ) -> OptResult<Self> {
        let params = bounds.project(validate_solution(params_opt)?);
        validate_value(value)?;
        let status: String;
        let converged = match converged {
            TerminationStatus::NotTerminated => {
                status = "Not terminated".to_string();
                false
            }
            _ => {
                status = format!("{converged:?}");
                true
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { params, value, converged, status, iterations, fn_evals, grad_norm })
    }
}
