//! minimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the three solver backends used by
//! the bound-constrained minimizer. These helpers hide Argmin’s generic
//! wiring and apply crate-level options (e.g., tolerances, memory size) so
//! that higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS, BFGS, and DFP solvers with either Hager–Zhang or
//!   More–Thuente line search based on crate-level aliases.
//! - Apply optional gradient and cost-change tolerances from
//!   [`SolverOptions`] via shared configuration helpers. DFP exposes no
//!   cost tolerance of its own, so its builders wrap the solver in
//!   [`CostPlateau`], which supplies the cost-change stopping rule.
//! - Leave the initial parameter vector and maximum iterations to the
//!   runner/executor layer, keeping these builders side-effect free.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers operate on the canonical optimizer numeric types
//!   [`Params`], [`Grad`], and [`Cost`] as defined in [`minimizer::types`].
//! - The L-BFGS memory (`m`) is either provided via `opts.lbfgs_mem` or
//!   defaults to [`DEFAULT_LBFGS_MEM`]; the dense backends ignore it.
//! - Any invalid tolerance passed into Argmin’s
//!   `with_tolerance_grad` / `with_tolerance_cost` is surfaced as an
//!   [`OptError`](crate::optimization::errors::OptError) via the crate’s
//!   `From<Error>` implementations; callers are expected to handle these
//!   with `OptResult`.
use argmin::core::{Error, IterState, KV, Problem, Solver, TerminationReason, TerminationStatus};
use argmin::solver::quasinewton::{BFGS, DFP, LBFGS};

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        traits::SolverOptions,
        types::{
            BfgsHagerZhang, BfgsMoreThuente, Cost, DEFAULT_LBFGS_MEM, DfpHagerZhang,
            DfpMoreThuente, Grad, HagerZhangLS, Hessian, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Params,
        },
    },
};

/// State shape shared by the dense quasi-Newton backends.
type DenseIterState = IterState<Params, Grad, (), Hessian, (), Cost>;

/// Adds a cost-plateau stopping rule to a dense quasi-Newton solver.
///
/// DFP exposes no cost-change tolerance and its gradient-norm rule never
/// fires on objectives whose sub-gradient stays bounded away from zero at
/// the optimum (piecewise-linear losses). Left running, the update divides
/// by a vanishing curvature product `sᵀy` once the iterates stop moving and
/// poisons the inverse Hessian with non-finite entries. The wrapper stops
/// the run as soon as the cost change between iterations drops below
/// `tol_cost` — the executor checks termination before the next iteration,
/// so a degenerate update is never consumed.
#[derive(Clone)]
pub struct CostPlateau<S> {
    inner: S,
    tol_cost: Cost,
}

impl<S> CostPlateau<S> {
    /// Wrap `inner`, stopping once `|prev_cost − cost| < tol_cost`.
    ///
    /// A `tol_cost` of 0.0 disables the plateau rule, leaving the inner
    /// solver's own criteria (and the iteration cap) in charge.
    pub fn new(inner: S, tol_cost: Cost) -> Self {
        Self { inner, tol_cost }
    }
}

impl<O, S> Solver<O, DenseIterState> for CostPlateau<S>
where
    S: Solver<O, DenseIterState>,
{
    const NAME: &'static str = <S as Solver<O, DenseIterState>>::NAME;

    fn init(
        &mut self, problem: &mut Problem<O>, state: DenseIterState,
    ) -> Result<(DenseIterState, Option<KV>), Error> {
        self.inner.init(problem, state)
    }

    fn next_iter(
        &mut self, problem: &mut Problem<O>, state: DenseIterState,
    ) -> Result<(DenseIterState, Option<KV>), Error> {
        self.inner.next_iter(problem, state)
    }

    fn terminate(&mut self, state: &DenseIterState) -> TerminationStatus {
        let status = self.inner.terminate(state);
        if status.terminated() {
            return status;
        }
        if (state.get_prev_cost() - state.get_cost()).abs() < self.tol_cost {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }
        TerminationStatus::NotTerminated
    }
}

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and
/// wires `opts.tols` into the solver.
///
/// # Errors
/// Returns an `OptError` if Argmin rejects any of the tolerance settings.
pub fn build_lbfgs_hager_zhang(opts: &SolverOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// Consults `opts.lbfgs_mem` (falling back to [`DEFAULT_LBFGS_MEM`]) and
/// wires `opts.tols` into the solver.
///
/// # Errors
/// Returns an `OptError` if Argmin rejects any of the tolerance settings.
pub fn build_lbfgs_more_thuente(opts: &SolverOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct dense BFGS with Hager–Zhang line search.
///
/// # Errors
/// Returns an `OptError` if Argmin rejects any of the tolerance settings.
pub fn build_bfgs_hager_zhang(opts: &SolverOptions) -> OptResult<BfgsHagerZhang> {
    configure_bfgs(BfgsHagerZhang::new(HagerZhangLS::new()), opts)
}

/// Construct dense BFGS with More–Thuente line search.
///
/// # Errors
/// Returns an `OptError` if Argmin rejects any of the tolerance settings.
pub fn build_bfgs_more_thuente(opts: &SolverOptions) -> OptResult<BfgsMoreThuente> {
    configure_bfgs(BfgsMoreThuente::new(MoreThuenteLS::new()), opts)
}

/// Construct DFP with Hager–Zhang line search, wrapped in [`CostPlateau`].
///
/// # Errors
/// Returns an `OptError` if Argmin rejects any of the tolerance settings.
pub fn build_dfp_hager_zhang(opts: &SolverOptions) -> OptResult<CostPlateau<DfpHagerZhang>> {
    let dfp = configure_dfp(DfpHagerZhang::new(HagerZhangLS::new()), opts)?;
    Ok(CostPlateau::new(dfp, opts.tols.tol_cost.unwrap_or(0.0)))
}

/// Construct DFP with More–Thuente line search, wrapped in [`CostPlateau`].
///
/// # Errors
/// Returns an `OptError` if Argmin rejects any of the tolerance settings.
pub fn build_dfp_more_thuente(opts: &SolverOptions) -> OptResult<CostPlateau<DfpMoreThuente>> {
    let dfp = configure_dfp(DfpMoreThuente::new(MoreThuenteLS::new()), opts)?;
    Ok(CostPlateau::new(dfp, opts.tols.tol_cost.unwrap_or(0.0)))
}

/// Apply optional tolerances to an L-BFGS solver.
///
/// When a tolerance is `None`, the corresponding `with_tolerance_*` method
/// is not called and Argmin’s defaults remain in effect. This helper does
/// not touch the solver’s initial parameter vector, maximum iteration
/// count, or line-search settings.
///
/// # Errors
/// Returns an `OptError` when `with_tolerance_grad` or
/// `with_tolerance_cost` rejects a tolerance.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Params, Grad, Cost>, opts: &SolverOptions,
) -> OptResult<LBFGS<L, Params, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Apply optional tolerances to a dense BFGS solver.
///
/// # Errors
/// Returns an `OptError` when Argmin rejects a tolerance.
pub fn configure_bfgs<L>(
    mut solver: BFGS<L, Cost>, opts: &SolverOptions,
) -> OptResult<BFGS<L, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// Apply optional tolerances to a DFP solver.
///
/// DFP itself only exposes a gradient tolerance; the cost-change rule is
/// layered on by [`CostPlateau`] in the `build_dfp_*` helpers.
///
/// # Errors
/// Returns an `OptError` when Argmin rejects the gradient tolerance.
pub fn configure_dfp<L>(mut solver: DFP<L, Cost>, opts: &SolverOptions) -> OptResult<DFP<L, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptResult,
        minimizer::{
            adapter::BoundedProblem,
            traits::{LineSearcher, Objective, SolverOptions, Tolerances},
        },
    };
    use argmin::core::State;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic construction of each backend with both line searches.
    // - Propagation of `lbfgs_mem` (Some vs None) into the L-BFGS builders.
    // - Application of gradient and cost tolerances via the configure
    //   helpers.
    // - The `CostPlateau` stopping rule layered onto DFP.
    //
    // They intentionally DO NOT cover:
    // - End-to-end executor behavior (e.g., `run_first_order`), which is
    //   tested in the optimizer runner layer.
    // -------------------------------------------------------------------------

    /// Linear ramp `f(x) = x₀`; only its type matters to the wrapper tests.
    struct Ramp;

    impl Objective for Ramp {
        fn value(&self, params: &Params) -> OptResult<Cost> {
            Ok(params[0])
        }

        fn check(&self, _params: &Params) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, _params: &Params) -> OptResult<Grad> {
            Ok(array![1.0])
        }
    }

    fn plateau_status(
        solver: &mut CostPlateau<DfpMoreThuente>, state: &DenseIterState,
    ) -> TerminationStatus {
        <CostPlateau<DfpMoreThuente> as Solver<BoundedProblem<'_, Ramp>, DenseIterState>>::terminate(
            solver, state,
        )
    }

    fn opts_with_mem(mem: Option<usize>) -> SolverOptions {
        let tols = Tolerances::new(Some(1e-8), Some(1e-12), Some(50))
            .expect("Tolerances should be valid");
        SolverOptions::new(tols, LineSearcher::MoreThuente, false, mem)
            .expect("SolverOptions should be valid")
    }

    #[test]
    // Purpose
    // -------
    // Ensure the L-BFGS builders succeed with and without an explicit
    // history size.
    //
    // Given
    // -----
    // - Valid tolerances; `lbfgs_mem` of `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - Both builders return `Ok(_)` for both line searches.
    fn lbfgs_builders_accept_default_and_explicit_memory() {
        assert!(build_lbfgs_more_thuente(&opts_with_mem(None)).is_ok());
        assert!(build_lbfgs_more_thuente(&opts_with_mem(Some(11))).is_ok());
        assert!(build_lbfgs_hager_zhang(&opts_with_mem(None)).is_ok());
        assert!(build_lbfgs_hager_zhang(&opts_with_mem(Some(11))).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure the dense quasi-Newton builders succeed with valid options.
    //
    // Given
    // -----
    // - Valid tolerances for both line searches.
    //
    // Expect
    // ------
    // - All four dense builders return `Ok(_)`.
    fn dense_builders_succeed_with_valid_tolerances() {
        assert!(build_bfgs_more_thuente(&opts_with_mem(None)).is_ok());
        assert!(build_bfgs_hager_zhang(&opts_with_mem(None)).is_ok());
        assert!(build_dfp_more_thuente(&opts_with_mem(None)).is_ok());
        assert!(build_dfp_hager_zhang(&opts_with_mem(None)).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Ensure the DFP wrapper stops on a cost plateau while the gradient
    // norm is still above tolerance, and keeps running while the cost is
    // moving.
    //
    // Given
    // -----
    // - A DFP solver built with `tol_cost = 1e-12` and a state whose
    //   gradient norm is 1 (far from the gradient rule firing).
    // - One state with a cost change of 1e-13, one with 0.5.
    //
    // Expect
    // ------
    // - `SolverConverged` for the flat state, `NotTerminated` for the
    //   moving one.
    fn cost_plateau_stops_dfp_on_flat_cost() {
        let mut solver = build_dfp_more_thuente(&opts_with_mem(None))
            .expect("DFP builder should succeed with valid tolerances");

        let flat: DenseIterState =
            DenseIterState::new().gradient(array![1.0]).cost(1.0).cost(1.0 + 1e-13);
        assert!(matches!(
            plateau_status(&mut solver, &flat),
            TerminationStatus::Terminated(TerminationReason::SolverConverged)
        ));

        let moving: DenseIterState = DenseIterState::new().gradient(array![1.0]).cost(1.0).cost(0.5);
        assert!(matches!(plateau_status(&mut solver, &moving), TerminationStatus::NotTerminated));
    }

    #[test]
    // Purpose
    // -------
    // Verify `configure_lbfgs` leaves the solver constructible when both
    // gradient and cost tolerances are `None`, relying on Argmin defaults.
    //
    // Given
    // -----
    // - An L-BFGS solver created with `DEFAULT_LBFGS_MEM`.
    // - Options whose `tols` only provide `max_iter`.
    //
    // Expect
    // ------
    // - `configure_lbfgs` returns `Ok(_)`.
    fn configure_lbfgs_respects_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let tols = Tolerances::new(None, None, Some(50)).expect("Tolerances should be valid");
        let opts = SolverOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("SolverOptions should be valid");

        let configured = configure_lbfgs(raw, &opts);

        assert!(configured.is_ok(), "configure_lbfgs should succeed when both tolerances are None");
    }
}
