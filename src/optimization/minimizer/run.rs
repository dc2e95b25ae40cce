//! Execution helpers that run an `argmin` solver on a bounded problem and
//! return a crate-friendly [`Solution`].
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        adapter::BoundedProblem,
        bounds::Bounds,
        traits::{Objective, Solution, SolverOptions},
        types::{Grad, Hessian, Params},
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run a first-order `argmin` solver (L-BFGS) on a bounded problem.
///
/// This is the shared runner for both L-BFGS line-search variants. It wires
/// up:
/// - the user objective and its bounds via [`BoundedProblem`],
/// - the chosen `Solver`,
/// - the initial parameter `x0`,
/// - optional observers (behind the `obs_slog` feature),
/// - optional `max_iters`,
///   then executes the solver and converts the result into [`Solution`].
///
/// # Type Parameters
/// - `F`: Your objective type implementing [`Objective`].
/// - `S`: Any `argmin` solver whose `Problem` is `BoundedProblem<'a, F>` and
///   whose `IterState` matches the aliases `Params` (parameters), `Grad`
///   (gradient), and `f64` as the float type, without a Hessian slot.
///
/// # Arguments
/// - `x0`: Initial parameter vector. It is **consumed** and set on the
///   optimizer state via `state.param(x0)`.
/// - `opts`: Optimizer options (tolerances, verbosity, max iters, etc.).
/// - `problem`: A [`BoundedProblem`] wrapping the user's objective and
///   bounds.
/// - `solver`: A fully constructed solver (e.g. from
///   [`build_lbfgs_more_thuente`](crate::optimization::minimizer::builders::build_lbfgs_more_thuente)).
/// - `bounds`: The same bounds used by `problem`; the final parameters are
///   projected onto them before the [`Solution`] is built.
///
/// # Feature flags
/// If the `obs_slog` feature is enabled and `opts.verbose == true`, a
/// terminal slog observer is attached with `ObserverMode::Always` and a
/// one-time pre-iteration line logs the penalized cost at `x0` and, if
/// available, ||grad||.
///
/// # Errors
/// - Propagates any `argmin` runtime error via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates validation errors encountered when constructing
///   [`Solution`].
pub fn run_first_order<'a, F, S>(
    x0: Params, opts: &SolverOptions, problem: BoundedProblem<'a, F>, solver: S, bounds: &Bounds,
) -> OptResult<Solution>
where
    F: Objective,
    S: argmin::core::Solver<
            BoundedProblem<'a, F>,
            argmin::core::IterState<Params, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&x0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(x0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    Solution::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
        bounds,
    )
}

/// Run a dense quasi-Newton `argmin` solver (BFGS or DFP) on a bounded
/// problem.
///
/// Identical to [`run_first_order`] except that the solver's `IterState`
/// carries an inverse-Hessian slot, which is seeded with the identity matrix
/// of the problem dimension before the first iteration.
///
/// # Errors
/// - Propagates any `argmin` runtime error via the crate's
///   `From<argmin::core::Error>` conversion.
/// - Propagates validation errors encountered when constructing
///   [`Solution`].
pub fn run_quasi_newton<'a, F, S>(
    x0: Params, opts: &SolverOptions, problem: BoundedProblem<'a, F>, solver: S, bounds: &Bounds,
) -> OptResult<Solution>
where
    F: Objective,
    S: argmin::core::Solver<
            BoundedProblem<'a, F>,
            argmin::core::IterState<Params, Grad, (), Hessian, (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&x0, &problem)?;
    }
    let dim = x0.len();
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(x0).inv_hessian(Hessian::eye(dim)));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    Solution::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
        bounds,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(x0: &Params, problem: &BoundedProblem<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let c0 = problem.cost(x0)?;
    let g0n = problem.gradient(x0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: cost(x0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
