//! High-level entry point for minimizing a user-provided [`Objective`]
//! subject to box [`Bounds`].
//!
//! This selects a solver backend ([`Method`]) with either Hager–Zhang or
//! More–Thuente line search, wraps the objective in a [`BoundedProblem`]
//! (which folds the bounds into the cost as a smoothed hinge penalty), and
//! delegates the run to the executor helpers in [`run`](super::run).
use crate::optimization::{
    errors::OptResult,
    minimizer::{
        adapter::BoundedProblem,
        bounds::Bounds,
        builders::{
            build_bfgs_hager_zhang, build_bfgs_more_thuente, build_dfp_hager_zhang,
            build_dfp_more_thuente, build_lbfgs_hager_zhang, build_lbfgs_more_thuente,
        },
        run::{run_first_order, run_quasi_newton},
        traits::{LineSearcher, Method, Objective, Solution, SolverOptions},
        types::Params,
    },
};

/// Minimize `f(x)` over the box described by `bounds`.
///
/// # Behavior
/// - Validates the initial guess via `f.check(&x0)` and checks that `bounds`
///   covers a vector of `x0`'s length.
/// - Wraps `(f, bounds)` in a [`BoundedProblem`] exposing the penalized cost
///   `c(x) = f(x) + penalty(x)` to `argmin`.
/// - Builds the requested backend (`LBfgs`, `Bfgs`, or `Dfp`) with the line
///   search chosen in `opts.line_searcher`.
/// - Delegates to the matching runner, which configures the executor
///   (initial params, max iters, optional observers, identity inverse
///   Hessian for the dense backends) and returns a [`Solution`] whose
///   parameters have been projected onto `bounds`.
///
/// # Parameters
/// - `f`: Your problem implementing [`Objective`].
/// - `x0`: Initial parameter vector. Consumed by the executor.
/// - `bounds`: Per-variable box bounds; use [`Bounds::unbounded`] for a free
///   problem.
/// - `method`: Solver backend choice.
/// - `opts`: Optimizer options (tolerances, line search choice, verbosity,
///   L-BFGS memory).
///
/// # Errors
/// - Propagates any error from `f.check` or the bounds dimension check.
/// - Propagates builder errors from `build_*`.
/// - Propagates runtime errors from the executor (e.g., line-search
///   failures).
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use quantreg::optimization::minimizer::{
///     minimize, Bounds, Method, Objective, SolverOptions,
/// };
/// use quantreg::optimization::errors::OptResult;
///
/// struct Sphere;
/// impl Objective for Sphere {
///     fn value(&self, x: &ndarray::Array1<f64>) -> OptResult<f64> {
///         Ok(x.dot(x))
///     }
///     fn check(&self, _: &ndarray::Array1<f64>) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let x0 = array![0.5, -0.3];
/// let bounds = Bounds::unbounded(2);
/// let opts = SolverOptions::default();
///
/// let solution = minimize(&Sphere, x0, &bounds, Method::LBfgs, &opts)?;
/// println!("x̂ = {:?}", solution.params);
/// # Ok::<(), quantreg::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, x0: Params, bounds: &Bounds, method: Method, opts: &SolverOptions,
) -> OptResult<Solution> {
    f.check(&x0)?;
    bounds.check_dim(x0.len())?;
    let problem = BoundedProblem::new(f, bounds);
    match (method, opts.line_searcher) {
        (Method::LBfgs, LineSearcher::MoreThuente) => {
            let solver = build_lbfgs_more_thuente(opts)?;
            run_first_order(x0, opts, problem, solver, bounds)
        }
        (Method::LBfgs, LineSearcher::HagerZhang) => {
            let solver = build_lbfgs_hager_zhang(opts)?;
            run_first_order(x0, opts, problem, solver, bounds)
        }
        (Method::Bfgs, LineSearcher::MoreThuente) => {
            let solver = build_bfgs_more_thuente(opts)?;
            run_quasi_newton(x0, opts, problem, solver, bounds)
        }
        (Method::Bfgs, LineSearcher::HagerZhang) => {
            let solver = build_bfgs_hager_zhang(opts)?;
            run_quasi_newton(x0, opts, problem, solver, bounds)
        }
        (Method::Dfp, LineSearcher::MoreThuente) => {
            let solver = build_dfp_more_thuente(opts)?;
            run_quasi_newton(x0, opts, problem, solver, bounds)
        }
        (Method::Dfp, LineSearcher::HagerZhang) => {
            let solver = build_dfp_hager_zhang(opts)?;
            run_quasi_newton(x0, opts, problem, solver, bounds)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::{OptError, OptResult},
        minimizer::types::{Cost, Grad},
    };
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - End-to-end minimization of a smooth convex problem with each backend.
    // - Bound handling: the constrained minimum lands on the box boundary
    //   and the returned parameters are exactly feasible.
    // - Early failure when `check` rejects the starting point.
    //
    // They intentionally DO NOT cover:
    // - The estimator-level behavior built on top of `minimize`, which is
    //   exercised by the integration tests.
    // -------------------------------------------------------------------------

    /// `f(x) = (x₀ + 1)² + (x₁ − 2)²`, minimum at `(−1, 2)`.
    struct ShiftedSphere;

    impl Objective for ShiftedSphere {
        fn value(&self, params: &Params) -> OptResult<Cost> {
            Ok((params[0] + 1.0).powi(2) + (params[1] - 2.0).powi(2))
        }

        fn check(&self, params: &Params) -> OptResult<()> {
            for (index, &value) in params.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::NonFiniteParam { index, value });
                }
            }
            Ok(())
        }

        fn grad(&self, params: &Params) -> OptResult<Grad> {
            Ok(array![2.0 * (params[0] + 1.0), 2.0 * (params[1] - 2.0)])
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure every backend finds the unconstrained minimum of a smooth
    // convex problem.
    //
    // Given
    // -----
    // - The shifted sphere, unbounded, starting from the origin.
    //
    // Expect
    // ------
    // - Each backend converges to `(−1, 2)` within 1e-4.
    fn all_backends_reach_unconstrained_minimum() {
        let bounds = Bounds::unbounded(2);
        let opts = SolverOptions::default();

        for method in [Method::LBfgs, Method::Bfgs, Method::Dfp] {
            let solution = minimize(&ShiftedSphere, array![0.0, 0.0], &bounds, method, &opts)
                .expect("smooth convex problem should minimize");
            assert_abs_diff_eq!(solution.params[0], -1.0, epsilon = 1e-4);
            assert_abs_diff_eq!(solution.params[1], 2.0, epsilon = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure the smoothed penalty plus projection pins the constrained
    // minimum next to the active bound.
    //
    // Given
    // -----
    // - The shifted sphere with non-negative bounds; the free minimum at
    //   `x₀ = −1` is infeasible.
    //
    // Expect
    // ------
    // - The solution is feasible with `x₀ ≈ 0` (never negative, within the
    //   penalty's smoothing band) and `x₁ ≈ 2`.
    fn bounded_minimum_lands_on_active_bound() {
        let bounds =
            Bounds::new(array![0.0, 0.0], array![f64::INFINITY, f64::INFINITY], 100.0).unwrap();
        let opts = SolverOptions::default();

        let solution =
            minimize(&ShiftedSphere, array![0.5, 0.5], &bounds, Method::LBfgs, &opts)
                .expect("bounded problem should minimize");

        assert!(solution.params[0] >= 0.0);
        assert_abs_diff_eq!(solution.params[0], 0.0, epsilon = 1e-2);
        assert_abs_diff_eq!(solution.params[1], 2.0, epsilon = 1e-2);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a rejected starting point fails before any solver work.
    //
    // Given
    // -----
    // - An initial vector containing NaN.
    //
    // Expect
    // ------
    // - `minimize` returns the objective's `check` error.
    fn check_failure_short_circuits() {
        let bounds = Bounds::unbounded(2);
        let opts = SolverOptions::default();

        let result =
            minimize(&ShiftedSphere, array![f64::NAN, 0.0], &bounds, Method::LBfgs, &opts);

        assert!(matches!(result, Err(OptError::NonFiniteParam { index: 0, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a bounds/parameter dimension mismatch is caught up front.
    //
    // Given
    // -----
    // - Bounds over three variables with a two-dimensional start.
    //
    // Expect
    // ------
    // - `BoundsParamsMismatch` before the solver runs.
    fn dimension_mismatch_is_rejected() {
        let bounds = Bounds::unbounded(3);
        let opts = SolverOptions::default();

        let result = minimize(&ShiftedSphere, array![0.0, 0.0], &bounds, Method::LBfgs, &opts);

        assert!(matches!(result, Err(OptError::BoundsParamsMismatch { expected: 3, found: 2 })));
    }
}
