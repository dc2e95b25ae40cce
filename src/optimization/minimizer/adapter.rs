//! Adapter that exposes a user [`Objective`] plus [`Bounds`] as an `argmin`
//! problem.
//!
//! The solver backends are unconstrained, so the adapter folds the bounds
//! into the cost as a convex smoothed hinge penalty:
//! `c(x) = f(x) + bounds.penalty(x)`. Analytic gradients (if provided) get
//! the penalty gradient added. If a gradient is not provided, we
//! finite-difference the **penalized** cost, so the penalty is accounted
//! for in that branch too.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    minimizer::{
        bounds::Bounds,
        traits::Objective,
        types::{Cost, Grad, Params},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a user [`Objective`] to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `f(x) + penalty(x)`.
/// - `Gradient::gradient` returns:
///   - `∇f(x)` plus the penalty sub-gradient if the user provides an
///     analytic gradient, or
///   - a finite-difference gradient of the penalized cost.
#[derive(Debug, Clone)]
pub struct BoundedProblem<'a, F: Objective> {
    pub f: &'a F,
    pub bounds: &'a Bounds,
}

impl<'a, F: Objective> CostFunction for BoundedProblem<'a, F> {
    type Param = Params;
    type Output = Cost;

    /// Evaluate the penalized cost `c(x) = f(x) + penalty(x)`.
    ///
    /// - Calls the user's `value(x)` and checks the result is finite.
    /// - Returns `Error(NonFiniteCost)` if the value is not finite.
    ///
    /// # Errors
    /// Propagates any `OptError` from the user’s `value` via `?`.
    fn cost(&self, params: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(params)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output + self.bounds.penalty(params))
    }
}

impl<'a, F: Objective> Gradient for BoundedProblem<'a, F> {
    type Param = Params;
    type Gradient = Grad;

    /// Evaluate the gradient of the penalized cost at `x`.
    ///
    /// Behavior:
    /// - If the user implements `grad(x)`, we validate it and add the bound
    ///   penalty sub-gradient in place.
    /// - Otherwise, we compute a finite-difference gradient of the
    ///   **penalized cost**:
    ///   - Try *central* differences first.
    ///   - If any evaluation of the `cost` closure failed (captured via
    ///     `closure_err`), retry with *forward* differences.
    ///   - Validate the FD gradient; if it fails (e.g., non-finite), retry once
    ///     with *forward* differences and validate again.
    ///
    /// Implementation notes:
    /// - The FD closure must return `f64`, so we can’t use `?` inside it; we capture
    ///   the first error in `closure_err` and return `NaN` from the closure. After
    ///   FD, we turn that captured error back into a real error (or switch to
    ///   forward diff).
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (non-`GradientNotImplemented`).
    /// - Propagates any error raised by cost evaluations performed during FD.
    /// - Returns validation errors if the gradient has wrong dimension or
    ///   non-finite entries.
    fn gradient(&self, params: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = params.len();
        match self.f.grad(params) {
            Ok(mut g) => {
                validate_grad(&g, dim)?;
                self.bounds.add_penalty_grad(params, &mut g);
                Ok(g)
            }
            Err(e) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                match e {
                    OptError::GradientNotImplemented => {
                        let cost_func = |params: &Params| -> f64 {
                            match self.cost(params) {
                                Ok(val) => val,
                                Err(e) => {
                                    let mut slot = closure_err.borrow_mut();
                                    if slot.is_none() {
                                        *slot = Some(e);
                                    }
                                    f64::NAN
                                }
                            }
                        };
                        let mut fd_grad = params.central_diff(&cost_func);
                        if closure_err.borrow().is_some() {
                            fd_grad = run_fd_diff(params, &cost_func, &closure_err)?;
                            return Ok(fd_grad);
                        }
                        match validate_grad(&fd_grad, dim) {
                            Ok(()) => Ok(fd_grad),
                            Err(_) => {
                                fd_grad = run_fd_diff(params, &cost_func, &closure_err)?;
                                Ok(fd_grad)
                            }
                        }
                    }
                    _ => Err(e.into()),
                }
            }
        }
    }
}

impl<'a, F: Objective> BoundedProblem<'a, F> {
    /// Construct a new adapter over a user [`Objective`] and its bounds.
    pub fn new(f: &'a F, bounds: &'a Bounds) -> Self {
        Self { f, bounds }
    }
}

/// Compute a forward-difference gradient of `func` at `params`, with error capture.
///
/// The FD closure can’t return `Result`, so any error raised by `func` is
/// stored into `closure_err` and the closure returns `NaN`. This helper:
/// - clears `closure_err`,
/// - performs `forward_diff`,
/// - if an error was captured, returns it as `Err`,
/// - validates the resulting gradient,
/// - if validation succeeds, returns the gradient as `Ok(grad)`.
///
/// # Errors
/// Returns any error captured during evaluation of `func` inside the FD routine
/// or by validation of the resulting gradient.
fn run_fd_diff<G: Fn(&Params) -> f64>(
    params: &Params, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = params.forward_diff(func);
    let dim = params.len();
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}
