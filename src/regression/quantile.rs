//! Quantile linear regression estimator.
//!
//! This module wires the pinball + elastic-net objective to the bounded
//! minimizer and exposes the estimator surface: configure hyperparameters,
//! `fit` on a design matrix and target, then `predict` and `score`.
//!
//! Key ideas:
//! - The parameter vector is `[coef…, intercept?]`; the optimizer starts
//!   from zeros and the intercept slot exists only when `fit_intercept` is
//!   set.
//! - `positive = true` becomes a lower bound of 0 on every coefficient
//!   (never on the intercept), enforced by the minimizer's smoothed hinge
//!   penalty plus projection. The penalty weight is sized from the data so
//!   it dominates any feasible sub-gradient of the loss.
//! - Hyperparameters are validated at fit time, so configuration itself
//!   cannot fail.
//! - A refit fully overwrites the fitted state; a failed fit leaves any
//!   prior fitted state untouched.
use crate::{
    metrics::r_squared,
    optimization::minimizer::{
        Bounds, LineSearcher, Method, Solution, SolverOptions, Tolerances, minimize, types::Params,
    },
    regression::{
        data::DesignData,
        errors::{QuantileError, QuantileResult},
        pinball::PinballObjective,
    },
};
use ndarray::{Array1, Array2, ArrayView1, s};

/// Fitted state of a [`QuantileRegression`] (populated after `fit`).
///
/// Holds the coefficient vector, the intercept (exactly 0.0 when the model
/// was configured without one), the training feature count, and the full
/// minimizer [`Solution`] for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedAttributes {
    /// Coefficients, one per feature column.
    pub coef: Array1<f64>,
    /// Intercept; exactly 0.0 when `fit_intercept` is false.
    pub intercept: f64,
    /// Number of features seen during `fit`.
    pub n_features_in: usize,
    /// Raw minimizer outcome (best value, termination, counters).
    pub solution: Solution,
}

/// Linear model minimizing the weighted pinball loss at a chosen quantile,
/// optionally with elastic-net regularization and non-negative
/// coefficients.
///
/// Configuration is builder-style and infallible; all validation happens in
/// [`fit`](QuantileRegression::fit). The default instance estimates the
/// conditional median with no regularization.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use quantreg::regression::QuantileRegression;
///
/// let x = array![[0.0], [1.0], [2.0], [3.0]];
/// let y = array![1.0, 3.0, 5.0, 7.0];
///
/// let mut model = QuantileRegression::default().with_quantile(0.5);
/// model.fit(&x, &y, None)?;
/// let preds = model.predict(&x)?;
/// # Ok::<(), quantreg::regression::errors::QuantileError>(())
/// ```
#[derive(Debug, Clone)]
pub struct QuantileRegression {
    quantile: f64,
    alpha: f64,
    l1_ratio: f64,
    fit_intercept: bool,
    positive: bool,
    copy_x: bool,
    method: Method,
    solver_options: SolverOptions,
    fitted: Option<FittedAttributes>,
}

impl Default for QuantileRegression {
    /// Median regression, no penalty, intercept on, L-BFGS backend.
    ///
    /// The solver defaults add a cost-change stopping rule on top of the
    /// facade's gradient rule: the pinball loss is piecewise linear, so
    /// its sub-gradient norm does not vanish at the optimum and the cost
    /// plateau is the reliable termination signal.
    fn default() -> Self {
        let tols = Tolerances::new(Some(1e-8), Some(1e-10), Some(500))
            .expect("static tolerance defaults are valid");
        let solver_options = SolverOptions::new(tols, LineSearcher::MoreThuente, false, None)
            .expect("static solver defaults are valid");
        Self {
            quantile: 0.5,
            alpha: 0.0,
            l1_ratio: 0.0,
            fit_intercept: true,
            positive: false,
            copy_x: true,
            method: Method::default(),
            solver_options,
            fitted: None,
        }
    }
}

impl QuantileRegression {
    /// Set the target quantile (validated at fit time; must lie in [0, 1]).
    pub fn with_quantile(mut self, quantile: f64) -> Self {
        self.quantile = quantile;
        self
    }

    /// Set the overall regularization strength (validated at fit time;
    /// must be finite and ≥ 0).
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the ℓ1/ℓ2 mix (validated at fit time; must lie in [0, 1];
    /// 0 = pure ridge, 1 = pure lasso).
    pub fn with_l1_ratio(mut self, l1_ratio: f64) -> Self {
        self.l1_ratio = l1_ratio;
        self
    }

    /// Choose whether to estimate an intercept.
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Constrain every coefficient to be non-negative (the intercept stays
    /// free).
    pub fn with_positive(mut self, positive: bool) -> Self {
        self.positive = positive;
        self
    }

    /// Choose whether `fit` snapshots the design matrix or borrows it.
    pub fn with_copy_x(mut self, copy_x: bool) -> Self {
        self.copy_x = copy_x;
        self
    }

    /// Choose the minimizer backend. [`Method`] implements `FromStr`, so
    /// string configuration parses via `"lbfgs".parse()?`.
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Override the minimizer configuration (tolerances, line search,
    /// verbosity, L-BFGS memory).
    pub fn with_solver_options(mut self, solver_options: SolverOptions) -> Self {
        self.solver_options = solver_options;
        self
    }

    /// Fit the model on `(x, y)` with optional per-sample weights.
    ///
    /// ## Steps
    /// 1. Validate hyperparameters, one distinct error per offending
    ///    parameter.
    /// 2. Validate and assemble the training data ([`DesignData`]),
    ///    honoring `copy_x`.
    /// 3. Zero-initialize the parameter vector and build the bounds:
    ///    unbounded, or a lower bound of 0 per coefficient when `positive`
    ///    (the intercept slot is always free) with a data-driven penalty
    ///    weight.
    /// 4. Minimize the pinball + elastic-net objective with the configured
    ///    backend and accept the returned solution as-is; the convergence
    ///    flag is recorded but never triggers a retry.
    /// 5. Overwrite the fitted state with the new coefficients, intercept,
    ///    feature count, and the full [`Solution`].
    ///
    /// ## Returns
    /// `&mut Self` for chaining into `predict`/`score`.
    ///
    /// ## Errors
    /// - Hyperparameter and data validation variants of [`QuantileError`].
    /// - [`QuantileError::Optimization`] wrapping any minimizer failure; in
    ///   that case any previously fitted state is left untouched.
    pub fn fit(
        &mut self, x: &Array2<f64>, y: &Array1<f64>, sample_weight: Option<&Array1<f64>>,
    ) -> QuantileResult<&mut Self> {
        self.validate_hyperparameters()?;
        let data = DesignData::new(x, y, sample_weight, self.copy_x)?;
        let n_features = data.n_features();
        let objective =
            PinballObjective::new(self.quantile, self.alpha, self.l1_ratio, self.fit_intercept, &data);
        let dim = objective.dim();
        let x0: Params = Array1::zeros(dim);
        let bounds = self.build_bounds(&data, dim)?;

        let solution = minimize(&objective, x0, &bounds, self.method, &self.solver_options)?;

        let coef = solution.params.slice(s![..n_features]).to_owned();
        let intercept = if self.fit_intercept { solution.params[n_features] } else { 0.0 };
        self.fitted =
            Some(FittedAttributes { coef, intercept, n_features_in: n_features, solution });
        Ok(self)
    }

    /// Predict targets for a design matrix: `X·coef + intercept`.
    ///
    /// ## Errors
    /// - [`QuantileError::NotFitted`] before a successful `fit`.
    /// - [`QuantileError::FeatureCountMismatch`] when `x` has a different
    ///   column count than the training design.
    pub fn predict(&self, x: &Array2<f64>) -> QuantileResult<Array1<f64>> {
        let fitted = self.fitted.as_ref().ok_or(QuantileError::NotFitted)?;
        if x.ncols() != fitted.n_features_in {
            return Err(QuantileError::FeatureCountMismatch {
                expected: fitted.n_features_in,
                found: x.ncols(),
            });
        }
        Ok(x.dot(&fitted.coef) + fitted.intercept)
    }

    /// Score predictions on `(x, y)` with R² against the mean of `y`.
    ///
    /// Constant targets follow the convention in
    /// [`r_squared`](crate::metrics::r_squared): 1.0 for a perfect fit,
    /// 0.0 otherwise.
    ///
    /// ## Errors
    /// - Everything [`predict`](Self::predict) can raise.
    /// - [`QuantileError::SampleCountMismatch`] when `y` disagrees with `x`
    ///   on the sample count.
    pub fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> QuantileResult<f64> {
        if y.len() != x.nrows() {
            return Err(QuantileError::SampleCountMismatch {
                x_samples: x.nrows(),
                y_samples: y.len(),
            });
        }
        let preds = self.predict(x)?;
        Ok(r_squared(y.view(), preds.view()))
    }

    /// Fitted coefficients.
    ///
    /// ## Errors
    /// [`QuantileError::NotFitted`] before a successful `fit`.
    pub fn coef(&self) -> QuantileResult<ArrayView1<'_, f64>> {
        Ok(self.fitted.as_ref().ok_or(QuantileError::NotFitted)?.coef.view())
    }

    /// Fitted intercept (exactly 0.0 when `fit_intercept` is false).
    ///
    /// ## Errors
    /// [`QuantileError::NotFitted`] before a successful `fit`.
    pub fn intercept(&self) -> QuantileResult<f64> {
        Ok(self.fitted.as_ref().ok_or(QuantileError::NotFitted)?.intercept)
    }

    /// Number of features seen during `fit`.
    ///
    /// ## Errors
    /// [`QuantileError::NotFitted`] before a successful `fit`.
    pub fn n_features_in(&self) -> QuantileResult<usize> {
        Ok(self.fitted.as_ref().ok_or(QuantileError::NotFitted)?.n_features_in)
    }

    /// True after a successful `fit`.
    pub fn is_fitted(&self) -> bool {
        self.fitted.is_some()
    }

    /// Full fitted state including the minimizer [`Solution`], if fitted.
    pub fn fitted(&self) -> Option<&FittedAttributes> {
        self.fitted.as_ref()
    }

    // ---- Helper Methods ----

    fn validate_hyperparameters(&self) -> QuantileResult<()> {
        if !(0.0..=1.0).contains(&self.quantile) {
            return Err(QuantileError::InvalidQuantile { value: self.quantile });
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(QuantileError::InvalidAlpha { value: self.alpha });
        }
        if !(0.0..=1.0).contains(&self.l1_ratio) {
            return Err(QuantileError::InvalidL1Ratio { value: self.l1_ratio });
        }
        Ok(())
    }

    /// Bounds for the parameter vector: free everywhere unless `positive`,
    /// in which case every coefficient gets a lower bound of 0 while the
    /// intercept slot stays unbounded.
    ///
    /// The penalty weight must exceed the magnitude of any feasible
    /// sub-gradient of the objective for the penalized minimum to track
    /// the constrained one (exactly so in the sharp-hinge limit of the
    /// minimizer's smoothed penalty). Per coordinate that magnitude is at
    /// most the weighted mean absolute column value plus the elastic-net
    /// term, so `10 · (1 + alpha + maxⱼ Σ wᵢ|xᵢⱼ|/Σw)` dominates with
    /// margin.
    fn build_bounds(&self, data: &DesignData<'_>, dim: usize) -> QuantileResult<Bounds> {
        if !self.positive {
            return Ok(Bounds::unbounded(dim));
        }
        let n_features = data.n_features();
        let mut lower = Array1::from_elem(dim, f64::NEG_INFINITY);
        lower.slice_mut(s![..n_features]).fill(0.0);
        let upper = Array1::from_elem(dim, f64::INFINITY);
        let penalty_weight = 10.0 * (1.0 + self.alpha + data.max_abs_weighted_column_mean());
        Ok(Bounds::new(lower, upper, penalty_weight)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Hyperparameter validation at fit time.
    // - The fitted-state contract: accessors before/after fit, the
    //   intercept pinned to 0.0 without `fit_intercept`, prediction shape.
    // - Feature-count and sample-count guards on predict/score.
    //
    // They intentionally DO NOT cover:
    // - Statistical recovery properties (noiseless fits, calibration,
    //   ridge paths), which live in the integration tests.
    // -------------------------------------------------------------------------

    fn small_line() -> (Array2<f64>, Array1<f64>) {
        let x = array![[0.0], [1.0], [2.0], [3.0], [4.0]];
        let y = array![1.0, 3.0, 5.0, 7.0, 9.0];
        (x, y)
    }

    #[test]
    // Purpose
    // -------
    // Ensure each hyperparameter violation surfaces its own error at fit
    // time, not at configuration time.
    //
    // Given
    // -----
    // - Models configured with an out-of-range quantile, negative alpha,
    //   and out-of-range l1_ratio.
    //
    // Expect
    // ------
    // - `InvalidQuantile`, `InvalidAlpha`, `InvalidL1Ratio` respectively.
    fn fit_validates_hyperparameters() {
        let (x, y) = small_line();

        let mut bad_quantile = QuantileRegression::default().with_quantile(1.5);
        assert!(matches!(
            bad_quantile.fit(&x, &y, None),
            Err(QuantileError::InvalidQuantile { .. })
        ));

        let mut bad_alpha = QuantileRegression::default().with_alpha(-0.1);
        assert!(matches!(bad_alpha.fit(&x, &y, None), Err(QuantileError::InvalidAlpha { .. })));

        let mut bad_ratio = QuantileRegression::default().with_l1_ratio(2.0);
        assert!(matches!(bad_ratio.fit(&x, &y, None), Err(QuantileError::InvalidL1Ratio { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure the accessors guard on fit state and report fitted values
    // afterwards.
    //
    // Given
    // -----
    // - A noiseless line `y = 2x + 1` fitted at the median.
    //
    // Expect
    // ------
    // - `NotFitted` before; afterwards `coef ≈ 2`, `intercept ≈ 1`,
    //   `n_features_in == 1`, and predictions within 1e-3 of the targets.
    fn fit_populates_state_and_predicts() {
        let (x, y) = small_line();
        let mut model = QuantileRegression::default();

        assert!(matches!(model.coef(), Err(QuantileError::NotFitted)));
        assert!(matches!(model.predict(&x), Err(QuantileError::NotFitted)));
        assert!(!model.is_fitted());

        model.fit(&x, &y, None).expect("noiseless line should fit");

        assert!(model.is_fitted());
        assert_eq!(model.n_features_in().unwrap(), 1);
        assert_abs_diff_eq!(model.coef().unwrap()[0], 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(model.intercept().unwrap(), 1.0, epsilon = 1e-3);

        let preds = model.predict(&x).unwrap();
        assert_eq!(preds.len(), x.nrows());
        for (pred, target) in preds.iter().zip(y.iter()) {
            assert_abs_diff_eq!(pred, target, epsilon = 1e-3);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure `fit_intercept = false` pins the reported intercept to
    // exactly 0.0.
    //
    // Given
    // -----
    // - A line through the origin fitted without an intercept slot.
    //
    // Expect
    // ------
    // - `intercept() == 0.0` bitwise; the slope is still recovered.
    fn no_intercept_is_exactly_zero() {
        let x = array![[1.0], [2.0], [3.0], [4.0]];
        let y = array![3.0, 6.0, 9.0, 12.0];
        let mut model = QuantileRegression::default().with_fit_intercept(false);

        model.fit(&x, &y, None).expect("origin line should fit");

        assert_eq!(model.intercept().unwrap(), 0.0);
        assert_abs_diff_eq!(model.coef().unwrap()[0], 3.0, epsilon = 1e-3);
    }

    #[test]
    // Purpose
    // -------
    // Ensure predict/score reject shape mismatches after fitting.
    //
    // Given
    // -----
    // - A model fitted on one feature, queried with two features and a
    //   short target.
    //
    // Expect
    // ------
    // - `FeatureCountMismatch` and `SampleCountMismatch` respectively.
    fn predict_and_score_guard_shapes() {
        let (x, y) = small_line();
        let mut model = QuantileRegression::default();
        model.fit(&x, &y, None).expect("noiseless line should fit");

        let wide = array![[1.0, 2.0]];
        assert!(matches!(
            model.predict(&wide),
            Err(QuantileError::FeatureCountMismatch { expected: 1, found: 2 })
        ));

        let short_y = array![1.0, 2.0];
        assert!(matches!(
            model.score(&x, &short_y),
            Err(QuantileError::SampleCountMismatch { x_samples: 5, y_samples: 2 })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a failed refit leaves the previous fitted state untouched.
    //
    // Given
    // -----
    // - A fitted model refitted with a non-finite design entry.
    //
    // Expect
    // ------
    // - The refit errors and the original coefficients still predict.
    fn failed_refit_preserves_state() {
        let (x, y) = small_line();
        let mut model = QuantileRegression::default();
        model.fit(&x, &y, None).expect("noiseless line should fit");
        let coef_before = model.coef().unwrap().to_owned();

        let bad_x = array![[f64::NAN], [1.0], [2.0], [3.0], [4.0]];
        assert!(matches!(
            model.fit(&bad_x, &y, None),
            Err(QuantileError::NonFiniteDesign { row: 0, col: 0, .. })
        ));

        assert_eq!(model.coef().unwrap(), coef_before.view());
    }
}
