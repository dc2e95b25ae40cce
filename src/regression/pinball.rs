//! Pinball (quantile) loss with elastic-net regularization, as an
//! [`Objective`] for the bounded minimizer.
//!
//! The objective closes over a validated [`DesignData`] and evaluates, for a
//! parameter vector of coefficients (plus an optional trailing intercept):
//!
//! ```text
//! L(c, b) = Σᵢ wᵢ · ρ_q(yᵢ − xᵢ·c − b) / Σᵢ wᵢ
//!         + alpha · [ l1_ratio · Σⱼ |cⱼ| + ½ (1 − l1_ratio) · Σⱼ cⱼ² ]
//! ```
//!
//! with `ρ_q(r) = q·r` for `r ≥ 0` and `(q − 1)·r` otherwise. The intercept
//! is never penalized.
//!
//! Sub-gradient conventions (deterministic at the kinks):
//! - a zero residual takes the `r ≥ 0` branch, so its factor is `wᵢ·q`;
//! - `sign(0) = 0` in the ℓ1 term (note `f64::signum(0.0)` is `1.0`, so the
//!   sign is hand-rolled).
use crate::{
    optimization::{
        errors::OptResult,
        minimizer::{
            traits::Objective,
            types::{Cost, Grad, Params},
            validation::validate_params,
        },
    },
    regression::data::DesignData,
};
use ndarray::{Array1, s};

/// Weighted pinball loss plus elastic-net penalty over a fixed dataset.
///
/// The parameter vector is `[c₀, …, c_{p−1}]`, with one trailing intercept
/// scalar appended when `fit_intercept` is set.
#[derive(Debug, Clone)]
pub struct PinballObjective<'a> {
    quantile: f64,
    alpha: f64,
    l1_ratio: f64,
    fit_intercept: bool,
    data: &'a DesignData<'a>,
}

impl<'a> PinballObjective<'a> {
    /// Bind hyperparameters to a validated dataset.
    ///
    /// Hyperparameter range checks happen in the fit driver before this
    /// constructor runs; the objective assumes they hold.
    pub fn new(
        quantile: f64, alpha: f64, l1_ratio: f64, fit_intercept: bool, data: &'a DesignData<'a>,
    ) -> Self {
        Self { quantile, alpha, l1_ratio, fit_intercept, data }
    }

    /// Length of the parameter vector this objective expects.
    pub fn dim(&self) -> usize {
        self.data.n_features() + usize::from(self.fit_intercept)
    }

    /// Residuals `yᵢ − xᵢ·c − b` for a candidate parameter vector.
    fn residuals(&self, params: &Params) -> Array1<f64> {
        let n_features = self.data.n_features();
        let coef = params.slice(s![..n_features]);
        let intercept = if self.fit_intercept { params[n_features] } else { 0.0 };
        let mut residuals = self.data.x().dot(&coef);
        residuals.zip_mut_with(&self.data.y(), |pred, &target| *pred = target - *pred - intercept);
        residuals
    }
}

/// Sign with `sign(0) = 0`, the ℓ1 sub-gradient convention.
fn elastic_sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

impl<'a> Objective for PinballObjective<'a> {
    /// Weighted mean pinball loss plus the elastic-net penalty.
    ///
    /// # Errors
    /// None beyond arithmetic: the dataset and hyperparameters were
    /// validated up front, and the minimizer checks the output for
    /// finiteness.
    fn value(&self, params: &Params) -> OptResult<Cost> {
        let residuals = self.residuals(params);
        let q = self.quantile;
        let mut loss = 0.0;
        for (&r, &w) in residuals.iter().zip(self.data.weight().iter()) {
            loss += if r >= 0.0 { w * q * r } else { w * (q - 1.0) * r };
        }
        loss /= self.data.weight_sum();

        let n_features = self.data.n_features();
        let coef = params.slice(s![..n_features]);
        let l1 = coef.iter().map(|c| c.abs()).sum::<f64>();
        let l2 = coef.iter().map(|c| c * c).sum::<f64>();
        loss += self.alpha * (self.l1_ratio * l1 + 0.5 * (1.0 - self.l1_ratio) * l2);
        Ok(loss)
    }

    /// Validate a candidate parameter vector (length and finiteness).
    ///
    /// # Errors
    /// Propagates the minimizer's parameter-validation variants.
    fn check(&self, params: &Params) -> OptResult<()> {
        validate_params(params, self.dim())?;
        Ok(())
    }

    /// Analytic sub-gradient of the penalized loss.
    ///
    /// Per-sample factor `wᵢ·q` for `rᵢ ≥ 0` (zero residual included), else
    /// `wᵢ·(q − 1)`. The coefficient block is `−Xᵀ·factor / Σw` plus the
    /// elastic-net term; the intercept entry is `−Σ factor / Σw` and carries
    /// no penalty.
    fn grad(&self, params: &Params) -> OptResult<Grad> {
        let residuals = self.residuals(params);
        let q = self.quantile;
        let weight = self.data.weight();
        let weight_sum = self.data.weight_sum();
        let factor = Array1::from_iter(
            residuals
                .iter()
                .zip(weight.iter())
                .map(|(&r, &w)| if r >= 0.0 { w * q } else { w * (q - 1.0) }),
        );

        let n_features = self.data.n_features();
        let coef = params.slice(s![..n_features]);
        let mut grad = Array1::zeros(self.dim());
        let coef_grad = self.data.x().t().dot(&factor);
        for j in 0..n_features {
            grad[j] = -coef_grad[j] / weight_sum
                + self.alpha * self.l1_ratio * elastic_sign(coef[j])
                + self.alpha * (1.0 - self.l1_ratio) * coef[j];
        }
        if self.fit_intercept {
            grad[n_features] = -factor.sum() / weight_sum;
        }
        Ok(grad)
    }
}
