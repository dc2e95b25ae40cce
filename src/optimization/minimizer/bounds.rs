//! Box bounds for the minimizer, enforced by a smoothed hinge penalty.
//!
//! Purpose
//! -------
//! Represent per-variable lower/upper bounds and provide the two operations
//! the solver layer needs: a convex penalty term (plus its gradient) added
//! to the objective while the solver runs, and a projection applied to the
//! returned solution so callers always receive a feasible vector.
//!
//! Key behaviors
//! -------------
//! - `penalty(x)` adds `weight · τ · softplus((lᵢ − xᵢ)/τ)` and
//!   `weight · τ · softplus((xᵢ − uᵢ)/τ)` per variable, where τ is the
//!   smoothing width. This is the hinge `weight · max(violation, 0)`
//!   smeared over a band of width ~τ around the bound; infinite bounds
//!   contribute nothing, so an unbounded instance is a true no-op.
//! - `add_penalty_grad` accumulates the penalty gradient in place:
//!   `−weight · σ((lᵢ − xᵢ)/τ)` for the lower side and
//!   `+weight · σ((xᵢ − uᵢ)/τ)` for the upper side, with σ the logistic
//!   function. The gradient is continuous everywhere; on the boundary it
//!   pulls strictly inward with magnitude `weight / 2`, which keeps
//!   line searches off a kink when several variables sit on their bound.
//! - `project` clamps a vector into the box, turning the solver's
//!   near-feasible answer into an exactly feasible one.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower` and `upper` have equal length, contain no NaN, and satisfy
//!   `lowerᵢ ≤ upperᵢ`; `±∞` marks an absent bound.
//! - In the τ → 0 limit the penalty is the exact ℓ1 penalty: for a convex
//!   objective the penalized minimum coincides with the constrained one
//!   whenever `penalty_weight` exceeds the magnitude of every feasible
//!   sub-gradient. With τ > 0 the minimum sits within O(τ·ln(weight))
//!   of the constrained one; the final projection absorbs that slack.
//! - Callers choose the weight from their problem data; the smoothing
//!   width defaults to [`DEFAULT_PENALTY_SMOOTHING`].
use crate::optimization::{
    errors::{OptError, OptResult},
    minimizer::types::{Grad, Params},
};
use ndarray::{Array1, ArrayView1};

/// Penalty weight used when a caller has no problem-specific scale.
pub const DEFAULT_PENALTY_WEIGHT: f64 = 1e4;

/// Width τ of the band over which the hinge penalty is smoothed.
pub const DEFAULT_PENALTY_SMOOTHING: f64 = 1e-3;

/// Per-variable box bounds with a smoothed-hinge penalty.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Array1<f64>,
    upper: Array1<f64>,
    penalty_weight: f64,
    smoothing: f64,
}

impl Bounds {
    /// Construct validated bounds with the default smoothing width.
    ///
    /// # Rules
    /// - `lower` and `upper` must have the same length.
    /// - No entry may be NaN, and `lower[i] <= upper[i]` for every `i`.
    /// - `penalty_weight` must be finite and strictly positive.
    ///
    /// # Errors
    /// - [`OptError::BoundsDimMismatch`] on unequal vector lengths.
    /// - [`OptError::InvalidBound`] for NaN or inverted entries.
    /// - [`OptError::InvalidPenaltyWeight`] for a non-finite or
    ///   non-positive weight.
    pub fn new(lower: Array1<f64>, upper: Array1<f64>, penalty_weight: f64) -> OptResult<Self> {
        if lower.len() != upper.len() {
            return Err(OptError::BoundsDimMismatch { lower: lower.len(), upper: upper.len() });
        }
        for (index, (&lo, &hi)) in lower.iter().zip(upper.iter()).enumerate() {
            if lo.is_nan() || hi.is_nan() {
                return Err(OptError::InvalidBound {
                    index,
                    lower: lo,
                    upper: hi,
                    reason: "Bound entries must not be NaN.",
                });
            }
            if lo > hi {
                return Err(OptError::InvalidBound {
                    index,
                    lower: lo,
                    upper: hi,
                    reason: "Lower bound must not exceed upper bound.",
                });
            }
        }
        if !penalty_weight.is_finite() || penalty_weight <= 0.0 {
            return Err(OptError::InvalidPenaltyWeight {
                weight: penalty_weight,
                reason: "Penalty weight must be finite and positive.",
            });
        }
        Ok(Self { lower, upper, penalty_weight, smoothing: DEFAULT_PENALTY_SMOOTHING })
    }

    /// Override the smoothing width τ.
    ///
    /// Smaller values track the exact hinge more closely but re-sharpen
    /// the transition the smoothing exists to remove.
    ///
    /// # Errors
    /// [`OptError::InvalidPenaltyWeight`] when τ is non-finite or
    /// non-positive.
    pub fn with_smoothing(mut self, smoothing: f64) -> OptResult<Self> {
        if !smoothing.is_finite() || smoothing <= 0.0 {
            return Err(OptError::InvalidPenaltyWeight {
                weight: smoothing,
                reason: "Penalty smoothing width must be finite and positive.",
            });
        }
        self.smoothing = smoothing;
        Ok(self)
    }

    /// Bounds that constrain nothing, for `dim` variables.
    pub fn unbounded(dim: usize) -> Self {
        Self {
            lower: Array1::from_elem(dim, f64::NEG_INFINITY),
            upper: Array1::from_elem(dim, f64::INFINITY),
            penalty_weight: DEFAULT_PENALTY_WEIGHT,
            smoothing: DEFAULT_PENALTY_SMOOTHING,
        }
    }

    /// Number of variables covered by these bounds.
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// True when no variable carries a finite bound.
    pub fn is_unbounded(&self) -> bool {
        self.lower.iter().all(|lo| *lo == f64::NEG_INFINITY)
            && self.upper.iter().all(|hi| *hi == f64::INFINITY)
    }

    /// Lower bounds, `-∞` where absent.
    pub fn lower(&self) -> ArrayView1<'_, f64> {
        self.lower.view()
    }

    /// Upper bounds, `+∞` where absent.
    pub fn upper(&self) -> ArrayView1<'_, f64> {
        self.upper.view()
    }

    /// Check that these bounds cover a parameter vector of length `dim`.
    ///
    /// # Errors
    /// Returns [`OptError::BoundsParamsMismatch`] on a length mismatch.
    pub fn check_dim(&self, dim: usize) -> OptResult<()> {
        if self.dim() != dim {
            return Err(OptError::BoundsParamsMismatch { expected: self.dim(), found: dim });
        }
        Ok(())
    }

    /// Smoothed-hinge penalty value for a parameter vector.
    ///
    /// Deep inside the box the contribution vanishes; deep outside it
    /// approaches `weight · violation`. Points within ~τ of a bound pick
    /// up a small positive value (`weight · τ · ln 2` on the boundary
    /// itself).
    pub fn penalty(&self, params: &Params) -> f64 {
        let w = self.penalty_weight;
        let tau = self.smoothing;
        let mut total = 0.0;
        for ((&value, &lo), &hi) in params.iter().zip(self.lower.iter()).zip(self.upper.iter()) {
            if lo.is_finite() {
                total += w * tau * softplus((lo - value) / tau);
            }
            if hi.is_finite() {
                total += w * tau * softplus((value - hi) / tau);
            }
        }
        total
    }

    /// Accumulate the penalty gradient into `grad` in place.
    ///
    /// Continuous everywhere: `−weight · σ((l − x)/τ)` on the lower side,
    /// `+weight · σ((x − u)/τ)` on the upper side.
    pub fn add_penalty_grad(&self, params: &Params, grad: &mut Grad) {
        let w = self.penalty_weight;
        let tau = self.smoothing;
        for (index, ((&value, &lo), &hi)) in
            params.iter().zip(self.lower.iter()).zip(self.upper.iter()).enumerate()
        {
            if lo.is_finite() {
                grad[index] -= w * sigmoid((lo - value) / tau);
            }
            if hi.is_finite() {
                grad[index] += w * sigmoid((value - hi) / tau);
            }
        }
    }

    /// Clamp a parameter vector into the box.
    pub fn project(&self, mut params: Params) -> Params {
        for (index, value) in params.iter_mut().enumerate() {
            if *value < self.lower[index] {
                *value = self.lower[index];
            } else if *value > self.upper[index] {
                *value = self.upper[index];
            }
        }
        params
    }
}

// ---- Helper Methods ----

/// Numerically stable `ln(1 + eˣ)`.
fn softplus(t: f64) -> f64 {
    if t > 0.0 { t + (-t).exp().ln_1p() } else { t.exp().ln_1p() }
}

/// Logistic function `1 / (1 + e⁻ˣ)`.
fn sigmoid(t: f64) -> f64 {
    1.0 / (1.0 + (-t).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Ensure constructor validation rejects mismatched, NaN, and inverted
    // bounds as well as bad penalty weights and smoothing widths.
    //
    // Given
    // -----
    // - Bound vectors exhibiting each violation in turn.
    //
    // Expect
    // ------
    // - The matching `OptError` variant for each case.
    fn new_rejects_invalid_inputs() {
        assert!(matches!(
            Bounds::new(array![0.0], array![1.0, 2.0], 1.0),
            Err(OptError::BoundsDimMismatch { lower: 1, upper: 2 })
        ));
        assert!(matches!(
            Bounds::new(array![f64::NAN], array![1.0], 1.0),
            Err(OptError::InvalidBound { index: 0, .. })
        ));
        assert!(matches!(
            Bounds::new(array![2.0], array![1.0], 1.0),
            Err(OptError::InvalidBound { index: 0, .. })
        ));
        assert!(matches!(
            Bounds::new(array![0.0], array![1.0], 0.0),
            Err(OptError::InvalidPenaltyWeight { .. })
        ));
        assert!(matches!(
            Bounds::new(array![0.0], array![1.0], 1.0).unwrap().with_smoothing(-1e-3),
            Err(OptError::InvalidPenaltyWeight { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify the penalty vanishes deep inside the box, matches the hinge
    // asymptotically outside it, and smears the transition near the bound.
    //
    // Given
    // -----
    // - Lower bound 0 on both variables, penalty weight 10, default τ.
    //
    // Expect
    // ------
    // - Zero deep inside, `≈ 10 · violation` deep outside, and
    //   `10 · τ · ln 2` exactly on the boundary.
    fn penalty_matches_hinge_away_from_the_band() {
        let bounds =
            Bounds::new(array![0.0, 0.0], array![f64::INFINITY, f64::INFINITY], 10.0).unwrap();

        assert_eq!(bounds.penalty(&array![3.0, 5.0]), 0.0);
        assert_abs_diff_eq!(bounds.penalty(&array![-0.5, 1.0]), 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.penalty(&array![-0.5, -1.0]), 15.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            bounds.penalty(&array![0.0, 3.0]),
            10.0 * DEFAULT_PENALTY_SMOOTHING * 2.0_f64.ln(),
            epsilon = 1e-9
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify the penalty gradient pushes violated variables back toward
    // the box, stays continuous at the bound, and leaves deeply feasible
    // ones untouched.
    //
    // Given
    // -----
    // - A point below its lower bound in the first coordinate, above its
    //   upper bound in the second, and exactly on its bound in the third.
    //
    // Expect
    // ------
    // - Contributions `≈ −weight` and `≈ +weight` for the violations and
    //   exactly `−weight / 2` on the boundary.
    fn add_penalty_grad_matches_violation_sides() {
        let bounds = Bounds::new(array![0.0, f64::NEG_INFINITY, 0.0], array![
            f64::INFINITY,
            1.0,
            f64::INFINITY
        ], 2.0)
        .unwrap();
        let params = array![-1.0, 3.0, 0.0];
        let mut grad = array![0.0, 0.0, 0.0];

        bounds.add_penalty_grad(&params, &mut grad);

        assert_abs_diff_eq!(grad[0], -2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(grad[1], 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(grad[2], -1.0, epsilon = 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Verify projection clamps both sides and that unbounded instances
    // report themselves as such.
    //
    // Given
    // -----
    // - A box `[0, 1]` on one variable and an unbounded instance.
    //
    // Expect
    // ------
    // - Values clamp to the box; `is_unbounded` distinguishes the two.
    fn project_clamps_and_unbounded_reports() {
        let bounds = Bounds::new(array![0.0], array![1.0], 1.0).unwrap();
        assert_eq!(bounds.project(array![-0.5]), array![0.0]);
        assert_eq!(bounds.project(array![1.5]), array![1.0]);
        assert_eq!(bounds.project(array![0.7]), array![0.7]);
        assert!(!bounds.is_unbounded());
        assert!(Bounds::unbounded(3).is_unbounded());
    }

    #[test]
    // Purpose
    // -------
    // Ensure an unbounded instance contributes nothing to cost or
    // gradient, so a free problem is genuinely unpenalized.
    //
    // Given
    // -----
    // - `Bounds::unbounded` and an arbitrary point.
    //
    // Expect
    // ------
    // - Penalty exactly 0.0 and an untouched gradient.
    fn unbounded_penalty_is_a_no_op() {
        let bounds = Bounds::unbounded(2);
        let params = array![-7.0, 3.0];
        let mut grad = array![0.5, -0.5];

        assert_eq!(bounds.penalty(&params), 0.0);
        bounds.add_penalty_grad(&params, &mut grad);
        assert_eq!(grad, array![0.5, -0.5]);
    }
}
