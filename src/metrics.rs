//! Scoring helpers for fitted regressors.
//!
//! Pure functions over equal-length target/prediction views. Callers are
//! responsible for shape checks; these helpers only compute.

use ndarray::ArrayView1;

/// Coefficient of determination `R² = 1 − SS_res / SS_tot` against the mean
/// of `y_true`.
///
/// Constant-target convention: when `SS_tot` is zero, the score is 1.0 if
/// the residuals are all zero and 0.0 otherwise.
pub fn r_squared(y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>) -> f64 {
    let n = y_true.len() as f64;
    let mean = y_true.sum() / n;
    let ss_res = y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| (t - p) * (t - p))
        .sum::<f64>();
    let ss_tot = y_true.iter().map(|&t| (t - mean) * (t - mean)).sum::<f64>();
    if ss_tot == 0.0 {
        if ss_res == 0.0 { 1.0 } else { 0.0 }
    } else {
        1.0 - ss_res / ss_tot
    }
}

/// Unweighted mean pinball loss at level `quantile`.
///
/// `ρ_q(r) = q·r` for `r ≥ 0` and `(q − 1)·r` otherwise, averaged over the
/// samples. Useful for comparing quantile fits across levels.
pub fn mean_pinball_loss(
    y_true: ArrayView1<'_, f64>, y_pred: ArrayView1<'_, f64>, quantile: f64,
) -> f64 {
    let n = y_true.len() as f64;
    y_true
        .iter()
        .zip(y_pred.iter())
        .map(|(&t, &p)| {
            let r = t - p;
            if r >= 0.0 { quantile * r } else { (quantile - 1.0) * r }
        })
        .sum::<f64>()
        / n
}
