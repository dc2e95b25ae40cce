//! Validated training-data views for the quantile regression objective.
//!
//! Purpose
//! -------
//! Bundle the design matrix, target, and per-sample weights behind one
//! validated type so the objective and fit driver can assume consistent
//! shapes, finite entries, and a strictly positive weight sum. All checks
//! happen once, at construction; downstream code indexes freely.
//!
//! Key behaviors
//! -------------
//! - `copy_x = true` snapshots the design matrix into an owned,
//!   standard-layout array; `copy_x = false` borrows the caller's storage.
//!   Either way the caller's matrix is never mutated.
//! - Missing sample weights materialize as a uniform weight of 1 per
//!   sample, so the objective has a single weighted code path.
//! - The weight sum is precomputed; construction fails with
//!   [`QuantileError::ZeroWeightSum`] when every weight is zero.
use crate::regression::errors::{QuantileError, QuantileResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, CowArray, Ix1, Ix2};

/// Validated training data for one fit.
///
/// Holds the design matrix (owned or borrowed per `copy_x`), the target,
/// per-sample weights (uniform 1s when the caller passes none), and the
/// precomputed weight sum.
#[derive(Debug, Clone)]
pub struct DesignData<'a> {
    x: CowArray<'a, f64, Ix2>,
    y: ArrayView1<'a, f64>,
    weight: CowArray<'a, f64, Ix1>,
    weight_sum: f64,
}

impl<'a> DesignData<'a> {
    /// Validate and assemble training data.
    ///
    /// # Rules
    /// - `x` must have ≥ 1 sample and ≥ 1 feature; `y` must match the sample
    ///   count; every entry of both must be finite.
    /// - `sample_weight`, when provided, must match the sample count and
    ///   contain only finite, non-negative values with a positive sum.
    ///
    /// # Arguments
    /// - `copy_x`: when `true`, the design matrix is copied into an owned
    ///   standard-layout array; otherwise it is borrowed.
    ///
    /// # Errors
    /// One [`QuantileError`] shape or finiteness variant per rule above,
    /// reporting the first offending index.
    pub fn new(
        x: &'a Array2<f64>, y: &'a Array1<f64>, sample_weight: Option<&'a Array1<f64>>,
        copy_x: bool,
    ) -> QuantileResult<Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();
        if n_samples == 0 {
            return Err(QuantileError::NoSamples);
        }
        if n_features == 0 {
            return Err(QuantileError::NoFeatures);
        }
        if y.len() != n_samples {
            return Err(QuantileError::SampleCountMismatch {
                x_samples: n_samples,
                y_samples: y.len(),
            });
        }
        for ((row, col), &value) in x.indexed_iter() {
            if !value.is_finite() {
                return Err(QuantileError::NonFiniteDesign { row, col, value });
            }
        }
        for (index, &value) in y.iter().enumerate() {
            if !value.is_finite() {
                return Err(QuantileError::NonFiniteTarget { index, value });
            }
        }
        let weight: CowArray<'a, f64, Ix1> = match sample_weight {
            Some(w) => {
                if w.len() != n_samples {
                    return Err(QuantileError::WeightCountMismatch {
                        expected: n_samples,
                        found: w.len(),
                    });
                }
                for (index, &value) in w.iter().enumerate() {
                    if !value.is_finite() || value < 0.0 {
                        return Err(QuantileError::InvalidWeight { index, value });
                    }
                }
                CowArray::from(w.view())
            }
            None => CowArray::from(Array1::ones(n_samples)),
        };
        let weight_sum = weight.sum();
        if weight_sum <= 0.0 {
            return Err(QuantileError::ZeroWeightSum);
        }
        let x = if copy_x {
            CowArray::from(x.as_standard_layout().into_owned())
        } else {
            CowArray::from(x.view())
        };
        Ok(Self { x, y: y.view(), weight, weight_sum })
    }

    /// Number of training samples.
    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    /// Number of feature columns.
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Design matrix view.
    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    /// Target view.
    pub fn y(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }

    /// Per-sample weights (uniform 1s when the caller passed none).
    pub fn weight(&self) -> ArrayView1<'_, f64> {
        self.weight.view()
    }

    /// Precomputed `Σ wᵢ`, guaranteed strictly positive.
    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }

    /// Largest weighted mean absolute column value,
    /// `maxⱼ Σᵢ wᵢ·|xᵢⱼ| / Σᵢ wᵢ`.
    ///
    /// This bounds the magnitude of any feasible pinball-loss sub-gradient
    /// component, which is what the fit driver needs to size an exact
    /// penalty weight that dominates the objective.
    pub fn max_abs_weighted_column_mean(&self) -> f64 {
        let mut max_mean = 0.0;
        for col in self.x.columns() {
            let mean = col
                .iter()
                .zip(self.weight.iter())
                .map(|(&value, &w)| w * value.abs())
                .sum::<f64>()
                / self.weight_sum;
            if mean > max_mean {
                max_mean = mean;
            }
        }
        max_mean
    }
}
