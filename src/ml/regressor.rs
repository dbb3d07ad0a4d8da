// ============================================================
// Layer 5 — Linear Regressor (ordinary least squares)
// ============================================================
// Fitting is delegated to linfa-linear; what gets persisted is
// just the intercept and the coefficient vector, so an artifact
// does not depend on linfa's internal types.
//
// Columns that are constant in the training data, or that are a
// linear combination of earlier columns (daily hours summing to
// a fixed budget, more indicator columns than rows), make the
// normal equations singular. They are excluded from the fit and
// get a coefficient of 0, keeping the first column of each
// dependent group. If nothing informative is left (e.g. a single
// training row) the model degenerates to predicting the mean
// target.

use linfa::prelude::*;
use linfa_linear::LinearRegression;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, Result};

/// A column whose centred residual, after projecting out the kept
/// columns, is below this fraction of its own norm is dependent.
const RANK_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub intercept:    f64,
    pub coefficients: Vec<f64>,
}

impl LinearRegressor {
    pub fn fit(x: &Array2<f64>, y: &Array1<f64>) -> Result<Self> {
        if x.nrows() == 0 || x.nrows() != y.len() {
            return Err(PredictorError::Training(format!(
                "{} feature rows for {} targets",
                x.nrows(),
                y.len()
            )));
        }

        let informative = independent_columns(x);

        let mut coefficients = vec![0.0; x.ncols()];

        if informative.is_empty() {
            let intercept = y.mean().unwrap_or(0.0);
            tracing::warn!(
                "No varying features in {} training rows; fitting intercept only ({:.4})",
                x.nrows(),
                intercept
            );
            return Ok(Self { intercept, coefficients });
        }

        let records = x.select(Axis(1), &informative);
        let dataset = Dataset::new(records, y.clone());
        let fitted = LinearRegression::new()
            .fit(&dataset)
            .map_err(|e| PredictorError::Training(e.to_string()))?;

        for (slot, &c) in informative.iter().enumerate() {
            coefficients[c] = fitted.params()[slot];
        }
        let intercept = fitted.intercept();

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(PredictorError::Training(
                "least squares produced non-finite coefficients".to_string(),
            ));
        }

        tracing::debug!(
            "OLS fit: {} of {} columns informative, intercept {:.4}",
            informative.len(),
            x.ncols(),
            intercept
        );
        Ok(Self { intercept, coefficients })
    }

    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict one standardised row.
    pub fn predict_row(&self, row: ArrayView1<f64>) -> Result<f64> {
        if row.len() != self.n_features() {
            return Err(PredictorError::EncodingMismatch {
                message: format!(
                    "regressor expects {} features, got {}",
                    self.n_features(),
                    row.len()
                ),
                columns: Vec::new(),
            });
        }
        Ok(self.intercept + row.iter().zip(&self.coefficients).map(|(x, w)| x * w).sum::<f64>())
    }

    /// Predict every row of a standardised matrix.
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        x.rows().into_iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Greedy Gram-Schmidt over the centred columns: keep a column only
/// if it varies and is not spanned by the columns kept before it.
fn independent_columns(x: &Array2<f64>) -> Vec<usize> {
    let mut basis: Vec<Array1<f64>> = Vec::new();
    let mut kept = Vec::new();

    for c in 0..x.ncols() {
        let col = x.column(c);
        let first = col[0];
        if col.iter().all(|v| *v == first) {
            continue;
        }

        let mean = col.sum() / col.len() as f64;
        let mut v = col.mapv(|value| value - mean);
        let norm = v.dot(&v).sqrt();
        // Two passes keep the projection numerically orthogonal
        for _ in 0..2 {
            for q in &basis {
                let p = q.dot(&v);
                v.scaled_add(-p, q);
            }
        }
        let residual = v.dot(&v).sqrt();

        if residual > RANK_TOLERANCE * norm {
            basis.push(v / residual);
            kept.push(c);
        } else {
            tracing::debug!("Column {} is linearly dependent on earlier columns; excluded from fit", c);
        }
    }
    kept
}
