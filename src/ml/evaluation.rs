// ============================================================
// Layer 5 — Regression Metrics
// ============================================================
// RMSE and R² on a set of predictions. Computed for both the
// training split and the held-out test split after each fit,
// then logged and appended to the metrics CSV.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub rows: usize,
    pub rmse: f64,
    /// NaN when the targets have no variance.
    pub r2:   f64,
    /// Largest absolute residual.
    pub max_abs_error: f64,
}

impl RegressionMetrics {
    /// `None` for an empty split.
    pub fn compute(predicted: &Array1<f64>, actual: &Array1<f64>) -> Option<Self> {
        let rows = actual.len();
        if rows == 0 || predicted.len() != rows {
            return None;
        }
        let residuals = actual - predicted;
        let sse = residuals.mapv(|r| r * r).sum();
        let mean = actual.mean()?;
        let sst = actual.mapv(|a| (a - mean) * (a - mean)).sum();
        let r2 = if sst > 0.0 { 1.0 - sse / sst } else { f64::NAN };
        let max_abs_error = residuals.iter().fold(0.0_f64, |m, r| m.max(r.abs()));

        Some(Self {
            rows,
            rmse: (sse / rows as f64).sqrt(),
            r2,
            max_abs_error,
        })
    }
}
