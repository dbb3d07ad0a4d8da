// ============================================================
// Layer 5 — Standard Scaler
// ============================================================
// Column-wise standardisation: z = (x - mean) / scale, where
// scale is the population standard deviation (ddof = 0).
//
// A column with zero variance gets scale 1.0, so a constant
// column standardises to all zeros instead of NaN.
//
// The scaler remembers the column names it was fitted on. The
// fitted statistics are only ever reused, never refitted, at
// inference time.

use ndarray::{Array1, Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub feature_names: Vec<String>,
    pub means:         Vec<f64>,
    pub scales:        Vec<f64>,
}

impl StandardScaler {
    /// Fit on the training split only.
    pub fn fit(feature_names: Vec<String>, x: &Array2<f64>) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(PredictorError::Training(
                "cannot fit a scaler on zero rows".to_string(),
            ));
        }
        if feature_names.len() != x.ncols() {
            return Err(PredictorError::Training(format!(
                "{} feature names for {} columns",
                feature_names.len(),
                x.ncols()
            )));
        }

        let means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| PredictorError::Training("empty scaler input".to_string()))?;
        let scales = x
            .var_axis(Axis(0), 0.0)
            .mapv(|v| {
                let sd = v.sqrt();
                if sd < 10.0 * f64::EPSILON { 1.0 } else { sd }
            });

        Ok(Self {
            feature_names,
            means: means.to_vec(),
            scales: scales.to_vec(),
        })
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    /// Standardise a matrix whose columns are in `feature_names` order.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.check_width(x.ncols())?;
        let means = Array1::from(self.means.clone());
        let scales = Array1::from(self.scales.clone());
        Ok((x - &means) / &scales)
    }

    /// Standardise a single row.
    pub fn transform_row(&self, row: ArrayView1<f64>) -> Result<Array1<f64>> {
        self.check_width(row.len())?;
        Ok(row
            .iter()
            .zip(self.means.iter().zip(&self.scales))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }

    fn check_width(&self, width: usize) -> Result<()> {
        if width != self.n_features() {
            return Err(PredictorError::EncodingMismatch {
                message: format!(
                    "scaler was fitted on {} columns, got {}",
                    self.n_features(),
                    width
                ),
                columns: self.feature_names.clone(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    #[test]
    fn test_fit_population_statistics() {
        let x = array![[1.0, 10.0], [3.0, 10.0]];
        let s = StandardScaler::fit(names(2), &x).unwrap();
        assert_eq!(s.means, vec![2.0, 10.0]);
        // std of [1, 3] with ddof 0 is 1; constant column falls back to 1
        assert_eq!(s.scales, vec![1.0, 1.0]);
    }

    #[test]
    fn test_transform_centres_and_scales() {
        let x = array![[0.0], [2.0], [4.0]];
        let s = StandardScaler::fit(names(1), &x).unwrap();
        let z = s.transform(&x).unwrap();
        assert!((z.column(0).sum()).abs() < 1e-12);
        let var = z.column(0).mapv(|v| v * v).mean().unwrap();
        assert!((var - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_row_matches_matrix_transform() {
        let x = array![[1.0, 5.0], [2.0, 7.0], [6.0, 9.0]];
        let s = StandardScaler::fit(names(2), &x).unwrap();
        let full = s.transform(&x).unwrap();
        let row = s.transform_row(x.row(2)).unwrap();
        assert_eq!(row, full.row(2).to_owned());
    }

    #[test]
    fn test_width_mismatch_is_encoding_error() {
        let s = StandardScaler::fit(names(2), &array![[1.0, 2.0]]).unwrap();
        let err = s.transform_row(array![1.0].view()).unwrap_err();
        assert!(matches!(err, PredictorError::EncodingMismatch { .. }));
    }

    #[test]
    fn test_zero_rows_rejected() {
        let x = Array2::<f64>::zeros((0, 3));
        assert!(StandardScaler::fit(names(3), &x).is_err());
    }
}
