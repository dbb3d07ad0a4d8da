// ============================================================
// Layer 5 — Shared Fitting Procedure
// ============================================================
// Both models are fitted the same way once their feature
// matrix exists:
//
//   1. seeded split of row indices (test = ceil(20%))
//   2. fit StandardScaler on the training rows only
//   3. fit OLS on the standardised training rows
//   4. score train and test splits (RMSE, R²)
//
// The test split is never used for fitting.

use ndarray::{Array1, Axis};
use serde::{Deserialize, Serialize};

use crate::data::splitter::split_train_test;
use crate::data::table::FeatureTable;
use crate::domain::error::{PredictorError, Result};
use crate::ml::evaluation::RegressionMetrics;
use crate::ml::regressor::LinearRegressor;
use crate::ml::scaler::StandardScaler;

/// Dataset conventions and split parameters shared by both models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingSettings {
    /// Identifier column dropped before training, if present.
    pub id_column:     String,
    pub target_column: String,
    pub test_fraction: f64,
    pub seed:          u64,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            id_column:     "Student_ID".to_string(),
            target_column: "GPA".to_string(),
            test_fraction: 0.2,
            seed:          42,
        }
    }
}

/// Outcome of fitting one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    pub model:    String,
    pub features: Vec<String>,
    pub train:    RegressionMetrics,
    /// `None` when the test split is empty.
    pub test:     Option<RegressionMetrics>,
}

pub struct FittedModel {
    pub scaler:    StandardScaler,
    pub regressor: LinearRegressor,
    pub report:    FitReport,
}

pub fn fit_standardized(
    model:    &str,
    table:    FeatureTable,
    target:   Array1<f64>,
    settings: &TrainingSettings,
) -> Result<FittedModel> {
    let rows: Vec<usize> = (0..table.n_rows()).collect();
    let (train_idx, test_idx) = split_train_test(rows, settings.test_fraction, settings.seed);

    if train_idx.is_empty() {
        return Err(PredictorError::Training(format!(
            "{model} model: {} rows leave nothing to train on after a {:.0}% test split",
            table.n_rows(),
            settings.test_fraction * 100.0
        )));
    }

    let x_train = table.values.select(Axis(0), &train_idx);
    let y_train = target.select(Axis(0), &train_idx);

    let scaler = StandardScaler::fit(table.names.clone(), &x_train)?;
    let x_train = scaler.transform(&x_train)?;
    let regressor = LinearRegressor::fit(&x_train, &y_train)?;

    let train = RegressionMetrics::compute(&regressor.predict(&x_train)?, &y_train)
        .ok_or_else(|| PredictorError::Training("empty training split".to_string()))?;

    let test = if test_idx.is_empty() {
        None
    } else {
        let x_test = scaler.transform(&table.values.select(Axis(0), &test_idx))?;
        let y_test = target.select(Axis(0), &test_idx);
        RegressionMetrics::compute(&regressor.predict(&x_test)?, &y_test)
    };

    tracing::info!(
        "{} model fitted on {} rows ({} features): train RMSE {:.4}, test RMSE {}",
        model,
        train.rows,
        table.names.len(),
        train.rmse,
        test.map(|m| format!("{:.4}", m.rmse)).unwrap_or_else(|| "n/a".to_string())
    );

    Ok(FittedModel {
        scaler,
        regressor,
        report: FitReport {
            model: model.to_string(),
            features: table.names,
            train,
            test,
        },
    })
}
