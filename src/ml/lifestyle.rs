// ============================================================
// Layer 5 — Lifestyle Model
// ============================================================
// Stage one of the pipeline: daily-habit features → GPA.
//
// Training: every column of the lifestyle CSV except the
// identifier and the target is a numeric feature. The scaler
// records the column order, and inference builds its row in
// exactly that order by looking fields up by name.

use ndarray::Array1;

use crate::data::table::RawTable;
use crate::domain::error::{PredictorError, Result};
use crate::domain::records::LifestyleRecord;
use crate::ml::regressor::LinearRegressor;
use crate::ml::scaler::StandardScaler;
use crate::ml::training::{fit_standardized, FitReport, TrainingSettings};

pub const MODEL_NAME: &str = "lifestyle";

#[derive(Debug, Clone, PartialEq)]
pub struct LifestyleArtifact {
    pub regressor: LinearRegressor,
    pub scaler:    StandardScaler,
}

pub fn train(mut raw: RawTable, settings: &TrainingSettings) -> Result<(LifestyleArtifact, FitReport)> {
    tracing::info!("Training lifestyle model from '{}'", raw.source().display());

    raw.drop_column(&settings.id_column);
    let target = raw.take_target(&settings.target_column)?;
    let table = raw.to_numeric()?;
    if table.names.is_empty() {
        return Err(PredictorError::dataset(raw.source(), "no feature columns"));
    }

    let fitted = fit_standardized(MODEL_NAME, table, target, settings)?;
    Ok((
        LifestyleArtifact { regressor: fitted.regressor, scaler: fitted.scaler },
        fitted.report,
    ))
}

pub fn predict(artifact: &LifestyleArtifact, record: &LifestyleRecord) -> Result<f64> {
    let mut unknown = Vec::new();
    let row: Array1<f64> = artifact
        .scaler
        .feature_names
        .iter()
        .map(|name| {
            record.value_of(name).unwrap_or_else(|| {
                unknown.push(name.clone());
                0.0
            })
        })
        .collect();

    if !unknown.is_empty() {
        return Err(PredictorError::EncodingMismatch {
            message: format!(
                "lifestyle model was trained on columns a lifestyle record does not provide: {}",
                unknown.join(", ")
            ),
            columns: unknown,
        });
    }

    let scaled = artifact.scaler.transform_row(row.view())?;
    let gpa = artifact.regressor.predict_row(scaled.view())?;
    tracing::debug!("Lifestyle GPA estimate: {:.4}", gpa);
    Ok(gpa)
}
