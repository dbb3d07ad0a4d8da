// ============================================================
// Layer 5 — Performance Model
// ============================================================
// Stage two: academic/demographic features, plus the lifestyle
// model's estimate, → final GPA.
//
// The trained column set depends on which categories appeared
// in the training CSV, so the exact column order is captured at
// training time (FeatureOrder) and persisted. At inference the
// encoded record is reconciled against it:
//
//   1. encode the record
//   2. add Predicted_Lifestyle_GPA
//   3. any trained column the row lacks → 0
//   4. keep only trained columns, in trained order
//   5. scale, then regress
//
// Step 3 silently zero-fills by default. The returned
// ReconciliationReport says exactly what was filled or thrown
// away, and MismatchPolicy::Strict turns a zero-filled
// non-indicator column into an error.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::data::encoder::{is_one_hot_column, FeatureEncoder};
use crate::data::table::{EncodedRow, RawTable};
use crate::domain::error::{PredictorError, Result};
use crate::domain::records::{PerformanceRecord, PREDICTED_LIFESTYLE_GPA};
use crate::ml::regressor::LinearRegressor;
use crate::ml::scaler::StandardScaler;
use crate::ml::training::{fit_standardized, FitReport, TrainingSettings};

pub const MODEL_NAME: &str = "performance";

/// Canonical column order captured at training time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureOrder {
    pub names: Vec<String>,
}

impl FeatureOrder {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// What to do when a trained column is absent from an inference row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Fill with 0 and carry on.
    #[default]
    Lenient,
    /// Fail if a non-indicator column had to be filled.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationReport {
    /// Trained columns the encoded row did not have.
    pub zero_filled: Vec<String>,
    /// Encoded columns the model was not trained on.
    pub discarded:   Vec<String>,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.zero_filled.is_empty() && self.discarded.is_empty()
    }

    /// Zero-filled columns that are not one-hot indicators. Missing
    /// indicators are normal for a single record; anything else
    /// means the inference schema drifted from training.
    pub fn unexpected_gaps(&self) -> Vec<String> {
        self.zero_filled
            .iter()
            .filter(|c| !is_one_hot_column(c))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceArtifact {
    pub regressor:     LinearRegressor,
    pub scaler:        StandardScaler,
    pub feature_order: FeatureOrder,
}

pub fn train(mut raw: RawTable, settings: &TrainingSettings) -> Result<(PerformanceArtifact, FitReport)> {
    tracing::info!("Training performance model from '{}'", raw.source().display());

    raw.drop_column(&settings.id_column);
    let target = raw.take_target(&settings.target_column)?;
    let table = FeatureEncoder::new().encode_table(&raw)?;
    if table.names.is_empty() {
        return Err(PredictorError::dataset(raw.source(), "no feature columns"));
    }

    let feature_order = FeatureOrder::new(table.names.clone());
    tracing::info!("Trained feature order: {:?}", feature_order.names);

    let fitted = fit_standardized(MODEL_NAME, table, target, settings)?;
    Ok((
        PerformanceArtifact {
            regressor: fitted.regressor,
            scaler: fitted.scaler,
            feature_order,
        },
        fitted.report,
    ))
}

/// Align an encoded row to the trained column order.
pub fn reconcile(row: &EncodedRow, order: &FeatureOrder) -> (Array1<f64>, ReconciliationReport) {
    let mut report = ReconciliationReport::default();
    let values = order
        .names
        .iter()
        .map(|name| {
            row.get(name).unwrap_or_else(|| {
                report.zero_filled.push(name.clone());
                0.0
            })
        })
        .collect();
    report.discarded = row
        .names()
        .filter(|n| !order.names.iter().any(|o| o == *n))
        .map(str::to_string)
        .collect();
    (values, report)
}

pub fn predict(
    artifact:       &PerformanceArtifact,
    record:         &PerformanceRecord,
    lifestyle_gpa:  f64,
    policy:         MismatchPolicy,
) -> Result<f64> {
    let mut row = FeatureEncoder::new().encode_record(record);
    row.insert(PREDICTED_LIFESTYLE_GPA, lifestyle_gpa);

    let (values, report) = reconcile(&row, &artifact.feature_order);
    if !report.is_clean() {
        tracing::debug!(
            zero_filled = ?report.zero_filled,
            discarded = ?report.discarded,
            "Reconciled performance row against trained feature order"
        );
    }

    let gaps = report.unexpected_gaps();
    if policy == MismatchPolicy::Strict && !gaps.is_empty() {
        return Err(PredictorError::EncodingMismatch {
            message: format!("inference row lacks trained columns: {}", gaps.join(", ")),
            columns: gaps,
        });
    }

    let scaled = artifact.scaler.transform_row(values.view())?;
    artifact.regressor.predict_row(scaled.view())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perf_csv() -> RawTable {
        let headers = [
            "Student_ID", "StudyHoursPerWeek", "AttendanceRate", "Gender", "Major",
            "PartTimeJob", "ExtraCurricularActivities", "GPA",
        ];
        let genders = ["Female", "Male"];
        let majors = ["Arts", "Business", "Science"];
        let rows = (0..24)
            .map(|i| {
                let hours = 5.0 + (i % 7) as f64 * 3.0;
                let attendance = 60.0 + (i % 5) as f64 * 8.0;
                let major = majors[i % 3];
                let job = if i % 4 == 0 { "Yes" } else { "No" };
                let gpa = 1.0 + 0.05 * hours + 0.01 * attendance
                    + (if major == "Science" { 0.2 } else { 0.0 })
                    - (if job == "Yes" { 0.1 } else { 0.0 });
                vec![
                    i.to_string(),
                    hours.to_string(),
                    attendance.to_string(),
                    genders[(i / 2) % 2].to_string(),
                    major.to_string(),
                    job.to_string(),
                    if i % 2 == 1 { "Yes" } else { "No" }.to_string(),
                    gpa.to_string(),
                ]
            })
            .collect();
        RawTable::new("perf.csv", headers.iter().map(|s| s.to_string()).collect(), rows)
    }

    fn record(major: &str, job: &str) -> PerformanceRecord {
        PerformanceRecord {
            study_hours_per_week:       11.0,
            attendance_rate:            76.0,
            gender:                     "Female".into(),
            major:                      major.into(),
            part_time_job:              job.into(),
            extracurricular_activities: "No".into(),
        }
    }

    fn order(names: &[&str]) -> FeatureOrder {
        FeatureOrder::new(names.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_trained_order_excludes_id_and_target() {
        let (artifact, _) = train(perf_csv(), &TrainingSettings::default()).unwrap();
        assert_eq!(
            artifact.feature_order.names,
            vec![
                "StudyHoursPerWeek",
                "AttendanceRate",
                "PartTimeJob",
                "ExtraCurricularActivities",
                "Gender_Male",
                "Major_Business",
                "Major_Science",
            ]
        );
        assert_eq!(artifact.scaler.feature_names, artifact.feature_order.names);
    }

    #[test]
    fn test_reconcile_zero_fills_and_orders() {
        let mut row = EncodedRow::new();
        row.insert("Major_Arts", 1.0);
        row.insert("AttendanceRate", 90.0);
        row.insert(PREDICTED_LIFESTYLE_GPA, 3.2);
        row.insert("StudyHoursPerWeek", 12.0);

        let (values, report) =
            reconcile(&row, &order(&["StudyHoursPerWeek", "AttendanceRate", "Major_Science"]));

        assert_eq!(values.to_vec(), vec![12.0, 90.0, 0.0]);
        assert_eq!(report.zero_filled, vec!["Major_Science"]);
        assert_eq!(report.discarded, vec!["Major_Arts", PREDICTED_LIFESTYLE_GPA]);
        assert!(report.unexpected_gaps().is_empty());
    }

    #[test]
    fn test_missing_one_hot_column_still_predicts() {
        let (artifact, _) = train(perf_csv(), &TrainingSettings::default()).unwrap();
        // "Arts" is the baseline: no Major_* column of the trained order is present
        let gpa = predict(&artifact, &record("Arts", "No"), 3.0, MismatchPolicy::Strict).unwrap();
        assert!(gpa.is_finite());

        let expected = 1.0 + 0.05 * 11.0 + 0.01 * 76.0;
        assert!((gpa - expected).abs() < 1e-6, "{gpa} vs {expected}");
    }

    #[test]
    fn test_category_indicator_changes_prediction() {
        let (artifact, _) = train(perf_csv(), &TrainingSettings::default()).unwrap();
        let arts = predict(&artifact, &record("Arts", "No"), 3.0, MismatchPolicy::Lenient).unwrap();
        let science = predict(&artifact, &record("Science", "No"), 3.0, MismatchPolicy::Lenient).unwrap();
        let working = predict(&artifact, &record("Arts", "Yes"), 3.0, MismatchPolicy::Lenient).unwrap();
        let lowercase = predict(&artifact, &record("Arts", "yes"), 3.0, MismatchPolicy::Lenient).unwrap();
        assert!((science - arts - 0.2).abs() < 1e-6);
        assert!((working - arts + 0.1).abs() < 1e-6);
        assert_eq!(lowercase, arts);
    }

    #[test]
    fn test_strict_policy_rejects_schema_drift() {
        let (mut artifact, _) = train(perf_csv(), &TrainingSettings::default()).unwrap();
        artifact.feature_order.names[1] = "AttendancePercent".to_string();
        let rec = record("Arts", "No");

        let lenient = predict(&artifact, &rec, 3.0, MismatchPolicy::Lenient);
        assert!(lenient.unwrap().is_finite());

        match predict(&artifact, &rec, 3.0, MismatchPolicy::Strict) {
            Err(PredictorError::EncodingMismatch { columns, .. }) => {
                assert_eq!(columns, vec!["AttendancePercent"]);
            }
            other => panic!("expected EncodingMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_injected_lifestyle_column_is_used_when_trained() {
        let mut raw = perf_csv();
        raw.headers.insert(1, PREDICTED_LIFESTYLE_GPA.to_string());
        for (i, row) in raw.rows.iter_mut().enumerate() {
            row.insert(1, (2.0 + ((i * i) % 11) as f64 * 0.1).to_string());
        }
        let (artifact, _) = train(raw, &TrainingSettings::default()).unwrap();
        assert_eq!(artifact.feature_order.names[0], PREDICTED_LIFESTYLE_GPA);

        let mut row = FeatureEncoder::new().encode_record(&record("Arts", "No"));
        row.insert(PREDICTED_LIFESTYLE_GPA, 3.1);
        let (values, report) = reconcile(&row, &artifact.feature_order);
        assert_eq!(values[0], 3.1);
        assert!(!report.discarded.contains(&PREDICTED_LIFESTYLE_GPA.to_string()));
    }
}
