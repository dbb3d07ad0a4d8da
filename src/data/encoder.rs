// ============================================================
// Layer 4 — Feature Encoder
// ============================================================
// Turns raw performance data into numeric columns:
//
//   PartTimeJob / ExtraCurricularActivities
//       "Yes" → 1, "No" → 0, anything else → 0
//       (exact, case-sensitive match: "yes" is 0)
//
//   Gender / Major
//       one indicator column per category, named
//       `{field}_{category}`; the lexicographically first
//       category is the baseline and gets no column
//
//   everything else
//       parsed as f64
//
// Column order of an encoded table: the plain columns in their
// original order, then the Gender indicators, then the Major
// indicators, categories sorted within each block.
//
// Training encodes a whole table, so the baseline is known. A
// single inference record cannot know its baseline, so
// encode_record emits the indicator for whatever category it
// has and leaves it to reconciliation against the trained
// column order to drop the baseline column.

use std::collections::BTreeSet;

use ndarray::Array2;

use crate::data::table::{parse_cell, EncodedRow, FeatureTable, RawTable};
use crate::domain::error::Result;
use crate::domain::records::*;

pub const BINARY_COLUMNS: [&str; 2] = [PART_TIME_JOB, EXTRACURRICULAR_ACTIVITIES];
pub const CATEGORICAL_COLUMNS: [&str; 2] = [GENDER, MAJOR];

/// Encode a Yes/No flag.
pub fn encode_flag(value: &str) -> f64 {
    match value {
        "Yes" => 1.0,
        _ => 0.0,
    }
}

pub fn one_hot_name(field: &str, category: &str) -> String {
    format!("{field}_{category}")
}

/// Whether a column name is an indicator produced by one-hot encoding.
pub fn is_one_hot_column(name: &str) -> bool {
    CATEGORICAL_COLUMNS
        .iter()
        .any(|field| name.strip_prefix(field).is_some_and(|rest| rest.starts_with('_')))
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FeatureEncoder;

impl FeatureEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Encode a full dataset. The target column should already have
    /// been taken out; any other non-numeric column is an error.
    pub fn encode_table(&self, raw: &RawTable) -> Result<FeatureTable> {
        raw.check_shape()?;
        // Plain columns (numeric + binary) keep their original order
        let plain: Vec<usize> = (0..raw.headers.len())
            .filter(|&c| !CATEGORICAL_COLUMNS.contains(&raw.headers[c].as_str()))
            .collect();

        // Categories per categorical field, baseline dropped
        let mut indicators: Vec<(usize, String)> = Vec::new();
        for field in CATEGORICAL_COLUMNS {
            let Some(col) = raw.column_index(field) else {
                tracing::warn!(
                    "'{}' has no '{}' column; no indicators generated",
                    raw.source().display(),
                    field
                );
                continue;
            };
            let categories: BTreeSet<&str> = raw
                .rows
                .iter()
                .map(|row| row[col].as_str())
                .filter(|cell| !cell.is_empty())
                .collect();
            for category in categories.into_iter().skip(1) {
                indicators.push((col, category.to_string()));
            }
        }

        let mut names: Vec<String> = plain.iter().map(|&c| raw.headers[c].clone()).collect();
        names.extend(
            indicators
                .iter()
                .map(|(col, category)| one_hot_name(&raw.headers[*col], category)),
        );

        let mut values = Array2::<f64>::zeros((raw.n_rows(), names.len()));
        for (r, row) in raw.rows.iter().enumerate() {
            for (out, &c) in plain.iter().enumerate() {
                let header = raw.headers[c].as_str();
                values[(r, out)] = if BINARY_COLUMNS.contains(&header) {
                    encode_flag(&row[c])
                } else {
                    parse_cell(raw.source(), header, r, &row[c])?
                };
            }
            for (k, (col, category)) in indicators.iter().enumerate() {
                if row[*col] == *category {
                    values[(r, plain.len() + k)] = 1.0;
                }
            }
        }

        tracing::debug!("Encoded {} rows into {} columns", raw.n_rows(), names.len());
        Ok(FeatureTable { names, values })
    }

    /// Encode one inference record.
    pub fn encode_record(&self, record: &PerformanceRecord) -> EncodedRow {
        let mut row = EncodedRow::new();
        row.insert(STUDY_HOURS_PER_WEEK, record.study_hours_per_week);
        row.insert(ATTENDANCE_RATE, record.attendance_rate);
        row.insert(PART_TIME_JOB, encode_flag(&record.part_time_job));
        row.insert(EXTRACURRICULAR_ACTIVITIES, encode_flag(&record.extracurricular_activities));
        // Unlike a one-row get_dummies(drop_first=True), which drops the
        // only category present and so encodes every record as the
        // baseline, the record's own indicator is kept here. Predictions
        // differ numerically from that encoding for non-baseline categories.
        for (field, category) in [(GENDER, &record.gender), (MAJOR, &record.major)] {
            if !category.is_empty() {
                row.insert(one_hot_name(field, category), 1.0);
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(part_time: &str) -> PerformanceRecord {
        PerformanceRecord {
            study_hours_per_week:       15.0,
            attendance_rate:            88.0,
            gender:                     "Male".into(),
            major:                      "Arts".into(),
            part_time_job:              part_time.into(),
            extracurricular_activities: "No".into(),
        }
    }

    fn raw() -> RawTable {
        let headers = ["StudyHoursPerWeek", "Gender", "PartTimeJob", "Major", "AttendanceRate"];
        let rows = [
            ["10", "Male", "Yes", "Science", "90"],
            ["12", "Female", "No", "Arts", "80"],
            ["8", "Male", "maybe", "Business", "70"],
            ["20", "Female", "Yes", "Science", "95"],
        ];
        RawTable::new(
            "perf.csv",
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect(),
        )
    }

    #[test]
    fn test_flag_is_case_sensitive() {
        assert_eq!(encode_flag("Yes"), 1.0);
        assert_eq!(encode_flag("No"), 0.0);
        assert_eq!(encode_flag("no"), 0.0);
        assert_eq!(encode_flag("yes"), 0.0);
        assert_eq!(encode_flag(""), 0.0);
    }

    #[test]
    fn test_record_flags() {
        let enc = FeatureEncoder::new();
        assert_eq!(enc.encode_record(&record("Yes")).get(PART_TIME_JOB), Some(1.0));
        assert_eq!(enc.encode_record(&record("no")).get(PART_TIME_JOB), Some(0.0));
    }

    #[test]
    fn test_table_column_order_and_baseline_drop() {
        let table = FeatureEncoder::new().encode_table(&raw()).unwrap();
        assert_eq!(
            table.names,
            vec![
                "StudyHoursPerWeek",
                "PartTimeJob",
                "AttendanceRate",
                "Gender_Male",
                "Major_Business",
                "Major_Science",
            ]
        );
        // Row 0: Male, Science, Yes
        assert_eq!(table.values.row(0).to_vec(), vec![10.0, 1.0, 90.0, 1.0, 0.0, 1.0]);
        // Row 1: Female (baseline), Arts (baseline)
        assert_eq!(table.values.row(1).to_vec(), vec![12.0, 0.0, 80.0, 0.0, 0.0, 0.0]);
        // Row 2: "maybe" is not Yes
        assert_eq!(table.values[(2, 1)], 0.0);
    }

    #[test]
    fn test_record_emits_own_category_indicator() {
        let row = FeatureEncoder::new().encode_record(&record("No"));
        assert_eq!(row.get("Gender_Male"), Some(1.0));
        assert_eq!(row.get("Major_Arts"), Some(1.0));
        assert_eq!(row.len(), 6);
    }

    #[test]
    fn test_non_numeric_plain_column_fails() {
        let mut t = raw();
        t.rows[0][4] = "ninety".into();
        assert!(FeatureEncoder::new().encode_table(&t).is_err());
    }

    #[test]
    fn test_one_hot_column_detection() {
        assert!(is_one_hot_column("Gender_Male"));
        assert!(is_one_hot_column("Major_Computer Science"));
        assert!(!is_one_hot_column("AttendanceRate"));
        assert!(!is_one_hot_column("Majority"));
    }
}
