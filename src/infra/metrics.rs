// ============================================================
// Layer 6 — Training Metrics Logger
// ============================================================
// Appends one row per fitted model to a CSV file after every
// successful training run, so the quality of successive
// retrains can be compared.
//
// Output file: {artifacts dir}/training_metrics.csv
//
// Example:
//   run,model,features,train_rows,train_rmse,train_r2,test_rows,test_rmse,test_r2
//   1,lifestyle,6,1600,0.201331,0.552190,400,0.208713,0.541046
//   1,performance,9,400,0.298410,0.401223,100,0.301875,0.388104
//
// `run` increases by one for each training run logged to the file.
// Empty test cells mean the test split was empty.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::domain::error::{PredictorError, Result};
use crate::ml::training::FitReport;

pub const METRICS_FILE: &str = "training_metrics.csv";

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsRow {
    pub run:        u64,
    pub model:      String,
    pub features:   usize,
    pub train_rows: usize,
    pub train_rmse: f64,
    pub train_r2:   f64,
    pub test_rows:  Option<usize>,
    pub test_rmse:  Option<f64>,
    pub test_r2:    Option<f64>,
}

impl MetricsRow {
    pub fn from_report(run: u64, report: &FitReport) -> Self {
        Self {
            run,
            model:      report.model.clone(),
            features:   report.features.len(),
            train_rows: report.train.rows,
            train_rmse: report.train.rmse,
            train_r2:   report.train.r2,
            test_rows:  report.test.map(|m| m.rows),
            test_rmse:  report.test.map(|m| m.rmse),
            test_r2:    report.test.map(|m| m.r2),
        }
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { csv_path: dir.as_ref().join(METRICS_FILE) }
    }

    /// Append every report of one training run under a fresh run number.
    pub fn log_run(&self, reports: &[FitReport]) -> Result<u64> {
        let run = self.last_run()? + 1;
        let is_new = !self.csv_path.exists();

        if let Some(parent) = self.csv_path.parent() {
            fs::create_dir_all(parent).map_err(|e| PredictorError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.csv_path)
            .map_err(|e| PredictorError::io(&self.csv_path, e))?;

        let mut writer = csv::WriterBuilder::new().has_headers(is_new).from_writer(file);
        for report in reports {
            writer.serialize(MetricsRow::from_report(run, report)).map_err(|e| self.csv_err(e))?;
        }
        writer.flush().map_err(|e| PredictorError::io(&self.csv_path, e))?;

        tracing::debug!("Logged training run {} to '{}'", run, self.csv_path.display());
        Ok(run)
    }

    /// Every row logged so far.
    pub fn read_all(&self) -> Result<Vec<MetricsRow>> {
        if !self.csv_path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.csv_path).map_err(|e| self.csv_err(e))?;
        reader
            .deserialize()
            .map(|row| row.map_err(|e| self.csv_err(e)))
            .collect()
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    fn last_run(&self) -> Result<u64> {
        Ok(self.read_all()?.iter().map(|r| r.run).max().unwrap_or(0))
    }

    fn csv_err(&self, source: csv::Error) -> PredictorError {
        PredictorError::Csv { path: self.csv_path.clone(), source }
    }
}
