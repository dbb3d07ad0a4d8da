// ============================================================
// Layer 4 — CSV Dataset Loader
// ============================================================
// Reads a training dataset (header row + data rows) into a
// RawTable. No typing happens here: every cell stays a string
// until the model that owns the dataset decides what each
// column means.
//
// Leading/trailing whitespace around cells is trimmed so
// "Yes " and "Yes" encode the same way.

use std::{fs::File, path::PathBuf};

use crate::data::table::RawTable;
use crate::domain::error::{PredictorError, Result};
use crate::domain::traits::DatasetSource;

pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DatasetSource for CsvLoader {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<RawTable> {
        let file = File::open(&self.path).map_err(|e| PredictorError::io(&self.path, e))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let csv_err = |source| PredictorError::Csv { path: self.path.clone(), source };

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_err)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            rows.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        if rows.is_empty() {
            return Err(PredictorError::dataset(&self.path, "no data rows"));
        }

        tracing::debug!(
            "Loaded '{}': {} rows x {} columns",
            self.path.display(),
            rows.len(),
            headers.len()
        );
        Ok(RawTable::new(self.path.clone(), headers, rows))
    }
}
