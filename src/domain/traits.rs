// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Seams between the layers:
//
//   DatasetSource — where training rows come from. CsvLoader
//                   is the production implementation; tests
//                   hand the pipeline in-memory tables.
//
//   GpaPredictor  — anything that turns a pair of records into
//                   a GPA. The request handler only sees this
//                   trait, so it can be exercised without any
//                   trained artifacts on disk.

use crate::data::table::RawTable;
use crate::domain::error::Result;
use crate::domain::records::{LifestyleRecord, PerformanceRecord};

// ─── DatasetSource ────────────────────────────────────────────────────────────
pub trait DatasetSource {
    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;

    /// Load the full table.
    fn load(&self) -> Result<RawTable>;
}

/// An already-loaded table is its own source.
impl DatasetSource for RawTable {
    fn describe(&self) -> String {
        self.source.display().to_string()
    }

    fn load(&self) -> Result<RawTable> {
        self.check_shape()?;
        Ok(self.clone())
    }
}

// ─── GpaPredictor ─────────────────────────────────────────────────────────────
pub trait GpaPredictor {
    /// Predict a GPA. The value is neither clamped nor rounded.
    fn predict(&self, lifestyle: &LifestyleRecord, performance: &PerformanceRecord) -> Result<f64>;
}
