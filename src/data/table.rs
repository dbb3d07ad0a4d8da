// ============================================================
// Layer 4 — Tables
// ============================================================
// Two shapes of tabular data move through the pipeline:
//
//   RawTable     — CSV cells as strings, exactly as loaded
//   FeatureTable — named numeric columns backed by ndarray,
//                  ready for scaling and fitting
//
// EncodedRow is the single-record counterpart of FeatureTable
// used at inference time, where the column set is not yet
// reconciled with the trained order.

use std::path::{Path, PathBuf};

use ndarray::{Array1, Array2};

use crate::domain::error::{PredictorError, Result};

// ─── RawTable ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Where the rows came from, for error messages.
    pub source:  PathBuf,
    pub headers: Vec<String>,
    pub rows:    Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(source: impl Into<PathBuf>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { source: source.into(), headers, rows }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Remove a column if it exists. Returns whether anything was removed.
    pub fn drop_column(&mut self, name: &str) -> bool {
        self.take_column(name).is_some()
    }

    /// Every row must have exactly one cell per header.
    pub fn check_shape(&self) -> Result<()> {
        let width = self.headers.len();
        match self.rows.iter().position(|row| row.len() != width) {
            None => Ok(()),
            Some(r) => Err(PredictorError::dataset(
                &self.source,
                format!("row {} has {} cells, header has {}", r + 1, self.rows[r].len(), width),
            )),
        }
    }

    /// Remove a column and hand back its cells. A short row yields
    /// an empty cell.
    pub fn take_column(&mut self, name: &str) -> Option<Vec<String>> {
        let idx = self.column_index(name)?;
        self.headers.remove(idx);
        Some(
            self.rows
                .iter_mut()
                .map(|row| if idx < row.len() { row.remove(idx) } else { String::new() })
                .collect(),
        )
    }

    /// Pop the regression target out of the table as numbers.
    pub fn take_target(&mut self, name: &str) -> Result<Array1<f64>> {
        self.check_shape()?;
        let cells = self.take_column(name).ok_or_else(|| PredictorError::MissingTarget {
            column:  name.to_string(),
            dataset: self.source.clone(),
        })?;
        let values = cells
            .iter()
            .enumerate()
            .map(|(row, cell)| parse_cell(&self.source, name, row, cell))
            .collect::<Result<Vec<f64>>>()?;
        Ok(Array1::from(values))
    }

    /// Interpret every remaining column as numeric.
    pub fn to_numeric(&self) -> Result<FeatureTable> {
        self.check_shape()?;
        let mut values = Array2::<f64>::zeros((self.n_rows(), self.headers.len()));
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                values[(r, c)] = parse_cell(&self.source, &self.headers[c], r, cell)?;
            }
        }
        Ok(FeatureTable { names: self.headers.clone(), values })
    }
}

/// Parse one CSV cell. Row numbers in messages are 1-based data rows.
pub fn parse_cell(source: &Path, column: &str, row: usize, cell: &str) -> Result<f64> {
    cell.trim().parse::<f64>().map_err(|_| {
        PredictorError::dataset(
            source,
            format!("row {}, column '{column}': '{cell}' is not a number", row + 1),
        )
    })
}

// ─── FeatureTable ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub names:  Vec<String>,
    /// Shape: [rows, names.len()]
    pub values: Array2<f64>,
}

impl FeatureTable {
    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }
}

// ─── EncodedRow ───────────────────────────────────────────────────────────────
/// One encoded record: ordered (column, value) pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodedRow {
    columns: Vec<(String, f64)>,
}

impl EncodedRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column, replacing an existing value of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.columns.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.columns.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
