// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a CSV file on disk and a numeric matrix
// the ML layer can fit:
//
//   CSV file
//       │
//       ▼
//   CsvLoader        → RawTable (string cells)
//       │
//       ▼
//   FeatureEncoder   → FeatureTable (numeric, one-hot expanded)
//       │
//       ▼
//   split_train_test → seeded 80/20 row split
//
// Scaling is NOT done here; scalers belong to the models that
// were fitted with them (Layer 5).

/// Reads dataset CSVs into RawTables
pub mod loader;

/// RawTable, FeatureTable and the single-record EncodedRow
pub mod table;

/// Yes/No flags and one-hot categorical expansion
pub mod encoder;

/// Seeded train/test split
pub mod splitter;
