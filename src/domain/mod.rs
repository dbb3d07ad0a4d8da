// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits that define what the system
// talks about: student records, requests, artifact kinds and
// the error taxonomy.
//
// Rules for this layer:
//   - NO file I/O
//   - NO ndarray / linfa types
//   - Only plain Rust data and traits

/// Lifestyle and performance input records, column names
pub mod records;

/// Inbound request validation and the audit record
pub mod request;

/// The five persisted artifact kinds
pub mod artifact;

/// PredictorError and the crate Result alias
pub mod error;

/// DatasetSource and GpaPredictor seams
pub mod traits;
