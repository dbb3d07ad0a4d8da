// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concerns used by several layers that belong to none of them:
//
//   model_store.rs — Artifact persistence
//                    bincode blobs for the two regressors, two
//                    scalers and the performance feature order.
//                    Writes are staged and published together
//                    under an exclusive lock.
//
//   metrics.rs     — Training metrics logging
//                    Appends per-model RMSE / R² rows to a CSV
//                    file after every training run.

/// Artifact saving, loading and publishing
pub mod model_store;

/// Training metrics CSV logger
pub mod metrics;
