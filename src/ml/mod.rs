// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All numeric modelling lives here. linfa and the ndarray math
// are confined to this layer; callers deal in records, tables
// and artifacts.
//
//   scaler.rs      — StandardScaler (mean / population std)
//   regressor.rs   — OLS LinearRegressor fitted through linfa
//   training.rs    — split → scale → fit → score, shared by both
//   evaluation.rs  — RMSE / R² on a split
//   lifestyle.rs   — stage one: lifestyle features → GPA
//   performance.rs — stage two: encoded performance features
//                    + lifestyle estimate → GPA, with feature
//                    reconciliation at inference
//
// Reference: scikit-learn StandardScaler / LinearRegression
//            linfa-linear documentation

pub mod scaler;

pub mod regressor;

pub mod training;

pub mod evaluation;

/// Lifestyle model: train and predict
pub mod lifestyle;

/// Performance model: train, reconcile and predict
pub mod performance;
