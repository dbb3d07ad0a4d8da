// ============================================================
// Layer 2 — Request / Response Boundary
// ============================================================
// The contract an embedding web layer calls:
//
//   JSON body ──validate──► PredictionRequest ──predict──► GPA
//
//   success → 200 {"GPA": <rounded to 2 dp>} + AuditRecord
//   failure → 400 {"error": "<message>"}
//
// Routing, authentication and persisting the audit record are
// the caller's job.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::request::{AuditRecord, PredictionRequest};
use crate::domain::traits::GpaPredictor;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body:   Value,
    /// Present only on success.
    #[serde(skip)]
    pub audit:  Option<AuditRecord>,
}

impl ApiResponse {
    fn error(message: String) -> Self {
        Self { status: STATUS_BAD_REQUEST, body: json!({ "error": message }), audit: None }
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_OK
    }
}

pub fn round_gpa(gpa: f64) -> f64 {
    (gpa * 100.0).round() / 100.0
}

/// Validate `body`, then predict. The predictor is not called
/// unless validation passes.
pub fn handle<P: GpaPredictor + ?Sized>(predictor: &P, body: &Value) -> ApiResponse {
    let request = match PredictionRequest::from_json(body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Rejected prediction request: {}", e);
            return ApiResponse::error(e.to_string());
        }
    };

    match predictor.predict(&request.lifestyle, &request.performance) {
        Ok(gpa) => {
            let gpa = round_gpa(gpa);
            ApiResponse {
                status: STATUS_OK,
                body:   json!({ "GPA": gpa }),
                audit:  Some(AuditRecord { request, gpa }),
            }
        }
        Err(e) => {
            if e.is_client_error() {
                tracing::warn!("Prediction for '{}' rejected: {}", request.username, e);
            } else {
                tracing::error!("Prediction for '{}' failed: {}", request.username, e);
            }
            ApiResponse::error(e.to_string())
        }
    }
}
