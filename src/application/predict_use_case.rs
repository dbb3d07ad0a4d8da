// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Two-stage inference for one student:
//
//   1. Load the full artifact set           (Layer 6 - infra)
//   2. Lifestyle record → lifestyle GPA     (Layer 5 - ml)
//   3. Performance record + lifestyle GPA
//      → reconciled row → final GPA         (Layer 5 - ml)
//
// Artifacts are read on every call, under the store's shared
// lock, so a prediction never mixes files from two training
// runs. This never trains: a missing artifact is an error.

use std::sync::Arc;

use serde_json::Value;

use crate::application::api::{self, ApiResponse};
use crate::domain::error::Result;
use crate::domain::records::{LifestyleRecord, PerformanceRecord};
use crate::domain::traits::GpaPredictor;
use crate::infra::model_store::ModelStore;
use crate::ml::{lifestyle, performance, performance::MismatchPolicy};

pub struct PredictUseCase {
    store:  Arc<ModelStore>,
    policy: MismatchPolicy,
}

impl PredictUseCase {
    pub fn new(store: Arc<ModelStore>, policy: MismatchPolicy) -> Self {
        Self { store, policy }
    }

    /// Validate a JSON request body and answer it.
    pub fn handle(&self, body: &Value) -> ApiResponse {
        api::handle(self, body)
    }
}

impl GpaPredictor for PredictUseCase {
    fn predict(&self, lifestyle: &LifestyleRecord, performance: &PerformanceRecord) -> Result<f64> {
        let set = self.store.load_set()?;

        let lifestyle_gpa = lifestyle::predict(&set.lifestyle, lifestyle)?;
        let gpa = performance::predict(&set.performance, performance, lifestyle_gpa, self.policy)?;

        tracing::info!("Predicted GPA {:.4} (lifestyle estimate {:.4})", gpa, lifestyle_gpa);
        Ok(gpa)
    }
}
