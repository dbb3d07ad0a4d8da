// ============================================================
// Layer 3 — Artifact Kinds
// ============================================================
// The five persisted pieces of a trained pipeline. Kept in the
// domain layer so errors can name them without depending on
// the store implementation.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    LifestyleModel,
    LifestyleScaler,
    PerformanceModel,
    PerformanceScaler,
    FeatureOrder,
}

impl ArtifactKind {
    /// Every kind, in canonical order. Training runs unless all are on disk.
    pub const ALL: [ArtifactKind; 5] = [
        ArtifactKind::LifestyleModel,
        ArtifactKind::LifestyleScaler,
        ArtifactKind::PerformanceModel,
        ArtifactKind::PerformanceScaler,
        ArtifactKind::FeatureOrder,
    ];

    /// File stem used by the model store's naming scheme.
    pub fn stem(self) -> &'static str {
        match self {
            ArtifactKind::LifestyleModel    => "lifestyle_model",
            ArtifactKind::LifestyleScaler   => "lifestyle_scaler",
            ArtifactKind::PerformanceModel  => "performance_model",
            ArtifactKind::PerformanceScaler => "performance_scaler",
            ArtifactKind::FeatureOrder      => "performance_features",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ArtifactKind::LifestyleModel    => "lifestyle model",
            ArtifactKind::LifestyleScaler   => "lifestyle scaler",
            ArtifactKind::PerformanceModel  => "performance model",
            ArtifactKind::PerformanceScaler => "performance scaler",
            ArtifactKind::FeatureOrder      => "performance feature order",
        };
        f.write_str(label)
    }
}
