// ============================================================
// Layer 3 — Error Taxonomy
// ============================================================
// Every failure the core can report. The application layer
// turns these into `{ "error": ... }` responses; the CLI wraps
// them in anyhow context.
//
//   Validation        — caller sent a bad request (400)
//   MissingTarget     — training CSV has no GPA column
//   ArtifactMissing   — predict called before training
//   EncodingMismatch  — inference row cannot be reconciled
//                       with the trained column set
//
// The rest are plumbing failures (I/O, CSV, bincode, linfa).

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::artifact::ArtifactKind;

pub type Result<T, E = PredictorError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PredictorError {
    /// Request is missing required fields or carries values of the wrong type.
    #[error("{}", validation_message(.missing, .invalid))]
    Validation {
        missing: Vec<String>,
        invalid: Vec<String>,
    },

    #[error("'{column}' column is missing from dataset '{}'", .dataset.display())]
    MissingTarget { column: String, dataset: PathBuf },

    #[error("model artifacts missing: {}", join_kinds(.kinds))]
    ArtifactMissing { kinds: Vec<ArtifactKind> },

    #[error("feature mismatch: {message}")]
    EncodingMismatch {
        message: String,
        columns: Vec<String>,
    },

    #[error("dataset '{}': {message}", .path.display())]
    Dataset { path: PathBuf, message: String },

    #[error("cannot read CSV '{}'", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("artifact '{}' is corrupt: {message}", .path.display())]
    CorruptArtifact { path: PathBuf, message: String },

    #[error("refusing to store a {payload} payload in the {kind} slot")]
    MismatchedPayload { kind: ArtifactKind, payload: &'static str },

    #[error("cannot encode artifact {kind}")]
    Serialize {
        kind: ArtifactKind,
        #[source]
        source: bincode::Error,
    },

    #[error("model fitting failed: {0}")]
    Training(String),

    #[error("I/O error on '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PredictorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    pub fn dataset(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Dataset { path: path.into(), message: message.into() }
    }

    /// True for errors the caller caused (bad request) as opposed
    /// to server-side state such as missing or corrupt artifacts.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

fn validation_message(missing: &[String], invalid: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("Missing fields: {}", missing.join(", ")));
    }
    if !invalid.is_empty() {
        parts.push(format!("Invalid fields: {}", invalid.join(", ")));
    }
    parts.join("; ")
}

fn join_kinds(kinds: &[ArtifactKind]) -> String {
    kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_missing_field() {
        let err = PredictorError::Validation {
            missing: vec!["AttendanceRate".into(), "Major".into()],
            invalid: Vec::new(),
        };
        assert_eq!(err.to_string(), "Missing fields: AttendanceRate, Major");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_artifact_missing_names_kinds() {
        let err = PredictorError::ArtifactMissing {
            kinds: vec![ArtifactKind::LifestyleModel, ArtifactKind::FeatureOrder],
        };
        let msg = err.to_string();
        assert!(msg.contains("lifestyle model"));
        assert!(msg.contains("performance feature order"));
        assert!(!err.is_client_error());
    }
}
