// ============================================================
// Layer 6 — Model Store
// ============================================================
// Persists the five artifacts of a trained pipeline:
//
//   {prefix}_lifestyle_model.{ext}       LinearRegressor
//   {prefix}_lifestyle_scaler.{ext}      StandardScaler
//   {prefix}_performance_model.{ext}     LinearRegressor
//   {prefix}_performance_scaler.{ext}    StandardScaler
//   {prefix}_performance_features.{ext}  FeatureOrder
//
// Each file is a bincode blob of StoredArtifact, which tags the
// payload with its kind so a file in the wrong slot is caught
// on load. bincode writes f64 bits verbatim, so a load returns
// exactly what was saved.
//
// Writes:
//   save()    — one artifact, via temp file + rename
//   publish() — all five: serialised into a staging directory
//               first, then renamed into place while holding
//               the write lock
//
// Reads take the read lock, so within a process a reader sees
// either the old set or the new set, never a mixture.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use serde::{Deserialize, Serialize};

use crate::domain::artifact::ArtifactKind;
use crate::domain::error::{PredictorError, Result};
use crate::ml::lifestyle::LifestyleArtifact;
use crate::ml::performance::{FeatureOrder, PerformanceArtifact};
use crate::ml::regressor::LinearRegressor;
use crate::ml::scaler::StandardScaler;

// ─── Configuration ────────────────────────────────────────────────────────────
/// Where artifacts live and how their files are named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub base_dir:  PathBuf,
    pub prefix:    String,
    pub extension: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_dir:  PathBuf::from("artifacts"),
            prefix:    "student".to_string(),
            extension: "bin".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn file_name(&self, kind: ArtifactKind) -> String {
        let stem = if self.prefix.is_empty() {
            kind.stem().to_string()
        } else {
            format!("{}_{}", self.prefix, kind.stem())
        };
        if self.extension.is_empty() {
            stem
        } else {
            format!("{stem}.{}", self.extension)
        }
    }
}

// ─── Artifacts ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Artifact {
    Regressor(LinearRegressor),
    Scaler(StandardScaler),
    FeatureOrder(FeatureOrder),
}

impl Artifact {
    pub fn label(&self) -> &'static str {
        match self {
            Artifact::Regressor(_)    => "regressor",
            Artifact::Scaler(_)       => "scaler",
            Artifact::FeatureOrder(_) => "feature order",
        }
    }

    /// Whether this payload type belongs in a slot of `kind`.
    pub fn fits(&self, kind: ArtifactKind) -> bool {
        matches!(
            (self, kind),
            (Artifact::Regressor(_), ArtifactKind::LifestyleModel | ArtifactKind::PerformanceModel)
                | (Artifact::Scaler(_), ArtifactKind::LifestyleScaler | ArtifactKind::PerformanceScaler)
                | (Artifact::FeatureOrder(_), ArtifactKind::FeatureOrder)
        )
    }
}

/// On-disk envelope.
#[derive(Serialize, Deserialize)]
struct StoredArtifact {
    kind:     ArtifactKind,
    artifact: Artifact,
}

/// Everything the prediction pipeline needs, loaded together.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    pub lifestyle:   LifestyleArtifact,
    pub performance: PerformanceArtifact,
}

impl ArtifactSet {
    pub fn into_artifacts(self) -> [(ArtifactKind, Artifact); 5] {
        [
            (ArtifactKind::LifestyleModel, Artifact::Regressor(self.lifestyle.regressor)),
            (ArtifactKind::LifestyleScaler, Artifact::Scaler(self.lifestyle.scaler)),
            (ArtifactKind::PerformanceModel, Artifact::Regressor(self.performance.regressor)),
            (ArtifactKind::PerformanceScaler, Artifact::Scaler(self.performance.scaler)),
            (ArtifactKind::FeatureOrder, Artifact::FeatureOrder(self.performance.feature_order)),
        ]
    }
}

// ─── ModelStore ───────────────────────────────────────────────────────────────
pub struct ModelStore {
    config: StoreConfig,
    lock:   RwLock<()>,
}

impl ModelStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config, lock: RwLock::new(()) }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn dir(&self) -> &Path {
        &self.config.base_dir
    }

    pub fn path_for(&self, kind: ArtifactKind) -> PathBuf {
        self.config.base_dir.join(self.config.file_name(kind))
    }

    pub fn exists(&self, kind: ArtifactKind) -> bool {
        let _guard = self.read_guard();
        self.path_for(kind).is_file()
    }

    /// Kinds with no file on disk, in canonical order.
    pub fn missing(&self) -> Vec<ArtifactKind> {
        let _guard = self.read_guard();
        ArtifactKind::ALL
            .into_iter()
            .filter(|k| !self.path_for(*k).is_file())
            .collect()
    }

    pub fn save(&self, kind: ArtifactKind, artifact: &Artifact) -> Result<()> {
        let bytes = encode(kind, artifact)?;
        self.ensure_dir()?;

        let _guard = self.write_guard();
        let path = self.path_for(kind);
        let mut tmp = tempfile::NamedTempFile::new_in(self.dir())
            .map_err(|e| PredictorError::io(self.dir(), e))?;
        tmp.write_all(&bytes).map_err(|e| PredictorError::io(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| PredictorError::io(&path, e.error))?;

        tracing::debug!("Saved {} to '{}'", kind, path.display());
        Ok(())
    }

    pub fn load(&self, kind: ArtifactKind) -> Result<Artifact> {
        let _guard = self.read_guard();
        self.read_artifact(kind)
    }

    /// Write all five artifacts as one unit.
    pub fn publish(&self, set: ArtifactSet) -> Result<()> {
        self.ensure_dir()?;

        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(self.dir())
            .map_err(|e| PredictorError::io(self.dir(), e))?;

        // Serialise and stage everything before touching live files
        let mut staged = Vec::with_capacity(ArtifactKind::ALL.len());
        for (kind, artifact) in set.into_artifacts() {
            let bytes = encode(kind, &artifact)?;
            let path = staging.path().join(self.config.file_name(kind));
            fs::write(&path, bytes).map_err(|e| PredictorError::io(&path, e))?;
            staged.push((kind, path));
        }

        let _guard = self.write_guard();
        for (kind, from) in staged {
            let to = self.path_for(kind);
            fs::rename(&from, &to).map_err(|e| PredictorError::io(&to, e))?;
        }

        tracing::info!("Published {} artifacts to '{}'", ArtifactKind::ALL.len(), self.dir().display());
        Ok(())
    }

    /// Load all five artifacts. Fails listing every missing kind.
    pub fn load_set(&self) -> Result<ArtifactSet> {
        let _guard = self.read_guard();

        let missing: Vec<ArtifactKind> = ArtifactKind::ALL
            .into_iter()
            .filter(|k| !self.path_for(*k).is_file())
            .collect();
        if !missing.is_empty() {
            return Err(PredictorError::ArtifactMissing { kinds: missing });
        }

        Ok(ArtifactSet {
            lifestyle: LifestyleArtifact {
                regressor: self.read_regressor(ArtifactKind::LifestyleModel)?,
                scaler:    self.read_scaler(ArtifactKind::LifestyleScaler)?,
            },
            performance: PerformanceArtifact {
                regressor:     self.read_regressor(ArtifactKind::PerformanceModel)?,
                scaler:        self.read_scaler(ArtifactKind::PerformanceScaler)?,
                feature_order: self.read_feature_order()?,
            },
        })
    }

    // ── Internals (callers hold the lock) ────────────────────────────────────

    fn read_artifact(&self, kind: ArtifactKind) -> Result<Artifact> {
        let path = self.path_for(kind);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PredictorError::ArtifactMissing { kinds: vec![kind] });
            }
            Err(e) => return Err(PredictorError::io(&path, e)),
        };

        let stored: StoredArtifact = bincode::deserialize(&bytes).map_err(|e| {
            PredictorError::CorruptArtifact { path: path.clone(), message: e.to_string() }
        })?;
        if stored.kind != kind || !stored.artifact.fits(kind) {
            return Err(PredictorError::CorruptArtifact {
                path,
                message: format!("expected {kind}, file holds {}", stored.kind),
            });
        }
        Ok(stored.artifact)
    }

    fn read_regressor(&self, kind: ArtifactKind) -> Result<LinearRegressor> {
        match self.read_artifact(kind)? {
            Artifact::Regressor(r) => Ok(r),
            _ => Err(self.wrong_payload(kind)),
        }
    }

    fn read_scaler(&self, kind: ArtifactKind) -> Result<StandardScaler> {
        match self.read_artifact(kind)? {
            Artifact::Scaler(s) => Ok(s),
            _ => Err(self.wrong_payload(kind)),
        }
    }

    fn read_feature_order(&self) -> Result<FeatureOrder> {
        match self.read_artifact(ArtifactKind::FeatureOrder)? {
            Artifact::FeatureOrder(o) => Ok(o),
            _ => Err(self.wrong_payload(ArtifactKind::FeatureOrder)),
        }
    }

    fn wrong_payload(&self, kind: ArtifactKind) -> PredictorError {
        PredictorError::CorruptArtifact {
            path:    self.path_for(kind),
            message: format!("payload is not a {kind}"),
        }
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(self.dir()).map_err(|e| PredictorError::io(self.dir(), e))
    }

    // A poisoned lock only means another thread panicked mid-operation;
    // the guarded data is `()`, so carry on.
    fn read_guard(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn encode(kind: ArtifactKind, artifact: &Artifact) -> Result<Vec<u8>> {
    if !artifact.fits(kind) {
        return Err(PredictorError::MismatchedPayload { kind, payload: artifact.label() });
    }
    let stored = StoredArtifact { kind, artifact: artifact.clone() };
    bincode::serialize(&stored).map_err(|source| PredictorError::Serialize { kind, source })
}
