// ============================================================
// Layer 2 — Pipeline Configuration
// ============================================================
// Every path and knob the two pipelines need, in one struct.
// Nothing is global: the CLI builds a PipelineConfig (from a
// JSON file, defaults, and flag overrides) and hands it down.
//
// A copy of the config used for a training run is written next
// to the artifacts so `inspect` can show how they were built.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::infra::model_store::StoreConfig;
use crate::ml::performance::MismatchPolicy;
use crate::ml::training::TrainingSettings;

pub const TRAINED_CONFIG_FILE: &str = "pipeline_config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub lifestyle_data:   PathBuf,
    pub performance_data: PathBuf,
    pub store:            StoreConfig,
    pub training:         TrainingSettings,
    pub mismatch_policy:  MismatchPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            lifestyle_data:   PathBuf::from("data/student_lifestyle_dataset.csv"),
            performance_data: PathBuf::from("data/student_performance_data.csv"),
            store:            StoreConfig::default(),
            training:         TrainingSettings::default(),
            mismatch_policy:  MismatchPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config file. Absent keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config in '{}'", path.display()))
    }

    /// `load(path)` if a path was given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved pipeline config to '{}'", path.display());
        Ok(())
    }

    /// Where the config of the last training run is kept.
    pub fn trained_config_path(&self) -> PathBuf {
        self.store.base_dir.join(TRAINED_CONFIG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "store": { "base_dir": "models" }, "mismatch_policy": "strict" }"#).unwrap();

        let cfg = PipelineConfig::load(&path).unwrap();
        assert_eq!(cfg.store.base_dir, PathBuf::from("models"));
        assert_eq!(cfg.store.prefix, "student");
        assert_eq!(cfg.mismatch_policy, MismatchPolicy::Strict);
        assert_eq!(cfg.training.target_column, "GPA");
        assert_eq!(cfg.lifestyle_data, PipelineConfig::default().lifestyle_data);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut cfg = PipelineConfig::default();
        cfg.training.seed = 7;
        cfg.save(&path).unwrap();
        assert_eq!(PipelineConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PipelineConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("nope.json"));
    }
}
