// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates training of both models in order:
//
//   Step 1: Check the store for missing artifacts   (Layer 6 - infra)
//   Step 2: Load the lifestyle dataset               (Layer 4 - data)
//   Step 3: Fit the lifestyle model                  (Layer 5 - ml)
//   Step 4: Load the performance dataset             (Layer 4 - data)
//   Step 5: Fit the performance model                (Layer 5 - ml)
//   Step 6: Publish all five artifacts together      (Layer 6 - infra)
//   Step 7: Append evaluation metrics                (Layer 6 - infra)
//
// Both models are always retrained together. If any step up to
// and including 6 fails, nothing is published and the store is
// left exactly as it was.

use std::sync::Arc;

use crate::application::config::PipelineConfig;
use crate::data::loader::CsvLoader;
use crate::domain::error::Result;
use crate::domain::traits::DatasetSource;
use crate::infra::{
    metrics::MetricsLogger,
    model_store::{ArtifactSet, ModelStore},
};
use crate::ml::{
    lifestyle,
    performance,
    training::{FitReport, TrainingSettings},
};

#[derive(Debug, Clone, PartialEq)]
pub enum TrainOutcome {
    /// Every artifact was already on disk; nothing was written.
    AlreadyTrained,
    /// Both models were fitted and published.
    Trained { reports: Vec<FitReport> },
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    store:              Arc<ModelStore>,
    settings:           TrainingSettings,
    lifestyle_source:   Box<dyn DatasetSource>,
    performance_source: Box<dyn DatasetSource>,
}

impl TrainUseCase {
    /// Train from the CSV files named in the config.
    pub fn new(config: &PipelineConfig, store: Arc<ModelStore>) -> Self {
        Self::with_sources(
            store,
            config.training.clone(),
            Box::new(CsvLoader::new(&config.lifestyle_data)),
            Box::new(CsvLoader::new(&config.performance_data)),
        )
    }

    pub fn with_sources(
        store:              Arc<ModelStore>,
        settings:           TrainingSettings,
        lifestyle_source:   Box<dyn DatasetSource>,
        performance_source: Box<dyn DatasetSource>,
    ) -> Self {
        Self { store, settings, lifestyle_source, performance_source }
    }

    /// Train only if some artifact is missing. Idempotent: a second
    /// call after a successful one performs no writes.
    pub fn ensure_trained(&self) -> Result<TrainOutcome> {
        let missing = self.store.missing();
        if missing.is_empty() {
            tracing::info!("All artifacts present in '{}', skipping training", self.store.dir().display());
            return Ok(TrainOutcome::AlreadyTrained);
        }

        let names: Vec<String> = missing.iter().map(|k| k.to_string()).collect();
        tracing::info!("Missing artifacts: {}. Retraining both models", names.join(", "));
        let reports = self.retrain()?;
        Ok(TrainOutcome::Trained { reports })
    }

    /// Retrain both models unconditionally and replace every artifact.
    pub fn retrain(&self) -> Result<Vec<FitReport>> {
        // ── Lifestyle model ──────────────────────────────────────────────────
        tracing::info!("Loading lifestyle data from {}", self.lifestyle_source.describe());
        let raw = self.lifestyle_source.load()?;
        tracing::info!("Loaded {} lifestyle rows", raw.n_rows());
        let (lifestyle, lifestyle_report) = lifestyle::train(raw, &self.settings)?;

        // ── Performance model ────────────────────────────────────────────────
        tracing::info!("Loading performance data from {}", self.performance_source.describe());
        let raw = self.performance_source.load()?;
        tracing::info!("Loaded {} performance rows", raw.n_rows());
        let (performance, performance_report) = performance::train(raw, &self.settings)?;

        // ── Publish ──────────────────────────────────────────────────────────
        self.store.publish(ArtifactSet { lifestyle, performance })?;

        let reports = vec![lifestyle_report, performance_report];
        let logger = MetricsLogger::new(self.store.dir());
        match logger.log_run(&reports) {
            Ok(run) => tracing::info!("Training run {} recorded in '{}'", run, logger.csv_path().display()),
            // The artifacts are already live, so a metrics failure is not a training failure.
            Err(e) => tracing::warn!("Could not record training metrics: {}", e),
        }

        Ok(reports)
    }

    pub fn store(&self) -> &Arc<ModelStore> {
        &self.store
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use std::{fs, time::SystemTime};

    use super::*;
    use crate::application::fixtures::{lifestyle_table, performance_table};
    use crate::data::table::RawTable;
    use crate::domain::artifact::ArtifactKind;
    use crate::domain::error::PredictorError;
    use crate::infra::metrics::METRICS_FILE;
    use crate::infra::model_store::StoreConfig;

    fn store_in(dir: &std::path::Path) -> Arc<ModelStore> {
        Arc::new(ModelStore::new(StoreConfig { base_dir: dir.to_path_buf(), ..StoreConfig::default() }))
    }

    fn use_case(store: Arc<ModelStore>, lifestyle: RawTable, performance: RawTable) -> TrainUseCase {
        TrainUseCase::with_sources(store, TrainingSettings::default(), Box::new(lifestyle), Box::new(performance))
    }

    fn snapshot(store: &ModelStore) -> Vec<(Vec<u8>, SystemTime)> {
        ArtifactKind::ALL
            .iter()
            .map(|k| {
                let path = store.path_for(*k);
                (fs::read(&path).unwrap(), fs::metadata(&path).unwrap().modified().unwrap())
            })
            .collect()
    }

    #[test]
    fn test_first_call_trains_and_publishes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let uc = use_case(store.clone(), lifestyle_table(), performance_table());

        match uc.ensure_trained().unwrap() {
            TrainOutcome::Trained { reports } => {
                assert_eq!(reports.len(), 2);
                assert_eq!(reports[0].model, "lifestyle");
                assert_eq!(reports[1].model, "performance");
            }
            other => panic!("expected Trained, got {other:?}"),
        }
        assert!(store.missing().is_empty());
        assert!(dir.path().join(METRICS_FILE).is_file());
    }

    #[test]
    fn test_second_call_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let uc = use_case(store.clone(), lifestyle_table(), performance_table());

        uc.ensure_trained().unwrap();
        let before = snapshot(&store);
        let metrics_before = fs::read(dir.path().join(METRICS_FILE)).unwrap();

        assert_eq!(uc.ensure_trained().unwrap(), TrainOutcome::AlreadyTrained);
        assert_eq!(snapshot(&store), before);
        assert_eq!(fs::read(dir.path().join(METRICS_FILE)).unwrap(), metrics_before);
    }

    #[test]
    fn test_any_missing_artifact_triggers_full_retrain() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let uc = use_case(store.clone(), lifestyle_table(), performance_table());
        uc.ensure_trained().unwrap();

        fs::remove_file(store.path_for(ArtifactKind::PerformanceScaler)).unwrap();
        assert!(matches!(uc.ensure_trained().unwrap(), TrainOutcome::Trained { .. }));
        assert!(store.missing().is_empty());
    }

    #[test]
    fn test_failed_training_publishes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let mut broken = performance_table();
        broken.take_column("GPA");
        let uc = use_case(store.clone(), lifestyle_table(), broken);

        match uc.ensure_trained() {
            Err(PredictorError::MissingTarget { column, .. }) => assert_eq!(column, "GPA"),
            other => panic!("expected MissingTarget, got {other:?}"),
        }
        assert_eq!(store.missing(), ArtifactKind::ALL.to_vec());
    }

    #[test]
    fn test_retrain_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        let uc = use_case(store.clone(), lifestyle_table(), performance_table());

        uc.retrain().unwrap();
        let first: Vec<Vec<u8>> = snapshot(&store).into_iter().map(|(b, _)| b).collect();
        uc.retrain().unwrap();
        let second: Vec<Vec<u8>> = snapshot(&store).into_iter().map(|(b, _)| b).collect();
        assert_eq!(first, second);
    }
}
