// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `predict` and
// `inspect`, and all their configurable flags.
//
// Every path flag is optional. When given, it overrides the
// value from the --config file (or the built-in default).
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::config::PipelineConfig;
use crate::ml::performance::MismatchPolicy;

/// The three top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train both models (skipped when all artifacts already exist)
    Train(TrainArgs),

    /// Predict a GPA from a JSON request
    Predict(PredictArgs),

    /// Show which artifacts exist and how they were trained
    Inspect(InspectArgs),
}

/// Where the artifacts live. Shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Directory holding the trained artifacts
    #[arg(long)]
    pub artifacts_dir: Option<PathBuf>,
}

impl StoreArgs {
    fn apply(&self, cfg: &mut PipelineConfig) {
        if let Some(dir) = &self.artifacts_dir {
            cfg.store.base_dir = dir.clone();
        }
    }
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Lifestyle CSV (Student_ID, daily hours, Stress_Level, GPA)
    #[arg(long)]
    pub lifestyle_data: Option<PathBuf>,

    /// Performance CSV (Student_ID, StudyHoursPerWeek, AttendanceRate,
    /// Gender, Major, PartTimeJob, ExtraCurricularActivities, GPA)
    #[arg(long)]
    pub performance_data: Option<PathBuf>,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Seed for the train/test shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Retrain even if every artifact is present
    #[arg(long)]
    pub force: bool,
}

impl TrainArgs {
    /// Layer boundary: fold the flags into the application config.
    pub fn apply(&self, cfg: &mut PipelineConfig) {
        if let Some(p) = &self.lifestyle_data {
            cfg.lifestyle_data = p.clone();
        }
        if let Some(p) = &self.performance_data {
            cfg.performance_data = p.clone();
        }
        if let Some(seed) = self.seed {
            cfg.training.seed = seed;
        }
        self.store.apply(cfg);
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// JSON request file, or "-" to read stdin
    #[arg(long, default_value = "-")]
    pub input: String,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Fail when a trained non-indicator column is absent from the request
    #[arg(long)]
    pub strict: bool,

    /// Run training first if any artifact is missing
    #[arg(long)]
    pub train_if_missing: bool,
}

impl PredictArgs {
    pub fn apply(&self, cfg: &mut PipelineConfig) {
        if self.strict {
            cfg.mismatch_policy = MismatchPolicy::Strict;
        }
        self.store.apply(cfg);
    }
}

/// All arguments for the `inspect` command
#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

impl InspectArgs {
    pub fn apply(&self, cfg: &mut PipelineConfig) {
        self.store.apply(cfg);
    }
}
