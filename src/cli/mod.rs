// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// `clap`, builds a PipelineConfig and hands off to Layer 2.
//
// Three commands are supported:
//   1. `train`   — fits both models and publishes the artifacts
//   2. `predict` — answers one JSON request from a file or stdin
//   3. `inspect` — reports what is in the artifact directory
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use commands::{Commands, InspectArgs, PredictArgs, TrainArgs};

use crate::application::{
    config::PipelineConfig,
    predict_use_case::PredictUseCase,
    train_use_case::{TrainOutcome, TrainUseCase},
};
use crate::domain::artifact::ArtifactKind;
use crate::infra::{
    metrics::MetricsLogger,
    model_store::{Artifact, ModelStore},
};
use crate::ml::training::FitReport;

#[derive(Parser, Debug)]
#[command(
    name = "gpa-predictor",
    version = "0.1.0",
    about = "Train a two-stage linear regression on student lifestyle and performance data, then predict GPAs."
)]
pub struct Cli {
    /// JSON pipeline config. Flags override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route to the right handler. Never computes anything itself.
    pub fn run(self) -> Result<()> {
        let mut cfg = PipelineConfig::load_or_default(self.config.as_deref())?;
        match self.command {
            Commands::Train(args) => {
                args.apply(&mut cfg);
                run_train(&cfg, &args)
            }
            Commands::Predict(args) => {
                args.apply(&mut cfg);
                run_predict(&cfg, &args)
            }
            Commands::Inspect(args) => {
                args.apply(&mut cfg);
                run_inspect(&cfg, &args)
            }
        }
    }
}

fn open_store(cfg: &PipelineConfig) -> Arc<ModelStore> {
    Arc::new(ModelStore::new(cfg.store.clone()))
}

fn run_train(cfg: &PipelineConfig, args: &TrainArgs) -> Result<()> {
    let store = open_store(cfg);
    let use_case = TrainUseCase::new(cfg, store.clone());

    let reports = if args.force {
        use_case.retrain().context("Training failed")?
    } else {
        match use_case.ensure_trained().context("Training failed")? {
            TrainOutcome::AlreadyTrained => {
                println!(
                    "Artifacts already present in '{}'. Use --force to retrain.",
                    store.dir().display()
                );
                return Ok(());
            }
            TrainOutcome::Trained { reports } => reports,
        }
    };

    cfg.save(cfg.trained_config_path())?;
    for report in &reports {
        print_report(report);
    }
    println!("Training complete. Artifacts saved to '{}'.", store.dir().display());
    Ok(())
}

fn run_predict(cfg: &PipelineConfig, args: &PredictArgs) -> Result<()> {
    let store = open_store(cfg);

    if args.train_if_missing {
        if let TrainOutcome::Trained { .. } = TrainUseCase::new(cfg, store.clone())
            .ensure_trained()
            .context("Training before prediction failed")?
        {
            cfg.save(cfg.trained_config_path())?;
        }
    }

    let raw = read_input(&args.input)?;
    let body: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("'{}' is not valid JSON", args.input))?;

    let response = PredictUseCase::new(store, cfg.mismatch_policy).handle(&body);
    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if !response.is_success() {
        bail!("prediction request rejected (status {})", response.status);
    }
    Ok(())
}

fn run_inspect(cfg: &PipelineConfig, _args: &InspectArgs) -> Result<()> {
    let store = open_store(cfg);
    println!("Artifact directory: {}", store.dir().display());

    for kind in ArtifactKind::ALL {
        let path = store.path_for(kind);
        if !store.exists(kind) {
            println!("  {:<28} missing   {}", kind.to_string(), path.display());
            continue;
        }
        let summary = match store.load(kind) {
            Ok(Artifact::Regressor(r)) => format!("{} coefficients, intercept {:.4}", r.coefficients.len(), r.intercept),
            Ok(Artifact::Scaler(s)) => format!("{} features", s.n_features()),
            Ok(Artifact::FeatureOrder(order)) => order.names.join(", "),
            Err(e) => format!("unreadable: {e}"),
        };
        println!("  {:<28} present   {}", kind.to_string(), summary);
    }

    let trained_with = cfg.trained_config_path();
    if trained_with.is_file() {
        let trained = PipelineConfig::load(&trained_with)?;
        println!(
            "Trained from '{}' and '{}' (seed {}, test fraction {})",
            trained.lifestyle_data.display(),
            trained.performance_data.display(),
            trained.training.seed,
            trained.training.test_fraction
        );
    }

    let runs = MetricsLogger::new(store.dir()).read_all()?;
    if let Some(last) = runs.iter().map(|r| r.run).max() {
        println!("Last training run: #{last}");
        for row in runs.iter().filter(|r| r.run == last) {
            println!(
                "  {:<12} train RMSE {:.4} (R² {:.4}), test RMSE {}",
                row.model,
                row.train_rmse,
                row.train_r2,
                row.test_rmse.map(|v| format!("{v:.4}")).unwrap_or_else(|| "n/a".to_string())
            );
        }
    }
    Ok(())
}

fn print_report(report: &FitReport) {
    println!(
        "{:<12} {} features, {} train rows, train RMSE {:.4}, train R² {:.4}",
        report.model,
        report.features.len(),
        report.train.rows,
        report.train.rmse,
        report.train.r2
    );
    if let Some(test) = &report.test {
        println!(
            "{:<12} {} test rows, test RMSE {:.4}, test R² {:.4}, max abs error {:.4}",
            "",
            test.rows,
            test.rmse,
            test.r2,
            test.max_abs_error
        );
    }
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Cannot read request from stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(input).with_context(|| format!("Cannot read request from '{input}'"))
    }
}
