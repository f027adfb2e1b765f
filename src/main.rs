mod input;
mod logging;
mod model;
mod pipeline;
mod report;
mod schema;
mod server;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use crate::input::InputError;
use crate::input::dataset::load_reference_dataset;
use crate::input::form::{ValidationErrors, parse_submission};
use crate::model::{HealthStatus, ModelError, StatusThresholds, load_model};
use crate::pipeline::baseline::{Baseline, BaselineError};
use crate::pipeline::history::HistoryStore;
use crate::pipeline::predict::{PredictError, score_readings};
use crate::report::json::baseline_summary;
use crate::schema::Feature;
use crate::server::{AppState, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "astrohealth", version, about = "Astronaut health score service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the form, dashboard and JSON API over HTTP.
    Serve(ServeArgs),
    /// Print the reference dataset averages as JSON.
    Baseline(DatasetArgs),
    /// Score one set of readings given as field=value pairs.
    Score(ScoreArgs),
}

#[derive(Debug, Args)]
struct DatasetArgs {
    #[arg(long, env = "ASTROHEALTH_DATASET", default_value = "astronaut_health_dataset.csv")]
    dataset: PathBuf,
}

#[derive(Debug, Args)]
struct ModelArgs {
    #[arg(long, env = "ASTROHEALTH_MODEL", default_value = "astronaut_health_model.json")]
    model: PathBuf,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[command(flatten)]
    model: ModelArgs,
    #[command(flatten)]
    dataset: DatasetArgs,
    #[arg(long, env = "ASTROHEALTH_BIND", default_value = "127.0.0.1:5000")]
    bind: SocketAddr,
    #[arg(long, env = "ASTROHEALTH_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,
    /// Maximum number of predictions kept in memory; 0 keeps everything.
    #[arg(long, env = "ASTROHEALTH_HISTORY_LIMIT", default_value_t = 1000)]
    history_limit: usize,
}

#[derive(Debug, Args)]
struct ScoreArgs {
    #[command(flatten)]
    model: ModelArgs,
    /// A reading such as `oxygen_level=97.5`; repeat for every field.
    #[arg(long = "reading", value_name = "FIELD=VALUE", required = true)]
    readings: Vec<String>,
}

#[derive(Debug, Error)]
enum RunError {
    #[error("reference dataset: {0}")]
    Dataset(#[from] InputError),
    #[error("baseline: {0}")]
    Baseline(#[from] BaselineError),
    #[error("model: {0}")]
    Model(#[from] ModelError),
    #[error("{0}")]
    Predict(#[from] PredictError),
    #[error("invalid readings: {0}")]
    Readings(#[from] ValidationErrors),
    #[error("invalid --reading {0:?}: expected FIELD=VALUE")]
    ReadingSyntax(String),
    #[error("unknown reading field `{0}`")]
    UnknownField(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), RunError> {
    match cli.command {
        Command::Serve(args) => run_serve(args),
        Command::Baseline(args) => {
            let baseline = load_baseline(&args.dataset)?;
            let json = serde_json::to_string_pretty(&baseline_summary(&baseline))?;
            println!("{json}");
            Ok(())
        }
        Command::Score(args) => run_score(args),
    }
}

fn load_baseline(path: &Path) -> Result<Baseline, RunError> {
    let dataset = load_reference_dataset(path)?;
    let baseline = Baseline::from_dataset(&dataset)?;
    for (feature, mean) in baseline.means.iter() {
        tracing::debug!(feature = feature.key(), mean, "baseline mean");
    }
    Ok(baseline)
}

fn run_serve(args: ServeArgs) -> Result<(), RunError> {
    let predictor = load_model(&args.model.model)?;
    let baseline = load_baseline(&args.dataset.dataset)?;
    let history = HistoryStore::from_limit(args.history_limit);
    match history.capacity() {
        Some(cap) => tracing::info!(capacity = cap.get(), "history is bounded"),
        None => tracing::info!("history is unbounded"),
    }

    let state = Arc::new(AppState::new(baseline, predictor, history));
    let config = ServerConfig {
        bind: args.bind,
        static_dir: args.static_dir,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(state, config))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct ScoreOutput {
    score: f64,
    status: HealthStatus,
}

fn run_score(args: ScoreArgs) -> Result<(), RunError> {
    let fields = parse_reading_args(&args.readings)?;
    let submission = parse_submission(&fields)?;
    let predictor = load_model(&args.model.model)?;
    let score = score_readings(predictor.as_ref(), &submission.readings)?;
    let output = ScoreOutput {
        score,
        status: StatusThresholds::default_v1().classify(score),
    };
    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn parse_reading_args(raw: &[String]) -> Result<HashMap<String, String>, RunError> {
    let mut fields = HashMap::new();
    for arg in raw {
        let (key, value) = arg
            .split_once('=')
            .ok_or_else(|| RunError::ReadingSyntax(arg.clone()))?;
        let key = key.trim();
        if Feature::from_key(key).is_none() {
            return Err(RunError::UnknownField(key.to_string()));
        }
        fields.insert(key.to_string(), value.to_string());
    }
    Ok(fields)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
