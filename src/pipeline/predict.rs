use thiserror::Error;

use crate::input::form::Submission;
use crate::model::{HealthStatus, ModelError, Predictor, StatusThresholds, predict_checked};
use crate::pipeline::baseline::Baseline;
use crate::pipeline::history::{HistoryStore, PredictionRecord, TIMESTAMP_FORMAT};
use crate::schema::FeatureVector;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("prediction failed: {0}")]
    Model(#[from] ModelError),
}

/// Everything the prediction dashboard shows for one submission.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub name: String,
    pub score: f64,
    pub status: HealthStatus,
    pub readings: FeatureVector,
    pub baseline: FeatureVector,
    pub gaps: FeatureVector,
    pub history: Vec<PredictionRecord>,
}

#[derive(Clone, Copy)]
pub struct PredictContext<'a> {
    pub baseline: &'a Baseline,
    pub predictor: &'a dyn Predictor,
    pub history: &'a HistoryStore,
    pub thresholds: StatusThresholds,
}

/// Rounds to two decimal places from the exact binary value, ties to even.
///
/// 2.675 is stored as 2.67499.. and rounds to 2.67.
pub fn round2(value: f64) -> f64 {
    match format!("{value:.2}").parse::<f64>() {
        // `+ 0.0` folds -0.0 into 0.0
        Ok(rounded) => rounded + 0.0,
        Err(_) => value,
    }
}

/// Scores readings without touching history.
pub fn score_readings(
    predictor: &dyn Predictor,
    readings: &FeatureVector,
) -> Result<f64, PredictError> {
    let raw = predict_checked(predictor, readings)?;
    Ok(round2(raw))
}

pub fn run_prediction(
    ctx: PredictContext<'_>,
    submission: Submission,
) -> Result<PredictionOutcome, PredictError> {
    let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
    run_prediction_at(ctx, submission, timestamp)
}

pub fn run_prediction_at(
    ctx: PredictContext<'_>,
    submission: Submission,
    timestamp: String,
) -> Result<PredictionOutcome, PredictError> {
    let Submission { name, readings } = submission;

    let score = score_readings(ctx.predictor, &readings)?;
    let status = ctx.thresholds.classify(score);
    let gaps = ctx.baseline.gaps(&readings);

    let history = ctx.history.record(PredictionRecord {
        name: name.clone(),
        score,
        status,
        timestamp,
        readings,
    });
    tracing::info!(
        name = %name,
        score,
        status = status.label(),
        history_len = history.len(),
        "recorded prediction"
    );

    Ok(PredictionOutcome {
        name,
        score,
        status,
        readings,
        baseline: ctx.baseline.means,
        gaps,
        history,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/predict.rs"]
mod tests;
