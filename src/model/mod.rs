//! Inference against a regression artifact trained offline.
//!
//! The artifact is a JSON document (optionally gzip-compressed) naming the
//! feature order it was trained with and one of the supported model kinds.
//! The feature list must match [`crate::schema::Feature::ALL`] exactly; a
//! reordered artifact would silently score the wrong columns, so loading
//! rejects it.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::input::{InputError, open_maybe_gz};
use crate::schema::{FeatureVector, feature_keys};

pub mod forest;
pub mod linear;
pub mod status;

pub use forest::TreeEnsemble;
pub use linear::LinearModel;
pub use status::{HealthStatus, StatusThresholds};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("malformed model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact feature order {found:?} does not match schema {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    #[error("invalid model artifact: {0}")]
    Invalid(String),
    #[error("model produced a non-finite score ({0})")]
    NonFinite(f64),
}

/// Maps one schema-ordered reading vector to a raw score.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelArtifact {
    pub features: Vec<String>,
    #[serde(flatten)]
    pub model: ModelKind,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelKind {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

impl ModelArtifact {
    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(text)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let expected = feature_keys();
        if self.features.len() != expected.len()
            || self.features.iter().zip(expected).any(|(a, b)| a != b)
        {
            return Err(ModelError::FeatureMismatch {
                expected: expected.iter().map(|s| s.to_string()).collect(),
                found: self.features.clone(),
            });
        }
        match &self.model {
            ModelKind::Linear(m) => m.validate(),
            ModelKind::TreeEnsemble(m) => m.validate(),
        }
    }

    pub fn into_predictor(self) -> Box<dyn Predictor> {
        match self.model {
            ModelKind::Linear(m) => Box::new(m),
            ModelKind::TreeEnsemble(m) => Box::new(m),
        }
    }
}

pub fn load_model(path: &Path) -> Result<Box<dyn Predictor>, ModelError> {
    let mut text = String::new();
    open_maybe_gz(path)?
        .read_to_string(&mut text)
        .map_err(|source| InputError::Open {
            path: path.to_path_buf(),
            source,
        })?;
    let artifact = ModelArtifact::from_json(&text)?;
    let predictor = artifact.into_predictor();
    tracing::info!(
        path = %path.display(),
        model = %predictor.describe(),
        "loaded model artifact"
    );
    Ok(predictor)
}

/// Runs the predictor and rejects NaN or infinite scores.
pub fn predict_checked(predictor: &dyn Predictor, features: &FeatureVector) -> Result<f64, ModelError> {
    let raw = predictor.predict(features)?;
    if !raw.is_finite() {
        return Err(ModelError::NonFinite(raw));
    }
    Ok(raw)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
