use serde::Serialize;
use thiserror::Error;

use crate::input::dataset::ReferenceDataset;
use crate::schema::{Feature, FeatureVector};

#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("no values for `{0}` in the reference dataset")]
    NoValues(Feature),
    #[error("mean of `{0}` is not finite")]
    NonFinite(Feature),
}

/// Column means of the reference dataset. Built once at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Baseline {
    pub rows: usize,
    pub means: FeatureVector,
}

impl Baseline {
    pub fn from_dataset(dataset: &ReferenceDataset) -> Result<Self, BaselineError> {
        let mut means = FeatureVector::default();
        for feature in Feature::ALL {
            means[feature] = column_mean(feature, dataset.column(feature))?;
        }
        Ok(Self {
            rows: dataset.rows,
            means,
        })
    }

    pub fn mean(&self, feature: Feature) -> f64 {
        self.means.get(feature)
    }

    /// Per-feature `readings - mean`.
    pub fn gaps(&self, readings: &FeatureVector) -> FeatureVector {
        readings.minus(&self.means)
    }
}

fn column_mean(feature: Feature, values: &[f64]) -> Result<f64, BaselineError> {
    if values.is_empty() {
        return Err(BaselineError::NoValues(feature));
    }
    let sum: f64 = values.iter().sum();
    let mean = sum / values.len() as f64;
    if !mean.is_finite() {
        return Err(BaselineError::NonFinite(feature));
    }
    Ok(mean)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/baseline.rs"]
mod tests;
