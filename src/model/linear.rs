use serde::Deserialize;

use crate::model::{ModelError, Predictor};
use crate::schema::{FEATURE_COUNT, FeatureVector};

/// Ordinary least-squares style model: `intercept + Σ wᵢ·xᵢ`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Invalid(format!(
                "linear model has {} coefficients, expected {}",
                self.coefficients.len(),
                FEATURE_COUNT
            )));
        }
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ModelError::Invalid(
                "linear model has non-finite weights".to_string(),
            ));
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.as_slice())
            .map(|(w, x)| w * x)
            .sum();
        Ok(self.intercept + dot)
    }

    fn describe(&self) -> String {
        format!("linear ({} coefficients)", self.coefficients.len())
    }
}
