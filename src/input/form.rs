use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::schema::{Feature, FeatureVector};

pub const DEFAULT_NAME: &str = "Astronaut";

/// A validated form submission, ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: String,
    pub readings: FeatureVector,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{} is required", .0.label())]
    Missing(Feature),
    #[error("{} must be a number (got {value:?})", .field.label())]
    NotNumeric { field: Feature, value: String },
    #[error("{} must be a finite number", .0.label())]
    NotFinite(Feature),
}

impl ValidationError {
    pub fn field(&self) -> Feature {
        match self {
            ValidationError::Missing(f) | ValidationError::NotFinite(f) => *f,
            ValidationError::NotNumeric { field, .. } => *field,
        }
    }
}

/// Every field problem found in one submission, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn message_for(&self, feature: Feature) -> Option<String> {
        self.0
            .iter()
            .find(|e| e.field() == feature)
            .map(ToString::to_string)
    }
}

impl std::error::Error for ValidationErrors {}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

pub fn parse_submission(fields: &HashMap<String, String>) -> Result<Submission, ValidationErrors> {
    let name = resolve_name(fields.get("name").map(String::as_str));

    let mut readings = FeatureVector::default();
    let mut errors = Vec::new();
    for feature in Feature::ALL {
        match parse_reading(feature, fields.get(feature.key()).map(String::as_str)) {
            Ok(value) => readings[feature] = value,
            Err(err) => errors.push(err),
        }
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }
    Ok(Submission { name, readings })
}

pub fn parse_reading(feature: Feature, raw: Option<&str>) -> Result<f64, ValidationError> {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return Err(ValidationError::Missing(feature));
    }
    let value: f64 = raw.parse().map_err(|_| ValidationError::NotNumeric {
        field: feature,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(ValidationError::NotFinite(feature));
    }
    Ok(value)
}

pub fn resolve_name(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => DEFAULT_NAME.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/form.rs"]
mod tests;
