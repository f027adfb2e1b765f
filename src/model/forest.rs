use serde::Deserialize;

use crate::model::{ModelError, Predictor};
use crate::schema::{FEATURE_COUNT, FeatureVector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Average of tree outputs (random forest).
    Mean,
    /// `base_score + learning_rate * Σ tree` (gradient boosting).
    Sum,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree stored as a flat node array rooted at index 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    fn validate(&self, tree_idx: usize) -> Result<(), ModelError> {
        if self.nodes.is_empty() {
            return Err(ModelError::Invalid(format!("tree {tree_idx} has no nodes")));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree_idx} node {idx} splits on feature {feature}, only {FEATURE_COUNT} exist"
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree_idx} node {idx} has a NaN threshold"
                        )));
                    }
                    // Children must point forward, which also rules out cycles.
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(ModelError::Invalid(format!(
                                "tree {tree_idx} node {idx} has invalid child {child}"
                            )));
                        }
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ModelError::Invalid(format!(
                            "tree {tree_idx} leaf {idx} is not finite"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, x: &[f64]) -> f64 {
        let mut idx = 0usize;
        loop {
            match self.nodes[idx] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
                Node::Leaf { value } => return value,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeEnsemble {
    pub aggregation: Aggregation,
    #[serde(default)]
    pub base_score: f64,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    pub trees: Vec<Tree>,
}

fn default_learning_rate() -> f64 {
    1.0
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Invalid("tree ensemble has no trees".to_string()));
        }
        if !self.base_score.is_finite() || !self.learning_rate.is_finite() {
            return Err(ModelError::Invalid(
                "tree ensemble has non-finite base_score or learning_rate".to_string(),
            ));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx)?;
        }
        Ok(())
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let x = features.as_slice();
        let total: f64 = self.trees.iter().map(|t| t.evaluate(x)).sum();
        Ok(match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => self.base_score + self.learning_rate * total,
        })
    }

    fn describe(&self) -> String {
        let kind = match self.aggregation {
            Aggregation::Mean => "forest",
            Aggregation::Sum => "boosted",
        };
        format!("tree ensemble ({kind}, {} trees)", self.trees.len())
    }
}
