use serde::Serialize;

use crate::pipeline::baseline::Baseline;
use crate::pipeline::history::PredictionRecord;
use crate::schema::Feature;

#[derive(Debug, Serialize)]
pub struct FeatureMean {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub mean: f64,
}

#[derive(Debug, Serialize)]
pub struct BaselineSummary {
    pub rows: usize,
    pub features: Vec<FeatureMean>,
}

#[derive(Debug, Serialize)]
pub struct HistoryPage {
    pub count: usize,
    pub capacity: Option<usize>,
    pub records: Vec<PredictionRecord>,
}

pub fn baseline_summary(baseline: &Baseline) -> BaselineSummary {
    BaselineSummary {
        rows: baseline.rows,
        features: Feature::ALL
            .into_iter()
            .map(|f| FeatureMean {
                key: f.key(),
                label: f.label(),
                unit: f.unit(),
                mean: baseline.mean(f),
            })
            .collect(),
    }
}

pub fn history_page(records: Vec<PredictionRecord>, capacity: Option<usize>) -> HistoryPage {
    HistoryPage {
        count: records.len(),
        capacity,
        records,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
