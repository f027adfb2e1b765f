use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Optimal,
    Stable,
    AtRisk,
}

impl HealthStatus {
    pub fn label(self) -> &'static str {
        match self {
            HealthStatus::Optimal => "Optimal",
            HealthStatus::Stable => "Stable",
            HealthStatus::AtRisk => "At risk",
        }
    }
}

/// Score cut-offs on the nominal 0-100 health scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusThresholds {
    pub optimal_min: f64,
    pub stable_min: f64,
}

impl StatusThresholds {
    pub fn default_v1() -> Self {
        Self {
            optimal_min: 80.0,
            stable_min: 60.0,
        }
    }

    pub fn classify(&self, score: f64) -> HealthStatus {
        if score >= self.optimal_min {
            HealthStatus::Optimal
        } else if score >= self.stable_min {
            HealthStatus::Stable
        } else {
            HealthStatus::AtRisk
        }
    }
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self::default_v1()
    }
}
