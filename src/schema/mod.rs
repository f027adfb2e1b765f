use std::fmt;
use std::ops::{Index, IndexMut};

use serde::ser::{Serialize, SerializeMap, Serializer};

pub const FEATURE_COUNT: usize = 10;

/// One input field of the health model.
///
/// The declaration order is the model's input order: `Feature::ALL[i]` is the
/// i-th column of every vector the predictor sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    RespirationRate,
    CarbsIntake,
    WaterIntake,
    Radiation,
    BloodPressureSys,
    OxygenLevel,
    SleepHours,
    BloodPressureDia,
    CabinTemperature,
    MoodScore,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::RespirationRate,
        Feature::CarbsIntake,
        Feature::WaterIntake,
        Feature::Radiation,
        Feature::BloodPressureSys,
        Feature::OxygenLevel,
        Feature::SleepHours,
        Feature::BloodPressureDia,
        Feature::CabinTemperature,
        Feature::MoodScore,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used by the form, the reference dataset and the model artifact.
    pub fn key(self) -> &'static str {
        match self {
            Feature::RespirationRate => "respiration_rate",
            Feature::CarbsIntake => "carbs_intake",
            Feature::WaterIntake => "water_intake",
            Feature::Radiation => "radiation",
            Feature::BloodPressureSys => "blood_pressure_sys",
            Feature::OxygenLevel => "oxygen_level",
            Feature::SleepHours => "sleep_hours",
            Feature::BloodPressureDia => "blood_pressure_dia",
            Feature::CabinTemperature => "cabin_temperature",
            Feature::MoodScore => "mood_score",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::RespirationRate => "Respiration rate",
            Feature::CarbsIntake => "Carbohydrate intake",
            Feature::WaterIntake => "Water intake",
            Feature::Radiation => "Radiation exposure",
            Feature::BloodPressureSys => "Blood pressure (systolic)",
            Feature::OxygenLevel => "Oxygen level",
            Feature::SleepHours => "Sleep",
            Feature::BloodPressureDia => "Blood pressure (diastolic)",
            Feature::CabinTemperature => "Cabin temperature",
            Feature::MoodScore => "Mood score",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Feature::RespirationRate => "breaths/min",
            Feature::CarbsIntake => "g",
            Feature::WaterIntake => "L",
            Feature::Radiation => "mSv",
            Feature::BloodPressureSys | Feature::BloodPressureDia => "mmHg",
            Feature::OxygenLevel => "%",
            Feature::SleepHours => "h",
            Feature::CabinTemperature => "°C",
            Feature::MoodScore => "1-10",
        }
    }

    pub fn from_key(key: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Names in model input order.
pub fn feature_keys() -> [&'static str; FEATURE_COUNT] {
    Feature::ALL.map(Feature::key)
}

/// A value per schema feature, stored in schema order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn from_fn(f: impl FnMut(Feature) -> f64) -> Self {
        Self::new(Feature::ALL.map(f))
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(|f| (f, self.0[f.index()]))
    }

    /// Element-wise `self - other`.
    pub fn minus(&self, other: &FeatureVector) -> FeatureVector {
        FeatureVector::from_fn(|f| self.get(f) - other.get(f))
    }
}

impl Index<Feature> for FeatureVector {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.0[feature.index()]
    }
}

impl IndexMut<Feature> for FeatureVector {
    fn index_mut(&mut self, feature: Feature) -> &mut f64 {
        &mut self.0[feature.index()]
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.key(), &value)?;
        }
        map.end()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/schema/tests.rs"]
mod tests;
