use std::path::Path;

use crate::input::{InputError, open_maybe_gz};
use crate::schema::{FEATURE_COUNT, Feature};

/// Cell spellings read as a missing value, matching the pandas `read_csv` defaults.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_na(raw: &str) -> bool {
    NA_TOKENS.contains(&raw)
}

/// Schema columns pulled out of the reference CSV. Other columns are dropped.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    pub rows: usize,
    pub columns: [Vec<f64>; FEATURE_COUNT],
}

impl ReferenceDataset {
    pub fn column(&self, feature: Feature) -> &[f64] {
        &self.columns[feature.index()]
    }
}

pub fn load_reference_dataset(path: &Path) -> Result<ReferenceDataset, InputError> {
    let reader = open_maybe_gz(path)?;
    let dataset = read_reference_dataset(reader)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.rows,
        "loaded reference dataset"
    );
    Ok(dataset)
}

pub fn read_reference_dataset<R: std::io::Read>(reader: R) -> Result<ReferenceDataset, InputError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let mut positions = [0usize; FEATURE_COUNT];
    for feature in Feature::ALL {
        positions[feature.index()] = headers
            .iter()
            .position(|h| h == feature.key())
            .ok_or(InputError::MissingColumn(feature.key()))?;
    }

    let mut columns: [Vec<f64>; FEATURE_COUNT] = Default::default();
    let mut rows = 0usize;
    let mut skipped = 0usize;
    for record in rdr.records() {
        let record = record?;
        rows += 1;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        for feature in Feature::ALL {
            let raw = record.get(positions[feature.index()]).unwrap_or("");
            if is_na(raw) {
                skipped += 1;
                continue;
            }
            let value: f64 = raw.parse().map_err(|_| InputError::BadCell {
                line,
                column: feature.key(),
                value: raw.to_string(),
            })?;
            if value.is_nan() {
                skipped += 1;
                continue;
            }
            columns[feature.index()].push(value);
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "reference dataset has missing cells; they are left out of the averages");
    }
    for feature in Feature::ALL {
        if columns[feature.index()].is_empty() {
            return Err(InputError::EmptyColumn(feature.key()));
        }
    }

    Ok(ReferenceDataset { rows, columns })
}
