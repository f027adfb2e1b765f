use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

pub mod dataset;
pub mod form;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("reference dataset has no column `{0}`")]
    MissingColumn(&'static str),
    #[error("reference dataset line {line}: column `{column}` value {value:?} is not a number")]
    BadCell {
        line: u64,
        column: &'static str,
        value: String,
    },
    #[error("reference dataset column `{0}` has no values")]
    EmptyColumn(&'static str),
}

/// Opens `path` for buffered reading, decompressing on the fly when it ends in `.gz`.
pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
