//! Dataset ingestion and cleaning.
//!
//! The loader reads the repository CSV into raw rows, the cleaner turns
//! those into deduplicated typed records, and the export module writes
//! cleaned records back out in the input column order.

pub mod cleaner;
pub mod export;
pub mod loader;

pub use cleaner::clean;
pub use export::write_cleaned_csv;
pub use loader::load_dataset;

use std::path::PathBuf;
use thiserror::Error;

/// Failure to obtain raw rows from the dataset source.
///
/// Only these errors cross out of the pipeline; field-level problems are
/// absorbed by the cleaner.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read dataset {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset has no header row")]
    MissingHeader,

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(&'static str),
}
