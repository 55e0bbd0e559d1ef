//! Loading the cleaned Superstore dataset.

use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;

use crate::error::ReportError;

/// Default location of the cleaned dataset, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/processed/cleaned_superstore_data.csv";

/// Reads the CSV at `path` into a [`DataFrame`].
///
/// Headers are taken from the first row and column types are inferred. There
/// is no schema validation here; downstream aggregation checks for the
/// columns it needs.
pub fn load_csv(path: &Path) -> Result<DataFrame, ReportError> {
    let pl_path = PlPath::Local(Arc::from(path));
    let df = LazyCsvReader::new(pl_path)
        .with_has_header(true)
        .finish()?
        .collect()?;
    log::debug!(
        "loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}
