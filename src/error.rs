//! Error values shared across the report pipeline.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors produced while loading the dataset, aggregating insights, or
/// rendering the final document.
///
/// None of these are recovered from: the binary prints the error together
/// with its source chain and exits nonzero.
#[derive(Debug)]
pub enum ReportError {
    /// The dataset could not be read or a required column was unusable.
    Dataset(polars::error::PolarsError),
    /// A required numeric column is absent from the dataset.
    MissingColumn(String),
    /// A grouping dimension has neither a plain categorical column nor any
    /// one-hot encoded columns. Unlike the single-value mode lookups, group
    /// summaries have no hard-coded fallback.
    MissingCategorical(String),
    /// The model metrics file exists but could not be read.
    MetricsIo(PathBuf, io::Error),
    /// The model metrics file exists but is not valid TOML.
    MetricsParse(PathBuf, toml::de::Error),
    /// The bundled report fonts could not be loaded.
    FontLoad(genpdf::error::Error),
    /// The document layout engine failed while rendering.
    Render(genpdf::error::Error),
    /// The output file or its parent directories could not be written.
    Write(PathBuf, io::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Dataset(_) => write!(f, "failed to load the dataset"),
            ReportError::MissingColumn(name) => {
                write!(f, "required numeric column '{}' is missing", name)
            }
            ReportError::MissingCategorical(dimension) => write!(
                f,
                "no categorical signal for '{}': neither a plain column nor encoded '{}_*' columns exist",
                dimension, dimension
            ),
            ReportError::MetricsIo(path, _) => {
                write!(f, "failed to read model metrics from {}", path.display())
            }
            ReportError::MetricsParse(path, _) => {
                write!(f, "invalid model metrics file {}", path.display())
            }
            ReportError::FontLoad(_) => write!(f, "failed to load the report fonts"),
            ReportError::Render(_) => write!(f, "failed to render the report document"),
            ReportError::Write(path, _) => {
                write!(f, "failed to write the report to {}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Dataset(err) => Some(err),
            ReportError::MissingColumn(_) | ReportError::MissingCategorical(_) => None,
            ReportError::MetricsIo(_, err) => Some(err),
            ReportError::MetricsParse(_, err) => Some(err),
            ReportError::FontLoad(err) | ReportError::Render(err) => Some(err),
            ReportError::Write(_, err) => Some(err),
        }
    }
}

impl From<polars::error::PolarsError> for ReportError {
    fn from(err: polars::error::PolarsError) -> Self {
        ReportError::Dataset(err)
    }
}
