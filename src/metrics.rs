//! Model evaluation metrics interpolated into the Machine Learning section.
//!
//! These values come from an external modeling step and cannot be derived
//! from the dataset. They live in an explicit record, with the canonical
//! figures as defaults, so the operator updates a small TOML file instead of
//! editing source.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ReportError;

/// Default location of the metrics override file, relative to the working
/// directory. A missing file is not an error; the defaults apply.
pub const DEFAULT_METRICS_PATH: &str = "results/reports/model_metrics.toml";

/// Regression quality scores and feature ranking from the modeling run.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModelMetrics {
    /// R² of the linear regression baseline.
    pub linear_r2: f64,
    /// R² of the random forest model.
    pub forest_r2: f64,
    /// Most important features, ordered by importance.
    pub top_features: Vec<String>,
}

impl Default for ModelMetrics {
    fn default() -> Self {
        ModelMetrics {
            linear_r2: 0.45,
            forest_r2: 0.78,
            top_features: vec![
                "Sales".to_string(),
                "Discount".to_string(),
                "Quantity".to_string(),
            ],
        }
    }
}

impl ModelMetrics {
    /// Loads metrics from `path` when the file exists, otherwise returns the
    /// defaults. A present-but-invalid file is an error.
    pub fn load_or_default(path: &Path) -> Result<ModelMetrics, ReportError> {
        if !path.exists() {
            log::debug!(
                "no metrics file at {}, using default model metrics",
                path.display()
            );
            return Ok(ModelMetrics::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|err| ReportError::MetricsIo(path.to_path_buf(), err))?;
        toml::from_str(&contents).map_err(|err| ReportError::MetricsParse(path.to_path_buf(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_the_canonical_figures() {
        let metrics = ModelMetrics::default();
        assert_eq!(metrics.linear_r2, 0.45);
        assert_eq!(metrics.forest_r2, 0.78);
        assert_eq!(metrics.top_features, ["Sales", "Discount", "Quantity"]);
    }

    #[test]
    fn partial_toml_overlays_defaults() {
        let metrics: ModelMetrics = toml::from_str("forest_r2 = 0.91").unwrap();
        assert_eq!(metrics.linear_r2, 0.45);
        assert_eq!(metrics.forest_r2, 0.91);
        assert_eq!(metrics.top_features, ["Sales", "Discount", "Quantity"]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<ModelMetrics, _> = toml::from_str("rf_r2 = 0.9");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let metrics =
            ModelMetrics::load_or_default(Path::new("does/not/exist/model_metrics.toml")).unwrap();
        assert_eq!(metrics, ModelMetrics::default());
    }
}
