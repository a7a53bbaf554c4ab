//! Dashboard Configuration
//! Input locations and analysis parameters, with optional JSON overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Categorical development indicators correlated against GDP.
pub const CORRELATION_INDICATORS: [&str; 6] = [
    "Region",
    "IncomeGroup",
    "ExternalDebtReportingStatus",
    "CurrencyUnit",
    "SystemOfTrade",
    "LatestPopulationCensus",
];

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for one dashboard run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_dir: PathBuf,
    pub gdp_file: String,
    pub development_file: String,
    /// Identifier columns kept on every melted GDP row.
    pub id_columns: Vec<String>,
    pub indicators: Vec<String>,
    pub histogram_bins: usize,
    /// Rows shown when a raw table is toggled on.
    pub raw_preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            gdp_file: "gdp_per_capita.csv".to_string(),
            development_file: "development_data.csv".to_string(),
            id_columns: vec!["Sr.No".to_string(), "Country".to_string()],
            indicators: CORRELATION_INDICATORS.iter().map(|s| s.to_string()).collect(),
            histogram_bins: 30,
            raw_preview_rows: 100,
        }
    }
}

impl DashboardConfig {
    pub fn gdp_path(&self) -> PathBuf {
        self.data_dir.join(&self.gdp_file)
    }

    pub fn development_path(&self) -> PathBuf {
        self.data_dir.join(&self.development_file)
    }

    /// Parse a (possibly partial) JSON config; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_fixed_data_files() {
        let config = DashboardConfig::default();
        assert_eq!(config.gdp_path(), PathBuf::from("data/gdp_per_capita.csv"));
        assert_eq!(
            config.development_path(),
            PathBuf::from("data/development_data.csv")
        );
        assert_eq!(config.indicators.len(), 6);
        assert_eq!(config.histogram_bins, 30);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let config =
            DashboardConfig::from_json_str(r#"{"data_dir": "fixtures", "histogram_bins": 12}"#)
                .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("fixtures"));
        assert_eq!(config.histogram_bins, 12);
        assert_eq!(config.gdp_file, "gdp_per_capita.csv");
        assert_eq!(config.id_columns, vec!["Sr.No", "Country"]);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = DashboardConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(dir.path().join("absent.json")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
