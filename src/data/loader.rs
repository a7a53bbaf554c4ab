//! CSV Data Loader Module
//! Reads the GDP and development tables using Polars.

use crate::config::DashboardConfig;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("CSV file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// The two source tables of one run.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub gdp: DataFrame,
    pub development: DataFrame,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row.
    pub fn load_csv(file_path: impl AsRef<Path>) -> Result<DataFrame, LoaderError> {
        let file_path = file_path.as_ref();
        if !file_path.is_file() {
            return Err(LoaderError::FileNotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        info!(
            "loaded {} ({} rows, {} columns)",
            file_path.display(),
            df.height(),
            df.width()
        );
        Ok(df)
    }

    /// Load both tables named by the config. Either failure is fatal.
    pub fn load_all(config: &DashboardConfig) -> Result<SourceTables, LoaderError> {
        let gdp = Self::load_csv(config.gdp_path())?;
        let development = Self::load_csv(config.development_path())?;
        Ok(SourceTables { gdp, development })
    }

    /// Get list of column names of a DataFrame.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_is_reported_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");
        match DataLoader::load_csv(&path) {
            Err(LoaderError::FileNotFound(p)) => assert_eq!(p, path),
            other => panic!("expected FileNotFound, got {:?}", other.map(|df| df.shape())),
        }
    }

    #[test]
    fn loads_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gdp.csv");
        fs::write(
            &path,
            "Sr.No,Country,1970,1971\n1,Aland,100,150\n2,\"Bora, Rep.\",200,\n",
        )
        .unwrap();

        let df = DataLoader::load_csv(&path).unwrap();
        assert_eq!(df.shape(), (2, 4));
        assert_eq!(
            DataLoader::get_columns(&df),
            vec!["Sr.No", "Country", "1970", "1971"]
        );
        let countries: Vec<Option<&str>> =
            df.column("Country").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(countries, vec![Some("Aland"), Some("Bora, Rep.")]);
        assert_eq!(df.column("1971").unwrap().null_count(), 1);
    }

    #[test]
    fn load_all_fails_when_development_file_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gdp_per_capita.csv"), "Sr.No,Country,1970\n1,A,1\n").unwrap();
        let config = DashboardConfig {
            data_dir: dir.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        assert!(matches!(
            DataLoader::load_all(&config),
            Err(LoaderError::FileNotFound(_))
        ));
    }
}
