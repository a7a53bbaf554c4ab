//! Analysis Pipeline
//! One synchronous load → encode → melt → join → correlate pass.

use crate::config::DashboardConfig;
use crate::data::{
    CategoryEncoding, DataLoader, DataProcessor, LoaderError, ProcessorError, YearValue,
};
use crate::stats::{CorrelationSeries, StatsCalculator, StatsError};
use polars::prelude::*;
use thiserror::Error;
use tracing::{info, info_span};

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error(transparent)]
    Stats(#[from] StatsError),
}

/// Every table and derived view produced by one run.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub gdp: DataFrame,
    pub development: DataFrame,
    pub encodings: Vec<CategoryEncoding>,
    pub merged: DataFrame,
    pub correlations: Vec<CorrelationSeries>,
    pub distribution: Vec<f64>,
    pub countries: Vec<String>,
    pub selected_country: Option<String>,
    pub country_series: Vec<YearValue>,
}

impl AnalysisRun {
    /// Run the whole pipeline from the source files.
    ///
    /// `selected_country` falls back to the first country when absent or no
    /// longer present in the GDP table.
    pub fn execute(
        config: &DashboardConfig,
        selected_country: Option<&str>,
    ) -> Result<Self, PipelineError> {
        let _span = info_span!("analysis_run").entered();

        let sources = DataLoader::load_all(config)?;
        DataProcessor::warn_on_duplicate_countries(&sources.gdp, "GDP")?;
        DataProcessor::warn_on_duplicate_countries(&sources.development, "development")?;

        let encoded = DataProcessor::encode_categoricals(&sources.development, &config.indicators)?;
        let melted = DataProcessor::melt_years(&sources.gdp, &config.id_columns)?;
        let merged = DataProcessor::join_on_country(&melted, &encoded.frame)?;
        let correlations = StatsCalculator::yearly_correlations(&merged, &config.indicators)?;
        let distribution = DataProcessor::gdp_distribution(&sources.gdp)?;
        let countries = DataProcessor::countries(&sources.gdp)?;

        let selected_country = selected_country
            .filter(|c| countries.iter().any(|known| known.as_str() == *c))
            .map(str::to_string)
            .or_else(|| countries.first().cloned());
        let country_series = match &selected_country {
            Some(country) => DataProcessor::country_series(&sources.gdp, country)?,
            None => Vec::new(),
        };

        info!(
            "run complete: {} merged rows, {} indicators, {} GDP values, {} countries",
            merged.height(),
            correlations.len(),
            distribution.len(),
            countries.len()
        );

        Ok(Self {
            gdp: sources.gdp,
            development: encoded.frame,
            encodings: encoded.encodings,
            merged,
            correlations,
            distribution,
            countries,
            selected_country,
            country_series,
        })
    }
}
