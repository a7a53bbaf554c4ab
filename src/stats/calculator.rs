//! Statistics Calculator Module
//! Pearson correlation of GDP against encoded indicators, grouped by year.

use crate::data::{GDP_COL, YEAR_COL};
use polars::prelude::*;
use statrs::statistics::Statistics;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Column not found: {0}")]
    MissingColumn(String),
}

/// |r| for one year; `None` when the correlation is undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationPoint {
    pub year: String,
    pub correlation: Option<f64>,
}

/// Yearly |r| between GDP and one indicator, in ascending year order.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationSeries {
    pub indicator: String,
    pub points: Vec<CorrelationPoint>,
}

impl CorrelationSeries {
    pub fn defined_count(&self) -> usize {
        self.points.iter().filter(|p| p.correlation.is_some()).count()
    }
}

/// Handles statistical calculations over the merged table.
pub struct StatsCalculator;

impl StatsCalculator {
    fn is_constant(values: &[f64]) -> bool {
        values.iter().all(|v| *v == values[0])
    }

    /// Pearson correlation coefficient of two equally long samples.
    ///
    /// Undefined (`None`) for fewer than two observations or when either
    /// sample has zero variance.
    pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }
        if Self::is_constant(x) || Self::is_constant(y) {
            return None;
        }

        let var_x = x.iter().variance();
        let var_y = y.iter().variance();
        if !(var_x > 0.0 && var_y > 0.0) {
            return None;
        }

        let r = x.iter().covariance(y.iter()) / (var_x.sqrt() * var_y.sqrt());
        r.is_finite().then(|| r.clamp(-1.0, 1.0))
    }

    fn float_column(df: &DataFrame, name: &str) -> Result<Column, StatsError> {
        let column = df
            .column(name)
            .map_err(|_| StatsError::MissingColumn(name.to_string()))?;
        Ok(column.cast(&DataType::Float64)?)
    }

    /// Absolute correlation between GDP and one indicator for every year.
    ///
    /// Only rows where both GDP and the indicator are present take part.
    /// Years without enough usable rows still appear, with `None`.
    pub fn yearly_correlation(
        merged: &DataFrame,
        indicator: &str,
    ) -> Result<CorrelationSeries, StatsError> {
        let years = merged
            .column(YEAR_COL)
            .map_err(|_| StatsError::MissingColumn(YEAR_COL.to_string()))?
            .cast(&DataType::String)?;
        let gdp = Self::float_column(merged, GDP_COL)?;
        let codes = Self::float_column(merged, indicator)?;

        let mut groups: BTreeMap<&str, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
        for ((year, g), c) in years
            .str()?
            .into_iter()
            .zip(gdp.f64()?.into_iter())
            .zip(codes.f64()?.into_iter())
        {
            let Some(year) = year else {
                continue;
            };
            let (xs, ys) = groups.entry(year).or_default();
            if let (Some(g), Some(c)) = (g, c) {
                if !g.is_nan() && !c.is_nan() {
                    xs.push(g);
                    ys.push(c);
                }
            }
        }

        let points = groups
            .into_iter()
            .map(|(year, (xs, ys))| CorrelationPoint {
                year: year.to_string(),
                correlation: Self::pearson(&xs, &ys).map(|r| r.abs().min(1.0)),
            })
            .collect();

        Ok(CorrelationSeries {
            indicator: indicator.to_string(),
            points,
        })
    }

    /// One correlation series per indicator, in indicator order.
    pub fn yearly_correlations(
        merged: &DataFrame,
        indicators: &[String],
    ) -> Result<Vec<CorrelationSeries>, StatsError> {
        indicators
            .iter()
            .map(|indicator| {
                let series = Self::yearly_correlation(merged, indicator)?;
                debug!(
                    "{}: {} of {} years defined",
                    indicator,
                    series.defined_count(),
                    series.points.len()
                );
                Ok(series)
            })
            .collect()
    }
}
