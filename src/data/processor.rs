//! Data Processor Module
//! Categorical encoding, wide-to-long reshape, join and derived GDP views.

use polars::prelude::*;
use std::collections::{BTreeSet, HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, warn};

pub const COUNTRY_COL: &str = "Country";
pub const YEAR_COL: &str = "Year";
pub const GDP_COL: &str = "GDP";

/// Code given to a missing category label.
pub const MISSING_CATEGORY_CODE: i32 = -1;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Column not found: {0}")]
    MissingColumn(String),
    #[error("Country not present in GDP data: {0}")]
    UnknownCountry(String),
}

/// One labelled point of a yearly series.
#[derive(Debug, Clone, PartialEq)]
pub struct YearValue {
    pub year: String,
    pub value: Option<f64>,
}

/// Label-to-code mapping of one encoded column. Code `i` is `labels[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryEncoding {
    pub column: String,
    pub labels: Vec<String>,
}

impl CategoryEncoding {
    pub fn code_of(&self, label: &str) -> i32 {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| i as i32)
            .unwrap_or(MISSING_CATEGORY_CODE)
    }
}

/// Development table with its categorical columns replaced by codes.
#[derive(Debug, Clone)]
pub struct EncodedTable {
    pub frame: DataFrame,
    pub encodings: Vec<CategoryEncoding>,
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ProcessorError> {
        df.column(name)
            .map_err(|_| ProcessorError::MissingColumn(name.to_string()))
    }

    /// Encode a single column. Numeric columns sort their labels numerically,
    /// everything else lexically.
    fn encode_column(
        name: &str,
        column: &Column,
    ) -> Result<(CategoryEncoding, Vec<i32>), ProcessorError> {
        if Self::is_numeric(column.dtype()) {
            let values = column.cast(&DataType::Float64)?;
            let ca = values.f64()?;

            let mut distinct: Vec<f64> = ca.into_iter().flatten().filter(|v| !v.is_nan()).collect();
            distinct.sort_by(|a, b| a.total_cmp(b));
            distinct.dedup();

            let codes = ca
                .into_iter()
                .map(|v| match v {
                    Some(v) if !v.is_nan() => distinct
                        .binary_search_by(|probe| probe.total_cmp(&v))
                        .map(|i| i as i32)
                        .unwrap_or(MISSING_CATEGORY_CODE),
                    _ => MISSING_CATEGORY_CODE,
                })
                .collect();

            let labels = distinct.iter().map(|v| v.to_string()).collect();
            Ok((
                CategoryEncoding {
                    column: name.to_string(),
                    labels,
                },
                codes,
            ))
        } else {
            let values = column.cast(&DataType::String)?;
            let ca = values.str()?;

            let distinct: BTreeSet<&str> = ca.into_iter().flatten().collect();
            let lookup: HashMap<&str, i32> = distinct
                .iter()
                .enumerate()
                .map(|(i, label)| (*label, i as i32))
                .collect();

            let codes = ca
                .into_iter()
                .map(|v| {
                    v.and_then(|label| lookup.get(label).copied())
                        .unwrap_or(MISSING_CATEGORY_CODE)
                })
                .collect();

            let labels = distinct.iter().map(|s| s.to_string()).collect();
            Ok((
                CategoryEncoding {
                    column: name.to_string(),
                    labels,
                },
                codes,
            ))
        }
    }

    /// Replace each listed column with integer category codes.
    ///
    /// Returns a new frame; `df` is left untouched. Row order, row count and
    /// unlisted columns are preserved.
    pub fn encode_categoricals(
        df: &DataFrame,
        columns: &[String],
    ) -> Result<EncodedTable, ProcessorError> {
        let mut frame = df.clone();
        let mut encodings = Vec::with_capacity(columns.len());

        for name in columns {
            let column = Self::require_column(df, name)?;
            let (encoding, codes) = Self::encode_column(name, column)?;
            debug!("encoded {} into {} categories", name, encoding.labels.len());
            frame.with_column(Column::new(name.as_str().into(), codes))?;
            encodings.push(encoding);
        }

        Ok(EncodedTable { frame, encodings })
    }

    /// Year columns of a wide table: headers of exactly four ASCII digits, in
    /// column order.
    pub fn year_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit()))
            .collect()
    }

    /// Transform the wide GDP table to long format.
    ///
    /// Output columns: [id_columns..., "Year", "GDP"]. Rows are ordered by
    /// year column first, then by input row.
    pub fn melt_years(df: &DataFrame, id_columns: &[String]) -> Result<DataFrame, ProcessorError> {
        for id in id_columns {
            Self::require_column(df, id)?;
        }

        let years = Self::year_columns(df);
        let capacity = df.height() * years.len();
        let mut take_idx: Vec<IdxSize> = Vec::with_capacity(capacity);
        let mut year_labels: Vec<String> = Vec::with_capacity(capacity);
        let mut gdp: Vec<Option<f64>> = Vec::with_capacity(capacity);

        for year in &years {
            let values = df.column(year)?.cast(&DataType::Float64)?;
            let value_ca = values.f64()?;

            for (row, v) in value_ca.into_iter().enumerate() {
                take_idx.push(row as IdxSize);
                year_labels.push(year.clone());
                gdp.push(v);
            }
        }

        let idx = IdxCa::from_vec("row".into(), take_idx);
        let mut long = df.select(id_columns.iter().map(|s| s.as_str()))?.take(&idx)?;
        long.with_column(Column::new(YEAR_COL.into(), year_labels))?;
        long.with_column(Column::new(GDP_COL.into(), gdp))?;

        debug!(
            "melted {} rows x {} years into {} rows",
            df.height(),
            years.len(),
            long.height()
        );
        Ok(long)
    }

    fn with_string_country(df: &DataFrame) -> Result<DataFrame, ProcessorError> {
        let country = Self::require_column(df, COUNTRY_COL)?.cast(&DataType::String)?;
        let mut out = df.clone();
        out.with_column(country)?;
        Ok(out)
    }

    /// Inner join on exact `Country` equality. Duplicate keys fan out.
    pub fn join_on_country(
        melted: &DataFrame,
        encoded: &DataFrame,
    ) -> Result<DataFrame, ProcessorError> {
        let left = Self::with_string_country(melted)?;
        let right = Self::with_string_country(encoded)?;

        let joined = left
            .lazy()
            .join(
                right.lazy(),
                [col(COUNTRY_COL)],
                [col(COUNTRY_COL)],
                JoinArgs::new(JoinType::Inner),
            )
            .collect()?;

        debug!(
            "joined {} x {} rows into {} rows",
            melted.height(),
            encoded.height(),
            joined.height()
        );
        Ok(joined)
    }

    /// Country values that occur more than once, in first-appearance order.
    pub fn duplicate_countries(df: &DataFrame) -> Result<Vec<String>, ProcessorError> {
        let country = Self::require_column(df, COUNTRY_COL)?.cast(&DataType::String)?;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut order: Vec<&str> = Vec::new();

        for name in country.str()?.into_iter().flatten() {
            let count = counts.entry(name).or_insert(0);
            if *count == 1 {
                order.push(name);
            }
            *count += 1;
        }

        Ok(order.into_iter().map(|s| s.to_string()).collect())
    }

    /// Log duplicated join keys; the join still fans them out.
    pub fn warn_on_duplicate_countries(df: &DataFrame, table: &str) -> Result<(), ProcessorError> {
        let duplicates = Self::duplicate_countries(df)?;
        if !duplicates.is_empty() {
            warn!(
                "{} table has {} duplicated Country values (e.g. {:?}); join rows will fan out",
                table,
                duplicates.len(),
                duplicates.first()
            );
        }
        Ok(())
    }

    /// All non-null GDP values across every year column.
    pub fn gdp_distribution(gdp: &DataFrame) -> Result<Vec<f64>, ProcessorError> {
        let mut values = Vec::new();
        for year in Self::year_columns(gdp) {
            let column = gdp.column(&year)?.cast(&DataType::Float64)?;
            values.extend(column.f64()?.into_iter().flatten().filter(|v| !v.is_nan()));
        }
        Ok(values)
    }

    /// Distinct countries in first-appearance order.
    pub fn countries(gdp: &DataFrame) -> Result<Vec<String>, ProcessorError> {
        let country = Self::require_column(gdp, COUNTRY_COL)?.cast(&DataType::String)?;
        let mut seen = HashSet::new();
        Ok(country
            .str()?
            .into_iter()
            .flatten()
            .filter(|name| seen.insert(*name))
            .map(|name| name.to_string())
            .collect())
    }

    /// GDP values of one country across the year columns, in column order.
    pub fn country_series(
        gdp: &DataFrame,
        country: &str,
    ) -> Result<Vec<YearValue>, ProcessorError> {
        let names = Self::require_column(gdp, COUNTRY_COL)?.cast(&DataType::String)?;
        let row = names
            .str()?
            .into_iter()
            .position(|name| name == Some(country))
            .ok_or_else(|| ProcessorError::UnknownCountry(country.to_string()))?;

        let mut series = Vec::new();
        for year in Self::year_columns(gdp) {
            let column = gdp.column(&year)?.cast(&DataType::Float64)?;
            let value = column.f64()?.get(row).filter(|v| !v.is_nan());
            series.push(YearValue { year, value });
        }
        Ok(series)
    }
}
