//! Figure Module
//! Chart descriptions built from analysis results. Each figure is an
//! independent value; the plotter draws exactly what it is handed.

use crate::data::YearValue;
use crate::stats::{CorrelationSeries, Histogram};

/// Points evaluated along the density overlay.
pub const DENSITY_POINTS: usize = 200;

/// One x position of a line series. `y` is `None` for a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub label: String,
    pub x: f64,
    pub y: Option<f64>,
}

/// A named line with optional gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<LinePoint>,
}

impl LineSeries {
    /// Build a series from year-labelled values. Years that do not parse as
    /// numbers fall back to their position.
    pub fn from_years<'a>(
        name: &str,
        values: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    ) -> Self {
        let points = values
            .into_iter()
            .enumerate()
            .map(|(i, (year, y))| LinePoint {
                label: year.to_string(),
                x: year.parse::<f64>().unwrap_or(i as f64),
                y,
            })
            .collect();
        Self {
            name: name.to_string(),
            points,
        }
    }

    /// Contiguous runs of defined points, split at every gap.
    pub fn segments(&self) -> Vec<Vec<[f64; 2]>> {
        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::new();

        for point in &self.points {
            match point.y {
                Some(y) if y.is_finite() => current.push([point.x, y]),
                _ => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    /// All defined points, for markers.
    pub fn markers(&self) -> Vec<[f64; 2]> {
        self.segments().into_iter().flatten().collect()
    }
}

/// Multi-series line chart over years.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFigure {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<LineSeries>,
    pub show_legend: bool,
}

impl LineFigure {
    /// |r| of every indicator against GDP, one line per indicator.
    pub fn correlation(correlations: &[CorrelationSeries]) -> Self {
        let series = correlations
            .iter()
            .map(|c| {
                LineSeries::from_years(
                    &c.indicator,
                    c.points.iter().map(|p| (p.year.as_str(), p.correlation)),
                )
            })
            .collect();

        Self {
            id: "correlation_over_time".to_string(),
            title: "Correlation Between Different Indicators and GDP Over Time".to_string(),
            x_label: "Year".to_string(),
            y_label: "Correlation".to_string(),
            series,
            show_legend: true,
        }
    }

    /// GDP per capita of one country.
    pub fn country(country: &str, values: &[YearValue]) -> Self {
        let series = LineSeries::from_years(
            country,
            values.iter().map(|v| (v.year.as_str(), v.value)),
        );

        Self {
            id: "country_gdp".to_string(),
            title: format!("GDP Per Capita of {}", country),
            x_label: "Year".to_string(),
            y_label: "GDP Per Capita".to_string(),
            series: vec![series],
            show_legend: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.markers().is_empty())
    }
}

/// Histogram with a density overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramFigure {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub histogram: Histogram,
    pub density: Vec<[f64; 2]>,
}

impl HistogramFigure {
    pub fn gdp(values: &[f64], bins: usize) -> Self {
        let histogram = Histogram::from_values(values, bins);
        let density = histogram.density_curve(values, DENSITY_POINTS);

        Self {
            id: "gdp_histogram".to_string(),
            title: "Histogram of GDP Per Capita".to_string(),
            x_label: "GDP Per Capita".to_string(),
            y_label: "Frequency".to_string(),
            histogram,
            density,
        }
    }
}
