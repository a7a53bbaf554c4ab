//! Chart Viewer Widget
//! Central scrollable panel: raw tables on request, then the three charts.

use egui::{Color32, RichText, ScrollArea};
use gdp_dashboard::charts::{ChartPlotter, HistogramFigure, LineFigure};
use gdp_dashboard::{AnalysisRun, DashboardConfig};
use polars::prelude::*;

const CHART_HEIGHT: f32 = 320.0;
const SECTION_SPACING: f32 = 15.0;

/// Preview of a table: header plus stringified cells.
#[derive(Default, Clone)]
pub struct TablePreview {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

impl TablePreview {
    pub fn from_frame(title: &str, df: &DataFrame, max_rows: usize) -> Self {
        let head = df.head(Some(max_rows));
        let columns = head
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        let rows = (0..head.height())
            .map(|i| {
                head.get_columns()
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(AnyValue::Null) | Err(_) => String::new(),
                        Ok(v) => v.to_string().trim_matches('"').to_string(),
                    })
                    .collect()
            })
            .collect();

        Self {
            title: title.to_string(),
            columns,
            rows,
            total_rows: df.height(),
        }
    }

    fn show(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new(&self.title).size(16.0).strong());
        ui.label(
            RichText::new(format!(
                "{} of {} rows, {} columns",
                self.rows.len(),
                self.total_rows,
                self.columns.len()
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );

        ScrollArea::both()
            .id_salt(&self.title)
            .max_height(260.0)
            .show(ui, |ui| {
                egui::Grid::new(ui.make_persistent_id(format!("table_{}", self.title)))
                    .striped(true)
                    .spacing([10.0, 2.0])
                    .show(ui, |ui| {
                        for name in &self.columns {
                            ui.label(RichText::new(name).strong().size(11.0));
                        }
                        ui.end_row();

                        for row in &self.rows {
                            for cell in row {
                                ui.label(RichText::new(cell).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}

/// Everything the viewer draws for one run.
#[derive(Default)]
pub struct ChartViewer {
    pub gdp_table: TablePreview,
    pub development_table: TablePreview,
    pub correlation: Option<LineFigure>,
    pub histogram: Option<HistogramFigure>,
    pub country: Option<LineFigure>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild all figures from a fresh run.
    pub fn set_run(&mut self, run: &AnalysisRun, config: &DashboardConfig) {
        self.gdp_table =
            TablePreview::from_frame("GDP Per Capita Data", &run.gdp, config.raw_preview_rows);
        self.development_table = TablePreview::from_frame(
            "Country Development Data",
            &run.development,
            config.raw_preview_rows,
        );
        self.correlation = Some(LineFigure::correlation(&run.correlations));
        self.histogram = Some(HistogramFigure::gdp(&run.distribution, config.histogram_bins));
        self.country = run
            .selected_country
            .as_deref()
            .map(|country| LineFigure::country(country, &run.country_series));
    }

    pub fn show(&self, ui: &mut egui::Ui, show_raw_gdp: bool, show_raw_development: bool) {
        ScrollArea::vertical().show(ui, |ui| {
            ui.heading("Country GDP and Development Data Analysis");
            ui.add_space(SECTION_SPACING);

            if show_raw_gdp {
                self.gdp_table.show(ui);
                ui.add_space(SECTION_SPACING);
            }
            if show_raw_development {
                self.development_table.show(ui);
                ui.add_space(SECTION_SPACING);
            }

            ui.label(
                RichText::new("Correlation of GDP and development indicators")
                    .size(16.0)
                    .strong(),
            );
            if let Some(figure) = &self.correlation {
                ChartPlotter::draw_line_figure(ui, figure, CHART_HEIGHT);
            }
            ui.add_space(SECTION_SPACING);

            ui.label(RichText::new("Histogram of GDP Per Capita").size(16.0).strong());
            if let Some(figure) = &self.histogram {
                ChartPlotter::draw_histogram_figure(ui, figure, CHART_HEIGHT);
            }
            ui.add_space(SECTION_SPACING);

            ui.label(RichText::new("GDP Per Capita Over Time").size(16.0).strong());
            match &self.country {
                Some(figure) => ChartPlotter::draw_line_figure(ui, figure, CHART_HEIGHT),
                None => {
                    ui.label(RichText::new("No country available").color(Color32::GRAY));
                }
            }
        });
    }
}
