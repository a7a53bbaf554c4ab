//! Chart Plotter Module
//! Draws figures with egui_plot. Every call builds its own `Plot` keyed by the
//! figure id, so charts never share state.

use crate::charts::{HistogramFigure, LineFigure};
use egui::{Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

pub const HISTOGRAM_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue
pub const DENSITY_COLOR: Color32 = Color32::from_rgb(31, 97, 141);

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(31, 119, 180),  // Blue
    Color32::from_rgb(255, 127, 14),  // Orange
    Color32::from_rgb(44, 160, 44),   // Green
    Color32::from_rgb(214, 39, 40),   // Red
    Color32::from_rgb(148, 103, 189), // Purple
    Color32::from_rgb(140, 86, 75),   // Brown
    Color32::from_rgb(227, 119, 194), // Pink
    Color32::from_rgb(127, 127, 127), // Grey
    Color32::from_rgb(188, 189, 34),  // Olive
    Color32::from_rgb(23, 190, 207),  // Cyan
];

/// Creates visualizations from figure descriptions using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn series_color(index: usize) -> Color32 {
        PALETTE[index % PALETTE.len()]
    }

    fn draw_title(ui: &mut egui::Ui, title: &str) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(title).strong().size(14.0));
        });
    }

    /// Draw a multi-series line chart over years. Gaps stay gaps.
    pub fn draw_line_figure(ui: &mut egui::Ui, figure: &LineFigure, height: f32) {
        Self::draw_title(ui, &figure.title);

        if figure.is_empty() {
            ui.label(RichText::new("No data to plot").color(Color32::GRAY));
            return;
        }

        let mut plot = Plot::new(&figure.id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(figure.x_label.as_str())
            .y_axis_label(figure.y_label.as_str())
            .x_axis_formatter(|mark, _range| {
                let v = mark.value;
                if v.fract() == 0.0 {
                    format!("{:.0}", v)
                } else {
                    String::new()
                }
            });
        if figure.show_legend {
            plot = plot.legend(Legend::default());
        }

        plot.show(ui, |plot_ui| {
            for (i, series) in figure.series.iter().enumerate() {
                let color = Self::series_color(i);

                for segment in series.segments() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(segment.iter().copied()))
                            .color(color)
                            .width(1.5)
                            .name(&series.name),
                    );
                }

                plot_ui.points(
                    Points::new(PlotPoints::from_iter(series.markers()))
                        .radius(3.0)
                        .color(color)
                        .name(&series.name),
                );
            }
        });
    }

    /// Draw histogram bars with the density curve on top.
    pub fn draw_histogram_figure(ui: &mut egui::Ui, figure: &HistogramFigure, height: f32) {
        Self::draw_title(ui, &figure.title);

        let histogram = &figure.histogram;
        if histogram.is_empty() {
            ui.label(RichText::new("No data to plot").color(Color32::GRAY));
            return;
        }

        let bars: Vec<Bar> = histogram
            .bin_centers()
            .into_iter()
            .zip(histogram.counts.iter())
            .map(|(center, &count)| Bar::new(center, count as f64).width(histogram.bin_width))
            .collect();

        Plot::new(&figure.id)
            .height(height)
            .allow_scroll(false)
            .x_axis_label(figure.x_label.as_str())
            .y_axis_label(figure.y_label.as_str())
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .color(HISTOGRAM_COLOR.gamma_multiply(0.6))
                        .name("Count"),
                );

                if !figure.density.is_empty() {
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(figure.density.iter().copied()))
                            .color(DENSITY_COLOR)
                            .width(2.0)
                            .name("Density"),
                    );
                }
            });
    }
}
