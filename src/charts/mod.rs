//! Charts module - Figure descriptions and chart rendering

mod figure;
mod plotter;

pub use figure::{HistogramFigure, LineFigure, LinePoint, LineSeries, DENSITY_POINTS};
pub use plotter::ChartPlotter;
