//! Stats module - correlation and distribution statistics

mod calculator;
mod histogram;

pub use calculator::{CorrelationPoint, CorrelationSeries, StatsCalculator, StatsError};
pub use histogram::Histogram;
