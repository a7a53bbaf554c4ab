//! Country GDP and Development Data Analysis
//!
//! Loads per-country GDP-per-capita and development indicator tables, joins
//! them and derives the views shown by the dashboard.

pub mod charts;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod stats;

pub use config::DashboardConfig;
pub use pipeline::{AnalysisRun, PipelineError};
