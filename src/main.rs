//! GDP Dashboard - Country GDP and Development Data Analysis
//!
//! Loads the GDP and development tables, runs the analysis and shows the
//! results in a native window.

mod gui;

use anyhow::{anyhow, Context, Result};
use eframe::egui;
use gdp_dashboard::config::DEFAULT_CONFIG_FILE;
use gdp_dashboard::{AnalysisRun, DashboardConfig};
use gui::DashboardApp;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let config = DashboardConfig::load_or_default(DEFAULT_CONFIG_FILE)?;

    // The first run happens before the window opens; missing or unreadable
    // data aborts here.
    let run = AnalysisRun::execute(&config, None).with_context(|| {
        format!(
            "failed to analyse {} and {}",
            config.gdp_path().display(),
            config.development_path().display()
        )
    })?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Country GDP and Development Data Analysis"),
        ..Default::default()
    };

    eframe::run_native(
        "GDP Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config, run)))),
    )
    .map_err(|e| anyhow!("window error: {}", e))
}
