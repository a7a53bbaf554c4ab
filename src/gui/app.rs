//! Dashboard Main Application
//! Main window with control panel and chart viewer. Every interaction reruns
//! the full analysis synchronously.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use egui::SidePanel;
use gdp_dashboard::{AnalysisRun, DashboardConfig};
use tracing::{error, info};

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    /// Build the window around a completed first run.
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        run: AnalysisRun,
    ) -> Self {
        let mut app = Self {
            config,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        app.apply_run(&run);
        app
    }

    fn apply_run(&mut self, run: &AnalysisRun) {
        self.chart_viewer.set_run(run, &self.config);
        self.control_panel
            .update_countries(run.countries.clone(), run.selected_country.as_deref());
        self.control_panel.set_status(
            &format!(
                "{} countries, {} merged rows",
                run.countries.len(),
                run.merged.height()
            ),
            false,
        );
    }

    /// Re-execute load → encode → melt → join → correlate with the current
    /// selections. A failed run keeps the previous charts.
    fn rerun(&mut self) {
        let selected = self.control_panel.settings.selected_country.clone();
        info!("rerun (country: {})", selected);

        match AnalysisRun::execute(&self.config, Some(selected.as_str())) {
            Ok(run) => self.apply_run(&run),
            Err(e) => {
                error!("analysis run failed: {}", e);
                self.control_panel
                    .set_status(&format!("Error: {}", e), true);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::Rerun => self.rerun(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        let settings = &self.control_panel.settings;
        let (show_gdp, show_development) =
            (settings.show_raw_gdp, settings.show_raw_development);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, show_gdp, show_development);
        });
    }
}
