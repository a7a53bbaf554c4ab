//! Control Panel Widget
//! Left side panel with the raw-data toggles and the country selector.

use egui::{Color32, ComboBox, RichText};

/// Selections that drive a run.
#[derive(Default, Clone)]
pub struct UserSettings {
    pub show_raw_gdp: bool,
    pub show_raw_development: bool,
    pub selected_country: String,
}

/// Left side control panel.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub countries: Vec<String>,
    pub status: String,
    pub status_is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            countries: Vec::new(),
            status: "Ready".to_string(),
            status_is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refresh the selector after a run. The run decides the effective country.
    pub fn update_countries(&mut self, countries: Vec<String>, selected: Option<&str>) {
        self.countries = countries;
        self.settings.selected_country = selected.unwrap_or_default().to_string();
    }

    pub fn set_status(&mut self, status: &str, is_error: bool) {
        self.status = status.to_string();
        self.status_is_error = is_error;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌍 GDP & Development")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Raw Data Section =====
        ui.label(RichText::new("📁 Raw Data").size(14.0).strong());
        ui.add_space(5.0);
        if ui
            .checkbox(&mut self.settings.show_raw_gdp, "Show raw GDP data")
            .changed()
        {
            action = ControlPanelAction::Rerun;
        }
        if ui
            .checkbox(
                &mut self.settings.show_raw_development,
                "Show raw Development data",
            )
            .changed()
        {
            action = ControlPanelAction::Rerun;
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Country Section =====
        ui.label(RichText::new("📈 Country").size(14.0).strong());
        ui.add_space(5.0);

        let previous = self.settings.selected_country.clone();
        ComboBox::from_label("Select a country")
            .selected_text(self.settings.selected_country.as_str())
            .width(220.0)
            .show_ui(ui, |ui| {
                for country in &self.countries {
                    ui.selectable_value(
                        &mut self.settings.selected_country,
                        country.clone(),
                        country.as_str(),
                    );
                }
            });
        if self.settings.selected_country != previous {
            action = ControlPanelAction::Rerun;
        }

        ui.add_space(10.0);
        ui.separator();

        let color = if self.status_is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(color));

        action
    }
}

/// Actions from control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    Rerun,
}
