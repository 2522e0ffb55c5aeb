use eframe::egui;
use project_lens::config::Config;
use project_lens::state::AppState;

use crate::ui::{panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ProjectLensApp {
    pub state: AppState,
}

impl ProjectLensApp {
    pub fn new(config: Config, config_error: Option<String>) -> Self {
        let mut state = AppState::new(config);
        if let Some(msg) = config_error {
            state.status_message = Some(format!("Config error: {msg}"));
        }
        Self { state }
    }
}

impl eframe::App for ProjectLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: source / project selection ----
        egui::SidePanel::left("selection_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: filtered tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            tables::dashboard(ui, &self.state);
        });
    }
}
