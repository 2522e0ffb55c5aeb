mod app;
mod ui;

use app::ProjectLensApp;
use eframe::egui;
use project_lens::config::Config;

fn main() -> eframe::Result {
    env_logger::init();

    let (config, config_error) = match Config::load() {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            log::error!("Invalid configuration, using defaults: {e}");
            (Config::default(), Some(e.to_string()))
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Project Lens – Project Management Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(ProjectLensApp::new(config, config_error)))),
    )
}
