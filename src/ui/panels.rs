use std::path::{Path, PathBuf};

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use project_lens::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – source and project selection
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Source");
    ui.separator();

    let current = state.current_source().map(Path::to_path_buf);
    let mut picked: Option<PathBuf> = None;
    egui::ComboBox::from_id_salt("source")
        .selected_text(current.as_deref().map(source_label).unwrap_or_default())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for path in &state.sources {
                let selected = current.as_deref() == Some(path.as_path());
                if ui.selectable_label(selected, source_label(path)).clicked() {
                    picked = Some(path.clone());
                }
            }
        });
    if ui.small_button("Rescan").clicked() {
        state.refresh_sources();
        state.reload();
    }
    if let Some(path) = picked {
        state.set_source(&path);
    }

    ui.add_space(8.0);
    ui.heading("Select a Project");
    ui.separator();

    if state.loaded.is_none() {
        ui.label("No source loaded.");
        return;
    }

    let names = state.project_names.clone();
    let selected = state.selected_project.clone().unwrap_or_default();
    let mut chosen: Option<String> = None;
    egui::ComboBox::from_id_salt("project")
        .selected_text(&selected)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for name in &names {
                if ui.selectable_label(*name == selected, name).clicked() {
                    chosen = Some(name.clone());
                }
            }
        });
    if let Some(name) = chosen {
        state.select_project(&name);
    }

    ui.add_space(8.0);
    summary_cards(ui, state);

    let diagnostics = state.diagnostics();
    if !diagnostics.is_empty() {
        ui.add_space(8.0);
        egui::CollapsingHeader::new(RichText::new(format!("Problems ({})", diagnostics.len())).strong())
            .default_open(true)
            .show(ui, |ui: &mut Ui| {
                ScrollArea::vertical().max_height(200.0).show(ui, |ui: &mut Ui| {
                    for d in &diagnostics {
                        ui.label(RichText::new(d).color(Color32::from_rgb(200, 120, 0)));
                    }
                });
            });
    }
}

fn summary_cards(ui: &mut Ui, state: &AppState) {
    let summary = state.summary();
    ui.horizontal(|ui: &mut Ui| {
        card(ui, "Projects", summary.project_count);
        card(ui, "Resources", summary.resource_count);
    });
}

fn card(ui: &mut Ui, title: &str, value: usize) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label(title);
            ui.label(RichText::new(value.to_string()).size(24.0).strong());
        });
    });
}

fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open workbook…").clicked() {
                open_workbook_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open sheet folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(path) = state.current_source() {
            ui.label(path.display().to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_workbook_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open project workbook")
        .set_directory(&state.config.data_dir)
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .pick_file();

    if let Some(path) = file {
        log::info!("Opening {}", path.display());
        state.set_source(&path);
    }
}

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open folder of sheet files")
        .set_directory(&state.config.data_dir)
        .pick_folder();

    if let Some(path) = folder {
        log::info!("Opening {}", path.display());
        state.set_source(&path);
    }
}
