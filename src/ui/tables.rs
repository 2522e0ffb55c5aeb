use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use project_lens::data::model::Table;
use project_lens::state::AppState;

const TABLE_HEIGHT: f32 = 360.0;
const ROW_HEIGHT: f32 = 20.0;

// ---------------------------------------------------------------------------
// Central panel – filtered tables
// ---------------------------------------------------------------------------

/// Two rows of tables: project details + tasks, then goals + stakeholders.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(view) = &state.view else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a workbook to view projects  (File → Open workbook…)");
        });
        return;
    };

    ui.heading(format!("📊 {}", view.name));
    ui.separator();

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        ui.columns(2, |cols| {
            titled_table(&mut cols[0], "Project Details", &view.project_details());
            titled_table(&mut cols[1], "Tasks Details", &view.tasks);
        });
        ui.add_space(12.0);
        ui.columns(3, |cols| {
            titled_table(&mut cols[0], "Goals", &view.goals);
            titled_table(&mut cols[1], "Stakeholders Details", &view.stakeholders.details);
            titled_table(&mut cols[2], "Stakeholders Projects", &view.stakeholders.linked);
        });
    });
}

fn titled_table(ui: &mut Ui, title: &str, table: &Table) {
    ui.strong(format!("{title} ({})", table.len()));
    ui.push_id(title, |ui: &mut Ui| data_table(ui, table));
}

/// Render any [`Table`] as a scrollable grid.
pub fn data_table(ui: &mut Ui, table: &Table) {
    if table.columns.is_empty() {
        ui.weak("No data.");
        return;
    }

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(TABLE_HEIGHT)
            .columns(Column::auto().at_least(60.0).clip(true), table.columns.len())
            .header(ROW_HEIGHT, |mut header| {
                for name in &table.columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let cells = &table.rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.add(egui::Label::new(cell.to_string()).truncate());
                        });
                    }
                });
            });
    });
}
