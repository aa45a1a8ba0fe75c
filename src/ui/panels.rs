use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;
use crate::ui::plot::to_color32;

// ---------------------------------------------------------------------------
// Left side panel – plot options and data summary
// ---------------------------------------------------------------------------

/// Render the left options panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Plot options");
    ui.separator();

    let folder = state
        .folder
        .as_ref()
        .map(|f| f.display().to_string())
        .unwrap_or_else(|| "No folder selected.".to_string());
    ui.label(RichText::new(folder).weak());

    egui::Grid::new("options_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("Files");
            ui.text_edit_singleline(&mut state.pattern);
            ui.end_row();

            ui.label("Type")
                .on_hover_text("a = superimposed, f = filled envelope, N = moving-average window");
            ui.text_edit_singleline(&mut state.kind_text);
            ui.end_row();

            ui.label("Layout").on_hover_text("Outputs per figure, e.g. 2, 1");
            ui.text_edit_singleline(&mut state.layout_text);
            ui.end_row();

            ui.label("Scale");
            ui.text_edit_singleline(&mut state.scale_text);
            ui.end_row();

            ui.label("Iterations").on_hover_text("Empty or 0 = all");
            ui.text_edit_singleline(&mut state.iters_text);
            ui.end_row();
        });

    ui.add_space(4.0);
    if ui.button("Plot").clicked() {
        state.reload();
    }
    ui.separator();

    summary_table(ui, state);
}

/// Per-output summary of the last run: figure, color and data shape.
fn summary_table(ui: &mut Ui, state: &AppState) {
    let Some(result) = &state.result else {
        ui.label("Nothing plotted yet.");
        return;
    };

    ui.strong(format!("Data shape {:?}", result.data.shape()));

    // Output index → (figure number, position inside the figure).
    let mut placement = Vec::with_capacity(result.outputs.len());
    for (handle, figure) in state.figures.iter() {
        for pos in 0..figure.legend.len() {
            placement.push((handle.0 + 1, pos));
        }
    }

    TableBuilder::new(ui)
        .auto_shrink([false, false])
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("Output");
            });
            header.col(|ui| {
                ui.strong("Figure");
            });
            header.col(|ui| {
                ui.strong("Color");
            });
        })
        .body(|mut body| {
            for (o, name) in result.outputs.iter().enumerate() {
                let Some(&(figure, pos)) = placement.get(o) else {
                    continue;
                };
                let color = state
                    .figures
                    .iter()
                    .nth(figure - 1)
                    .and_then(|(_, f)| f.series.iter().find(|s| s.name() == name))
                    .map(|s| to_color32(s.color()))
                    .unwrap_or(Color32::GRAY);
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(name);
                    });
                    row.col(|ui| {
                        ui.label(format!("{figure} (#{})", pos + 1));
                    });
                    row.col(|ui| {
                        ui.label(RichText::new("■■■").color(color));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Load options…").clicked() {
                open_options_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.result.is_some(), egui::Button::new("Export data…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(result) = &state.result {
            ui.label(format!(
                "{} outputs in {} figures",
                result.outputs.len(),
                result.figures.len()
            ));
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

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open folder of run files")
        .pick_folder();

    if let Some(folder) = folder {
        log::info!("Selected folder {}", folder.display());
        state.folder = Some(folder);
        state.reload();
    }
}

pub fn open_options_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Load plot options")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match state.load_options(&path) {
            Ok(()) => {
                state.status_message = None;
                if state.folder.is_some() {
                    state.reload();
                }
            }
            Err(e) => {
                log::error!("Failed to load options: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export derived data")
        .add_filter("JSON", &["json"])
        .set_file_name("derived.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export(&path) {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
