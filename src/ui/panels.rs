use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use rusty_norm::normalize::{MethodKind, ParamKind, ParamSpec};

use crate::state::{AppState, ParamInputs};

const DATA_EXTENSIONS: [&str; 5] = ["csv", "tsv", "txt", "parquet", "pq"];

// ---------------------------------------------------------------------------
// Left side panel – inputs, columns, method
// ---------------------------------------------------------------------------

/// Render the left normalization panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            input_files(ui, state);
            ui.separator();
            plot_details(ui, state);
            ui.separator();
            method_selector(ui, state);
        });
}

fn input_files(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Input files");

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("Add…").clicked() {
            add_files_dialog(state);
        }
        if ui.small_button("All").clicked() {
            state.set_all_checked(true);
        }
        if ui.small_button("None").clicked() {
            state.set_all_checked(false);
        }
        if ui.small_button("Remove unchecked").clicked() {
            state.remove_unchecked();
        }
    });

    if state.files.is_empty() {
        ui.label("No files added.");
        return;
    }

    for file in &mut state.files {
        let label = file.label();
        ui.checkbox(&mut file.checked, label)
            .on_hover_text(file.path.display().to_string());
    }
}

fn plot_details(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Columns (1-based)");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("X");
        ui.add(egui::DragValue::new(&mut state.x_column).range(1..=1024));
        ui.label("Y");
        ui.add(egui::DragValue::new(&mut state.y_column).range(1..=1024));
    });

    ui.strong("Axis labels");
    ui.horizontal(|ui: &mut Ui| {
        ui.label("X");
        ui.text_edit_singleline(&mut state.x_label);
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Y");
        ui.text_edit_singleline(&mut state.y_label);
    });
}

fn method_selector(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Normalization");

    egui::ComboBox::from_id_salt("method")
        .selected_text(state.method.name())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in MethodKind::ALL {
                ui.selectable_value(&mut state.method, kind, kind.name());
            }
        });

    for spec in state.method.params() {
        param_widget(ui, spec, &mut state.params);
    }

    ui.add_space(4.0);
    let can_apply = state.files.iter().any(|f| f.checked);
    if ui
        .add_enabled(can_apply, egui::Button::new("Apply"))
        .clicked()
    {
        state.apply_normalization();
    }
}

/// One widget per schema entry; values live in [`ParamInputs`].
fn param_widget(ui: &mut Ui, spec: &ParamSpec, inputs: &mut ParamInputs) {
    ui.label(spec.label);
    match spec.kind {
        ParamKind::Interval => {
            let (start, end) = inputs.intervals.entry(spec.name).or_insert((0.0, 0.0));
            ui.horizontal(|ui: &mut Ui| {
                ui.add(egui::DragValue::new(start).speed(0.1).prefix("start "));
                ui.add(egui::DragValue::new(end).speed(0.1).prefix("end "));
            });
        }
        ParamKind::Integer { min } => {
            let value = inputs.integers.entry(spec.name).or_insert(min);
            ui.add(egui::DragValue::new(value).range(min..=i64::MAX));
        }
        ParamKind::File => {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("Choose…").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .set_title(spec.label)
                        .add_filter("Tabular data", &DATA_EXTENSIONS)
                        .pick_file()
                    {
                        inputs.files.insert(spec.name, path);
                    }
                }
                match inputs.files.get(spec.name) {
                    Some(path) => ui.label(path.display().to_string()),
                    None => ui.weak("not set"),
                };
            });
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Add files…").clicked() {
                add_files_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export normalized…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
            if ui.button("Clear files").clicked() {
                state.clear_files();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} file(s), {} selected",
            state.files.len(),
            state.files.iter().filter(|f| f.checked).count()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let text = RichText::new(msg);
            if state.status_is_error {
                ui.label(text.color(Color32::RED));
            } else {
                ui.label(text);
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – per-file diagnostics
// ---------------------------------------------------------------------------

/// Table of the files the last run skipped, and why.
pub fn diagnostics_panel(ui: &mut Ui, state: &AppState) {
    let Some(outcome) = state.store.snapshot() else {
        return;
    };

    ui.strong(format!("Skipped files ({})", outcome.diagnostics.len()));

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder())
        .header(18.0, |mut header| {
            header.col(|ui| {
                ui.strong("File");
            });
            header.col(|ui| {
                ui.strong("Reason");
            });
        })
        .body(|mut body| {
            for diagnostic in &outcome.diagnostics {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(diagnostic.path.display().to_string());
                    });
                    row.col(|ui| {
                        ui.label(diagnostic.failure.to_string());
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn add_files_dialog(state: &mut AppState) {
    let files = rfd::FileDialog::new()
        .set_title("Add data files")
        .add_filter("Tabular data", &DATA_EXTENSIONS)
        .add_filter("CSV", &["csv", "tsv", "txt"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_files();

    if let Some(paths) = files {
        log::info!("Adding {} file(s)", paths.len());
        state.add_files(paths);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let directory = rfd::FileDialog::new()
        .set_title("Select directory to save normalized data")
        .pick_folder();

    if let Some(directory) = directory {
        state.export_to(&directory);
    }
}
