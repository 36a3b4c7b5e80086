use std::fmt::Display;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::FilterField;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🔍 Filters");
    ui.separator();

    if ui.button("🔁 Reset Filters").clicked() {
        state.reset_filters();
    }
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            owner_filter(ui, state);

            // Clone the choices so we can mutate state inside the loops.
            let accounts = state.dataset.account_options.clone();
            let parcels = state.dataset.parcel_options.clone();
            let shared = state.dataset.shared_parcel_options.clone();

            number_filter(ui, state, FilterField::Account, "Account Number", &accounts);
            number_filter(ui, state, FilterField::Parcel, "Land Parcel Number", &parcels);
            number_filter(
                ui,
                state,
                FilterField::SharedParcel,
                "Shared Parcel Numbers",
                &shared,
            );
        });
}

fn header_text(label: &str, n_selected: usize, n_total: usize) -> RichText {
    RichText::new(format!("{label}  ({n_selected}/{n_total})")).strong()
}

/// Searchable owner multi-select.
fn owner_filter(ui: &mut Ui, state: &mut AppState) {
    let n_total = state.dataset.owner_options.len();
    let n_selected = state.selection.selected_count(FilterField::Owner);

    egui::CollapsingHeader::new(header_text(
        "Land Owner Name (Search & Select)",
        n_selected,
        n_total,
    ))
    .id_salt("owner_filter")
    .default_open(true)
    .show(ui, |ui: &mut Ui| {
        ui.add(egui::TextEdit::singleline(&mut state.owner_search).hint_text("Search owners…"));

        let choices: Vec<String> = state.owner_choices().into_iter().map(str::to_string).collect();
        if choices.is_empty() {
            ui.weak("No matching owners.");
        }
        ScrollArea::vertical()
            .id_salt("owner_choices")
            .max_height(220.0)
            .show(ui, |ui: &mut Ui| {
                for owner in &choices {
                    let mut checked = state.selection.owners.contains(owner);
                    if ui.checkbox(&mut checked, owner.as_str()).changed() {
                        state.toggle_owner(owner);
                    }
                }
            });
    });
}

/// Multi-select over one of the numeric fields.
fn number_filter(ui: &mut Ui, state: &mut AppState, field: FilterField, label: &str, options: &[i64]) {
    let n_selected = state.selection.selected_count(field);

    egui::CollapsingHeader::new(header_text(label, n_selected, options.len()))
        .id_salt(label)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            if options.is_empty() {
                ui.weak("No values.");
            }
            for &value in options {
                let mut checked = is_selected(state, field, value);
                if ui.checkbox(&mut checked, value.to_string()).changed() {
                    state.toggle_number(field, value);
                }
            }
        });
}

fn is_selected(state: &AppState, field: FilterField, value: i64) -> bool {
    let s = &state.selection;
    match field {
        FilterField::Account => s.accounts.contains(&value),
        FilterField::Parcel => s.parcels.contains(&value),
        FilterField::SharedParcel => s.shared_parcels.contains(&value),
        FilterField::Owner => false,
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} records loaded, {} visible",
            state.dataset.source,
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Page heading with the location line.
pub fn title(ui: &mut Ui, title: &str, location: impl Display) {
    ui.heading(RichText::new(format!("📊 {title}")).size(26.0));
    ui.label(RichText::new(location.to_string()).strong());
    ui.add_space(8.0);
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open land records")
        .add_filter("Supported files", &["xlsx", "xlsm", "xls", "ods", "csv", "json", "parquet", "pq"])
        .add_filter("Spreadsheet", &["xlsx", "xlsm", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!("Loaded {} land records from {}", dataset.len(), path.display());
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::warn!("Failed to load {}: {e}", path.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
