use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::ColumnConfig;
use crate::data::filter::YearRange;
use crate::state::AppState;
use crate::view::{Dashboard, ViewModel};

const ADVISORY_COLOR: Color32 = Color32::from_rgb(0xE0, 0x6C, 0x4F);

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: year range sliders and country checklist.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(dataset) = state.dataset.clone() else {
        ui.label("No dataset loaded.");
        return;
    };
    if dataset.is_empty() {
        ui.label("Dataset has no complete rows.");
        return;
    }

    // ---- Year range ----
    ui.strong("Select Year Range");
    let bounds = state.year_bounds();
    let mut years = state.filter.years;
    let from = ui.add(egui::Slider::new(&mut years.start, bounds.start..=bounds.end).text("From"));
    let to = ui.add(egui::Slider::new(&mut years.end, bounds.start..=bounds.end).text("To"));
    // keep start <= end, moving the bound the user did not touch
    if from.changed() && years.start > years.end {
        years.end = years.start;
    }
    if to.changed() && years.end < years.start {
        years.start = years.end;
    }
    if from.changed() || to.changed() {
        state.set_year_range(YearRange::new(years.start, years.end));
    }
    ui.separator();

    // ---- Countries ----
    let countries = dataset.distinct_countries();
    let selected = state.selected_countries();
    ui.strong(format!(
        "Select Countries  ({}/{})",
        selected.len(),
        countries.len()
    ));
    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.select_all_countries();
        }
        if ui.small_button("None").clicked() {
            state.select_no_countries();
        }
    });

    let mut toggled = None;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for country in &countries {
                let mut checked = selected.contains(country);
                let text = RichText::new(country).color(state.color_map.color_for(country));
                if ui.checkbox(&mut checked, text).changed() {
                    toggled = Some(country.clone());
                }
            }
        });
    if let Some(country) = toggled {
        state.toggle_country(&country);
    }
}

// ---------------------------------------------------------------------------
// Central panel header
// ---------------------------------------------------------------------------

pub fn introduction(ui: &mut Ui) {
    ui.heading("Nuclear Explosions Data Explorer");
    ui.label(
        "A record of nuclear explosions conducted worldwide between 1945 and 1998: \
         source countries, test sites, yields in kilotons (lower and upper bounds), \
         dates and purposes. Use the filters on the left to explore historical \
         patterns of nuclear testing.",
    );
    ui.separator();
}

/// Show the record count and hand back the dashboard, or show why there
/// is nothing to draw.
pub fn dashboard_or_advisory<'a>(ui: &mut Ui, state: &'a AppState) -> Option<&'a Dashboard> {
    match &state.view {
        None => {
            ui.label("No dataset loaded.");
            None
        }
        Some(ViewModel::NoCountriesSelected { advisory }) => {
            ui.label(RichText::new(advisory).color(ADVISORY_COLOR).strong());
            None
        }
        Some(ViewModel::Populated(dash)) => {
            ui.label(format!("Filtered Data: {} records", dash.record_count));
            Some(dash)
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, columns: &ColumnConfig) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state, columns);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let visible = state.view.as_ref().map_or(0, ViewModel::record_count);
            ui.label(format!("{} tests loaded, {visible} visible", ds.len()))
                .on_hover_text(ds.report.to_string());
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, columns: &ColumnConfig) {
    let file = rfd::FileDialog::new()
        .set_title("Open nuclear explosions dataset")
        .add_filter("Supported files", &["csv", "tsv", "txt", "json", "parquet", "pq"])
        .add_filter("Delimited text", &["csv", "tsv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::load_dataset(&path, columns) {
            Ok(dataset) => {
                log::info!("Loaded {} tests from {}", dataset.len(), path.display());
                state.set_dataset(Arc::new(dataset));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
