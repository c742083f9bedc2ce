use std::sync::Arc;

use eframe::egui;

use crate::config::ColumnConfig;
use crate::data::model::ExplosionDataset;
use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FalloutExplorerApp {
    pub state: AppState,
    /// Header mapping reused for File → Open.
    pub columns: ColumnConfig,
}

impl FalloutExplorerApp {
    pub fn new(dataset: Arc<ExplosionDataset>, columns: ColumnConfig) -> Self {
        Self {
            state: AppState::with_dataset(dataset),
            columns,
        }
    }
}

impl eframe::App for FalloutExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &self.columns);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    panels::introduction(ui);
                    let Some(dash) = panels::dashboard_or_advisory(ui, &self.state) else {
                        return;
                    };
                    table::records_table(ui, dash);
                    charts::trend_over_time(ui, dash);
                    charts::by_country(ui, dash, &self.state.color_map);
                    charts::yield_vs_year(ui, dash);
                    charts::locations_map(ui, dash, &self.state.color_map);
                });
        });
    }
}
