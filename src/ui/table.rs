use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::view::Dashboard;

const HEADERS: [&str; 7] = [
    "Name",
    "Country",
    "Year",
    "Yield lower (kt)",
    "Yield upper (kt)",
    "Latitude",
    "Longitude",
];

fn optional(value: Option<f64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| format!("{v:.2}"))
}

/// Scrollable table of the filtered records.
pub fn records_table(ui: &mut Ui, dash: &Dashboard) {
    ui.push_id("records_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(280.0)
            .column(Column::initial(140.0).at_least(60.0))
            .column(Column::initial(90.0))
            .columns(Column::auto(), HEADERS.len() - 2)
            .header(20.0, |mut header| {
                for title in HEADERS {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, dash.rows.len(), |mut row| {
                    let r = &dash.rows[row.index()];
                    let cells = [
                        r.name.clone(),
                        r.source_country.clone(),
                        r.year.to_string(),
                        optional(r.yield_lower),
                        format!("{:.2}", r.yield_upper),
                        optional(r.latitude),
                        optional(r.longitude),
                    ];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
    ui.separator();
}
