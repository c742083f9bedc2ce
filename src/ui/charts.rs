use std::collections::BTreeMap;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::view::Dashboard;

const CHART_HEIGHT: f32 = 260.0;
const MAP_HEIGHT: f32 = 380.0;

/// Explosions per year as a line.
pub fn trend_over_time(ui: &mut Ui, dash: &Dashboard) {
    ui.heading("Nuclear Explosions Over Time");

    let points: PlotPoints = dash
        .counts_by_year
        .iter()
        .map(|(&year, &n)| [year as f64, n as f64])
        .collect();

    Plot::new("trend_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Number of Explosions")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(points)
                    .name("Explosions")
                    .color(Color32::from_rgb(0xFF, 0x8C, 0x00))
                    .width(2.0),
            );
        });
    ui.separator();
}

/// One bar per country, most-tested first.
pub fn by_country(ui: &mut Ui, dash: &Dashboard, colors: &ColorMap) {
    ui.heading("Explosions by Country");

    let bars: Vec<Bar> = dash
        .counts_by_country
        .iter()
        .enumerate()
        .map(|(i, (country, n))| {
            Bar::new(i as f64, *n as f64)
                .name(country)
                .fill(colors.color_for(country))
                .width(0.7)
        })
        .collect();

    let chart = BarChart::new(bars)
        .name("Explosions by Country")
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}: {}", bar.name, bar.value)
        }));

    Plot::new("country_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Country (hover for name)")
        .y_axis_label("Count")
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
    ui.separator();
}

/// Upper yield bound against year, one point per record.
pub fn yield_vs_year(ui: &mut Ui, dash: &Dashboard) {
    ui.heading("Explosion Yield vs. Year");

    let points: PlotPoints = dash
        .yield_series
        .iter()
        .map(|p| [p.year as f64, p.yield_upper])
        .collect();

    Plot::new("yield_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Year")
        .y_axis_label("Yield (Upper, kt)")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(
                Points::new(points)
                    .name("Yield upper")
                    .color(Color32::from_rgba_unmultiplied(255, 0, 0, 150))
                    .radius(2.5),
            );
        });
    ui.separator();
}

/// Test sites on a longitude/latitude plane, coloured per country.
pub fn locations_map(ui: &mut Ui, dash: &Dashboard, colors: &ColorMap) {
    ui.heading("Explosion Locations Map");
    match dash.geo_centroid {
        Some((lat, lon)) => ui.label(format!(
            "{} located tests, centred around {lat:.1}°, {lon:.1}°",
            dash.geo_points.len()
        )),
        None => ui.label("No located tests in the current selection."),
    };

    let mut by_country: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &dash.geo_points {
        by_country
            .entry(p.country.as_str())
            .or_default()
            .push([p.longitude, p.latitude]);
    }

    Plot::new("map_plot")
        .height(MAP_HEIGHT)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .legend(Legend::default())
        .label_formatter(|name, value| {
            format!("{name}\nlat {:.2}, lon {:.2}", value.y, value.x)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (country, coords) in by_country {
                plot_ui.points(
                    Points::new(PlotPoints::from(coords))
                        .name(country)
                        .color(colors.color_for(country))
                        .radius(3.0),
                );
            }
        });
}
