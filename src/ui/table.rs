use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::outcome_color;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the launches currently shown in the scatter chart.
pub fn launch_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let records = dataset.records();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(280.0)
        .column(Column::auto().at_least(40.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["Flight", "Launch Site", "Payload (kg)", "Outcome", "Booster", "Version"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let rec = &records[state.visible_indices[row.index()]];
                row.col(|ui| {
                    let flight = rec.flight_number.map(|n| n.to_string()).unwrap_or_default();
                    ui.label(flight);
                });
                row.col(|ui| {
                    ui.label(&rec.site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    let text = RichText::new(rec.outcome.to_string());
                    ui.label(text.color(outcome_color(rec.outcome)));
                });
                row.col(|ui| {
                    let color = state.booster_colors.color_for(&rec.booster_category);
                    ui.label(RichText::new(&rec.booster_category).color(color));
                });
                row.col(|ui| {
                    ui.label(rec.booster_version.as_deref().unwrap_or(""));
                });
            });
        });
}
