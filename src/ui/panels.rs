use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{PayloadRange, SiteSelection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – site dropdown and payload range
// ---------------------------------------------------------------------------

/// Render the controls panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let sites = match &state.dataset {
        Some(ds) => ds.sites().to_vec(),
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ui.strong("Launch site");
    site_dropdown(ui, state, &sites);

    ui.add_space(12.0);
    ui.strong("Payload range (Kg):");
    payload_sliders(ui, state);
}

/// Searchable dropdown: "All Sites" followed by every site in dataset order.
fn site_dropdown(ui: &mut Ui, state: &mut AppState, sites: &[String]) {
    let mut picked: Option<SiteSelection> = None;
    let current = state.selected_site.clone();

    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_search)
                    .hint_text("Select a Launch Site here"),
            );
            let needle = state.site_search.to_lowercase();

            let all = SiteSelection::All;
            if all.label().to_lowercase().contains(&needle)
                && ui.selectable_label(current == all, all.label()).clicked()
            {
                picked = Some(all);
            }
            for site in sites.iter().filter(|s| s.to_lowercase().contains(&needle)) {
                let option = SiteSelection::Site(site.clone());
                if ui.selectable_label(current == option, site).clicked() {
                    picked = Some(option);
                }
            }
        });

    if let Some(selection) = picked {
        state.site_search.clear();
        state.select_site(selection);
    }
}

/// Two sliders acting as one range control; the handles push each other
/// instead of crossing.
fn payload_sliders(ui: &mut Ui, state: &mut AppState) {
    let (min, max) = state.slider_domain();
    let step = state.slider.step;
    let PayloadRange { mut low, mut high } = state.payload_range;

    let low_changed = ui
        .add(egui::Slider::new(&mut low, min..=max).step_by(step).text("min"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, min..=max).step_by(step).text("max"))
        .changed();

    if low_changed && low > high {
        high = low;
    }
    if high_changed && high < low {
        low = high;
    }
    state.set_payload_range(PayloadRange::new(low, high));

    if ui.button("Reset range").clicked() {
        state.reset_payload_range();
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

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} launches loaded, {} visible",
                ds.len(),
                state.visible_indices.len()
            ));

            let summary = state.visible_summary();
            if let Some(rate) = summary.success_rate() {
                ui.separator();
                ui.label(format!(
                    "{} successful ({:.0}%)",
                    summary.successes,
                    rate * 100.0
                ));
            }
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

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} sites",
                    dataset.len(),
                    dataset.sites().len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
