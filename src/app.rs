use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{charts, panels, table};

const PIE_HEIGHT: f32 = 320.0;
const SCATTER_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub title: String,
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(title: String, state: AppState) -> Self {
        Self { title, state }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: site dropdown + payload range ----
        egui::SidePanel::left("controls_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.heading(&self.title);
                    });
                    ui.separator();

                    if self.state.dataset.is_none() {
                        ui.centered_and_justified(|ui: &mut Ui| {
                            ui.heading("Open a launch table to begin  (File → Open…)");
                        });
                        return;
                    }

                    charts::success_pie(ui, &self.state, PIE_HEIGHT);
                    ui.add_space(16.0);
                    charts::payload_scatter(ui, &self.state, SCATTER_HEIGHT);
                    ui.add_space(16.0);

                    egui::CollapsingHeader::new("Filtered launches")
                        .default_open(false)
                        .show(ui, |ui: &mut Ui| {
                            table::launch_table(ui, &self.state);
                        });
                });
        });
    }
}
