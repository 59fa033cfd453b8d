use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WlanInsightApp {
    pub state: AppState,
}

impl WlanInsightApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for WlanInsightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::dashboard_grid(ui, &self.state);
        });
    }
}
