use std::path::Path;

use eframe::egui;

use crate::state::{AppState, Tab};
use crate::ui::{charts, groups, panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ClimateStoryApp {
    pub state: AppState,
}

impl Default for ClimateStoryApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl ClimateStoryApp {
    /// Start the app with an initial session loaded from `dir`. A load
    /// failure leaves the app empty with the error in the status bar.
    pub fn with_data_dir(dir: &Path) -> Self {
        let mut app = Self::default();
        panels::load_data_dir(&mut app.state, dir);
        app
    }
}

impl eframe::App for ClimateStoryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tabbed views ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui: &mut egui::Ui| {
                for tab in Tab::ALL {
                    if ui
                        .selectable_label(self.state.tab == tab, tab.title())
                        .clicked()
                    {
                        self.state.tab = tab;
                    }
                }
            });
            ui.separator();

            match self.state.tab {
                Tab::Charts => charts::show(ui, &self.state),
                Tab::Groups => groups::show(ui, &self.state),
                Tab::Data => tables::show(ui, &self.state),
            }
        });
    }
}
