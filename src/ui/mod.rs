/// View layer: sidebar filter widgets and the three tab bodies.
pub mod charts;
pub mod groups;
pub mod panels;
pub mod tables;

use eframe::egui::Ui;

/// Centered placeholder shown when no session is loaded.
pub fn empty_state(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a data folder to view the dashboard  (File → Open…)");
    });
}
