use std::path::PathBuf;

use climate_story::app::ClimateStoryApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Climate Story – Global Temperature Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(ClimateStoryApp::with_data_dir(&data_dir)))),
    )
}
