//! platelens-gui - desktop dashboard for food photo analysis

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod analyze_panel;
mod app;
mod client;
mod history_panel;
mod recipes_panel;

use eframe::egui;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1080.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Platelens",
        options,
        Box::new(|cc| Ok(Box::new(app::PlatelensApp::new(cc)))),
    )
}
