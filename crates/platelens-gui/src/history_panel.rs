//! History panel for the per-session analysis history

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use platelens_domain::RollingHistory;

/// Panel listing the rolling analysis history, newest first
pub struct HistoryPanel {}

impl HistoryPanel {
    pub fn new() -> Self {
        Self {}
    }

    pub fn ui(&mut self, ui: &mut Ui, history: &mut RollingHistory) {
        ui.heading("History");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label(format!("{} entries", history.len()));
            ui.add_space(16.0);
            if ui.button("Clear history").clicked() {
                history.clear();
            }
        });

        ui.add_space(8.0);

        if history.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label(RichText::new("No analyses yet").color(Color32::GRAY));
            });
            return;
        }

        ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("history_grid").striped(true).show(ui, |ui| {
                ui.label(RichText::new("Image").strong());
                ui.label(RichText::new("Quantity").strong());
                ui.label(RichText::new("Foods").strong());
                ui.label(RichText::new("Calories").strong());
                ui.label(RichText::new("Protein").strong());
                ui.label(RichText::new("Carbs").strong());
                ui.label(RichText::new("Fiber").strong());
                ui.label(RichText::new("When").strong());
                ui.end_row();

                for entry in history.newest_first() {
                    ui.label(&entry.file_name);
                    ui.label(format!("{:.0} g", entry.quantity_grams));
                    ui.label(entry.detected_foods.join(", "));
                    ui.label(format!("{:.1}", entry.totals.calories));
                    ui.label(format!("{:.1}", entry.totals.protein));
                    ui.label(format!("{:.1}", entry.totals.carbs));
                    ui.label(format!("{:.1}", entry.totals.fiber));
                    ui.label(entry.analyzed_at.format("%Y-%m-%d %H:%M").to_string());
                    ui.end_row();
                }
            });
        });
    }
}
