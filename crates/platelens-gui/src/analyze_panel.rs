//! Analyze panel
//!
//! Image selection, quantity input, analysis execution against the server,
//! and aggregated macro display. Analysis runs on a background thread so the
//! UI stays responsive; results arrive over an mpsc channel.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui::{self, Color32, ProgressBar, RichText, Ui};
use sha2::{Digest, Sha256};

use platelens_domain::{aggregate, RollingHistory};
use platelens_types::{AggregatedMacros, AnalysisResult, HistoryEntry};

use crate::client::{AnalyzeClient, AnalyzeOutcome};

/// Quantity input bounds in grams
const QUANTITY_MIN: f64 = 0.0;
const QUANTITY_MAX: f64 = 5000.0;
const QUANTITY_STEP: f64 = 0.05;
const QUANTITY_DEFAULT: f64 = 100.0;

/// Status message from the analysis thread
enum AnalysisStatus {
    Completed {
        result: AnalysisResult,
        image_hash: String,
        file_name: String,
    },
    NoFood(String),
    Failed(String),
}

/// Panel for analyzing food photos
pub struct AnalyzePanel {
    /// Currently selected image path
    selected_image: Option<PathBuf>,
    /// Quantity in grams the totals are scaled by
    quantity_grams: f64,
    /// Last analysis result (per-100g figures)
    result: Option<AnalysisResult>,
    /// "No food items found" message, if that was the outcome
    no_food_message: Option<String>,
    /// Error message (if any)
    error: Option<String>,
    /// Whether analysis is in progress
    is_analyzing: bool,
    /// Receiver for analysis status from the background thread
    status_receiver: Option<Receiver<AnalysisStatus>>,
}

impl AnalyzePanel {
    pub fn new() -> Self {
        Self {
            selected_image: None,
            quantity_grams: QUANTITY_DEFAULT,
            result: None,
            no_food_message: None,
            error: None,
            is_analyzing: false,
            status_receiver: None,
        }
    }

    /// Last successful result, for the recipes tab.
    pub fn last_result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn ui(&mut self, ui: &mut Ui, client: &AnalyzeClient, history: &mut RollingHistory) {
        self.poll_status(ui.ctx(), history);

        ui.heading("Analyze Food Photo");
        ui.add_space(10.0);

        self.render_image_selection(ui);
        ui.add_space(6.0);
        self.render_quantity_input(ui);

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        self.render_analyze_button(ui, client);

        ui.add_space(10.0);
        self.render_results(ui);
    }

    fn render_image_selection(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("Select image…").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .pick_file()
                {
                    self.selected_image = Some(path);
                    self.result = None;
                    self.no_food_message = None;
                    self.error = None;
                }
            }

            match &self.selected_image {
                Some(path) => {
                    ui.label(
                        path.file_name()
                            .and_then(|n| n.to_str())
                            .unwrap_or("(unnamed)"),
                    );
                }
                None => {
                    ui.label(RichText::new("No image selected").color(Color32::GRAY));
                }
            }
        });
    }

    fn render_quantity_input(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Quantity:");
            ui.add(
                egui::DragValue::new(&mut self.quantity_grams)
                    .range(QUANTITY_MIN..=QUANTITY_MAX)
                    .speed(QUANTITY_STEP)
                    .suffix(" g"),
            );
        });
    }

    fn render_analyze_button(&mut self, ui: &mut Ui, client: &AnalyzeClient) {
        let can_analyze = self.selected_image.is_some() && !self.is_analyzing;

        if ui
            .add_enabled(can_analyze, egui::Button::new("Analyze"))
            .clicked()
        {
            self.start_analysis(client);
        }

        if self.is_analyzing {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Analyzing…");
            });
        }
    }

    fn start_analysis(&mut self, client: &AnalyzeClient) {
        let Some(path) = self.selected_image.clone() else {
            return;
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.error = Some(format!("Could not read image: {e}"));
                return;
            }
        };

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let (sender, receiver) = channel();
        self.status_receiver = Some(receiver);
        self.is_analyzing = true;
        self.error = None;
        self.no_food_message = None;

        let client = client.clone();
        thread::spawn(move || {
            let image_hash = format!("{:x}", Sha256::digest(&bytes));

            let status = match client.analyze(&file_name, bytes) {
                Ok(AnalyzeOutcome::Result(result)) => AnalysisStatus::Completed {
                    result,
                    image_hash,
                    file_name,
                },
                Ok(AnalyzeOutcome::NoFood(message)) => AnalysisStatus::NoFood(message),
                Err(message) => AnalysisStatus::Failed(message),
            };

            let _ = sender.send(status);
        });
    }

    fn poll_status(&mut self, ctx: &egui::Context, history: &mut RollingHistory) {
        let Some(receiver) = &self.status_receiver else {
            return;
        };

        match receiver.try_recv() {
            Ok(AnalysisStatus::Completed {
                result,
                image_hash,
                file_name,
            }) => {
                history.push(HistoryEntry {
                    image_hash,
                    file_name,
                    quantity_grams: self.quantity_grams,
                    detected_foods: result.detected_foods.clone(),
                    totals: aggregate::aggregate(
                        result.macros_per_100g.values(),
                        self.quantity_grams,
                    ),
                    analyzed_at: chrono::Utc::now(),
                });
                self.result = Some(result);
                self.is_analyzing = false;
                self.status_receiver = None;
            }
            Ok(AnalysisStatus::NoFood(message)) => {
                self.no_food_message = Some(message);
                self.result = None;
                self.is_analyzing = false;
                self.status_receiver = None;
            }
            Ok(AnalysisStatus::Failed(message)) => {
                self.error = Some(message);
                self.is_analyzing = false;
                self.status_receiver = None;
            }
            Err(_) => {
                // Still waiting; keep the UI refreshing
                ctx.request_repaint();
            }
        }
    }

    fn render_results(&mut self, ui: &mut Ui) {
        if let Some(error) = &self.error {
            ui.colored_label(Color32::RED, error);
            return;
        }

        if let Some(message) = &self.no_food_message {
            ui.label(RichText::new(message).color(Color32::GRAY));
            return;
        }

        let Some(result) = &self.result else {
            return;
        };

        ui.label(RichText::new("Detected foods").strong());
        ui.label(result.detected_foods.join(", "));

        ui.add_space(8.0);
        ui.label(RichText::new("Macros per 100 g").strong());
        egui::Grid::new("macros_grid").striped(true).show(ui, |ui| {
            ui.label(RichText::new("Food").strong());
            ui.label(RichText::new("Calories").strong());
            ui.label(RichText::new("Protein").strong());
            ui.label(RichText::new("Carbs").strong());
            ui.label(RichText::new("Fiber").strong());
            ui.end_row();

            for (name, record) in &result.macros_per_100g {
                ui.label(name);
                ui.label(&record.calories);
                ui.label(&record.protein);
                ui.label(&record.carbs);
                ui.label(&record.fiber);
                ui.end_row();
            }
        });

        ui.add_space(8.0);
        let totals = aggregate::aggregate(result.macros_per_100g.values(), self.quantity_grams);
        ui.label(RichText::new(format!("Totals at {:.0} g", self.quantity_grams)).strong());
        render_macro_bars(ui, &totals);
    }
}

/// Bar chart stand-in: one bar per macro, scaled to the largest value.
fn render_macro_bars(ui: &mut Ui, totals: &AggregatedMacros) {
    let rows = [
        ("Calories (kcal)", totals.calories),
        ("Protein (g)", totals.protein),
        ("Carbs (g)", totals.carbs),
        ("Fiber (g)", totals.fiber),
    ];

    let max = rows
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max)
        .max(f64::EPSILON);

    for (label, value) in rows {
        ui.horizontal(|ui| {
            ui.label(format!("{label}: {value:.1}"));
            ui.add(ProgressBar::new((value / max) as f32).desired_width(240.0));
        });
    }
}
