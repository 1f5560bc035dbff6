//! Recipes panel
//!
//! The user picks ingredients from the detected foods and searches the recipe
//! index per selection. Each ingredient is cleaned before the query; the
//! combined results are deduplicated by title. Searches run on a background
//! thread so the UI stays responsive.

use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use platelens_domain::recipes::{clean_ingredient, dedupe_by_title};
use platelens_types::{AnalysisResult, RecipeStub};

use crate::client::RecipeClient;

/// Query the recipe index once per ingredient, cleaned first.
///
/// One failing ingredient never blocks the others; its contribution is
/// simply empty. The combined list is deduplicated by title.
fn search_recipes<F>(ingredients: &[String], query: F) -> Vec<RecipeStub>
where
    F: Fn(&str) -> Result<Vec<RecipeStub>, String>,
{
    let mut stubs = Vec::new();
    for ingredient in ingredients {
        let cleaned = clean_ingredient(ingredient);
        if cleaned.is_empty() {
            continue;
        }
        if let Ok(found) = query(&cleaned) {
            stubs.extend(found);
        }
    }
    dedupe_by_title(stubs)
}

/// Panel listing candidate recipes for the detected foods
pub struct RecipesPanel {
    /// Detected foods paired with their selection state
    selection: Vec<(String, bool)>,
    /// Results of the last search, deduplicated
    results: Option<Vec<RecipeStub>>,
    /// Whether a search is in progress
    is_searching: bool,
    /// Receiver for results from the background thread
    receiver: Option<Receiver<Vec<RecipeStub>>>,
}

impl RecipesPanel {
    pub fn new() -> Self {
        Self {
            selection: Vec::new(),
            results: None,
            is_searching: false,
            receiver: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, client: &RecipeClient, last_result: Option<&AnalysisResult>) {
        self.poll_results(ui.ctx());

        ui.heading("Recipes");
        ui.add_space(10.0);

        let Some(result) = last_result else {
            ui.label(
                RichText::new("Analyze a photo first to see recipe ideas.").color(Color32::GRAY),
            );
            return;
        };

        self.sync_selection(&result.detected_foods);

        ui.label(RichText::new("Search by ingredient").strong());
        for (food, selected) in &mut self.selection {
            ui.checkbox(selected, food.as_str());
        }

        ui.add_space(6.0);
        self.render_search_button(ui, client);

        ui.add_space(10.0);
        self.render_results(ui);
    }

    /// Rebuild the checkbox list when a new analysis arrives.
    fn sync_selection(&mut self, foods: &[String]) {
        let unchanged = self.selection.len() == foods.len()
            && self.selection.iter().zip(foods).all(|((f, _), food)| f == food);
        if unchanged {
            return;
        }
        self.selection = foods.iter().map(|food| (food.clone(), true)).collect();
        self.results = None;
    }

    fn render_search_button(&mut self, ui: &mut Ui, client: &RecipeClient) {
        let any_selected = self.selection.iter().any(|(_, selected)| *selected);

        if ui
            .add_enabled(
                any_selected && !self.is_searching,
                egui::Button::new("Find recipes"),
            )
            .clicked()
        {
            self.start_search(client);
        }

        if self.is_searching {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Searching…");
            });
        }
    }

    fn start_search(&mut self, client: &RecipeClient) {
        let ingredients: Vec<String> = self
            .selection
            .iter()
            .filter(|(_, selected)| *selected)
            .map(|(food, _)| food.clone())
            .collect();

        let (sender, receiver) = channel();
        self.receiver = Some(receiver);
        self.is_searching = true;

        let client = client.clone();
        thread::spawn(move || {
            let stubs = search_recipes(&ingredients, |ingredient| client.recipes_for(ingredient));
            let _ = sender.send(stubs);
        });
    }

    fn poll_results(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.receiver else {
            return;
        };

        match receiver.try_recv() {
            Ok(stubs) => {
                self.results = Some(stubs);
                self.is_searching = false;
                self.receiver = None;
            }
            Err(_) => {
                // Still waiting; keep the UI refreshing
                ctx.request_repaint();
            }
        }
    }

    fn render_results(&mut self, ui: &mut Ui) {
        let Some(stubs) = &self.results else {
            return;
        };

        if stubs.is_empty() {
            ui.label(
                RichText::new("No recipes found for the selected ingredients.")
                    .color(Color32::GRAY),
            );
            return;
        }

        ScrollArea::vertical().show(ui, |ui| {
            for stub in stubs {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&stub.title).strong());
                    ui.hyperlink_to("open", &stub.url);
                });
                ui.label(RichText::new(&stub.image).small().color(Color32::GRAY));
                ui.add_space(6.0);
            }
        });
    }
}
