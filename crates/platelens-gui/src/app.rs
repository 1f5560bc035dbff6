//! Main application structure with tab navigation

use eframe::egui;

use platelens_app::Config;
use platelens_domain::RollingHistory;

use crate::analyze_panel::AnalyzePanel;
use crate::client::{AnalyzeClient, RecipeClient};
use crate::history_panel::HistoryPanel;
use crate::recipes_panel::RecipesPanel;

/// Application tab selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Analyze,
    Recipes,
    History,
}

impl Tab {
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Analyze => "Analyze",
            Tab::Recipes => "Recipes",
            Tab::History => "History",
        }
    }
}

/// Main application state
pub struct PlatelensApp {
    /// Currently selected tab
    current_tab: Tab,
    /// Analyze panel state
    analyze_panel: AnalyzePanel,
    /// Recipes panel state
    recipes_panel: RecipesPanel,
    /// History panel state
    history_panel: HistoryPanel,
    /// Client for the analysis server
    client: AnalyzeClient,
    /// Client for the recipe index
    recipe_client: RecipeClient,
    /// Per-session rolling history (max 10)
    history: RollingHistory,
}

impl PlatelensApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        // The dashboard talks to a locally running platelens-server
        let config = Config::load().unwrap_or_default();
        let client = AnalyzeClient::new(format!("http://127.0.0.1:{}", config.port));

        let mut recipe_client = RecipeClient::new();
        if let Some(ref base_url) = config.mealdb_base_url {
            recipe_client = recipe_client.with_base_url(base_url.clone());
        }

        Self {
            current_tab: Tab::default(),
            analyze_panel: AnalyzePanel::new(),
            recipes_panel: RecipesPanel::new(),
            history_panel: HistoryPanel::new(),
            client,
            recipe_client,
            history: RollingHistory::new(),
        }
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for tab in [Tab::Analyze, Tab::Recipes, Tab::History] {
                ui.selectable_value(&mut self.current_tab, tab, tab.label());
            }
        });
    }
}

impl eframe::App for PlatelensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.render_tab_bar(ui);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_tab {
            Tab::Analyze => self.analyze_panel.ui(ui, &self.client, &mut self.history),
            Tab::Recipes => {
                self.recipes_panel
                    .ui(ui, &self.recipe_client, self.analyze_panel.last_result())
            }
            Tab::History => self.history_panel.ui(ui, &mut self.history),
        });
    }
}
