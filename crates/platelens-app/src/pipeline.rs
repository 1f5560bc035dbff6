//! Aggregation pipeline - the core use case for food image analysis
//!
//! Orchestrates the complete analysis workflow:
//! 1. Detect labels for the image via the vision service
//! 2. Filter labels against the allowed-food catalog
//! 3. Resolve per-100g macros for each filtered food
//! 4. Collect candidate recipes for each filtered food
//! 5. Shape the combined per-100g result for the caller
//!
//! Only the vision call is fatal. Every per-food lookup degrades
//! independently: one failed nutrition or recipe query never aborts the
//! others or the request.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use platelens_domain::{
    catalog::canonical_name, filter_labels, LabelDetector, NutritionSource, RecipeSource,
};
use platelens_types::{AnalysisResult, MacroRecord, RecipeStub, RecipesField, Result};

use crate::config::Config;
use platelens_lookup::{MealDbClient, UsdaClient};
use platelens_vision::{GoogleVisionClient, VisionConfig};

/// Orchestrates vision, nutrition and recipe lookups for one image.
pub struct AnalysisPipeline {
    detector: Arc<dyn LabelDetector>,
    nutrition: Arc<dyn NutritionSource>,
    recipes: Arc<dyn RecipeSource>,
}

impl AnalysisPipeline {
    pub fn new(
        detector: Arc<dyn LabelDetector>,
        nutrition: Arc<dyn NutritionSource>,
        recipes: Arc<dyn RecipeSource>,
    ) -> Self {
        Self {
            detector,
            nutrition,
            recipes,
        }
    }

    /// Build the pipeline with the live clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        let mut vision_config = VisionConfig::new(config.vision_api_key.clone());
        if let Some(ref endpoint) = config.vision_endpoint {
            vision_config = vision_config.with_endpoint(endpoint.clone());
        }

        let mut usda = UsdaClient::new(config.usda_api_key.clone());
        if let Some(ref base_url) = config.usda_base_url {
            usda = usda.with_base_url(base_url.clone());
        }

        let mut mealdb = MealDbClient::new();
        if let Some(ref base_url) = config.mealdb_base_url {
            mealdb = mealdb.with_base_url(base_url.clone());
        }

        Self::new(
            Arc::new(GoogleVisionClient::new(vision_config)),
            Arc::new(usda),
            Arc::new(mealdb),
        )
    }

    /// Analyze one image and return per-100g figures.
    ///
    /// Returns the "no food" result (empty `detected_foods`) when nothing in
    /// the image is allow-listed; that is a normal outcome, not an error.
    pub async fn analyze(&self, image: &[u8]) -> Result<AnalysisResult> {
        // Step 1: vision labeling. The only fatal call; no retry, no fallback.
        let raw_labels = self.detector.detect_labels(image).await?;
        debug!(?raw_labels, "labels detected");

        // Step 2: allow-list filter
        let detected_foods = filter_labels(&raw_labels);
        if detected_foods.is_empty() {
            info!("no allow-listed food in image");
            return Ok(AnalysisResult::no_food());
        }

        // Step 3: per-food nutrition lookup, keyed by canonical name.
        // Duplicate detections are looked up again on purpose; the map entry
        // is simply overwritten.
        let mut macros_per_100g: HashMap<String, MacroRecord> = HashMap::new();
        for food in &detected_foods {
            let Some(canonical) = canonical_name(food) else {
                continue;
            };
            match self.nutrition.macros_per_100g(canonical).await {
                Ok(Some(record)) => {
                    macros_per_100g.insert(canonical.to_string(), record);
                }
                Ok(None) => {
                    debug!(food = canonical, "no nutrition match");
                }
                Err(e) => {
                    warn!(food = canonical, error = %e, "nutrition lookup failed, treating as absent");
                }
            }
        }

        // Step 4: per-food recipe lookup on the label as emitted
        let mut recipe_stubs: Vec<RecipeStub> = Vec::new();
        for food in &detected_foods {
            match self.recipes.recipes_for(food).await {
                Ok(stubs) => recipe_stubs.extend(stubs),
                Err(e) => {
                    warn!(food = %food, error = %e, "recipe lookup failed, continuing");
                }
            }
        }

        info!(
            foods = detected_foods.len(),
            macros = macros_per_100g.len(),
            recipes = recipe_stubs.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            detected_foods,
            macros_per_100g,
            recipes: RecipesField::from_stubs(recipe_stubs),
        })
    }
}
