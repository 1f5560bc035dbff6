//! Data model for detection, nutrition lookup and aggregation results

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel used when the nutrition source lacks a nutrient.
pub const MACRO_UNAVAILABLE: &str = "N/A";

/// Literal marker returned instead of an empty recipe list.
///
/// External consumers match on this exact string, so it is part of the wire
/// contract and must not change.
pub const NO_RECIPES_MARKER: &str = "no recipes found";

/// Macronutrient amounts per 100 g of one food.
///
/// Each field is the formatted "value unit" string the nutrition database
/// yields (e.g. `"89 KCAL"`, `"1.1 G"`), or [`MACRO_UNAVAILABLE`] when the
/// nutrient was not present in the returned nutrient list. Numeric coercion
/// happens at aggregation time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroRecord {
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fiber: String,
}

impl Default for MacroRecord {
    fn default() -> Self {
        Self {
            calories: MACRO_UNAVAILABLE.to_string(),
            protein: MACRO_UNAVAILABLE.to_string(),
            carbs: MACRO_UNAVAILABLE.to_string(),
            fiber: MACRO_UNAVAILABLE.to_string(),
        }
    }
}

/// Summed macros across every detected food, scaled by quantity.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AggregatedMacros {
    /// kcal
    pub calories: f64,
    /// g
    pub protein: f64,
    /// g
    pub carbs: f64,
    /// g
    pub fiber: f64,
}

impl AggregatedMacros {
    pub const ZERO: AggregatedMacros = AggregatedMacros {
        calories: 0.0,
        protein: 0.0,
        carbs: 0.0,
        fiber: 0.0,
    };
}

/// A recipe reference returned by the recipe index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStub {
    /// Recipe title, the dedup key
    pub title: String,
    /// Link to the full recipe
    pub url: String,
    /// Thumbnail image URL
    pub image: String,
}

/// The `recipes` field of an analysis response.
///
/// Serializes untagged: either an array of stubs or the literal string
/// `"no recipes found"`. The asymmetry is observed behavior that callers
/// depend on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecipesField {
    Found(Vec<RecipeStub>),
    Missing(String),
}

impl RecipesField {
    /// Wrap a concatenated stub list, collapsing empty to the marker.
    pub fn from_stubs(stubs: Vec<RecipeStub>) -> Self {
        if stubs.is_empty() {
            RecipesField::Missing(NO_RECIPES_MARKER.to_string())
        } else {
            RecipesField::Found(stubs)
        }
    }

    /// Stubs if any were found, empty slice otherwise.
    pub fn stubs(&self) -> &[RecipeStub] {
        match self {
            RecipesField::Found(stubs) => stubs,
            RecipesField::Missing(_) => &[],
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, RecipesField::Missing(_))
    }
}

/// Result of one image analysis, per-100g figures only.
///
/// Quantity scaling is the caller's concern so a UI can re-apply its own
/// quantity without a second request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Allow-listed labels, in vision emission order, case as emitted
    pub detected_foods: Vec<String>,

    /// Per-100g macros keyed by canonical nutrition-query name
    #[serde(rename = "macros per 100g")]
    pub macros_per_100g: HashMap<String, MacroRecord>,

    /// Concatenated recipe stubs, or the "no recipes found" marker
    pub recipes: RecipesField,
}

impl AnalysisResult {
    /// The normal "no recognized food" outcome. Not an error.
    pub fn no_food() -> Self {
        Self {
            detected_foods: Vec::new(),
            macros_per_100g: HashMap::new(),
            recipes: RecipesField::from_stubs(Vec::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.detected_foods.is_empty()
    }
}

/// One dashboard history entry, held in a bounded per-session queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// SHA-256 of the uploaded image bytes
    pub image_hash: String,
    /// Original file name as uploaded
    pub file_name: String,
    /// Quantity in grams the totals were scaled by
    pub quantity_grams: f64,
    /// Foods detected in the image
    pub detected_foods: Vec<String>,
    /// Aggregated macros at `quantity_grams`
    pub totals: AggregatedMacros,
    /// When the analysis was performed
    pub analyzed_at: DateTime<Utc>,
}
