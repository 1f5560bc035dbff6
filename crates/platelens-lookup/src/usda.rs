//! USDA FoodData Central search client
//!
//! Issues a one-page, one-result text search per canonical food name and
//! extracts the four tracked macros from the heterogeneous nutrient list.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use platelens_domain::NutritionSource;
use platelens_types::{Error, MacroRecord, Result, MACRO_UNAVAILABLE};

const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1/foods/search";

/// Nutrient names the resolver scans for, as FoodData Central spells them.
const NUTRIENT_CALORIES: &str = "Energy";
const NUTRIENT_PROTEIN: &str = "Protein";
const NUTRIENT_CARBS: &str = "Carbohydrate, by difference";
const NUTRIENT_FIBER: &str = "Fiber, total dietary";

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub foods: Vec<Food>,
}

#[derive(Debug, Deserialize)]
pub struct Food {
    #[serde(rename = "foodNutrients", default)]
    pub food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
pub struct FoodNutrient {
    #[serde(rename = "nutrientName", default)]
    pub nutrient_name: String,
    #[serde(default)]
    pub value: f64,
    #[serde(rename = "unitName", default)]
    pub unit_name: String,
}

/// Format the first matching nutrient as "value unit", or the sentinel.
fn nutrient_value(food: &Food, name: &str) -> String {
    food.food_nutrients
        .iter()
        .find(|n| n.nutrient_name == name)
        .map(|n| format!("{} {}", n.value, n.unit_name))
        .unwrap_or_else(|| MACRO_UNAVAILABLE.to_string())
}

/// Extract the four tracked macros from one food match.
///
/// Each field is independent: a food missing fiber still yields valid
/// calories/protein/carbs.
pub fn extract_macros(food: &Food) -> MacroRecord {
    MacroRecord {
        calories: nutrient_value(food, NUTRIENT_CALORIES),
        protein: nutrient_value(food, NUTRIENT_PROTEIN),
        carbs: nutrient_value(food, NUTRIENT_CARBS),
        fiber: nutrient_value(food, NUTRIENT_FIBER),
    }
}

/// Macros for the first match of a search response, absent on zero matches.
pub fn macros_from_response(response: SearchResponse) -> Option<MacroRecord> {
    response.foods.first().map(extract_macros)
}

/// Nutrition lookup client for USDA FoodData Central.
#[derive(Debug, Clone)]
pub struct UsdaClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl UsdaClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl NutritionSource for UsdaClient {
    async fn macros_per_100g(&self, canonical_name: &str) -> Result<Option<MacroRecord>> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("query", canonical_name),
                ("pageSize", "1"),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !response.status().is_success() {
            // Absent, not fatal: other foods in the request continue.
            warn!(
                food = canonical_name,
                status = %response.status(),
                "nutrition lookup returned non-success"
            );
            return Ok(None);
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(macros_from_response(search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banana_response() -> SearchResponse {
        serde_json::from_value(serde_json::json!({
            "foods": [{
                "foodNutrients": [
                    {"nutrientName": "Energy", "value": 89, "unitName": "KCAL"},
                    {"nutrientName": "Protein", "value": 1.1, "unitName": "G"},
                    {"nutrientName": "Carbohydrate, by difference", "value": 23, "unitName": "G"},
                    {"nutrientName": "Potassium, K", "value": 358, "unitName": "MG"}
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn extracts_value_unit_pairs() {
        let record = macros_from_response(banana_response()).unwrap();
        assert_eq!(record.calories, "89 KCAL");
        assert_eq!(record.protein, "1.1 G");
        assert_eq!(record.carbs, "23 G");
    }

    #[test]
    fn missing_nutrient_is_independent_per_field() {
        // Fixture has no fiber entry; the other three still resolve.
        let record = macros_from_response(banana_response()).unwrap();
        assert_eq!(record.fiber, MACRO_UNAVAILABLE);
        assert_eq!(record.calories, "89 KCAL");
    }

    #[test]
    fn zero_matches_is_absent() {
        let response: SearchResponse =
            serde_json::from_value(serde_json::json!({"foods": []})).unwrap();
        assert!(macros_from_response(response).is_none());

        let response: SearchResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(macros_from_response(response).is_none());
    }

    #[test]
    fn only_first_match_is_used() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "foods": [
                {"foodNutrients": [
                    {"nutrientName": "Energy", "value": 52, "unitName": "KCAL"}
                ]},
                {"foodNutrients": [
                    {"nutrientName": "Energy", "value": 999, "unitName": "KCAL"}
                ]}
            ]
        }))
        .unwrap();

        let record = macros_from_response(response).unwrap();
        assert_eq!(record.calories, "52 KCAL");
    }
}
