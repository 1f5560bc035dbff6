//! TheMealDB ingredient-filter client
//!
//! Queries the recipe index for one ingredient at a time. "No meals" is a
//! valid empty result; so is a non-success response. No retries.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use platelens_domain::RecipeSource;
use platelens_types::{Error, RecipeStub, Result};

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Fixed template for the recipe page link, keyed by meal id.
const MEAL_PAGE_BASE: &str = "https://www.themealdb.com/meal";

#[derive(Debug, Deserialize)]
pub struct FilterResponse {
    /// `null` when the ingredient matches nothing
    pub meals: Option<Vec<Meal>>,
}

#[derive(Debug, Deserialize)]
pub struct Meal {
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumb: String,
}

/// Map raw meal rows to recipe stubs, URL built from the meal id.
pub fn stubs_from_response(response: FilterResponse) -> Vec<RecipeStub> {
    response
        .meals
        .unwrap_or_default()
        .into_iter()
        .map(|meal| RecipeStub {
            title: meal.name,
            url: format!("{MEAL_PAGE_BASE}/{}", meal.id),
            image: meal.thumb,
        })
        .collect()
}

/// Recipe lookup client for TheMealDB.
#[derive(Debug, Clone)]
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
}

impl Default for MealDbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MealDbClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
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
impl RecipeSource for MealDbClient {
    async fn recipes_for(&self, ingredient: &str) -> Result<Vec<RecipeStub>> {
        let url = format!("{}/filter.php", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("i", ingredient)])
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        if !response.status().is_success() {
            // Empty, not fatal: the caller continues with other ingredients.
            warn!(
                ingredient,
                status = %response.status(),
                "recipe lookup returned non-success"
            );
            return Ok(Vec::new());
        }

        let filter: FilterResponse = response
            .json()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(stubs_from_response(filter))
    }
}
