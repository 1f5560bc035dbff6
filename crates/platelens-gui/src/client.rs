//! Blocking HTTP client for the analysis server

use std::time::Duration;

use platelens_lookup::mealdb::{self, FilterResponse};
use platelens_types::{AnalysisResult, RecipeStub};

/// Outcome of one /analyze call.
#[derive(Debug, Clone)]
pub enum AnalyzeOutcome {
    /// Foods detected; per-100g figures included
    Result(AnalysisResult),
    /// Valid "no food items found" message
    NoFood(String),
}

/// Client for the platelens-server /analyze endpoint.
#[derive(Debug, Clone)]
pub struct AnalyzeClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl AnalyzeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Upload an image and return the server's analysis.
    ///
    /// Errors are flattened to display strings for the UI.
    pub fn analyze(&self, file_name: &str, image: Vec<u8>) -> Result<AnalyzeOutcome, String> {
        let part = reqwest::blocking::multipart::Part::bytes(image)
            .file_name(file_name.to_string());
        let form = reqwest::blocking::multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(format!("{}/analyze", self.base_url))
            .multipart(form)
            .send()
            .map_err(|e| format!("Server unreachable: {e}"))?;

        let status = response.status();
        let value: serde_json::Value = response
            .json()
            .map_err(|e| format!("Malformed server response: {e}"))?;

        if !status.is_success() {
            let message = value
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("request failed");
            return Err(format!("{status}: {message}"));
        }

        if let Some(message) = value.get("message").and_then(|v| v.as_str()) {
            return Ok(AnalyzeOutcome::NoFood(message.to_string()));
        }

        serde_json::from_value(value)
            .map(AnalyzeOutcome::Result)
            .map_err(|e| format!("Malformed analysis result: {e}"))
    }
}

/// Blocking recipe index client for the Recipes tab.
///
/// The dashboard queries TheMealDB directly, one ingredient at a time, the
/// same filter endpoint the pipeline uses.
#[derive(Debug, Clone)]
pub struct RecipeClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl Default for RecipeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeClient {
    pub fn new() -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: mealdb::DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch recipe stubs for one ingredient.
    ///
    /// A non-success response is a valid empty result, matching the server
    /// pipeline's degradation semantics.
    pub fn recipes_for(&self, ingredient: &str) -> Result<Vec<RecipeStub>, String> {
        let response = self
            .http
            .get(format!("{}/filter.php", self.base_url))
            .query(&[("i", ingredient)])
            .send()
            .map_err(|e| format!("Recipe index unreachable: {e}"))?;

        if !response.status().is_success() {
            return Ok(Vec::new());
        }

        let filter: FilterResponse = response
            .json()
            .map_err(|e| format!("Malformed recipe response: {e}"))?;

        Ok(mealdb::stubs_from_response(filter))
    }
}
