//! Collaborator seams for the external services
//!
//! The pipeline is written against these traits; the `platelens-vision` and
//! `platelens-lookup` crates provide the live implementations, tests provide
//! mocks.

use async_trait::async_trait;
use platelens_types::{MacroRecord, RecipeStub, Result};

/// Vision labeling service: image bytes in, raw label descriptions out.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detect labels for one image, in the service's emission order.
    ///
    /// Any failure here is fatal to the calling request.
    async fn detect_labels(&self, image: &[u8]) -> Result<Vec<String>>;
}

/// Nutrition database: canonical food name in, per-100g macros out.
#[async_trait]
pub trait NutritionSource: Send + Sync {
    /// Resolve macros for one canonical food name.
    ///
    /// `Ok(None)` means the database had no match ("absent"); callers treat
    /// it as zero contribution. Transport errors may surface as `Err`, which
    /// the pipeline also degrades to absent.
    async fn macros_per_100g(&self, canonical_name: &str) -> Result<Option<MacroRecord>>;
}

/// Recipe index: ingredient name in, recipe stubs out.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Fetch recipe stubs for one ingredient.
    ///
    /// "No meals" is a valid empty result; a non-success response also
    /// yields an empty list so other ingredients can continue.
    async fn recipes_for(&self, ingredient: &str) -> Result<Vec<RecipeStub>>;
}
