//! Domain logic for food photo analysis
//!
//! Pure functions and traits only: the allow-list catalog, label filtering,
//! macro aggregation arithmetic, recipe dedup, the rolling dashboard history,
//! and the collaborator seams the pipeline is built against.

pub mod aggregate;
pub mod catalog;
pub mod filter;
pub mod history;
pub mod recipes;
pub mod sources;

pub use catalog::{allowed_foods, canonical_name};
pub use filter::filter_labels;
pub use history::RollingHistory;
pub use sources::{LabelDetector, NutritionSource, RecipeSource};
