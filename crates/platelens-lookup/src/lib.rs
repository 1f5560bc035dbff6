//! External lookup clients: nutrition database and recipe index
//!
//! Both clients degrade gracefully: a miss or a non-success response yields
//! "absent"/empty for that food so the rest of the request can proceed.

pub mod mealdb;
pub mod usda;

pub use mealdb::MealDbClient;
pub use usda::UsdaClient;
