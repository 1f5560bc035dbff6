//! Allow-list of recognized foods
//!
//! Maps lowercase vision-label tokens to the canonical nutrition-query
//! string (e.g. `"banana"` -> `"banana, raw"`). Loaded once from a single
//! shared asset so the pipeline and the dashboard can never drift apart.

use std::collections::HashMap;
use std::sync::OnceLock;

const ALLOWED_FOODS_JSON: &str = include_str!("../assets/allowed_foods.json");

/// The allow-list, loaded on first access. Keys are lowercase and the map is
/// never mutated after load.
pub fn allowed_foods() -> &'static HashMap<String, String> {
    static MAP: OnceLock<HashMap<String, String>> = OnceLock::new();
    MAP.get_or_init(|| {
        serde_json::from_str(ALLOWED_FOODS_JSON).expect("allowed_foods.json is a valid string map")
    })
}

/// Canonical nutrition-query name for a raw label, if allow-listed.
///
/// Matching is exact on the lowercased label; no fuzzy or partial matching.
pub fn canonical_name(label: &str) -> Option<&'static str> {
    allowed_foods()
        .get(&label.to_lowercase())
        .map(String::as_str)
}
