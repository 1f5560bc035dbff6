//! Recipe post-processing for display

use std::collections::HashSet;

use platelens_types::RecipeStub;

/// Collapse recipes with identical titles, keeping the first occurrence.
///
/// Multiple ingredient queries can surface the same recipe; the title is the
/// sole dedup key, so two recipes with the same title but different URLs
/// still collapse to one.
pub fn dedupe_by_title(stubs: Vec<RecipeStub>) -> Vec<RecipeStub> {
    let mut seen = HashSet::new();
    stubs
        .into_iter()
        .filter(|stub| seen.insert(stub.title.clone()))
        .collect()
}

/// Measure units stripped from the front of ingredient names.
const MEASURE_UNITS: &[&str] = &[
    "cup", "tbsp", "tsp", "g", "kg", "oz", "lb", "liter", "ml", "can", "package", "slice",
    "pinch", "dash", "bunch", "piece", "head", "clove", "sprig", "box",
];

/// Normalize an ingredient name for recipe queries.
///
/// Trims, lowercases, and removes a single leading measure unit
/// ("cup flour" -> "flour").
pub fn clean_ingredient(ingredient: &str) -> String {
    let mut cleaned = ingredient.trim().to_lowercase();
    for unit in MEASURE_UNITS {
        let prefix = format!("{unit} ");
        if cleaned.starts_with(&prefix) {
            cleaned = cleaned.replacen(&prefix, "", 1);
            break;
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub(title: &str, url: &str) -> RecipeStub {
        RecipeStub {
            title: title.to_string(),
            url: url.to_string(),
            image: format!("{url}.jpg"),
        }
    }

    #[test]
    fn dedup_is_keyed_on_title_only() {
        let stubs = vec![
            stub("Banana Bread", "https://example/1"),
            stub("Fruit Salad", "https://example/2"),
            stub("Banana Bread", "https://example/3"),
        ];

        let deduped = dedupe_by_title(stubs);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].title, "Banana Bread");
        assert_eq!(deduped[0].url, "https://example/1");
        assert_eq!(deduped[1].title, "Fruit Salad");
    }

    #[test]
    fn dedup_preserves_order() {
        let stubs = vec![
            stub("C", "https://example/c"),
            stub("A", "https://example/a"),
            stub("B", "https://example/b"),
        ];
        let titles: Vec<_> = dedupe_by_title(stubs).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }

    #[test]
    fn clean_ingredient_strips_one_leading_unit() {
        assert_eq!(clean_ingredient("cup flour"), "flour");
        assert_eq!(clean_ingredient("  Tbsp Sugar "), "sugar");
        // Only a leading unit is removed
        assert_eq!(clean_ingredient("buttercup squash"), "buttercup squash");
        assert_eq!(clean_ingredient("Banana"), "banana");
    }
}
