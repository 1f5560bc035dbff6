//! Macro aggregation arithmetic
//!
//! Sums per-100g macro records across every detected food, then scales by a
//! user-supplied quantity in grams. All numeric coercion is permissive:
//! anything that fails to parse contributes zero, never an error.

use platelens_types::{AggregatedMacros, MacroRecord};

/// Coerce a formatted "value unit" string to a float.
///
/// Strips everything except digits and the decimal point, then parses.
/// `"89 KCAL"` -> 89.0, `"1.1 G"` -> 1.1, `"N/A"` -> 0.0. Parse failures are
/// silently zeroed; that can mask malformed upstream data, but it is the
/// contract downstream consumers rely on.
pub fn clean_value(value: &str) -> f64 {
    let numeric: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    numeric.parse().unwrap_or(0.0)
}

/// Sum all macro fields across the given per-100g records.
pub fn sum_macros<'a, I>(records: I) -> AggregatedMacros
where
    I: IntoIterator<Item = &'a MacroRecord>,
{
    let mut totals = AggregatedMacros::ZERO;
    for record in records {
        totals.calories += clean_value(&record.calories);
        totals.protein += clean_value(&record.protein);
        totals.carbs += clean_value(&record.carbs);
        totals.fiber += clean_value(&record.fiber);
    }
    totals
}

/// Scale per-100g totals by a quantity in grams.
///
/// Non-positive quantities zero every field.
pub fn scale_for_quantity(per_100g: AggregatedMacros, quantity_grams: f64) -> AggregatedMacros {
    if quantity_grams <= 0.0 {
        return AggregatedMacros::ZERO;
    }
    let factor = quantity_grams / 100.0;
    AggregatedMacros {
        calories: per_100g.calories * factor,
        protein: per_100g.protein * factor,
        carbs: per_100g.carbs * factor,
        fiber: per_100g.fiber * factor,
    }
}

/// Sum and scale in one step, the shape the dashboard uses.
pub fn aggregate<'a, I>(records: I, quantity_grams: f64) -> AggregatedMacros
where
    I: IntoIterator<Item = &'a MacroRecord>,
{
    scale_for_quantity(sum_macros(records), quantity_grams)
}
