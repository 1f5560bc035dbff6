//! Label filter: raw vision labels -> allow-listed foods

use crate::catalog::canonical_name;

/// Keep only allow-listed labels, preserving emission order and case.
///
/// Duplicates are kept; a food the vision API emits twice is reported twice.
/// An empty result is the valid "no recognized food" outcome, not an error.
pub fn filter_labels(raw_labels: &[String]) -> Vec<String> {
    raw_labels
        .iter()
        .filter(|label| canonical_name(label).is_some())
        .cloned()
        .collect()
}
