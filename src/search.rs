//! Substring search over a full listing
//!
//! Search is a filter, not an index: callers pass everything they listed and
//! get back the matching subset in the same order. Queries are expected to be
//! non-blank (see [`crate::validation::parse_query`]).

use crate::equipment::Equipment;
use crate::medicine::Medicine;

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Medicines whose name contains `query`, ignoring case
pub fn filter_medicines(medicines: Vec<Medicine>, query: &str) -> Vec<Medicine> {
    let needle = query.to_lowercase();
    medicines
        .into_iter()
        .filter(|m| contains_ignore_case(&m.name, &needle))
        .collect()
}

/// Equipment whose name or description contains `query`, ignoring case
pub fn filter_equipment(equipment: Vec<Equipment>, query: &str) -> Vec<Equipment> {
    let needle = query.to_lowercase();
    equipment
        .into_iter()
        .filter(|e| {
            contains_ignore_case(&e.name, &needle)
                || e.description.as_deref().is_some_and(|d| contains_ignore_case(d, &needle))
        })
        .collect()
}
