//! Normalization of raw extracted criteria into canonical filters.
//!
//! This is the single conversion boundary between the untyped extraction
//! output and the typed filter model. It is a total, pure function: every
//! input produces a valid `CanonicalFilters`, and anything that fails
//! validation is dropped rather than defaulted.

use std::str::FromStr;

use serde_json::Value;

use super::model::{CanonicalFilters, HostOption, HostelType};
use super::raw::RawCriteria;

/// Converts loosely-typed extracted criteria into canonical filters.
///
/// Field handling by kind:
/// - numeric: coerced from JSON numbers or numeric strings; `null`, missing
///   or non-numeric values omit the field (never default to 0)
/// - string: passed through only when non-empty; enum-valued strings must
///   also parse as their enum
/// - list: a present array is passed through as-is; a present non-array
///   becomes an explicit empty list ("no preference"); a missing key stays
///   unset
/// - boolean: passed through only when the source is a real boolean
pub fn normalize(raw: &RawCriteria) -> CanonicalFilters {
    CanonicalFilters {
        city: string_field(raw, "city"),
        address_query: string_field(raw, "addressQuery"),
        min_rent: number_field(raw, "minRent"),
        max_rent: number_field(raw, "maxRent"),
        bedrooms: integer_field(raw, "bedrooms"),
        bathrooms: integer_field(raw, "bathrooms"),
        beds: integer_field(raw, "beds"),
        persons: integer_field(raw, "Persons"),
        floor_level: integer_field(raw, "floorLevel"),
        host_option: enum_field::<HostOption>(raw, "hostOption"),
        hostel_type: enum_field::<HostelType>(raw, "hostelType"),
        state_territory: string_field(raw, "stateTerritory"),
        min_security: number_field(raw, "minSecurity"),
        max_security: number_field(raw, "maxSecurity"),
        highlighted: bool_field(raw, "highlighted"),
        amenities: list_field(raw, "amenities"),
        bills: list_field(raw, "bills"),
        meal_plan: list_field(raw, "mealPlan"),
        rules: list_field(raw, "rules"),
        safety: list_field(raw, "safety"),
    }
}

/// Coerces a JSON value to a finite float. Numeric strings count.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn number_field(raw: &RawCriteria, key: &str) -> Option<f64> {
    raw.get(key).and_then(coerce_number)
}

/// Integer fields truncate toward zero; range validation is not this
/// layer's job.
fn integer_field(raw: &RawCriteria, key: &str) -> Option<i64> {
    raw.get(key).and_then(coerce_number).map(|n| n.trunc() as i64)
}

fn string_field(raw: &RawCriteria, key: &str) -> Option<String> {
    match raw.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn enum_field<E: FromStr>(raw: &RawCriteria, key: &str) -> Option<E> {
    match raw.get(key) {
        Some(Value::String(s)) => E::from_str(s).ok(),
        _ => None,
    }
}

fn bool_field(raw: &RawCriteria, key: &str) -> Option<bool> {
    match raw.get(key) {
        Some(Value::Bool(b)) => Some(*b),
        _ => None,
    }
}

/// A present array passes through (string elements only, no de-duplication);
/// a present non-array collapses to the explicit empty list.
fn list_field(raw: &RawCriteria, key: &str) -> Option<Vec<String>> {
    match raw.get(key)? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => Some(Vec::new()),
    }
}
