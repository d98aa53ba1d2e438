//! Deterministic construction of listing queries from canonical filters.

use serde_json::json;

use crate::filters::CanonicalFilters;

use super::predicate::{Field, Predicate};

/// The address-like fields the free-text matcher looks at.
const ADDRESS_FIELDS: [Field; 5] = [
    Field::Title,
    Field::Location,
    Field::Street,
    Field::City,
    Field::StateTerritory,
];

/// Builds the listing-store predicate for a filter set.
///
/// Pure: the same filters always produce the same predicate. Every query
/// unconditionally requires an active listing; that base condition is not a
/// filter and never relaxes. Unset fields contribute no condition, and an
/// explicitly empty list is "no preference" and contributes none either.
pub fn build(filters: &CanonicalFilters) -> Predicate {
    let mut conditions = vec![Predicate::Eq(Field::Status, json!("active"))];

    if let Some(city) = &filters.city {
        conditions.push(Predicate::ContainsText(Field::City, city.clone()));
    }
    if let Some(query) = &filters.address_query {
        conditions.push(address_predicate(query));
    }
    if let Some(min) = filters.min_rent {
        conditions.push(Predicate::Gte(Field::Rent, min));
    }
    if let Some(max) = filters.max_rent {
        conditions.push(Predicate::Lte(Field::Rent, max));
    }
    if let Some(n) = filters.bedrooms {
        conditions.push(Predicate::Eq(Field::Bedrooms, json!(n)));
    }
    if let Some(n) = filters.bathrooms {
        conditions.push(Predicate::Eq(Field::Bathrooms, json!(n)));
    }
    if let Some(n) = filters.beds {
        conditions.push(Predicate::Eq(Field::Beds, json!(n)));
    }
    if let Some(n) = filters.persons {
        conditions.push(Predicate::Eq(Field::Persons, json!(n)));
    }
    if let Some(n) = filters.floor_level {
        conditions.push(Predicate::Eq(Field::FloorLevel, json!(n)));
    }
    if let Some(option) = filters.host_option {
        conditions.push(Predicate::EqText(Field::HostOption, option.to_string()));
    }
    if let Some(hostel_type) = filters.hostel_type {
        conditions.push(Predicate::EqText(Field::HostelType, hostel_type.to_string()));
    }
    if let Some(territory) = &filters.state_territory {
        conditions.push(Predicate::ContainsText(
            Field::StateTerritory,
            territory.clone(),
        ));
    }
    if let Some(min) = filters.min_security {
        conditions.push(Predicate::Gte(Field::SecurityDeposit, min));
    }
    if let Some(max) = filters.max_security {
        conditions.push(Predicate::Lte(Field::SecurityDeposit, max));
    }
    if filters.highlighted == Some(true) {
        conditions.push(Predicate::Eq(Field::Highlighted, json!(true)));
    }

    push_list(&mut conditions, Field::Amenities, &filters.amenities);
    push_list(&mut conditions, Field::Bills, &filters.bills);
    push_list(&mut conditions, Field::MealPlan, &filters.meal_plan);
    push_list(&mut conditions, Field::Rules, &filters.rules);
    push_list(&mut conditions, Field::Safety, &filters.safety);

    Predicate::All(conditions)
}

/// Best-effort free-text address matching.
///
/// The query is split on whitespace, each word is matched case-insensitively
/// (and literally) as a substring of each address-like field, and the whole
/// thing is one flat disjunction: a listing matches when ANY single word
/// appears in ANY one field. "Karachi Apartment" therefore matches a listing
/// titled "Cozy Apartment" in Islamabad, because the word "Apartment" hits
/// the title. That is the intended best-match-any-word behavior, not
/// all-words-must-match.
fn address_predicate(query: &str) -> Predicate {
    let word_matches = query
        .split_whitespace()
        .flat_map(|word| {
            ADDRESS_FIELDS
                .iter()
                .map(move |field| Predicate::ContainsText(*field, word.to_string()))
        })
        .collect();
    Predicate::Any(word_matches)
}

fn push_list(conditions: &mut Vec<Predicate>, field: Field, values: &Option<Vec<String>>) {
    if let Some(values) = values
        && !values.is_empty()
    {
        conditions.push(Predicate::ContainsAll(field, values.clone()));
    }
}
