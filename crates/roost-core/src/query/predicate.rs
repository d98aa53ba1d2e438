//! Query predicate combinator tree.
//!
//! A [`Predicate`] is an explicit AND/OR tree over field-match leaves. It
//! has two consumers: [`Predicate::render`] produces the document-store
//! query the listing oracle executes, and [`Predicate::matches`] evaluates
//! the same semantics against an in-memory document, which is what keeps
//! the match rules independently testable.

use serde_json::{Map, Value, json};
use strum_macros::{AsRefStr, Display};

/// A filterable field of the listing document, by its stored name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum Field {
    #[strum(serialize = "title")]
    Title,
    #[strum(serialize = "location")]
    Location,
    #[strum(serialize = "street")]
    Street,
    #[strum(serialize = "city")]
    City,
    #[strum(serialize = "stateTerritory")]
    StateTerritory,
    #[strum(serialize = "rent")]
    Rent,
    #[strum(serialize = "securityDeposit")]
    SecurityDeposit,
    #[strum(serialize = "bedrooms")]
    Bedrooms,
    #[strum(serialize = "bathrooms")]
    Bathrooms,
    #[strum(serialize = "beds")]
    Beds,
    #[strum(serialize = "persons")]
    Persons,
    #[strum(serialize = "floorLevel")]
    FloorLevel,
    #[strum(serialize = "hostOption")]
    HostOption,
    #[strum(serialize = "hostelType")]
    HostelType,
    #[strum(serialize = "amenities")]
    Amenities,
    #[strum(serialize = "bills")]
    Bills,
    #[strum(serialize = "mealPlan")]
    MealPlan,
    #[strum(serialize = "rules")]
    Rules,
    #[strum(serialize = "safety")]
    Safety,
    #[strum(serialize = "highlighted")]
    Highlighted,
    #[strum(serialize = "status")]
    Status,
}

/// A structured query predicate over listing documents.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every child must match. An empty conjunction matches everything.
    All(Vec<Predicate>),
    /// At least one child must match. An empty disjunction matches nothing.
    Any(Vec<Predicate>),
    /// Strict equality against a JSON value.
    Eq(Field, Value),
    /// Anchored, case-insensitive text equality.
    EqText(Field, String),
    /// Case-insensitive substring match. The needle is treated literally;
    /// match-syntax characters are escaped at render time.
    ContainsText(Field, String),
    /// Inclusive lower bound on a numeric field.
    Gte(Field, f64),
    /// Inclusive upper bound on a numeric field.
    Lte(Field, f64),
    /// Array field must contain every one of these values.
    ContainsAll(Field, Vec<String>),
}

impl Predicate {
    /// Renders the predicate as a document-store query.
    pub fn render(&self) -> Value {
        match self {
            Predicate::All(children) => {
                if children.is_empty() {
                    json!({})
                } else {
                    json!({ "$and": children.iter().map(Predicate::render).collect::<Vec<_>>() })
                }
            }
            Predicate::Any(children) => {
                json!({ "$or": children.iter().map(Predicate::render).collect::<Vec<_>>() })
            }
            Predicate::Eq(field, value) => field_query(*field, value.clone()),
            Predicate::EqText(field, text) => field_query(
                *field,
                json!({ "$regex": format!("^{}$", regex::escape(text)), "$options": "i" }),
            ),
            Predicate::ContainsText(field, text) => field_query(
                *field,
                json!({ "$regex": regex::escape(text), "$options": "i" }),
            ),
            Predicate::Gte(field, value) => field_query(*field, json!({ "$gte": value })),
            Predicate::Lte(field, value) => field_query(*field, json!({ "$lte": value })),
            Predicate::ContainsAll(field, values) => {
                field_query(*field, json!({ "$all": values }))
            }
        }
    }

    /// Evaluates the predicate against a listing document.
    ///
    /// `doc` is the JSON projection of a listing (see
    /// [`Listing`](crate::listing::Listing)); a missing field never matches.
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Predicate::All(children) => children.iter().all(|child| child.matches(doc)),
            Predicate::Any(children) => children.iter().any(|child| child.matches(doc)),
            Predicate::Eq(field, value) => match (doc.get(field.as_ref()), value) {
                (Some(Value::Number(a)), Value::Number(b)) => a.as_f64() == b.as_f64(),
                (Some(actual), expected) => actual == expected,
                (None, _) => false,
            },
            Predicate::EqText(field, text) => {
                text_value(doc, *field).is_some_and(|s| s.eq_ignore_ascii_case(text))
            }
            Predicate::ContainsText(field, text) => text_value(doc, *field)
                .is_some_and(|s| s.to_lowercase().contains(&text.to_lowercase())),
            Predicate::Gte(field, value) => {
                number_value(doc, *field).is_some_and(|n| n >= *value)
            }
            Predicate::Lte(field, value) => {
                number_value(doc, *field).is_some_and(|n| n <= *value)
            }
            Predicate::ContainsAll(field, values) => match doc.get(field.as_ref()) {
                Some(Value::Array(items)) => values.iter().all(|wanted| {
                    items.iter().any(|item| item.as_str() == Some(wanted.as_str()))
                }),
                _ => false,
            },
        }
    }
}

fn field_query(field: Field, condition: Value) -> Value {
    let mut map = Map::new();
    map.insert(field.as_ref().to_string(), condition);
    Value::Object(map)
}

fn text_value(doc: &Value, field: Field) -> Option<&str> {
    doc.get(field.as_ref()).and_then(Value::as_str)
}

fn number_value(doc: &Value, field: Field) -> Option<f64> {
    doc.get(field.as_ref()).and_then(Value::as_f64)
}
