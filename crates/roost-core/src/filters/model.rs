//! Canonical search filter model.
//!
//! `CanonicalFilters` is the single validated representation of a property
//! search that flows between the normalizer, the session store, the query
//! builder and the relaxation loop. Unset fields are `None`, which is
//! distinct from an explicitly empty list ("no preference").

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Top-level property category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HostOption {
    Home,
    Apartment,
    Hostel,
}

/// Hostel occupancy category, only meaningful when `host_option` is `Hostel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HostelType {
    Male,
    Female,
    Mixed,
}

/// A single filter attribute, identified by its wire name.
///
/// The strum serializations are the exact key names the upstream extraction
/// step emits (camelCase, with the legacy capitalized `Persons`), so dropped
/// keys can be reported back verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum FilterKey {
    #[strum(serialize = "city")]
    City,
    #[strum(serialize = "addressQuery")]
    AddressQuery,
    #[strum(serialize = "minRent")]
    MinRent,
    #[strum(serialize = "maxRent")]
    MaxRent,
    #[strum(serialize = "bedrooms")]
    Bedrooms,
    #[strum(serialize = "bathrooms")]
    Bathrooms,
    #[strum(serialize = "beds")]
    Beds,
    #[strum(serialize = "Persons")]
    Persons,
    #[strum(serialize = "floorLevel")]
    FloorLevel,
    #[strum(serialize = "hostOption")]
    HostOption,
    #[strum(serialize = "hostelType")]
    HostelType,
    #[strum(serialize = "stateTerritory")]
    StateTerritory,
    #[strum(serialize = "minSecurity")]
    MinSecurity,
    #[strum(serialize = "maxSecurity")]
    MaxSecurity,
    #[strum(serialize = "highlighted")]
    Highlighted,
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
}

/// The canonical, validated representation of a search query.
///
/// Every field is optional; rent and security-deposit bounds are independent
/// (an inverted range is passed through untouched and simply yields an empty
/// result set downstream).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanonicalFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beds: Option<i64>,
    /// Allowed occupancy. Capitalized wire name kept for compatibility with
    /// the extraction service.
    #[serde(rename = "Persons", skip_serializing_if = "Option::is_none")]
    pub persons: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub floor_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_option: Option<HostOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_type: Option<HostelType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_territory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_security: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_security: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety: Option<Vec<String>>,
}

impl CanonicalFilters {
    /// Returns true if no field is set at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true if the given attribute is set.
    ///
    /// An explicitly empty list counts as set: "no preference" is state the
    /// user expressed, and the relaxation loop treats it like any other key.
    pub fn contains(&self, key: FilterKey) -> bool {
        match key {
            FilterKey::City => self.city.is_some(),
            FilterKey::AddressQuery => self.address_query.is_some(),
            FilterKey::MinRent => self.min_rent.is_some(),
            FilterKey::MaxRent => self.max_rent.is_some(),
            FilterKey::Bedrooms => self.bedrooms.is_some(),
            FilterKey::Bathrooms => self.bathrooms.is_some(),
            FilterKey::Beds => self.beds.is_some(),
            FilterKey::Persons => self.persons.is_some(),
            FilterKey::FloorLevel => self.floor_level.is_some(),
            FilterKey::HostOption => self.host_option.is_some(),
            FilterKey::HostelType => self.hostel_type.is_some(),
            FilterKey::StateTerritory => self.state_territory.is_some(),
            FilterKey::MinSecurity => self.min_security.is_some(),
            FilterKey::MaxSecurity => self.max_security.is_some(),
            FilterKey::Highlighted => self.highlighted.is_some(),
            FilterKey::Amenities => self.amenities.is_some(),
            FilterKey::Bills => self.bills.is_some(),
            FilterKey::MealPlan => self.meal_plan.is_some(),
            FilterKey::Rules => self.rules.is_some(),
            FilterKey::Safety => self.safety.is_some(),
        }
    }

    /// Unsets the given attribute.
    pub fn clear(&mut self, key: FilterKey) {
        match key {
            FilterKey::City => self.city = None,
            FilterKey::AddressQuery => self.address_query = None,
            FilterKey::MinRent => self.min_rent = None,
            FilterKey::MaxRent => self.max_rent = None,
            FilterKey::Bedrooms => self.bedrooms = None,
            FilterKey::Bathrooms => self.bathrooms = None,
            FilterKey::Beds => self.beds = None,
            FilterKey::Persons => self.persons = None,
            FilterKey::FloorLevel => self.floor_level = None,
            FilterKey::HostOption => self.host_option = None,
            FilterKey::HostelType => self.hostel_type = None,
            FilterKey::StateTerritory => self.state_territory = None,
            FilterKey::MinSecurity => self.min_security = None,
            FilterKey::MaxSecurity => self.max_security = None,
            FilterKey::Highlighted => self.highlighted = None,
            FilterKey::Amenities => self.amenities = None,
            FilterKey::Bills => self.bills = None,
            FilterKey::MealPlan => self.meal_plan = None,
            FilterKey::Rules => self.rules = None,
            FilterKey::Safety => self.safety = None,
        }
    }

    /// Overlays `incoming` on top of this filter set, field by field.
    ///
    /// Set fields in `incoming` overwrite the stored value wholesale; unset
    /// fields preserve it. Lists are replaced, never unioned: a new turn
    /// saying "with a tv" supersedes an earlier "with wifi" rather than
    /// accumulating both.
    pub fn overlay(&mut self, incoming: &CanonicalFilters) {
        macro_rules! take {
            ($field:ident) => {
                if incoming.$field.is_some() {
                    self.$field = incoming.$field.clone();
                }
            };
        }
        take!(city);
        take!(address_query);
        take!(min_rent);
        take!(max_rent);
        take!(bedrooms);
        take!(bathrooms);
        take!(beds);
        take!(persons);
        take!(floor_level);
        take!(host_option);
        take!(hostel_type);
        take!(state_territory);
        take!(min_security);
        take!(max_security);
        take!(highlighted);
        take!(amenities);
        take!(bills);
        take!(meal_plan);
        take!(rules);
        take!(safety);
    }
}
