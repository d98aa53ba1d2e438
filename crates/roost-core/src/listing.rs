//! Listing domain models.
//!
//! Only the filterable projection of a listing document is modeled here;
//! the marketplace's full listing schema lives with the listing service.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::filters::{HostOption, HostelType};

/// Publication state of a listing. Search only ever sees `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ListingStatus {
    Active,
    Pending,
    Inactive,
}

/// The filterable attributes of a rental listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub title: String,
    /// Free-text location description entered by the host.
    pub location: String,
    pub street: String,
    pub city: String,
    pub state_territory: String,
    pub rent: f64,
    pub security_deposit: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub beds: i64,
    pub persons: i64,
    pub floor_level: i64,
    pub host_option: HostOption,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostel_type: Option<HostelType>,
    pub amenities: Vec<String>,
    pub bills: Vec<String>,
    pub meal_plan: Vec<String>,
    pub rules: Vec<String>,
    pub safety: Vec<String>,
    pub highlighted: bool,
    pub status: ListingStatus,
}

/// One page of listings plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingPage {
    pub data: Vec<Listing>,
    pub total: u64,
}

impl ListingPage {
    /// Creates an empty page.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
        }
    }
}
