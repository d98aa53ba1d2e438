//! Progressive filter relaxation.
//!
//! When the full filter set yields nothing, filters are dropped one at a
//! time in a fixed priority order, re-counting after each drop, until the
//! search produces results or nothing is left to give up. The loop is
//! bounded and each step only ever weakens the predicate, so observed
//! counts are non-decreasing.

use async_trait::async_trait;

use crate::error::Result;
use crate::filters::{CanonicalFilters, FilterKey};
use crate::listing::ListingPage;
use crate::query::{self, Predicate};

/// The order in which filters are given up, least- to most-essential.
/// Location-ish constraints (`city`, `addressQuery`) are not in the list;
/// they only fall in the terminal fallback steps.
pub const RELAXATION_PRIORITY: [FilterKey; 15] = [
    FilterKey::Amenities,
    FilterKey::Bills,
    FilterKey::Safety,
    FilterKey::Highlighted,
    FilterKey::HostOption,
    FilterKey::MinSecurity,
    FilterKey::MaxSecurity,
    FilterKey::MinRent,
    FilterKey::MaxRent,
    FilterKey::Beds,
    FilterKey::Bedrooms,
    FilterKey::Bathrooms,
    FilterKey::FloorLevel,
    FilterKey::Persons,
    FilterKey::StateTerritory,
];

/// Count and page access to the listing store.
///
/// The store itself lives elsewhere; this trait is the seam the relaxation
/// loop (and tests) inject an implementation through. Errors are fatal for
/// the turn; there is no meaningful degraded answer to "how many match".
/// Implementations over remote stores must bound their calls with their
/// own timeouts and report a timeout as an error.
#[async_trait]
pub trait ListingOracle: Send + Sync {
    /// Counts listings matching the predicate.
    async fn count(&self, predicate: &Predicate) -> Result<u64>;

    /// Fetches one page of matching listings. `page` is 1-based.
    async fn fetch_page(
        &self,
        predicate: &Predicate,
        page: u32,
        page_size: u32,
    ) -> Result<ListingPage>;
}

/// The outcome of one relaxation run.
///
/// `filters_used` always corresponds exactly to the predicate that produced
/// `result_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationResult {
    pub filters_used: CanonicalFilters,
    /// Keys removed from the original filter set, in removal order.
    pub dropped_keys: Vec<FilterKey>,
    pub result_count: u64,
    pub message: String,
}

/// Runs the relaxation loop for a filter set.
///
/// 1. Count with everything applied; any hit is a perfect match.
/// 2. Drop keys in [`RELAXATION_PRIORITY`] order, re-counting after each,
///    stopping at the first non-zero count.
/// 3. Still nothing: fall back to city-only, then address-keywords-only,
///    then all active listings. A zero count on the final fallback is a
///    valid terminal answer, not an error.
pub async fn plan(
    filters: &CanonicalFilters,
    oracle: &dyn ListingOracle,
) -> Result<RelaxationResult> {
    let mut working = filters.clone();
    let mut dropped: Vec<FilterKey> = Vec::new();

    let count = oracle.count(&query::build(&working)).await?;
    tracing::debug!(target: "relax", count, "initial count with full filter set");
    if count > 0 {
        return Ok(RelaxationResult {
            filters_used: working,
            dropped_keys: dropped,
            result_count: count,
            message: "Found places matching everything you asked for.".to_string(),
        });
    }

    for key in RELAXATION_PRIORITY {
        if !working.contains(key) {
            continue;
        }
        working.clear(key);
        dropped.push(key);

        let count = oracle.count(&query::build(&working)).await?;
        tracing::debug!(target: "relax", key = %key, count, "re-counted after dropping key");
        if count > 0 {
            let relaxed = dropped
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Ok(RelaxationResult {
                filters_used: working,
                dropped_keys: dropped,
                result_count: count,
                message: format!("No exact matches. We broadened the search by relaxing: {relaxed}."),
            });
        }
    }

    // Every droppable key is gone and the count is still zero. Fall back to
    // the broadest location-anchored search we can still justify.
    if let Some(city) = &filters.city {
        if filters.address_query.is_some() {
            dropped.push(FilterKey::AddressQuery);
        }
        let city_only = CanonicalFilters {
            city: Some(city.clone()),
            ..Default::default()
        };
        let count = oracle.count(&query::build(&city_only)).await?;
        tracing::debug!(target: "relax", %city, count, "city-only fallback");
        return Ok(RelaxationResult {
            filters_used: city_only,
            dropped_keys: dropped,
            result_count: count,
            message: format!(
                "Nothing matched your filters, so here is everything available in {city}."
            ),
        });
    }

    if let Some(address_query) = &filters.address_query {
        let address_only = CanonicalFilters {
            address_query: Some(address_query.clone()),
            ..Default::default()
        };
        let count = oracle.count(&query::build(&address_only)).await?;
        tracing::debug!(target: "relax", count, "address-keywords fallback");
        return Ok(RelaxationResult {
            filters_used: address_only,
            dropped_keys: dropped,
            result_count: count,
            message: "Nothing matched your filters, so here is everything near the location you mentioned.".to_string(),
        });
    }

    let open = CanonicalFilters::default();
    let count = oracle.count(&query::build(&open)).await?;
    tracing::debug!(target: "relax", count, "open-search fallback");
    Ok(RelaxationResult {
        filters_used: open,
        dropped_keys: dropped,
        result_count: count,
        message: "Nothing matched your filters, so here is everything currently available.".to_string(),
    })
}
