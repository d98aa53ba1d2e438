//! In-memory listing oracle.
//!
//! Evaluates query predicates directly over a fixed set of listings. Used
//! as the oracle in tests and local development; production points the
//! same trait at the document store.

use async_trait::async_trait;
use serde_json::Value;

use roost_core::error::Result;
use roost_core::listing::{Listing, ListingPage};
use roost_core::query::Predicate;
use roost_core::search::ListingOracle;

pub struct InMemoryListingIndex {
    entries: Vec<(Listing, Value)>,
}

impl InMemoryListingIndex {
    /// Builds an index over the given listings.
    pub fn new(listings: Vec<Listing>) -> Result<Self> {
        let entries = listings
            .into_iter()
            .map(|listing| {
                let doc = serde_json::to_value(&listing)?;
                Ok((listing, doc))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    fn matching(&self, predicate: &Predicate) -> impl Iterator<Item = &Listing> {
        self.entries
            .iter()
            .filter(|(_, doc)| predicate.matches(doc))
            .map(|(listing, _)| listing)
    }
}

#[async_trait]
impl ListingOracle for InMemoryListingIndex {
    async fn count(&self, predicate: &Predicate) -> Result<u64> {
        Ok(self.matching(predicate).count() as u64)
    }

    async fn fetch_page(
        &self,
        predicate: &Predicate,
        page: u32,
        page_size: u32,
    ) -> Result<ListingPage> {
        let matched: Vec<&Listing> = self.matching(predicate).collect();
        let total = matched.len() as u64;
        let offset = (page.saturating_sub(1) as usize) * page_size as usize;
        let data = matched
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .cloned()
            .collect();
        Ok(ListingPage { data, total })
    }
}
