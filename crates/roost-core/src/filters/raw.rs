//! Loosely-typed criteria as produced by the intent extraction service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An untyped bag of extracted search criteria.
///
/// The extraction service emits whatever it could pull out of the utterance:
/// numbers as strings, `null` for things it half-recognized, occasionally a
/// wrong type altogether. Nothing in here is trusted; the normalizer is the
/// only way to turn it into [`CanonicalFilters`](super::CanonicalFilters).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawCriteria(pub Map<String, Value>);

impl RawCriteria {
    /// Creates an empty criteria bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value for a key, if the key is present at all.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the extraction produced nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for RawCriteria {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for RawCriteria {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
