//! Search filter domain: canonical model, raw extraction input, normalizer.

pub mod model;
pub mod normalize;
pub mod raw;

pub use model::{CanonicalFilters, FilterKey, HostOption, HostelType};
pub use normalize::normalize;
pub use raw::RawCriteria;
