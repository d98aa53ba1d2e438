//! Search execution: relaxation loop over the listing oracle.

pub mod relax;

#[cfg(test)]
mod relax_test;

pub use relax::{ListingOracle, RELAXATION_PRIORITY, RelaxationResult, plan};
