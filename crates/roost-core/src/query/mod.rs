//! Listing query construction: predicate tree and filter-to-query builder.

pub mod builder;
pub mod predicate;

pub use builder::build;
pub use predicate::{Field, Predicate};
