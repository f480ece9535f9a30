//! The landing zone: immutable raw documents partitioned by category.

pub mod envelope;
pub mod error;
pub mod index;
pub mod store;
