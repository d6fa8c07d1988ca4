//! Builders, geometric queries and point transforms.

pub mod creation;
pub mod query;
pub mod transform;
