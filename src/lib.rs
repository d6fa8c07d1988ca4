pub mod components;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod ids;
pub mod io;
pub mod math;
pub mod model;
pub mod operations;
pub mod topology;

#[cfg(test)]
mod testing;

pub use error::{GeogenError, Result};
pub use model::GeoModel;
