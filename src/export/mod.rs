//! Gmsh `.geo` text emission.

mod geo_writer;

pub use geo_writer::GeoWriter;
