//! Built geometry components and their `.geo` emission contract.
//!
//! Components are created by the builders in [`crate::operations::creation`]
//! in dependency order (wing, tip, wake, domain). Each one owns the entity
//! records it allocated and exposes read-only ID tables to the components
//! built after it.

mod domain;
mod tip;
mod wake;
mod wing;

pub use domain::{BoxBounds, BoxDomain, Domain, SphereDomain};
pub use tip::{Tip, Wingtip};
pub use wake::{NoWake, Wake};
pub use wing::Wing;

use crate::error::TopologyError;
use crate::export::GeoWriter;
use crate::topology::{
    CurveData, CurveLoopData, PhysicalGroup, PointData, SurfaceData, SurfaceLoopData,
    TopologyStore, VolumeData,
};

/// Entity records owned by one component, in emission order.
#[derive(Debug, Default, Clone)]
pub struct Entities {
    pub points: Vec<PointData>,
    pub curves: Vec<CurveData>,
    pub loops: Vec<CurveLoopData>,
    pub surfaces: Vec<SurfaceData>,
    pub surface_loops: Vec<SurfaceLoopData>,
    pub volumes: Vec<VolumeData>,
    pub groups: Vec<PhysicalGroup>,
}

impl Entities {
    /// Copies every record into `store`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateId`] if an ID is already registered.
    pub fn register(&self, store: &mut TopologyStore) -> Result<(), TopologyError> {
        for point in &self.points {
            store.add_point(point.clone())?;
        }
        for curve in &self.curves {
            store.add_curve(curve.clone())?;
        }
        for curve_loop in &self.loops {
            store.add_loop(curve_loop.clone())?;
        }
        for surface in &self.surfaces {
            store.add_surface(surface.clone())?;
        }
        for shell in &self.surface_loops {
            store.add_surface_loop(shell.clone())?;
        }
        for volume in &self.volumes {
            store.add_volume(volume.clone())?;
        }
        Ok(())
    }
}

/// A component that can be written to a `.geo` file.
///
/// Each `write_*` method appends one block of statements. Blocks are
/// emitted for every component in dependency order before the next kind of
/// block starts, so a component may reference any entity of the components
/// built before it. Components without entities of a kind write nothing.
pub trait GeoComponent {
    /// Name used in section titles.
    fn title(&self) -> &'static str;

    /// The component's entity records, if it has any.
    fn entities(&self) -> Option<&Entities> {
        None
    }

    fn write_info(&self, _out: &mut GeoWriter) {}

    fn write_opts(&self, _out: &mut GeoWriter) {}

    fn write_points(&self, out: &mut GeoWriter) {
        let Some(entities) = self.entities().filter(|e| !e.points.is_empty()) else {
            return;
        };
        out.section(&format!("{} points", self.title()));
        for point in &entities.points {
            out.point(point);
        }
        out.blank();
    }

    fn write_lines(&self, out: &mut GeoWriter) {
        let Some(entities) = self.entities().filter(|e| !e.curves.is_empty()) else {
            return;
        };
        out.section(&format!("{} lines", self.title()));
        for curve in &entities.curves {
            out.curve(curve);
        }
        out.blank();
    }

    fn write_surfaces(&self, out: &mut GeoWriter) {
        let Some(entities) = self.entities().filter(|e| !e.surfaces.is_empty()) else {
            return;
        };
        out.section(&format!("{} line loops and surfaces", self.title()));
        for curve_loop in &entities.loops {
            out.curve_loop(curve_loop);
        }
        for surface in &entities.surfaces {
            out.surface(surface);
        }
        out.blank();
    }

    fn write_volumes(&self, out: &mut GeoWriter) {
        let Some(entities) = self.entities().filter(|e| !e.volumes.is_empty()) else {
            return;
        };
        out.section("Computational volumes");
        for shell in &entities.surface_loops {
            out.surface_loop(shell);
        }
        for volume in &entities.volumes {
            out.volume(volume);
        }
        out.blank();
    }

    fn write_physical(&self, out: &mut GeoWriter) {
        let Some(entities) = self
            .entities()
            .filter(|e| e.groups.iter().any(|g| !g.members.is_empty()))
        else {
            return;
        };
        out.section(&format!("{} physical groups", self.title()));
        for group in &entities.groups {
            out.physical(group);
        }
        out.blank();
    }

    /// Registers the component's entities for validation.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateId`] if an ID is already registered.
    fn register(&self, store: &mut TopologyStore) -> Result<(), TopologyError> {
        match self.entities() {
            Some(entities) => entities.register(store),
            None => Ok(()),
        }
    }
}
