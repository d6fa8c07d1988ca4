/// Declares a Gmsh entity identifier: a plain integer tag with a typed wrapper.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Returns the raw Gmsh tag.
            #[must_use]
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub mod curve;
pub mod curve_loop;
pub mod physical;
pub mod point;
pub mod surface;
pub mod surface_loop;
pub mod volume;

pub use curve::{CurveData, CurveId, CurveKind};
pub use curve_loop::{CurveLoopData, LoopId, OrientedCurve};
pub use physical::{PhysicalGroup, PhysicalMembers};
pub use point::{MeshSize, PointData, PointId};
pub use surface::{SurfaceData, SurfaceId, SurfaceKind};
pub use surface_loop::{OrientedSurface, SurfaceLoopData, SurfaceLoopId};
pub use volume::{VolumeData, VolumeId};

use std::collections::BTreeMap;

use crate::error::TopologyError;

/// Gathers the entities of every component under their Gmsh IDs.
///
/// The components own their entity records; the store only holds copies
/// keyed by ID so that cross-component references can be resolved and
/// checked (see [`crate::operations::query::IsValid`]).
#[derive(Debug, Default)]
pub struct TopologyStore {
    points: BTreeMap<PointId, PointData>,
    curves: BTreeMap<CurveId, CurveData>,
    loops: BTreeMap<LoopId, CurveLoopData>,
    surfaces: BTreeMap<SurfaceId, SurfaceData>,
    surface_loops: BTreeMap<SurfaceLoopId, SurfaceLoopData>,
    volumes: BTreeMap<VolumeId, VolumeData>,
}

fn insert_unique<K: Ord + Copy, V>(
    map: &mut BTreeMap<K, V>,
    key: K,
    value: V,
    class: &'static str,
    raw: u32,
) -> Result<(), TopologyError> {
    if map.contains_key(&key) {
        return Err(TopologyError::DuplicateId { class, id: raw });
    }
    map.insert(key, value);
    Ok(())
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Point operations ---

    /// Inserts a point.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateId`] if the ID is already taken.
    pub fn add_point(&mut self, data: PointData) -> Result<(), TopologyError> {
        insert_unique(&mut self.points, data.id, data.clone(), "point", data.id.0)
    }

    /// Returns the point with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn point(&self, id: PointId) -> Result<&PointData, TopologyError> {
        self.points.get(&id).ok_or(TopologyError::EntityNotFound {
            class: "point",
            id: id.0,
        })
    }

    // --- Curve operations ---

    /// Inserts a curve.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateId`] if the ID is already taken.
    pub fn add_curve(&mut self, data: CurveData) -> Result<(), TopologyError> {
        let id = data.id;
        insert_unique(&mut self.curves, id, data, "curve", id.0)
    }

    /// Returns the curve with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn curve(&self, id: CurveId) -> Result<&CurveData, TopologyError> {
        self.curves.get(&id).ok_or(TopologyError::EntityNotFound {
            class: "curve",
            id: id.0,
        })
    }

    // --- Curve loop operations ---

    /// Inserts a curve loop.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateId`] if the ID is already taken.
    pub fn add_loop(&mut self, data: CurveLoopData) -> Result<(), TopologyError> {
        let id = data.id;
        insert_unique(&mut self.loops, id, data, "curve loop", id.0)
    }

    /// Returns the curve loop with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn curve_loop(&self, id: LoopId) -> Result<&CurveLoopData, TopologyError> {
        self.loops.get(&id).ok_or(TopologyError::EntityNotFound {
            class: "curve loop",
            id: id.0,
        })
    }

    // --- Surface operations ---

    /// Inserts a surface.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateId`] if the ID is already taken.
    pub fn add_surface(&mut self, data: SurfaceData) -> Result<(), TopologyError> {
        let id = data.id;
        insert_unique(&mut self.surfaces, id, data, "surface", id.0)
    }

    /// Returns the surface with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn surface(&self, id: SurfaceId) -> Result<&SurfaceData, TopologyError> {
        self.surfaces.get(&id).ok_or(TopologyError::EntityNotFound {
            class: "surface",
            id: id.0,
        })
    }

    // --- Surface loop operations ---

    /// Inserts a surface loop.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateId`] if the ID is already taken.
    pub fn add_surface_loop(&mut self, data: SurfaceLoopData) -> Result<(), TopologyError> {
        let id = data.id;
        insert_unique(&mut self.surface_loops, id, data, "surface loop", id.0)
    }

    /// Returns the surface loop with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn surface_loop(&self, id: SurfaceLoopId) -> Result<&SurfaceLoopData, TopologyError> {
        self.surface_loops
            .get(&id)
            .ok_or(TopologyError::EntityNotFound {
                class: "surface loop",
                id: id.0,
            })
    }

    // --- Volume operations ---

    /// Inserts a volume.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::DuplicateId`] if the ID is already taken.
    pub fn add_volume(&mut self, data: VolumeData) -> Result<(), TopologyError> {
        let id = data.id;
        insert_unique(&mut self.volumes, id, data, "volume", id.0)
    }

    /// Returns the volume with the given ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn volume(&self, id: VolumeId) -> Result<&VolumeData, TopologyError> {
        self.volumes.get(&id).ok_or(TopologyError::EntityNotFound {
            class: "volume",
            id: id.0,
        })
    }

    // --- Iteration ---

    pub fn points(&self) -> impl Iterator<Item = &PointData> {
        self.points.values()
    }

    pub fn curves(&self) -> impl Iterator<Item = &CurveData> {
        self.curves.values()
    }

    pub fn curve_loops(&self) -> impl Iterator<Item = &CurveLoopData> {
        self.loops.values()
    }

    pub fn surfaces(&self) -> impl Iterator<Item = &SurfaceData> {
        self.surfaces.values()
    }

    pub fn surface_loops(&self) -> impl Iterator<Item = &SurfaceLoopData> {
        self.surface_loops.values()
    }

    pub fn volumes(&self) -> impl Iterator<Item = &VolumeData> {
        self.volumes.values()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    #[test]
    fn duplicate_point_is_rejected() {
        let mut store = TopologyStore::new();
        let p = PointData::new(PointId(7), Point3::origin(), None);
        store.add_point(p.clone()).unwrap();
        let err = store.add_point(p).unwrap_err();
        assert!(matches!(err, TopologyError::DuplicateId { class: "point", id: 7 }));
    }

    #[test]
    fn missing_curve_is_reported() {
        let store = TopologyStore::new();
        let err = store.curve(CurveId(3)).unwrap_err();
        assert!(matches!(err, TopologyError::EntityNotFound { class: "curve", id: 3 }));
    }

    #[test]
    fn points_iterate_in_id_order() {
        let mut store = TopologyStore::new();
        for id in [5, 1, 3] {
            store
                .add_point(PointData::new(PointId(id), Point3::origin(), None))
                .unwrap();
        }
        let ids: Vec<u32> = store.points().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
