use super::surface_loop::SurfaceLoopId;

entity_id! {
    /// Gmsh tag of a volume.
    VolumeId
}

/// Data associated with a volume.
///
/// A volume is a region enclosed by one or more surface loops.
/// The first loop is the outer boundary; additional loops represent voids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeData {
    pub id: VolumeId,
    /// The outer boundary of the volume.
    pub outer_shell: SurfaceLoopId,
    /// Inner boundaries representing voids within the volume.
    pub inner_shells: Vec<SurfaceLoopId>,
}

impl VolumeData {
    /// A volume bounded by a single surface loop.
    #[must_use]
    pub fn new(id: VolumeId, outer_shell: SurfaceLoopId) -> Self {
        Self {
            id,
            outer_shell,
            inner_shells: Vec::new(),
        }
    }

    /// All bounding surface loops.
    pub fn shells(&self) -> impl Iterator<Item = SurfaceLoopId> + '_ {
        std::iter::once(self.outer_shell).chain(self.inner_shells.iter().copied())
    }
}
