use super::curve_loop::LoopId;

entity_id! {
    /// Gmsh tag of a surface.
    SurfaceId
}

/// How Gmsh should fill a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// `Plane Surface`: a planar region, may have holes.
    Plane,
    /// `Surface`: a curved patch bounded by 3 or 4 curves (or a quadrilateral
    /// of splines), interpolated by Gmsh.
    Filling,
}

/// Data associated with a surface.
///
/// A surface is bounded by an outer loop and optionally inner loops (holes).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceData {
    pub id: SurfaceId,
    pub kind: SurfaceKind,
    /// The outer boundary loop.
    pub outer: LoopId,
    /// Inner boundary loops.
    pub holes: Vec<LoopId>,
    /// If `true`, the outer loop is referenced reversed (`{-id}`).
    pub flipped: bool,
}

impl SurfaceData {
    /// A filling surface over one loop.
    #[must_use]
    pub fn filling(id: SurfaceId, outer: LoopId) -> Self {
        Self {
            id,
            kind: SurfaceKind::Filling,
            outer,
            holes: Vec::new(),
            flipped: false,
        }
    }

    /// A plane surface over one loop, with optional holes.
    #[must_use]
    pub fn plane(id: SurfaceId, outer: LoopId, holes: Vec<LoopId>) -> Self {
        Self {
            id,
            kind: SurfaceKind::Plane,
            outer,
            holes,
            flipped: false,
        }
    }

    /// Returns the same surface with its outer loop reversed.
    #[must_use]
    pub fn flipped(mut self) -> Self {
        self.flipped = !self.flipped;
        self
    }

    /// Outer loop followed by the holes.
    pub fn loops(&self) -> impl Iterator<Item = LoopId> + '_ {
        std::iter::once(self.outer).chain(self.holes.iter().copied())
    }
}
