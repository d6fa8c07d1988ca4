use std::fmt;

use crate::math::Point3;

entity_id! {
    /// Gmsh tag of a geometric point.
    PointId
}

/// Characteristic mesh size attached to a point, as a Gmsh expression
/// over the constants declared in the options block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshSize {
    /// `msF`: far-field size.
    Farfield,
    /// `msLe{i}`: leading-edge size of station `i`.
    LeadingEdge(usize),
    /// `msTe{i}`: trailing-edge size of station `i`.
    TrailingEdge(usize),
    /// `gr{i}*msLe{i}`.
    GradedLeadingEdge(usize),
    /// `gr{i}*msTe{i}`.
    GradedTrailingEdge(usize),
}

impl fmt::Display for MeshSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Farfield => write!(f, "msF"),
            Self::LeadingEdge(i) => write!(f, "msLe{i}"),
            Self::TrailingEdge(i) => write!(f, "msTe{i}"),
            Self::GradedLeadingEdge(i) => write!(f, "gr{i}*msLe{i}"),
            Self::GradedTrailingEdge(i) => write!(f, "gr{i}*msTe{i}"),
        }
    }
}

/// Data associated with a geometric point.
#[derive(Debug, Clone)]
pub struct PointData {
    pub id: PointId,
    /// The 3D position of the point.
    pub coords: Point3,
    /// Optional characteristic mesh size.
    pub size: Option<MeshSize>,
}

impl PointData {
    /// Creates a new point.
    #[must_use]
    pub fn new(id: PointId, coords: Point3, size: Option<MeshSize>) -> Self {
        Self { id, coords, size }
    }
}
