use super::curve::CurveId;
use super::surface::SurfaceId;
use super::volume::VolumeId;

/// Members of a physical group, by entity dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhysicalMembers {
    Curves(Vec<CurveId>),
    Surfaces(Vec<SurfaceId>),
    Volumes(Vec<VolumeId>),
}

impl PhysicalMembers {
    /// Gmsh keyword of the group dimension.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Curves(_) => "Line",
            Self::Surfaces(_) => "Surface",
            Self::Volumes(_) => "Volume",
        }
    }

    /// Raw member tags.
    #[must_use]
    pub fn tags(&self) -> Vec<u32> {
        match self {
            Self::Curves(ids) => ids.iter().map(|id| id.0).collect(),
            Self::Surfaces(ids) => ids.iter().map(|id| id.0).collect(),
            Self::Volumes(ids) => ids.iter().map(|id| id.0).collect(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Curves(ids) => ids.is_empty(),
            Self::Surfaces(ids) => ids.is_empty(),
            Self::Volumes(ids) => ids.is_empty(),
        }
    }
}

/// A named set of entities exported to the solver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalGroup {
    pub name: &'static str,
    pub members: PhysicalMembers,
}

impl PhysicalGroup {
    #[must_use]
    pub fn curves(name: &'static str, ids: Vec<CurveId>) -> Self {
        Self {
            name,
            members: PhysicalMembers::Curves(ids),
        }
    }

    #[must_use]
    pub fn surfaces(name: &'static str, ids: Vec<SurfaceId>) -> Self {
        Self {
            name,
            members: PhysicalMembers::Surfaces(ids),
        }
    }

    #[must_use]
    pub fn volumes(name: &'static str, ids: Vec<VolumeId>) -> Self {
        Self {
            name,
            members: PhysicalMembers::Volumes(ids),
        }
    }
}
