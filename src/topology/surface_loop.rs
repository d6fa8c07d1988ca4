use std::fmt;

use super::surface::SurfaceId;

entity_id! {
    /// Gmsh tag of a surface loop.
    SurfaceLoopId
}

/// A surface with orientation information within a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedSurface {
    /// The surface identifier.
    pub surface: SurfaceId,
    /// If `false`, the surface is taken with its normal reversed.
    pub forward: bool,
}

impl OrientedSurface {
    #[must_use]
    pub fn new(surface: SurfaceId, forward: bool) -> Self {
        Self { surface, forward }
    }

    #[must_use]
    pub fn fwd(surface: SurfaceId) -> Self {
        Self::new(surface, true)
    }

    #[must_use]
    pub fn rev(surface: SurfaceId) -> Self {
        Self::new(surface, false)
    }

    /// The signed Gmsh reference (`-id` for a reversed surface).
    #[must_use]
    pub fn signed(&self) -> i64 {
        let id = i64::from(self.surface.0);
        if self.forward {
            id
        } else {
            -id
        }
    }
}

impl fmt::Display for OrientedSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signed())
    }
}

/// Data associated with a surface loop.
///
/// A surface loop is a set of surfaces that together close a volume. Each
/// curve of the shell is crossed once in either direction by the surfaces
/// as oriented here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLoopData {
    pub id: SurfaceLoopId,
    /// The surfaces that make up this loop.
    pub surfaces: Vec<OrientedSurface>,
}

impl SurfaceLoopData {
    #[must_use]
    pub fn new(id: SurfaceLoopId, surfaces: Vec<OrientedSurface>) -> Self {
        Self { id, surfaces }
    }

    /// Whether `surface` is part of the loop, in either orientation.
    #[must_use]
    pub fn contains(&self, surface: SurfaceId) -> bool {
        self.surfaces.iter().any(|s| s.surface == surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_reference() {
        assert_eq!(OrientedSurface::fwd(SurfaceId(81)).to_string(), "81");
        assert_eq!(OrientedSurface::rev(SurfaceId(73)).to_string(), "-73");
    }

    #[test]
    fn membership_ignores_orientation() {
        let shell = SurfaceLoopData::new(
            SurfaceLoopId(1),
            vec![OrientedSurface::fwd(SurfaceId(1)), OrientedSurface::rev(SurfaceId(71))],
        );
        assert!(shell.contains(SurfaceId(71)));
        assert!(!shell.contains(SurfaceId(72)));
    }
}
