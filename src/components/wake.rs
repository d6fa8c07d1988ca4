use crate::ids::IdRange;
use crate::math::Point3;
use crate::topology::{CurveId, PointId, SurfaceId};

use super::{Entities, GeoComponent};

/// The wake sheet trailing the wing, with the side and front strips that
/// split the box domain into its upper and lower halves.
///
/// For `n` stations there are `2n + 6` points: `n` far-downstream points
/// (one per station), six points on the far spanwise plane, and `n` points on
/// the upstream boundary (outer station first). Domain curves join
/// consecutive points; link curves join wing and tip points to them.
#[derive(Debug, Clone)]
pub struct Wake {
    pub(crate) stations: usize,
    pub(crate) points: Vec<Point3>,
    pub(crate) point_ids: IdRange,
    pub(crate) domain_curve_ids: IdRange,
    pub(crate) link_curve_ids: IdRange,
    pub(crate) surface_ids: IdRange,
    pub(crate) entities: Entities,
}

impl Wake {
    /// Wake point coordinates.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn point_id(&self, k: usize) -> PointId {
        PointId(self.point_ids.at(k))
    }

    /// ID of the first wake point (downstream, root).
    #[must_use]
    pub fn first_point_id(&self) -> PointId {
        self.point_id(0)
    }

    /// ID of the last wake point (upstream, root).
    #[must_use]
    pub fn last_point_id(&self) -> PointId {
        self.point_id(self.points.len() - 1)
    }

    /// ID of the downstream corner on the far spanwise plane.
    #[must_use]
    pub fn far_downstream_id(&self) -> PointId {
        self.point_id(self.stations)
    }

    /// ID of the upstream corner on the far spanwise plane.
    #[must_use]
    pub fn far_upstream_id(&self) -> PointId {
        self.point_id(self.stations + 5)
    }

    /// Domain curve `k`, from wake point `k` to wake point `k + 1`.
    #[must_use]
    pub fn domain_curve(&self, k: usize) -> CurveId {
        CurveId(self.domain_curve_ids.at(k))
    }

    /// Link curve `k`, from a wing or tip point to a wake point.
    #[must_use]
    pub fn link_curve(&self, k: usize) -> CurveId {
        CurveId(self.link_curve_ids.at(k))
    }

    #[must_use]
    pub fn link_curve_count(&self) -> usize {
        self.link_curve_ids.len()
    }

    /// Every wake surface.
    #[must_use]
    pub fn surfaces(&self) -> Vec<SurfaceId> {
        self.surface_ids.iter().map(SurfaceId).collect()
    }
}

impl GeoComponent for Wake {
    fn title(&self) -> &'static str {
        "Wake"
    }

    fn entities(&self) -> Option<&Entities> {
        Some(&self.entities)
    }
}

/// Stand-in for the wake when the domain does not model one (sphere).
///
/// Writes and registers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWake;

impl GeoComponent for NoWake {
    fn title(&self) -> &'static str {
        "Wake"
    }
}
