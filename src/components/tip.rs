use serde::Deserialize;

use crate::export::GeoWriter;
use crate::ids::IdRange;
use crate::math::Point3;
use crate::topology::{CurveId, PointId, SurfaceId};

use super::{Entities, GeoComponent};

/// Shape of the cap closing the outermost wing station.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wingtip {
    /// Flat cap spanned over the mean line of the outer profile.
    #[default]
    Cutoff,
    /// Rounded cap. Declared for configuration compatibility only: building
    /// it fails with [`crate::error::UnsupportedError::RoundedWingtip`].
    Rounded,
}

impl Wingtip {
    /// Returns `false` for shapes that cannot be built.
    #[must_use]
    pub fn is_supported(self) -> bool {
        matches!(self, Self::Cutoff)
    }
}

/// The cutoff wingtip.
///
/// Curves, by index: 0 to 2 are the mean-line splines (trailing edge to aft
/// break, aft to forward break, forward break to leading edge), 3 to 6 join
/// the outer station's upper aft, upper forward, lower forward and lower aft
/// separation points to the mean-line breaks. Surface `j` closes on the outer
/// station's section arc `j`.
#[derive(Debug, Clone)]
pub struct Tip {
    pub(crate) mean_line: Vec<Point3>,
    pub(crate) aft: usize,
    pub(crate) fwd: usize,
    pub(crate) point_ids: IdRange,
    pub(crate) curve_ids: IdRange,
    pub(crate) surface_ids: IdRange,
    pub(crate) entities: Entities,
}

impl Tip {
    /// Mean-line points, from the trailing edge towards the leading edge.
    #[must_use]
    pub fn mean_line(&self) -> &[Point3] {
        &self.mean_line
    }

    #[must_use]
    pub fn aft_point(&self) -> Point3 {
        self.mean_line[self.aft]
    }

    #[must_use]
    pub fn fwd_point(&self) -> Point3 {
        self.mean_line[self.fwd]
    }

    #[must_use]
    pub fn aft_point_id(&self) -> PointId {
        PointId(self.point_ids.at(self.aft))
    }

    #[must_use]
    pub fn fwd_point_id(&self) -> PointId {
        PointId(self.point_ids.at(self.fwd))
    }

    /// Tip curve `k` (see the type documentation for the numbering).
    #[must_use]
    pub fn curve(&self, k: usize) -> CurveId {
        CurveId(self.curve_ids.at(k))
    }

    #[must_use]
    pub fn surface(&self, j: usize) -> SurfaceId {
        SurfaceId(self.surface_ids.at(j))
    }

    #[must_use]
    pub fn upper_surfaces(&self) -> Vec<SurfaceId> {
        (0..3).map(|j| self.surface(j)).collect()
    }

    #[must_use]
    pub fn lower_surfaces(&self) -> Vec<SurfaceId> {
        (3..6).map(|j| self.surface(j)).collect()
    }
}

impl GeoComponent for Tip {
    fn title(&self) -> &'static str {
        "Wingtip"
    }

    fn entities(&self) -> Option<&Entities> {
        Some(&self.entities)
    }

    fn write_info(&self, out: &mut GeoWriter) {
        out.section("Wingtip geometry");
        out.comment("Cutoff wingtip");
        out.blank();
    }
}
