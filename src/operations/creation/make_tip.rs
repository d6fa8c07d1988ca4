use tracing::{debug, info};

use crate::components::{Entities, Tip, Wing, Wingtip};
use crate::error::{Result, UnsupportedError};
use crate::geometry::BreakPoints;
use crate::ids::{layout, EntityClass, IdAllocator, Owner, RangeKey};
use crate::math::Point3;
use crate::operations::query::LocateTipBreakPoints;
use crate::topology::{
    CurveData, CurveLoopData, LoopId, MeshSize, OrientedCurve, PhysicalGroup, PointData,
    PointId, SurfaceData,
};

const CAP_CURVES: usize = 7;
const CAP_SURFACES: usize = 6;

/// Closes the outermost wing station with a wingtip cap.
pub struct MakeTip<'a> {
    wing: &'a Wing,
    shape: Wingtip,
}

impl<'a> MakeTip<'a> {
    /// Creates a new `MakeTip` operation.
    #[must_use]
    pub fn new(wing: &'a Wing, shape: Wingtip) -> Self {
        Self { wing, shape }
    }

    /// Executes the operation, reserving the tip ID ranges from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedError::RoundedWingtip`] for a rounded tip, and
    /// [`crate::error::GeometryError::TipBreakPoints`] if the mean line is
    /// too short to hold two distinct break points.
    pub fn execute(&self, ids: &mut IdAllocator) -> Result<Tip> {
        if !self.shape.is_supported() {
            return Err(UnsupportedError::RoundedWingtip.into());
        }

        let station = self.wing.last();
        let mean_line = mean_line(&station.points, station.breaks.leading_edge(), station.span_pos);
        let (aft, fwd) =
            LocateTipBreakPoints::new(&mean_line, &station.points, station.chord).execute()?;
        debug!(points = mean_line.len(), aft, fwd, "wingtip mean line");

        let point_ids = ids.reserve(
            RangeKey::new(Owner::Tip, EntityClass::Point, "mean line", 0),
            layout::TIP_POINTS,
            mean_line.len(),
        )?;
        let curve_ids = ids.reserve(
            RangeKey::new(Owner::Tip, EntityClass::Curve, "cap", 0),
            layout::TIP_CURVES,
            CAP_CURVES,
        )?;
        let surface_ids = ids.reserve(
            RangeKey::new(Owner::Tip, EntityClass::Surface, "cap", 0),
            layout::TIP_SURFACES,
            CAP_SURFACES,
        )?;

        let mut tip = Tip {
            mean_line,
            aft,
            fwd,
            point_ids,
            curve_ids,
            surface_ids,
            entities: Entities::default(),
        };
        tip.entities = tip_entities(&tip, self.wing);
        info!(points = tip.mean_line.len(), "wingtip built");
        Ok(tip)
    }
}

/// Mean line of a profile: point `k` averages the `k`-th upper and lower
/// points counted from the trailing edge, stopping before either side runs
/// into the leading edge. The result lies in the plane `y = span_pos`.
fn mean_line(points: &[Point3], leading_edge: usize, span_pos: f64) -> Vec<Point3> {
    let n = points.len();
    let upper = leading_edge.saturating_sub(1);
    let lower = n.saturating_sub(leading_edge + 1);
    (0..upper.min(lower))
        .map(|k| {
            let a = points[1 + k];
            let b = points[n - 1 - k];
            Point3::new(0.5 * (a.x + b.x), span_pos, 0.5 * (a.z + b.z))
        })
        .collect()
}

fn tip_entities(tip: &Tip, wing: &Wing) -> Entities {
    let mut e = Entities::default();
    let last = wing.station_count() - 1;
    let wing_point = |j: usize| wing.break_point_id(last, j);
    let tip_point = |k: usize| PointId(tip.point_ids.at(k));

    for (k, &coords) in tip.mean_line.iter().enumerate() {
        let size = if k == tip.aft {
            Some(MeshSize::GradedTrailingEdge(last))
        } else if k == tip.fwd {
            Some(MeshSize::GradedLeadingEdge(last))
        } else {
            None
        };
        e.points.push(PointData::new(tip_point(k), coords, size));
    }

    let m = tip.mean_line.len();
    let splines = [
        std::iter::once(wing_point(BreakPoints::TRAILING_EDGE))
            .chain((0..=tip.aft).map(tip_point))
            .collect::<Vec<_>>(),
        (tip.aft..=tip.fwd).map(tip_point).collect(),
        (tip.fwd..m)
            .map(tip_point)
            .chain(std::iter::once(wing_point(BreakPoints::LEADING_EDGE)))
            .collect(),
    ];
    for (k, path) in splines.into_iter().enumerate() {
        e.curves.push(CurveData::spline(tip.curve(k), path));
    }
    let connectors = [
        (BreakPoints::UPPER_AFT, tip.aft_point_id()),
        (BreakPoints::UPPER_FWD, tip.fwd_point_id()),
        (BreakPoints::LOWER_FWD, tip.fwd_point_id()),
        (BreakPoints::LOWER_AFT, tip.aft_point_id()),
    ];
    for (k, (j, end)) in connectors.into_iter().enumerate() {
        e.curves.push(CurveData::line(tip.curve(3 + k), wing_point(j), end));
    }

    let arc = |j: usize| OrientedCurve::fwd(wing.section_curve(last, j));
    let fwd = |k: usize| OrientedCurve::fwd(tip.curve(k));
    let rev = |k: usize| OrientedCurve::rev(tip.curve(k));
    let loops = [
        vec![arc(0), fwd(3), rev(0)],
        vec![arc(1), fwd(4), rev(1), rev(3)],
        vec![arc(2), rev(2), rev(4)],
        vec![arc(3), fwd(5), fwd(2)],
        vec![arc(4), fwd(6), fwd(1), rev(5)],
        vec![arc(5), fwd(0), rev(6)],
    ];
    for (j, curves) in loops.into_iter().enumerate() {
        let id = tip.surface(j);
        e.loops.push(CurveLoopData::new(LoopId(id.0), curves));
        e.surfaces.push(SurfaceData::filling(id, LoopId(id.0)).flipped());
    }

    e.groups.push(PhysicalGroup::surfaces("tip", tip.upper_surfaces()));
    e.groups.push(PhysicalGroup::surfaces("tip_", tip.lower_surfaces()));
    e
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::GeogenError;
    use crate::geometry::Planform;
    use crate::operations::creation::MakeWing;
    use crate::testing::naca4;
    use crate::topology::{CurveId, SurfaceId};

    fn wing(stations: usize) -> Wing {
        let airfoils = vec![naca4("2412", 30); stations];
        let planform = Planform {
            root_chord: 1.0,
            span: vec![1.5; stations - 1],
            taper: vec![0.7; stations - 1],
            sweep: vec![0.3; stations - 1],
            dihedral: vec![0.05; stations - 1],
            twist: vec![0.02; stations],
            offset: [0.0, 0.0],
        };
        MakeWing::new(&airfoils, &planform)
            .execute(&mut IdAllocator::new())
            .unwrap()
    }

    #[test]
    fn mean_line_pairs_upper_and_lower_points() {
        let pts: Vec<Point3> = [
            (1.0, 0.0),
            (0.8, 0.1),
            (0.4, 0.1),
            (0.0, 0.0),
            (0.4, -0.1),
            (0.8, -0.3),
        ]
        .iter()
        .map(|&(x, z)| Point3::new(x, 0.0, z))
        .collect();
        let mean = mean_line(&pts, 3, 2.0);
        assert_eq!(mean.len(), 2);
        assert_relative_eq!(mean[0], Point3::new(0.8, 2.0, -0.1), epsilon = 1e-12);
        assert_relative_eq!(mean[1], Point3::new(0.4, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn cap_lies_in_the_outer_station_plane() {
        let wing = wing(2);
        let tip = MakeTip::new(&wing, Wingtip::Cutoff)
            .execute(&mut IdAllocator::new())
            .unwrap();
        assert_eq!(tip.mean_line().len(), 29);
        assert!(tip
            .mean_line()
            .iter()
            .all(|p| (p.y - wing.last().span_pos).abs() < 1e-12));
        assert!(tip.aft_point().x > tip.fwd_point().x);
    }

    #[test]
    fn ids_come_from_the_tip_blocks() {
        let wing = wing(1);
        let tip = MakeTip::new(&wing, Wingtip::Cutoff)
            .execute(&mut IdAllocator::new())
            .unwrap();
        assert_eq!(tip.curve(0), CurveId(121));
        assert_eq!(tip.curve(6), CurveId(127));
        assert_eq!(tip.surface(5), SurfaceId(76));
        assert_eq!(tip.entities.points[0].id, PointId(5101));
        assert!(tip.entities.surfaces.iter().all(|s| s.flipped));
    }

    #[test]
    fn cap_loops_close() {
        let wing = wing(2);
        let tip = MakeTip::new(&wing, Wingtip::Cutoff)
            .execute(&mut IdAllocator::new())
            .unwrap();
        let find = |id: CurveId| {
            tip.entities
                .curves
                .iter()
                .chain(&wing.entities.curves)
                .find(|c| c.id == id)
                .unwrap()
        };
        for curve_loop in &tip.entities.loops {
            let ends: Vec<(PointId, PointId)> = curve_loop
                .curves
                .iter()
                .map(|o| {
                    let c = find(o.curve);
                    let (s, e) = (c.start().unwrap(), c.end().unwrap());
                    if o.forward { (s, e) } else { (e, s) }
                })
                .collect();
            for k in 0..ends.len() {
                assert_eq!(ends[k].1, ends[(k + 1) % ends.len()].0, "loop {}", curve_loop.id);
            }
        }
    }

    #[test]
    fn rounded_tip_is_unsupported() {
        let wing = wing(1);
        let err = MakeTip::new(&wing, Wingtip::Rounded)
            .execute(&mut IdAllocator::new())
            .unwrap_err();
        assert!(matches!(
            err,
            GeogenError::Unsupported(UnsupportedError::RoundedWingtip)
        ));
    }
}
