use tracing::{debug, info};

use crate::components::{BoxBounds, Entities, Tip, Wake, Wing};
use crate::error::{GeometryError, Result};
use crate::geometry::{BreakPoints, Station};
use crate::ids::{layout, EntityClass, IdAllocator, Owner, RangeKey};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{
    CurveData, CurveLoopData, LoopId, MeshSize, OrientedCurve, PhysicalGroup, PointData,
    PointId, SurfaceData,
};

use super::make_box::check_encloses;

/// Builds the wake sheet and its side and front strips for a box domain.
pub struct MakeWake<'a> {
    wing: &'a Wing,
    tip: &'a Tip,
    bounds: BoxBounds,
    n_slope: usize,
}

impl<'a> MakeWake<'a> {
    /// Creates a new `MakeWake` operation.
    ///
    /// * `n_slope` - Index offset from the trailing edge of the profile
    ///   points used to sample the trailing-edge slope.
    #[must_use]
    pub fn new(wing: &'a Wing, tip: &'a Tip, bounds: BoxBounds, n_slope: usize) -> Self {
        Self {
            wing,
            tip,
            bounds,
            n_slope,
        }
    }

    /// Executes the operation, reserving the wake ID ranges from `ids`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the box does not enclose the wing,
    /// and [`GeometryError::SlopeSample`] if the slope sample does not fall
    /// on both the upper and lower side of every station.
    pub fn execute(&self, ids: &mut IdAllocator) -> Result<Wake> {
        check_encloses(&self.bounds, self.wing, self.tip)?;
        let points = self.wake_points()?;
        let n = self.wing.station_count();

        let point_ids = ids.reserve(
            RangeKey::new(Owner::Wake, EntityClass::Point, "sheet", 0),
            layout::WAKE_POINTS,
            points.len(),
        )?;
        let domain_curve_ids = ids.reserve(
            RangeKey::new(Owner::Wake, EntityClass::Curve, "domain", 0),
            layout::WAKE_DOMAIN_CURVES,
            2 * n + 5,
        )?;
        let link_curve_ids = ids.reserve(
            RangeKey::new(Owner::Wake, EntityClass::Curve, "link", 0),
            layout::WAKE_LINK_CURVES,
            2 * n + 4,
        )?;
        let surface_ids = ids.reserve(
            RangeKey::new(Owner::Wake, EntityClass::Surface, "sheet", 0),
            layout::WAKE_SURFACES,
            2 * n + 3,
        )?;

        let mut wake = Wake {
            stations: n,
            points,
            point_ids,
            domain_curve_ids,
            link_curve_ids,
            surface_ids,
            entities: Entities::default(),
        };
        wake.entities = wake_entities(&wake, self.wing, self.tip);
        info!(points = wake.points.len(), surfaces = 2 * n + 3, "wake built");
        Ok(wake)
    }

    fn wake_points(&self) -> Result<Vec<Point3>> {
        let BoxBounds { x_o, x_f, y_f, .. } = self.bounds;
        let stations = self.wing.stations();
        let n = stations.len();
        let last = self.wing.last();
        let te = last.trailing_edge();
        let le = last.leading_edge();
        let aft = self.tip.aft_point();
        let fwd = self.tip.fwd_point();

        let mut points = Vec::with_capacity(2 * n + 6);
        for station in stations {
            let slope = trailing_edge_slope(station, self.n_slope)?;
            let origin = station.trailing_edge();
            let z = origin.z + slope * (x_f - origin.x);
            debug!(station = station.index, slope, z, "wake trailing point");
            points.push(Point3::new(x_f, station.span_pos, z));
        }
        points.extend([
            Point3::new(x_f, y_f, te.z),
            Point3::new(te.x, y_f, te.z),
            Point3::new(aft.x, y_f, aft.z),
            Point3::new(fwd.x, y_f, fwd.z),
            Point3::new(le.x, y_f, le.z),
            Point3::new(x_o, y_f, le.z),
        ]);
        points.extend(
            stations
                .iter()
                .rev()
                .map(|s| Point3::new(x_o, s.span_pos, s.leading_edge().z)),
        );
        Ok(points)
    }
}

/// Mean of the upper and lower secant slopes between the trailing edge and
/// the points `n_slope` steps away from it on either side.
fn trailing_edge_slope(station: &Station, n_slope: usize) -> Result<f64> {
    let len = station.points.len();
    let le = station.breaks.leading_edge();
    if n_slope == 0 || n_slope >= le || len - n_slope <= le {
        return Err(GeometryError::SlopeSample {
            station: station.index,
            n_slope,
        }
        .into());
    }
    let te = station.trailing_edge();
    let secant = |p: Point3| {
        let dx = p.x - te.x;
        if dx.abs() < TOLERANCE {
            Err(GeometryError::Degenerate(format!(
                "station {}: trailing-edge slope sample has no chordwise extent",
                station.index
            )))
        } else {
            Ok((p.z - te.z) / dx)
        }
    };
    let upper = secant(station.points[n_slope])?;
    let lower = secant(station.points[len - n_slope])?;
    Ok(0.5 * (upper + lower))
}

fn wake_entities(wake: &Wake, wing: &Wing, tip: &Tip) -> Entities {
    let n = wake.stations;
    let last = n - 1;
    let mut e = Entities::default();

    for (k, &coords) in wake.points.iter().enumerate() {
        e.points.push(PointData::new(
            wake.point_id(k),
            coords,
            Some(MeshSize::Farfield),
        ));
    }

    for k in 0..2 * n + 5 {
        e.curves.push(CurveData::line(
            wake.domain_curve(k),
            wake.point_id(k),
            wake.point_id(k + 1),
        ));
    }
    let te = |i: usize| wing.break_point_id(i, BreakPoints::TRAILING_EDGE);
    let le = |i: usize| wing.break_point_id(i, BreakPoints::LEADING_EDGE);
    let mut links: Vec<(PointId, usize)> = (0..n).map(|i| (te(i), i)).collect();
    links.extend([
        (te(last), n + 1),
        (tip.aft_point_id(), n + 2),
        (tip.fwd_point_id(), n + 3),
        (le(last), n + 4),
    ]);
    links.extend((0..n).map(|i| (le(last - i), n + 6 + i)));
    for (k, (start, target)) in links.into_iter().enumerate() {
        e.curves
            .push(CurveData::line(wake.link_curve(k), start, wake.point_id(target)));
    }

    let link = |k: usize| OrientedCurve::fwd(wake.link_curve(k));
    let link_rev = |k: usize| OrientedCurve::rev(wake.link_curve(k));
    let domain = |k: usize| OrientedCurve::fwd(wake.domain_curve(k));
    let mut loops = Vec::with_capacity(2 * n + 3);
    for i in 0..last {
        loops.push(vec![
            link(i),
            domain(i),
            link_rev(i + 1),
            OrientedCurve::rev(wing.planform_curve(i, BreakPoints::TRAILING_EDGE)),
        ]);
    }
    loops.push(vec![link(last), domain(last), domain(n), link_rev(n)]);
    for k in 0..3 {
        loops.push(vec![
            link(n + k),
            domain(n + k + 1),
            link_rev(n + k + 1),
            OrientedCurve::rev(tip.curve(k)),
        ]);
    }
    loops.push(vec![link(n + 3), domain(n + 4), domain(n + 5), link_rev(n + 4)]);
    for i in 0..last {
        loops.push(vec![
            link(n + 4 + i),
            domain(n + 6 + i),
            link_rev(n + 5 + i),
            OrientedCurve::fwd(wing.planform_curve(last - 1 - i, BreakPoints::LEADING_EDGE)),
        ]);
    }
    for (curves, id) in loops.into_iter().zip(wake.surfaces()) {
        e.loops.push(CurveLoopData::new(LoopId(id.0), curves));
        e.surfaces.push(SurfaceData::filling(id, LoopId(id.0)));
    }

    let tip_link = wake.link_curve(last);
    let mut te_tip = vec![tip_link];
    te_tip.extend((0..last).map(|i| wing.planform_curve(i, BreakPoints::TRAILING_EDGE)));
    e.groups.push(PhysicalGroup::curves("wakeTip", vec![tip_link]));
    e.groups.push(PhysicalGroup::curves("teTip", te_tip));
    e.groups.push(PhysicalGroup::surfaces(
        "wake",
        wake.surfaces().into_iter().take(last).collect(),
    ));
    e
}
