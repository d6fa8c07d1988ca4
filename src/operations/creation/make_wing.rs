use tracing::{debug, info};

use crate::components::{Entities, Wing};
use crate::error::{ConfigError, Result};
use crate::geometry::{Airfoil, BreakPoints, Planform, Station, BREAKS};
use crate::ids::{layout, EntityClass, IdAllocator, Owner, RangeKey};
use crate::math::search::min_x;
use crate::math::{Point3, Vector3};
use crate::operations::query::LocateBreakPoints;
use crate::operations::transform::{Rotate, Scale, Translate};
use crate::topology::{
    CurveData, CurveLoopData, LoopId, MeshSize, OrientedCurve, PhysicalGroup, PointData,
    PointId, SurfaceData,
};

/// Builds the half-wing from one airfoil per station.
///
/// Each profile is scaled by its chord, twisted about the spanwise axis,
/// then swept, raised by the accumulated dihedral and moved to its span
/// position. The leading-edge offset is applied to every station last.
pub struct MakeWing<'a> {
    airfoils: &'a [Airfoil],
    planform: &'a Planform,
}

impl<'a> MakeWing<'a> {
    /// Creates a new `MakeWing` operation.
    #[must_use]
    pub fn new(airfoils: &'a [Airfoil], planform: &'a Planform) -> Self {
        Self { airfoils, planform }
    }

    /// Executes the operation, reserving the wing ID ranges from `ids`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the station count is 0, above
    /// [`layout::MAX_STATIONS`], or inconsistent with the planform lists; a
    /// geometry error if a station's break points cannot be located; and an
    /// allocation error if a profile has more than
    /// [`layout::MAX_STATION_POINTS`] points.
    pub fn execute(&self, ids: &mut IdAllocator) -> Result<Wing> {
        let n = self.airfoils.len();
        self.check_counts(n)?;

        let placed = self.place_stations()?;
        let chords = self.planform.chords();
        let span_positions = self.planform.span_positions();

        let mut stations = Vec::with_capacity(n);
        for (i, points) in placed.into_iter().enumerate() {
            let breaks = LocateBreakPoints::new(i, &points, chords[i]).execute()?;
            debug!(
                station = i,
                points = points.len(),
                chord = chords[i],
                span_pos = span_positions[i],
                breaks = ?breaks.as_array(),
                "placed wing station"
            );
            stations.push(Station {
                index: i,
                chord: chords[i],
                span_pos: span_positions[i],
                points,
                breaks,
            });
        }

        let mut point_ids = Vec::with_capacity(n);
        let mut section_ids = Vec::with_capacity(n);
        for station in &stations {
            let i = station.index;
            point_ids.push(ids.reserve(
                RangeKey::new(Owner::Wing, EntityClass::Point, "station", i),
                layout::wing_points(i),
                station.points.len(),
            )?);
            section_ids.push(ids.reserve(
                RangeKey::new(Owner::Wing, EntityClass::Curve, "section", i),
                layout::wing_section_curves(i),
                BREAKS,
            )?);
        }
        let mut planform_ids = Vec::with_capacity(n - 1);
        let mut surface_ids = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            planform_ids.push(ids.reserve(
                RangeKey::new(Owner::Wing, EntityClass::Curve, "planform", i),
                layout::wing_planform_curves(i),
                BREAKS,
            )?);
            surface_ids.push(ids.reserve(
                RangeKey::new(Owner::Wing, EntityClass::Surface, "panel", i),
                layout::wing_surfaces(i),
                BREAKS,
            )?);
        }

        let mut wing = Wing {
            planform: self.planform.clone(),
            stations,
            point_ids,
            section_ids,
            planform_ids,
            surface_ids,
            entities: Entities::default(),
        };
        wing.entities = wing_entities(&wing);

        info!(
            stations = n,
            area = self.planform.area(),
            half_span = self.planform.half_span(),
            "wing built"
        );
        Ok(wing)
    }

    fn check_counts(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(ConfigError::NoStations.into());
        }
        if n > layout::MAX_STATIONS {
            return Err(ConfigError::TooManyStations {
                given: n,
                max: layout::MAX_STATIONS,
            }
            .into());
        }
        let p = self.planform;
        for (name, given, expected) in [
            ("twist", p.twist.len(), n),
            ("span", p.span.len(), n - 1),
            ("taper", p.taper.len(), n - 1),
            ("sweep", p.sweep.len(), n - 1),
            ("dihedral", p.dihedral.len(), n - 1),
        ] {
            if given != expected {
                return Err(ConfigError::LengthMismatch {
                    name,
                    given,
                    expected,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Transforms every profile into its place on the wing.
    fn place_stations(&self) -> Result<Vec<Vec<Point3>>> {
        let p = self.planform;
        let chords = p.chords();
        let span_positions = p.span_positions();

        let mut placed: Vec<Vec<Point3>> = Vec::with_capacity(self.airfoils.len());
        let mut rise = 0.0;
        for (i, airfoil) in self.airfoils.iter().enumerate() {
            let mut points: Vec<Point3> = airfoil
                .points()
                .iter()
                .map(|q| Point3::new(q.x, 0.0, q.y))
                .collect();
            Scale::section(chords[i]).execute(&mut points);
            Rotate::twist(Point3::origin(), p.twist[i]).execute(&mut points)?;

            let shift = match placed.last() {
                Some(previous) => {
                    rise += p.dihedral[i - 1].tan() * p.span[i - 1];
                    min_x(previous) + p.sweep[i - 1].tan() * p.span[i - 1]
                }
                None => 0.0,
            };
            Translate::new(Vector3::new(shift, span_positions[i], rise)).execute(&mut points);
            placed.push(points);
        }

        let offset = Translate::new(Vector3::new(p.offset[0], 0.0, p.offset[1]));
        for points in &mut placed {
            offset.execute(points);
        }
        Ok(placed)
    }
}

/// Mesh size attached to a profile point, by break point.
fn mesh_size(station: &Station, k: usize) -> Option<MeshSize> {
    let i = station.index;
    let b = station.breaks;
    if k == b.get(BreakPoints::TRAILING_EDGE) {
        Some(MeshSize::TrailingEdge(i))
    } else if k == b.get(BreakPoints::LEADING_EDGE) {
        Some(MeshSize::LeadingEdge(i))
    } else if k == b.get(BreakPoints::UPPER_AFT) || k == b.get(BreakPoints::LOWER_AFT) {
        Some(MeshSize::GradedTrailingEdge(i))
    } else if k == b.get(BreakPoints::UPPER_FWD) || k == b.get(BreakPoints::LOWER_FWD) {
        Some(MeshSize::GradedLeadingEdge(i))
    } else {
        None
    }
}

fn wing_entities(wing: &Wing) -> Entities {
    let mut e = Entities::default();

    for station in wing.stations() {
        let i = station.index;
        for (k, &coords) in station.points.iter().enumerate() {
            e.points.push(PointData::new(
                wing.point_id(i, k),
                coords,
                mesh_size(station, k),
            ));
        }
    }

    for station in wing.stations() {
        let i = station.index;
        for j in 0..BREAKS {
            let path: Vec<PointId> = station
                .breaks
                .arc(j, station.points.len())
                .into_iter()
                .map(|k| wing.point_id(i, k))
                .collect();
            e.curves.push(CurveData::spline(wing.section_curve(i, j), path));
        }
    }
    for i in 0..wing.station_count() - 1 {
        for j in 0..BREAKS {
            e.curves.push(CurveData::line(
                wing.planform_curve(i, j),
                wing.break_point_id(i, j),
                wing.break_point_id(i + 1, j),
            ));
        }
    }

    for i in 0..wing.station_count() - 1 {
        for j in 0..BREAKS {
            let id = wing.surface(i, j);
            e.loops.push(CurveLoopData::new(
                LoopId(id.0),
                vec![
                    OrientedCurve::fwd(wing.section_curve(i, j)),
                    OrientedCurve::fwd(wing.planform_curve(i, j + 1)),
                    OrientedCurve::rev(wing.section_curve(i + 1, j)),
                    OrientedCurve::rev(wing.planform_curve(i, j)),
                ],
            ));
            e.surfaces.push(SurfaceData::filling(id, LoopId(id.0)));
        }
    }

    e.groups.push(PhysicalGroup::surfaces("wing", wing.upper_surfaces()));
    e.groups.push(PhysicalGroup::surfaces("wing_", wing.lower_surfaces()));
    e
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{AllocationError, GeogenError, GeometryError};
    use crate::testing::naca4;
    use crate::topology::{CurveId, SurfaceId};

    fn planform(n: usize) -> Planform {
        Planform {
            root_chord: 1.0,
            span: vec![1.0; n - 1],
            taper: vec![0.8; n - 1],
            sweep: vec![20.0_f64.to_radians(); n - 1],
            dihedral: vec![3.0_f64.to_radians(); n - 1],
            twist: vec![0.0; n],
            offset: [0.0, 0.0],
        }
    }

    fn build(airfoils: &[Airfoil], planform: &Planform) -> Result<Wing> {
        MakeWing::new(airfoils, planform).execute(&mut IdAllocator::new())
    }

    #[test]
    fn root_station_is_scaled_profile() {
        let airfoils = vec![naca4("0012", 20)];
        let mut p = planform(1);
        p.root_chord = 2.0;
        let wing = build(&airfoils, &p).unwrap();
        let root = wing.root();
        assert_eq!(root.points.len(), airfoils[0].len());
        assert_relative_eq!(root.points[0].x, 2.0 * airfoils[0].points()[0].x);
        assert_relative_eq!(root.points[0].z, 2.0 * airfoils[0].points()[0].y);
        assert_relative_eq!(root.points[0].y, 0.0);
    }

    #[test]
    fn sweep_and_dihedral_accumulate() {
        let airfoils = vec![naca4("0012", 20); 3];
        let p = planform(3);
        let wing = build(&airfoils, &p).unwrap();
        let tan_sweep = 20.0_f64.to_radians().tan();
        let tan_dihedral = 3.0_f64.to_radians().tan();

        // leading edges sit at x = 0 of their section before the shift
        assert_relative_eq!(wing.stations()[1].leading_edge().x, tan_sweep, epsilon = 1e-12);
        assert_relative_eq!(
            wing.stations()[2].leading_edge().x,
            2.0 * tan_sweep,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            wing.stations()[2].leading_edge().z,
            2.0 * tan_dihedral,
            epsilon = 1e-12
        );
        assert_relative_eq!(wing.stations()[2].span_pos, 2.0);
        assert_relative_eq!(wing.stations()[2].chord, 0.64, epsilon = 1e-12);
    }

    #[test]
    fn offset_moves_every_station() {
        let airfoils = vec![naca4("0012", 20); 2];
        let mut p = planform(2);
        p.offset = [0.5, -0.25];
        let shifted = build(&airfoils, &p).unwrap();
        let plain = build(&airfoils, &planform(2)).unwrap();
        for (a, b) in shifted.stations().iter().zip(plain.stations()) {
            assert_relative_eq!(a.points[3].x, b.points[3].x + 0.5, epsilon = 1e-12);
            assert_relative_eq!(a.points[3].z, b.points[3].z - 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn ids_follow_the_station_layout() {
        let airfoils = vec![naca4("2412", 20); 3];
        let wing = build(&airfoils, &planform(3)).unwrap();
        assert_eq!(wing.point_id(0, 0), PointId(1));
        assert_eq!(wing.point_id(2, 5), PointId(1006));
        assert_eq!(wing.section_curve(1, 0), CurveId(7));
        assert_eq!(wing.planform_curve(1, 5), CurveId(72));
        assert_eq!(wing.surface(1, 2), SurfaceId(9));
        assert_eq!(wing.upper_surfaces().len(), 6);
        assert_eq!(wing.entities.surfaces.len(), 12);
        assert_eq!(wing.entities.curves.len(), 3 * 6 + 2 * 6);
    }

    #[test]
    fn panel_loops_chain_through_break_points() {
        let airfoils = vec![naca4("0012", 20); 2];
        let wing = build(&airfoils, &planform(2)).unwrap();
        let curve = |id: CurveId| wing.entities.curves.iter().find(|c| c.id == id).unwrap();
        for curve_loop in &wing.entities.loops {
            let ends: Vec<(PointId, PointId)> = curve_loop
                .curves
                .iter()
                .map(|o| {
                    let c = curve(o.curve);
                    let (s, e) = (c.start().unwrap(), c.end().unwrap());
                    if o.forward { (s, e) } else { (e, s) }
                })
                .collect();
            for k in 0..ends.len() {
                assert_eq!(ends[k].1, ends[(k + 1) % ends.len()].0);
            }
        }
    }

    #[test]
    fn too_many_stations_fail_fast() {
        let airfoils = vec![naca4("0012", 20); 11];
        let err = build(&airfoils, &planform(11)).unwrap_err();
        assert!(matches!(
            err,
            GeogenError::Config(ConfigError::TooManyStations { given: 11, max: 10 })
        ));
    }

    #[test]
    fn mismatched_lists_are_rejected() {
        let airfoils = vec![naca4("0012", 20); 2];
        let mut p = planform(2);
        p.taper.push(1.0);
        let err = build(&airfoils, &p).unwrap_err();
        assert!(matches!(
            err,
            GeogenError::Config(ConfigError::LengthMismatch { name: "taper", .. })
        ));
    }

    #[test]
    fn oversized_profile_exceeds_its_id_block() {
        let airfoils = vec![naca4("0012", 260)];
        let err = build(&airfoils, &planform(1)).unwrap_err();
        assert!(matches!(
            err,
            GeogenError::Allocation(AllocationError::CapacityExceeded { requested: 520, .. })
        ));
    }

    #[test]
    fn coarse_profile_names_the_station() {
        let coarse = Airfoil::new(vec![
            crate::math::Point2::new(1.0, 0.0),
            crate::math::Point2::new(0.5, 0.05),
            crate::math::Point2::new(0.0, 0.0),
            crate::math::Point2::new(0.3, -0.05),
            crate::math::Point2::new(0.6, -0.04),
            crate::math::Point2::new(0.9, -0.01),
            crate::math::Point2::new(0.95, -0.005),
        ])
        .unwrap();
        let airfoils = vec![naca4("0012", 20), coarse];
        let err = build(&airfoils, &planform(2)).unwrap_err();
        assert!(matches!(
            err,
            GeogenError::Geometry(GeometryError::BreakPoints { station: 1, .. })
        ));
    }
}
