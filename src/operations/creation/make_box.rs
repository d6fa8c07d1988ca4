use tracing::info;

use crate::components::{BoxBounds, BoxDomain, Domain, Entities, Tip, Wake, Wing};
use crate::error::{ConfigError, Result};
use crate::ids::{layout, EntityClass, IdAllocator, Owner, RangeKey};
use crate::math::Point3;
use crate::topology::{
    CurveData, CurveId, CurveLoopData, LoopId, MeshSize, OrientedCurve, OrientedSurface,
    PhysicalGroup, PointData, PointId, SurfaceData, SurfaceId, SurfaceLoopData, SurfaceLoopId,
    VolumeData, VolumeId,
};

/// Far-field mesh size of the box, relative to the root chord.
const FARFIELD_SIZE: f64 = 0.5;

/// Closes the box domain around the wing, tip and wake.
///
/// The box spans `x_o..x_f`, `0..y_f` and `z_o..z_f`. Its corners are
/// joined to the wake boundary points, so the box faces on the symmetry,
/// downstream, upstream and far spanwise planes are each split into an upper
/// and a lower half. Two volumes result, one above and one below the wing
/// and wake.
pub struct MakeBox<'a> {
    wing: &'a Wing,
    tip: &'a Tip,
    wake: &'a Wake,
    bounds: BoxBounds,
}

impl<'a> MakeBox<'a> {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(wing: &'a Wing, tip: &'a Tip, wake: &'a Wake, bounds: BoxBounds) -> Self {
        Self {
            wing,
            tip,
            wake,
            bounds,
        }
    }

    /// Executes the operation, reserving the domain ID ranges from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if the box does not enclose
    /// the wing, or an allocation error if a domain range is taken.
    pub fn execute(&self, ids: &mut IdAllocator) -> Result<Domain> {
        check_encloses(&self.bounds, self.wing, self.tip)?;

        let key = |class, role| RangeKey::new(Owner::Domain, class, role, 0);
        let corners = ids.reserve(key(EntityClass::Point, "corner"), layout::DOMAIN_POINTS, 8)?;
        let symmetry = ids.reserve(
            key(EntityClass::Curve, "symmetry"),
            layout::BOX_SYMMETRY_CURVES,
            6,
        )?;
        let back = ids.reserve(key(EntityClass::Curve, "back"), layout::BOX_BACK_CURVES, 6)?;
        let transverse = ids.reserve(
            key(EntityClass::Curve, "transverse"),
            layout::BOX_TRANSVERSE_CURVES,
            4,
        )?;
        let faces = ids.reserve(key(EntityClass::Surface, "face"), layout::DOMAIN_SURFACES, 10)?;
        let volumes = ids.reserve(key(EntityClass::Volume, "field"), layout::DOMAIN_VOLUMES, 2)?;

        let mesh_size = FARFIELD_SIZE * self.wing.root().chord;
        let BoxBounds {
            x_o,
            x_f,
            y_f,
            z_o,
            z_f,
        } = self.bounds;
        let mut e = Entities::default();

        let corner = |k: usize| PointId(corners.at(k));
        let plane = [(x_f, z_f), (x_o, z_f), (x_o, z_o), (x_f, z_o)];
        for (half, y) in [0.0, y_f].into_iter().enumerate() {
            for (k, &(x, z)) in plane.iter().enumerate() {
                e.points.push(PointData::new(
                    corner(4 * half + k),
                    Point3::new(x, y, z),
                    Some(MeshSize::Farfield),
                ));
            }
        }

        let n = self.wing.station_count();
        let w = |k: usize| self.wake.point_id(k);
        let x0 = |k: usize| CurveId(symmetry.at(k));
        let x1 = |k: usize| CurveId(back.at(k));
        let y = |k: usize| CurveId(transverse.at(k));
        let root_edges = [
            (w(0), corner(0)),
            (corner(0), corner(1)),
            (corner(1), self.wake.last_point_id()),
            (self.wake.last_point_id(), corner(2)),
            (corner(2), corner(3)),
            (corner(3), w(0)),
        ];
        let back_edges = [
            (self.wake.far_downstream_id(), corner(4)),
            (corner(4), corner(5)),
            (corner(5), self.wake.far_upstream_id()),
            (self.wake.far_upstream_id(), corner(6)),
            (corner(6), corner(7)),
            (corner(7), self.wake.far_downstream_id()),
        ];
        for (k, (start, end)) in root_edges.into_iter().enumerate() {
            e.curves.push(CurveData::line(x0(k), start, end));
        }
        for (k, (start, end)) in back_edges.into_iter().enumerate() {
            e.curves.push(CurveData::line(x1(k), start, end));
        }
        for k in 0..4 {
            e.curves.push(CurveData::line(y(k), corner(k), corner(k + 4)));
        }

        let f = OrientedCurve::fwd;
        let r = OrientedCurve::rev;
        let arc = |j: usize| f(self.wing.section_curve(0, j));
        let l0 = |k: usize| self.wake.domain_curve(k);
        let l1 = |k: usize| self.wake.link_curve(k);
        let le_link = 2 * n + 3;

        let loops: [Vec<OrientedCurve>; 10] = [
            // symmetry plane, upper and lower
            vec![
                arc(0),
                arc(1),
                arc(2),
                f(l1(le_link)),
                r(x0(2)),
                r(x0(1)),
                r(x0(0)),
                r(l1(0)),
            ],
            vec![
                arc(3),
                arc(4),
                arc(5),
                f(l1(0)),
                r(x0(5)),
                r(x0(4)),
                r(x0(3)),
                r(l1(le_link)),
            ],
            // downstream plane
            std::iter::once(f(y(0)))
                .chain(std::iter::once(r(x1(0))))
                .chain((0..n).map(|i| r(l0(n - 1 - i))))
                .chain(std::iter::once(f(x0(0))))
                .collect(),
            std::iter::once(r(y(3)))
                .chain(std::iter::once(f(x0(5))))
                .chain((0..n).map(|i| f(l0(i))))
                .chain(std::iter::once(r(x1(5))))
                .collect(),
            // upstream plane
            std::iter::once(r(y(1)))
                .chain(std::iter::once(f(x0(2))))
                .chain((0..n).map(|i| r(l0(2 * n + 4 - i))))
                .chain(std::iter::once(r(x1(2))))
                .collect(),
            std::iter::once(f(y(2)))
                .chain(std::iter::once(r(x1(3))))
                .chain((0..n).map(|i| f(l0(n + 5 + i))))
                .chain(std::iter::once(f(x0(3))))
                .collect(),
            // far spanwise plane
            [f(x1(0)), f(x1(1)), f(x1(2))]
                .into_iter()
                .chain((0..5).map(|k| r(l0(n + 4 - k))))
                .collect(),
            [f(x1(3)), f(x1(4)), f(x1(5))]
                .into_iter()
                .chain((0..5).map(|k| f(l0(n + k))))
                .collect(),
            // top and bottom
            vec![f(x0(1)), f(y(1)), r(x1(1)), r(y(0))],
            vec![f(x0(4)), f(y(3)), r(x1(4)), r(y(2))],
        ];
        let face = |k: usize| SurfaceId(faces.at(k));
        for (k, curves) in loops.into_iter().enumerate() {
            let id = face(k);
            e.loops.push(CurveLoopData::new(LoopId(id.0), curves));
            e.surfaces.push(SurfaceData::plane(id, LoopId(id.0), Vec::new()));
        }

        let upper_faces = [0, 2, 4, 6, 8].map(face);
        let lower_faces = [1, 3, 5, 7, 9].map(face);
        let shells = [
            self.shell(
                &self.wing.upper_surfaces(),
                &self.tip.upper_surfaces(),
                false,
                &upper_faces,
            ),
            self.shell(
                &self.wing.lower_surfaces(),
                &self.tip.lower_surfaces(),
                true,
                &lower_faces,
            ),
        ];
        for (k, surfaces) in shells.into_iter().enumerate() {
            let id = volumes.at(k);
            e.surface_loops
                .push(SurfaceLoopData::new(SurfaceLoopId(id), surfaces));
            e.volumes
                .push(VolumeData::new(VolumeId(id), SurfaceLoopId(id)));
        }

        e.groups.extend([
            PhysicalGroup::surfaces("symmetry", vec![face(0)]),
            PhysicalGroup::surfaces("symmetry_", vec![face(1)]),
            PhysicalGroup::surfaces("downstream", vec![face(2)]),
            PhysicalGroup::surfaces("downstream_", vec![face(3)]),
            PhysicalGroup::surfaces("farfield", (4..10).map(face).collect()),
            PhysicalGroup::volumes("field", vec![VolumeId(volumes.at(0))]),
            PhysicalGroup::volumes("field_", vec![VolumeId(volumes.at(1))]),
        ]);

        info!(mesh_size, "box domain built");
        Ok(Domain::Box(BoxDomain {
            bounds: self.bounds,
            mesh_size,
            entities: e,
        }))
    }

    /// Boundary of one half of the box: one side of the wing and tip, the
    /// whole wake, and that half's box faces.
    ///
    /// Wing panels are taken as written; the flipped tip caps and the box
    /// faces are reversed. The wake sheet faces the upper half, so it is
    /// reversed there and taken as written below.
    fn shell(
        &self,
        wing: &[SurfaceId],
        tip: &[SurfaceId],
        wake_forward: bool,
        faces: &[SurfaceId],
    ) -> Vec<OrientedSurface> {
        wing.iter()
            .map(|&id| OrientedSurface::fwd(id))
            .chain(tip.iter().map(|&id| OrientedSurface::rev(id)))
            .chain(
                self.wake
                    .surfaces()
                    .into_iter()
                    .map(|id| OrientedSurface::new(id, wake_forward)),
            )
            .chain(faces.iter().map(|&id| OrientedSurface::rev(id)))
            .collect()
    }
}

/// Checks that every wing and tip point lies strictly inside the box.
pub(crate) fn check_encloses(
    bounds: &BoxBounds,
    wing: &Wing,
    tip: &Tip,
) -> std::result::Result<(), ConfigError> {
    let points = wing
        .stations()
        .iter()
        .flat_map(|s| s.points.iter())
        .chain(tip.mean_line());
    for p in points {
        let inside = bounds.x_o < p.x
            && p.x < bounds.x_f
            && 0.0 <= p.y
            && p.y < bounds.y_f
            && bounds.z_o < p.z
            && p.z < bounds.z_f;
        if !inside {
            return Err(ConfigError::InvalidBounds(format!(
                "box does not enclose wing point ({:.6}, {:.6}, {:.6})",
                p.x, p.y, p.z
            )));
        }
    }
    Ok(())
}
