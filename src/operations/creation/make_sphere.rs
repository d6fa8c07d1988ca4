use tracing::info;

use crate::components::{Domain, Entities, SphereDomain, Tip, Wing};
use crate::error::{ConfigError, Result};
use crate::geometry::BreakPoints;
use crate::ids::{layout, EntityClass, IdAllocator, Owner, RangeKey};
use crate::math::Vector3;
use crate::topology::{
    CurveData, CurveId, CurveLoopData, LoopId, MeshSize, OrientedCurve, OrientedSurface,
    PhysicalGroup, PointData, PointId, SurfaceData, SurfaceId, SurfaceLoopData, SurfaceLoopId,
    VolumeData, VolumeId,
};

/// Far-field mesh size of the sphere, relative to the root chord.
const FARFIELD_SIZE: f64 = 10.0;

/// Closes a half-sphere domain around the wing and tip.
///
/// The sphere is centred on the root leading edge. Four quarter circles
/// form the equator in the symmetry plane and four more meet at the pole on
/// the spanwise axis. The symmetry disc is holed by the root section.
pub struct MakeSphere<'a> {
    wing: &'a Wing,
    tip: &'a Tip,
    radius: f64,
}

impl<'a> MakeSphere<'a> {
    /// Creates a new `MakeSphere` operation.
    #[must_use]
    pub fn new(wing: &'a Wing, tip: &'a Tip, radius: f64) -> Self {
        Self { wing, tip, radius }
    }

    /// Executes the operation, reserving the domain ID ranges from `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if a wing or tip point lies
    /// outside the sphere, or an allocation error if a domain range is taken.
    pub fn execute(&self, ids: &mut IdAllocator) -> Result<Domain> {
        let root = self.wing.root();
        let center = root.leading_edge();
        let center_id = self.wing.break_point_id(0, BreakPoints::LEADING_EDGE);
        let outside = self
            .wing
            .stations()
            .iter()
            .flat_map(|s| s.points.iter())
            .chain(self.tip.mean_line())
            .find(|p| (**p - center).norm() >= self.radius);
        if let Some(p) = outside {
            return Err(ConfigError::InvalidBounds(format!(
                "sphere of radius {:.6} does not enclose wing point ({:.6}, {:.6}, {:.6})",
                self.radius, p.x, p.y, p.z
            ))
            .into());
        }

        let key = |class, role| RangeKey::new(Owner::Domain, class, role, 0);
        let point_ids = ids.reserve(key(EntityClass::Point, "sphere"), layout::DOMAIN_POINTS, 5)?;
        let equator = ids.reserve(
            key(EntityClass::Curve, "equator"),
            layout::SPHERE_EQUATOR_CURVES,
            4,
        )?;
        let meridians = ids.reserve(
            key(EntityClass::Curve, "meridian"),
            layout::SPHERE_MERIDIAN_CURVES,
            4,
        )?;
        // one more than the surfaces: the last ID names the root hole loop
        let faces = ids.reserve(key(EntityClass::Surface, "face"), layout::DOMAIN_SURFACES, 6)?;
        let volumes = ids.reserve(key(EntityClass::Volume, "field"), layout::DOMAIN_VOLUMES, 1)?;

        let mesh_size = FARFIELD_SIZE * root.chord;
        let r = self.radius;
        let mut e = Entities::default();

        let point = |k: usize| PointId(point_ids.at(k));
        let offsets = [
            Vector3::new(r, 0.0, 0.0),
            Vector3::new(0.0, 0.0, r),
            Vector3::new(-r, 0.0, 0.0),
            Vector3::new(0.0, 0.0, -r),
            Vector3::new(0.0, r, 0.0),
        ];
        for (k, offset) in offsets.into_iter().enumerate() {
            e.points
                .push(PointData::new(point(k), center + offset, Some(MeshSize::Farfield)));
        }
        let pole = point(4);

        let eq = |j: usize| CurveId(equator.at(j));
        let mer = |j: usize| CurveId(meridians.at(j));
        for j in 0..4 {
            e.curves
                .push(CurveData::circle(eq(j), point(j), center_id, point((j + 1) % 4)));
        }
        for j in 0..4 {
            e.curves.push(CurveData::circle(mer(j), point(j), center_id, pole));
        }

        let face = |k: usize| SurfaceId(faces.at(k));
        for j in 0..4 {
            let id = face(j);
            let curves = vec![
                OrientedCurve::fwd(eq(j)),
                OrientedCurve::fwd(mer((j + 1) % 4)),
                OrientedCurve::rev(mer(j)),
            ];
            e.loops.push(CurveLoopData::new(LoopId(id.0), curves));
            e.surfaces.push(SurfaceData::filling(id, LoopId(id.0)));
        }
        let disc = face(4);
        let hole = LoopId(faces.at(5));
        e.loops.push(CurveLoopData::new(
            LoopId(disc.0),
            (0..4).map(|j| OrientedCurve::fwd(eq(j))).collect(),
        ));
        e.loops.push(CurveLoopData::new(
            hole,
            (0..6)
                .map(|j| OrientedCurve::fwd(self.wing.section_curve(0, j)))
                .collect(),
        ));
        e.surfaces
            .push(SurfaceData::plane(disc, LoopId(disc.0), vec![hole]));

        // the caps are written inward and the tip is flipped
        let shell: Vec<OrientedSurface> = self
            .wing
            .upper_surfaces()
            .into_iter()
            .chain(self.wing.lower_surfaces())
            .map(OrientedSurface::fwd)
            .chain(
                self.tip
                    .upper_surfaces()
                    .into_iter()
                    .chain(self.tip.lower_surfaces())
                    .map(OrientedSurface::rev),
            )
            .chain((0..4).map(|j| OrientedSurface::rev(face(j))))
            .chain(std::iter::once(OrientedSurface::fwd(disc)))
            .collect();
        let volume = volumes.at(0);
        e.surface_loops
            .push(SurfaceLoopData::new(SurfaceLoopId(volume), shell));
        e.volumes
            .push(VolumeData::new(VolumeId(volume), SurfaceLoopId(volume)));

        e.groups.extend([
            PhysicalGroup::surfaces("symmetry", vec![disc]),
            PhysicalGroup::surfaces("farfield", (0..4).map(face).collect()),
            PhysicalGroup::volumes("field", vec![VolumeId(volume)]),
        ]);

        info!(radius = r, mesh_size, "sphere domain built");
        Ok(Domain::Sphere(SphereDomain {
            radius: r,
            mesh_size,
            entities: e,
        }))
    }
}
