//! The assembled wing, wingtip, wake and far-field model.

use tracing::info;

use crate::components::{Domain, GeoComponent, NoWake, Tip, Wake, Wing};
use crate::config::{DomainParams, Params};
use crate::error::Result;
use crate::export::GeoWriter;
use crate::geometry::Airfoil;
use crate::ids::IdAllocator;
use crate::operations::creation::{MakeBox, MakeSphere, MakeTip, MakeWake, MakeWing};
use crate::operations::query::IsValid;
use crate::topology::TopologyStore;

/// A validated, ready-to-write geometry.
#[derive(Debug)]
pub struct GeoModel {
    wing: Wing,
    tip: Tip,
    wake: Option<Wake>,
    domain: Domain,
    ids: IdAllocator,
}

impl GeoModel {
    /// Builds every component in dependency order and validates the result.
    ///
    /// `airfoils` holds one profile per station, root first.
    ///
    /// # Errors
    ///
    /// Returns the first configuration, allocation, geometry, unsupported
    /// feature or topology error. Nothing is built past the first failure.
    pub fn build(params: &Params, airfoils: &[Airfoil]) -> Result<Self> {
        params.validate()?;
        let planform = params.planform();
        let domain = params.domain()?;

        let mut ids = IdAllocator::new();
        let wing = MakeWing::new(airfoils, &planform).execute(&mut ids)?;
        let tip = MakeTip::new(&wing, params.wingtip).execute(&mut ids)?;
        let (wake, domain) = match domain {
            DomainParams::Box { bounds, n_slope } => {
                let wake = MakeWake::new(&wing, &tip, bounds, n_slope).execute(&mut ids)?;
                let domain = MakeBox::new(&wing, &tip, &wake, bounds).execute(&mut ids)?;
                (Some(wake), domain)
            }
            DomainParams::Sphere { radius } => {
                let domain = MakeSphere::new(&wing, &tip, radius).execute(&mut ids)?;
                (None, domain)
            }
        };
        ids.check_disjoint()?;

        let model = Self {
            wing,
            tip,
            wake,
            domain,
            ids,
        };
        let store = model.topology()?;
        IsValid::new().execute(&store)?;
        info!(
            stations = model.wing.station_count(),
            points = store.points().count(),
            curves = store.curves().count(),
            surfaces = store.surfaces().count(),
            volumes = store.volumes().count(),
            "model built"
        );
        Ok(model)
    }

    #[must_use]
    pub fn wing(&self) -> &Wing {
        &self.wing
    }

    #[must_use]
    pub fn tip(&self) -> &Tip {
        &self.tip
    }

    /// The wake, present for box domains only.
    #[must_use]
    pub fn wake(&self) -> Option<&Wake> {
        self.wake.as_ref()
    }

    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The ID ranges reserved while building.
    #[must_use]
    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Components in dependency order.
    fn components(&self) -> [&dyn GeoComponent; 4] {
        let wake: &dyn GeoComponent = match &self.wake {
            Some(wake) => wake,
            None => &NoWake,
        };
        [&self.wing, &self.tip, wake, &self.domain]
    }

    /// Gathers every entity into one store.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::TopologyError::DuplicateId`] if two components
    /// registered the same ID.
    pub fn topology(&self) -> Result<TopologyStore> {
        let mut store = TopologyStore::new();
        for component in self.components() {
            component.register(&mut store)?;
        }
        Ok(store)
    }

    /// Renders the model as Gmsh `.geo` text.
    ///
    /// Each kind of block is written for every component before the next
    /// kind starts, so every reference points at an entity already defined.
    #[must_use]
    pub fn write_geo(&self, name: &str) -> String {
        let components = self.components();
        let mut out = GeoWriter::new();
        out.header(name);
        for c in components {
            c.write_info(&mut out);
        }
        for c in components {
            c.write_opts(&mut out);
        }
        for c in components {
            c.write_points(&mut out);
        }
        for c in components {
            c.write_lines(&mut out);
        }
        for c in components {
            c.write_surfaces(&mut out);
        }
        for c in components {
            c.write_volumes(&mut out);
        }
        for c in components {
            c.write_physical(&mut out);
        }
        self.write_mesh_options(&mut out);
        out.finish()
    }

    fn write_mesh_options(&self, out: &mut GeoWriter) {
        out.section("Misc Meshing options");
        out.statement("Mesh.Algorithm = 5; // Delaunay");
        out.statement(&format!(
            "MeshAlgorithm Surface {{{},{}}} = 1; // Mesh-adapt",
            self.tip.surface(2),
            self.tip.surface(3)
        ));
        out.statement("Mesh.Algorithm3D = 2; // New Delaunay");
        out.statement("Mesh.OptimizeNetgen = 1;");
        out.statement("Mesh.Smoothing = 10;");
        out.statement("Mesh.SmoothNormals = 1;");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;
    use crate::error::{ConfigError, GeogenError, TopologyError, UnsupportedError};
    use crate::geometry::BreakPoints;
    use crate::math::Point3;
    use crate::testing::{naca4, naca4_profile};
    use crate::topology::{SurfaceId, SurfaceKind};

    fn params(stations: usize, domain: serde_json::Value) -> Params {
        let segments = stations - 1;
        serde_json::from_value(json!({
            "airfoils": vec!["naca2412.dat"; stations],
            "span": vec![0.6; segments],
            "taper": vec![0.9; segments],
            "sweep": vec![15.0; segments],
            "dihedral": vec![2.0; segments],
            "twist": vec![-1.0; stations],
            "root_chord": 1.0,
            "domain": domain
        }))
        .unwrap()
    }

    fn box_params(stations: usize) -> Params {
        params(stations, json!({ "type": "box", "y_f": 10.0 }))
    }

    fn sphere_params(stations: usize) -> Params {
        params(stations, json!({ "type": "sphere", "radius": 30.0 }))
    }

    fn airfoils(stations: usize) -> Vec<Airfoil> {
        vec![naca4("2412", 40); stations]
    }

    #[test]
    fn every_station_count_builds_disjoint_ids() {
        for stations in 1..=10 {
            for p in [box_params(stations), sphere_params(stations)] {
                let model = GeoModel::build(&p, &airfoils(stations)).unwrap();
                model.ids().check_disjoint().unwrap();
                for station in model.wing().stations() {
                    let b = station.breaks.as_array();
                    assert!(b.windows(2).all(|w| w[0] < w[1]), "station {}", station.index);
                    assert!(b[BreakPoints::LOWER_AFT] < station.points.len());
                }
            }
        }
    }

    #[test]
    fn output_is_deterministic() {
        let model = GeoModel::build(&box_params(3), &airfoils(3)).unwrap();
        let again = GeoModel::build(&box_params(3), &airfoils(3)).unwrap();
        assert_eq!(model.write_geo("wing"), again.write_geo("wing"));
    }

    #[test]
    fn box_halves_share_only_the_wake() {
        let model = GeoModel::build(&box_params(4), &airfoils(4)).unwrap();
        let store = model.topology().unwrap();
        let mut uses: HashMap<SurfaceId, usize> = HashMap::new();
        for shell in store.surface_loops() {
            for s in &shell.surfaces {
                *uses.entry(s.surface).or_default() += 1;
            }
        }
        let wing = model.wing();
        let tip = model.tip();
        for id in wing
            .upper_surfaces()
            .into_iter()
            .chain(wing.lower_surfaces())
            .chain(tip.upper_surfaces())
            .chain(tip.lower_surfaces())
        {
            assert_eq!(uses[&id], 1, "surface {id}");
        }
        for id in model.wake().unwrap().surfaces() {
            assert_eq!(uses[&id], 2, "wake surface {id}");
        }
        assert_eq!(store.volumes().count(), 2);
    }

    #[test]
    fn single_station_box() {
        let model = GeoModel::build(&box_params(1), &airfoils(1)).unwrap();
        let store = model.topology().unwrap();
        let Domain::Box(_) = model.domain() else {
            panic!("expected a box domain");
        };
        // ten box faces, six tip caps and five wake strips
        assert_eq!(store.surfaces().count(), 10 + 6 + 5);
        assert_eq!(model.wing().entities.points.len(), 80);

        let te = naca4_profile("2412", 40)[0];
        let first = model.wing().entities.points[0].coords;
        let theta = (-1.0_f64).to_radians();
        assert_relative_eq!(first.x, te.x * theta.cos() + te.y * theta.sin(), epsilon = 1e-12);
        assert_relative_eq!(first.y, 0.0);
        assert_relative_eq!(first.z, -te.x * theta.sin() + te.y * theta.cos(), epsilon = 1e-12);

        let text = model.write_geo("single");
        assert!(text.contains("Volume(1) = {1};"));
        assert!(text.contains("Volume(2) = {2};"));
        assert!(!text.contains("Physical Surface(\"wake\")"));
        assert!(text.contains("Physical Line(\"wakeTip\") = {161};"));
    }

    #[test]
    fn untwisted_single_station_keeps_the_profile() {
        let p: Params = serde_json::from_value(json!({
            "airfoils": ["naca0012.dat"],
            "twist": [0.0],
            "root_chord": 1.0,
            "domain": { "type": "box", "y_f": 5.0 }
        }))
        .unwrap();
        let airfoils = vec![naca4("0012", 40)];
        let model = GeoModel::build(&p, &airfoils).unwrap();
        let te = airfoils[0].points()[0];
        assert_eq!(model.wing().entities.points.len(), airfoils[0].len());
        assert_eq!(
            model.wing().entities.points[0].coords,
            Point3::new(te.x, 0.0, te.y)
        );
    }

    #[test]
    fn flipped_wing_panel_is_rejected() {
        let model = GeoModel::build(&box_params(3), &airfoils(3)).unwrap();
        let mut wing = model.wing().clone();
        let panel = &mut wing.entities.surfaces[0];
        panel.flipped = !panel.flipped;

        let mut store = TopologyStore::new();
        wing.register(&mut store).unwrap();
        for component in &model.components()[1..] {
            component.register(&mut store).unwrap();
        }
        let err = IsValid::new().execute(&store).unwrap_err();
        assert!(matches!(err, TopologyError::MisOriented { volume: 1, .. }));
    }

    #[test]
    fn single_station_sphere() {
        let model = GeoModel::build(&sphere_params(1), &airfoils(1)).unwrap();
        assert!(model.wake().is_none());
        let Domain::Sphere(sphere) = model.domain() else {
            panic!("expected a sphere domain");
        };
        let kinds: Vec<SurfaceKind> = sphere.entities.surfaces.iter().map(|s| s.kind).collect();
        assert_eq!(kinds.iter().filter(|&&k| k == SurfaceKind::Filling).count(), 4);
        assert_eq!(kinds.iter().filter(|&&k| k == SurfaceKind::Plane).count(), 1);

        let text = model.write_geo("sphere");
        assert!(text.contains("Plane Surface(115) = {115,116};"));
        assert!(text.contains("Volume(1) = {1};"));
        assert!(!text.contains("Volume(2)"));
        assert!(!text.contains("Wake"));
        assert!(text.contains("// Sphere radius: 30.000000"));
    }

    #[test]
    fn blocks_follow_dependency_order() {
        let text = GeoModel::build(&box_params(2), &airfoils(2))
            .unwrap()
            .write_geo("order");
        let at = |needle: &str| text.find(needle).unwrap();
        assert!(text.starts_with("/****"));
        assert!(at("// --- Wing geometry ---") < at("// --- Wingtip geometry ---"));
        assert!(at("// --- Wingtip geometry ---") < at("// --- Domain geometry ---"));
        assert!(at("// --- Domain options ---") < at("// --- Wing points ---"));
        assert!(at("// --- Wing points ---") < at("// --- Wingtip points ---"));
        assert!(at("// --- Wingtip points ---") < at("// --- Wake points ---"));
        assert!(at("// --- Wake points ---") < at("// --- Box points ---"));
        assert!(at("// --- Box points ---") < at("// --- Wing lines ---"));
        assert!(
            at("// --- Box line loops and surfaces ---") < at("// --- Computational volumes ---")
        );
        assert!(at("// --- Computational volumes ---") < at("// --- Wing physical groups ---"));
        assert!(text.contains("MeshAlgorithm Surface {73,74} = 1; // Mesh-adapt"));
        assert!(text.trim_end().ends_with("Mesh.SmoothNormals = 1;"));
    }

    #[test]
    fn unknown_domain_fails_before_building() {
        let p = params(2, json!({ "type": "cone" }));
        let err = GeoModel::build(&p, &airfoils(2)).unwrap_err();
        assert!(matches!(err, GeogenError::Config(ConfigError::UnknownDomain(_))));
    }

    #[test]
    fn rounded_tip_is_rejected() {
        let mut p = sphere_params(2);
        p.wingtip = crate::components::Wingtip::Rounded;
        let err = GeoModel::build(&p, &airfoils(2)).unwrap_err();
        assert!(matches!(
            err,
            GeogenError::Unsupported(UnsupportedError::RoundedWingtip)
        ));
    }
}
