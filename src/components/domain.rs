use crate::export::GeoWriter;

use super::{Entities, GeoComponent};

/// Extents of the box domain. The symmetry plane is `y = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBounds {
    /// Upstream x.
    pub x_o: f64,
    /// Downstream x.
    pub x_f: f64,
    /// Far spanwise y.
    pub y_f: f64,
    /// Bottom z.
    pub z_o: f64,
    /// Top z.
    pub z_f: f64,
}

/// Box far field split into an upper and a lower volume by the wing, tip
/// and wake.
#[derive(Debug, Clone)]
pub struct BoxDomain {
    pub(crate) bounds: BoxBounds,
    pub(crate) mesh_size: f64,
    pub(crate) entities: Entities,
}

impl BoxDomain {
    #[must_use]
    pub fn bounds(&self) -> BoxBounds {
        self.bounds
    }
}

/// Half-sphere far field around the wing, closed by the symmetry plane.
#[derive(Debug, Clone)]
pub struct SphereDomain {
    pub(crate) radius: f64,
    pub(crate) mesh_size: f64,
    pub(crate) entities: Entities,
}

impl SphereDomain {
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// The far-field domain.
#[derive(Debug, Clone)]
pub enum Domain {
    Box(BoxDomain),
    Sphere(SphereDomain),
}

impl Domain {
    fn mesh_size(&self) -> f64 {
        match self {
            Self::Box(b) => b.mesh_size,
            Self::Sphere(s) => s.mesh_size,
        }
    }
}

impl GeoComponent for Domain {
    fn title(&self) -> &'static str {
        match self {
            Self::Box(_) => "Box",
            Self::Sphere(_) => "Sphere",
        }
    }

    fn entities(&self) -> Option<&Entities> {
        match self {
            Self::Box(b) => Some(&b.entities),
            Self::Sphere(s) => Some(&s.entities),
        }
    }

    fn write_info(&self, out: &mut GeoWriter) {
        out.section("Domain geometry");
        match self {
            Self::Box(b) => {
                let BoxBounds {
                    x_o,
                    x_f,
                    y_f,
                    z_o,
                    z_f,
                } = b.bounds;
                out.comment(&format!("Box length: {:.6}", x_f - x_o));
                out.comment(&format!("Box width: {y_f:.6}"));
                out.comment(&format!("Box height: {:.6}", z_f - z_o));
            }
            Self::Sphere(s) => out.comment(&format!("Sphere radius: {:.6}", s.radius)),
        }
        out.blank();
    }

    fn write_opts(&self, out: &mut GeoWriter) {
        out.section("Domain options");
        out.define_constant("msF", self.mesh_size(), "Farfield mesh size");
        out.blank();
    }
}
