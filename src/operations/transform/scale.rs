use crate::math::{Matrix4, Point3, Vector3};

use super::GeneralTransform;

/// Scales a point cloud from a center point, independently per axis.
pub struct Scale {
    center: Point3,
    factors: Vector3,
}

impl Scale {
    /// Creates a new `Scale` operation.
    #[must_use]
    pub fn new(center: Point3, factors: Vector3) -> Self {
        Self { center, factors }
    }

    /// Scales the chordwise (x) and thickness (z) directions of a section by
    /// `chord`, leaving the spanwise coordinate untouched.
    #[must_use]
    pub fn section(chord: f64) -> Self {
        Self::new(Point3::origin(), Vector3::new(chord, 1.0, chord))
    }

    /// Executes the scaling, modifying the points in-place.
    pub fn execute(&self, points: &mut [Point3]) {
        let matrix = Matrix4::new_nonuniform_scaling_wrt_point(&self.factors, &self.center);
        GeneralTransform::new(matrix).execute(points);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn section_scaling_keeps_span_position() {
        let mut pts = vec![Point3::new(1.0, 2.0, 0.1)];
        Scale::section(0.5).execute(&mut pts);
        assert_relative_eq!(pts[0], Point3::new(0.5, 2.0, 0.05), epsilon = 1e-12);
    }

    #[test]
    fn scaling_about_center() {
        let mut pts = vec![Point3::new(2.0, 2.0, 2.0)];
        Scale::new(Point3::new(1.0, 1.0, 1.0), Vector3::new(2.0, 2.0, 2.0)).execute(&mut pts);
        assert_relative_eq!(pts[0], Point3::new(3.0, 3.0, 3.0), epsilon = 1e-12);
    }
}
