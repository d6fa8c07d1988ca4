use crate::math::{Matrix4, Point3};

/// Applies an arbitrary 4x4 transformation matrix to a point cloud.
pub struct GeneralTransform {
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(matrix: Matrix4) -> Self {
        Self { matrix }
    }

    /// Executes the transformation, modifying the points in-place.
    pub fn execute(&self, points: &mut [Point3]) {
        for p in points.iter_mut() {
            *p = transform_point(&self.matrix, p);
        }
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
pub(crate) fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    Point3::new(v.x, v.y, v.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_square() -> Vec<Point3> {
        vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 0.0, 1.0), p(0.0, 0.0, 1.0)]
    }

    #[test]
    fn identity_transform_preserves_points() {
        let mut pts = unit_square();
        GeneralTransform::new(Matrix4::identity()).execute(&mut pts);
        assert_eq!(pts, unit_square());
    }

    #[test]
    fn translation_shifts_all_points() {
        let mut pts = unit_square();
        let mut matrix = Matrix4::identity();
        matrix[(0, 3)] = 5.0;
        matrix[(1, 3)] = 3.0;
        matrix[(2, 3)] = 2.0;
        GeneralTransform::new(matrix).execute(&mut pts);

        for pt in &pts {
            assert!(pt.x >= 5.0 - 1e-10 && pt.x <= 6.0 + 1e-10);
            assert!((pt.y - 3.0).abs() < 1e-10);
            assert!(pt.z >= 2.0 - 1e-10 && pt.z <= 3.0 + 1e-10);
        }
    }

    #[test]
    fn uniform_scale_doubles_size() {
        let mut pts = unit_square();
        GeneralTransform::new(Matrix4::new_scaling(2.0)).execute(&mut pts);
        assert!((pts[2].x - 2.0).abs() < 1e-10);
        assert!((pts[2].z - 2.0).abs() < 1e-10);
    }
}
