use crate::error::{GeometryError, Result};
use crate::math::{Matrix4, Point3, Vector3, TOLERANCE};

use super::GeneralTransform;

/// Rotates a point cloud around an axis.
pub struct Rotate {
    axis_origin: Point3,
    axis_direction: Vector3,
    angle: f64,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `angle` - Rotation angle in radians (right-hand rule about the axis).
    #[must_use]
    pub fn new(axis_origin: Point3, axis_direction: Vector3, angle: f64) -> Self {
        Self {
            axis_origin,
            axis_direction,
            angle,
        }
    }

    /// Twist of a wing section: rotation about the spanwise (y) axis through
    /// `origin`. A positive angle lowers the trailing edge (nose up).
    #[must_use]
    pub fn twist(origin: Point3, angle: f64) -> Self {
        Self::new(origin, Vector3::y(), angle)
    }

    /// Executes the rotation, modifying the points in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the axis direction is zero-length.
    pub fn execute(&self, points: &mut [Point3]) -> Result<()> {
        let len = self.axis_direction.norm();
        if len < TOLERANCE {
            return Err(GeometryError::Degenerate("rotation axis must be non-zero".into()).into());
        }
        let axis = self.axis_direction / len;

        // Translate to origin, rotate, translate back
        let t_neg = Matrix4::new_translation(&(-self.axis_origin.coords));
        let rot = rotation_matrix(&axis, self.angle);
        let t_pos = Matrix4::new_translation(&self.axis_origin.coords);
        let matrix = t_pos * rot * t_neg;

        GeneralTransform::new(matrix).execute(points);
        Ok(())
    }
}

/// Builds a 4x4 rotation matrix around a unit axis by an angle (Rodrigues).
#[allow(clippy::many_single_char_names)]
fn rotation_matrix(axis: &Vector3, angle: f64) -> Matrix4 {
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;
    let (x, y, z) = (axis.x, axis.y, axis.z);

    #[allow(clippy::suspicious_operation_groupings)]
    Matrix4::new(
        t * x * x + c,     t * x * y - s * z, t * x * z + s * y, 0.0,
        t * x * y + s * z, t * y * y + c,     t * y * z - s * x, 0.0,
        t * x * z - s * y, t * y * z + s * x, t * z * z + c,     0.0,
        0.0,               0.0,               0.0,               1.0,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn rotate_90_around_z() {
        let mut pts = vec![p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0)];
        Rotate::new(p(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 1.0), FRAC_PI_2)
            .execute(&mut pts)
            .unwrap();
        // (1, 0, 0) -> (0, 1, 0), (2, 0, 0) -> (0, 2, 0)
        assert_relative_eq!(pts[0], p(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(pts[1], p(0.0, 2.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn positive_twist_lowers_trailing_edge() {
        let mut pts = vec![p(1.0, 0.5, 0.0), p(0.0, 0.5, 0.0)];
        let angle = 5.0_f64.to_radians();
        Rotate::twist(Point3::origin(), angle).execute(&mut pts).unwrap();
        assert_relative_eq!(pts[0].x, angle.cos(), epsilon = 1e-12);
        assert_relative_eq!(pts[0].z, -angle.sin(), epsilon = 1e-12);
        assert_relative_eq!(pts[0].y, 0.5, epsilon = 1e-12);
        assert_relative_eq!(pts[1], p(0.0, 0.5, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn zero_axis_returns_error() {
        let mut pts = vec![p(1.0, 0.0, 0.0)];
        let result = Rotate::new(p(0.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 0.0), 1.0)
            .execute(&mut pts);
        assert!(result.is_err());
    }
}
