use crate::math::{Matrix4, Point3, Vector3};

use super::GeneralTransform;

/// Translates a point cloud by a displacement vector.
pub struct Translate {
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(displacement: Vector3) -> Self {
        Self { displacement }
    }

    /// Executes the translation, modifying the points in-place.
    pub fn execute(&self, points: &mut [Point3]) {
        GeneralTransform::new(Matrix4::new_translation(&self.displacement)).execute(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_every_point() {
        let mut pts = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)];
        Translate::new(Vector3::new(0.5, 0.0, -1.0)).execute(&mut pts);
        assert_eq!(pts[0], Point3::new(0.5, 0.0, -1.0));
        assert_eq!(pts[1], Point3::new(1.5, 1.0, 0.0));
    }
}
