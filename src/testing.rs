//! Synthetic airfoil profiles shared by the unit tests.

#![allow(clippy::unwrap_used)]

use crate::geometry::Airfoil;
use crate::math::{Point2, Point3};

/// NACA four-digit profile with `2 * half` points in Selig order.
///
/// Cosine spacing, `half + 1` points on the upper surface from the trailing
/// edge (index 0) to the leading edge (index `half`, x = 0), then
/// `half - 1` lower-surface points back towards the trailing edge. Camber
/// is added to z without rotating the thickness, so the leading edge is
/// the unique minimum of x.
pub(crate) fn naca4_profile(code: &str, half: usize) -> Vec<Point2> {
    let digits: Vec<f64> = code
        .chars()
        .map(|c| f64::from(c.to_digit(10).unwrap()))
        .collect();
    let m = digits[0] / 100.0;
    let p = digits[1] / 10.0;
    let t = (digits[2] * 10.0 + digits[3]) / 100.0;

    let thickness = |x: f64| {
        5.0 * t
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                - 0.1015 * x.powi(4))
    };
    let camber = |x: f64| {
        if m <= 0.0 {
            0.0
        } else if x < p {
            m / p.powi(2) * (2.0 * p * x - x.powi(2))
        } else {
            m / (1.0 - p).powi(2) * ((1.0 - 2.0 * p) + 2.0 * p * x - x.powi(2))
        }
    };
    #[allow(clippy::cast_precision_loss)]
    let station = |k: usize| 0.5 * (1.0 + (std::f64::consts::PI * k as f64 / half as f64).cos());

    let mut points = Vec::with_capacity(2 * half);
    for k in 0..=half {
        let x = station(k);
        points.push(Point2::new(x, camber(x) + thickness(x)));
    }
    for k in (1..half).rev() {
        let x = station(k);
        points.push(Point2::new(x, camber(x) - thickness(x)));
    }
    points
}

/// NACA four-digit [`Airfoil`].
pub(crate) fn naca4(code: &str, half: usize) -> Airfoil {
    Airfoil::new(naca4_profile(code, half)).unwrap()
}

/// NACA four-digit profile placed in the `y = 0` plane and scaled by `chord`.
pub(crate) fn naca4_points(code: &str, half: usize, chord: f64) -> Vec<Point3> {
    naca4_profile(code, half)
        .iter()
        .map(|p| Point3::new(p.x * chord, 0.0, p.y * chord))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selig_order_with_single_leading_edge() {
        let pts = naca4_profile("2412", 20);
        assert_eq!(pts.len(), 40);
        assert!((pts[0].x - 1.0).abs() < 1e-12);
        assert!(pts[20].x.abs() < 1e-12);
        assert!(pts.iter().enumerate().all(|(i, p)| i == 20 || p.x > 0.0));
        // upper surface above lower surface at the same station
        assert!(pts[10].y > pts[30].y);
    }
}
