use std::ops::Range;

use super::Point3;

/// Returns the index of the first point with the smallest x coordinate.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn argmin_x(points: &[Point3]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        match best {
            Some((_, x)) if p.x >= x => {}
            _ => best = Some((i, p.x)),
        }
    }
    best.map(|(i, _)| i)
}

/// Returns the smallest x coordinate of a point cloud (`+inf` when empty).
#[must_use]
pub fn min_x(points: &[Point3]) -> f64 {
    points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min)
}

/// Finds, within `range`, the index whose x coordinate is nearest to `target`.
///
/// Ties resolve to the lowest index. Returns `None` if the range is empty
/// or lies outside the slice.
#[must_use]
pub fn nearest_x(points: &[Point3], range: Range<usize>, target: f64) -> Option<usize> {
    let slice = points.get(range.clone())?;
    let mut best: Option<(usize, f64)> = None;
    for (offset, p) in slice.iter().enumerate() {
        let d = (p.x - target).abs();
        match best {
            Some((_, bd)) if d >= bd => {}
            _ => best = Some((range.start + offset, d)),
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(values: &[f64]) -> Vec<Point3> {
        values.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect()
    }

    #[test]
    fn argmin_picks_first_minimum() {
        let pts = xs(&[1.0, 0.5, 0.0, 0.0, 0.5]);
        assert_eq!(argmin_x(&pts), Some(2));
        assert_eq!(argmin_x(&[]), None);
    }

    #[test]
    fn nearest_respects_range() {
        let pts = xs(&[1.0, 0.9, 0.3, 0.0, 0.3, 0.9, 1.0]);
        assert_eq!(nearest_x(&pts, 1..3, 0.9), Some(1));
        assert_eq!(nearest_x(&pts, 4..7, 0.9), Some(5));
        assert_eq!(nearest_x(&pts, 4..7, 0.31), Some(4));
    }

    #[test]
    fn nearest_on_empty_range_is_none() {
        let pts = xs(&[1.0, 0.0]);
        assert_eq!(nearest_x(&pts, 1..1, 0.5), None);
        assert_eq!(nearest_x(&pts, 3..5, 0.5), None);
    }

    #[test]
    fn min_x_of_cloud() {
        assert!((min_x(&xs(&[2.0, -1.0, 3.0])) + 1.0).abs() < 1e-12);
    }
}
