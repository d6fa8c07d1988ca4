use std::fmt;

use super::curve::CurveId;

entity_id! {
    /// Gmsh tag of a curve loop.
    LoopId
}

/// A curve with orientation information within a loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedCurve {
    /// The curve identifier.
    pub curve: CurveId,
    /// If `true`, the curve is traversed in its natural direction (start → end).
    /// If `false`, the curve is traversed in reverse (end → start).
    pub forward: bool,
}

impl OrientedCurve {
    /// Creates a new oriented curve.
    #[must_use]
    pub fn new(curve: CurveId, forward: bool) -> Self {
        Self { curve, forward }
    }

    /// The curve traversed start → end.
    #[must_use]
    pub fn fwd(curve: CurveId) -> Self {
        Self::new(curve, true)
    }

    /// The curve traversed end → start.
    #[must_use]
    pub fn rev(curve: CurveId) -> Self {
        Self::new(curve, false)
    }

    /// The signed Gmsh reference (`-id` for a reversed curve).
    #[must_use]
    pub fn signed(&self) -> i64 {
        let id = i64::from(self.curve.0);
        if self.forward {
            id
        } else {
            -id
        }
    }
}

impl fmt::Display for OrientedCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.signed())
    }
}

/// Data associated with a curve loop.
///
/// A loop is an ordered sequence of oriented curves that, followed
/// cyclically, returns to its starting point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveLoopData {
    pub id: LoopId,
    /// The ordered sequence of oriented curves.
    pub curves: Vec<OrientedCurve>,
}

impl CurveLoopData {
    #[must_use]
    pub fn new(id: LoopId, curves: Vec<OrientedCurve>) -> Self {
        Self { id, curves }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_reference() {
        assert_eq!(OrientedCurve::fwd(CurveId(17)).signed(), 17);
        assert_eq!(OrientedCurve::rev(CurveId(17)).signed(), -17);
        assert_eq!(OrientedCurve::rev(CurveId(3)).to_string(), "-3");
    }
}
