use crate::math::Point3;

/// Number of break points (and arcs) per wing station.
pub const BREAKS: usize = 6;

/// Indices of the six topological break points of a station profile.
///
/// In polyline order: trailing edge, upper aft separation, upper forward
/// separation, leading edge, lower forward separation, lower aft separation.
/// Indices are strictly increasing; arc `j` runs from break `j` to break
/// `j + 1`, the last arc wrapping back to the trailing edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakPoints([usize; BREAKS]);

impl BreakPoints {
    pub const TRAILING_EDGE: usize = 0;
    pub const UPPER_AFT: usize = 1;
    pub const UPPER_FWD: usize = 2;
    pub const LEADING_EDGE: usize = 3;
    pub const LOWER_FWD: usize = 4;
    pub const LOWER_AFT: usize = 5;

    /// Wraps already-checked indices.
    pub(crate) fn new_unchecked(indices: [usize; BREAKS]) -> Self {
        Self(indices)
    }

    /// Index of break `j` in the station polyline.
    #[must_use]
    pub fn get(&self, j: usize) -> usize {
        self.0[j % BREAKS]
    }

    #[must_use]
    pub fn as_array(&self) -> [usize; BREAKS] {
        self.0
    }

    #[must_use]
    pub fn trailing_edge(&self) -> usize {
        self.0[Self::TRAILING_EDGE]
    }

    #[must_use]
    pub fn leading_edge(&self) -> usize {
        self.0[Self::LEADING_EDGE]
    }

    /// Polyline indices covered by arc `j`, in traversal order.
    ///
    /// The last arc continues past the end of the polyline and closes on
    /// the trailing edge (index 0).
    #[must_use]
    pub fn arc(&self, j: usize, len: usize) -> Vec<usize> {
        let start = self.get(j);
        if j + 1 < BREAKS {
            (start..=self.get(j + 1)).collect()
        } else {
            (start..len).chain(std::iter::once(self.get(0))).collect()
        }
    }
}

/// One placed airfoil cross-section of the wing.
#[derive(Debug, Clone)]
pub struct Station {
    /// Station index, root first.
    pub index: usize,
    /// Local chord length.
    pub chord: f64,
    /// Spanwise (y) position.
    pub span_pos: f64,
    /// Transformed profile points, trailing edge first.
    pub points: Vec<Point3>,
    /// Break-point indices into `points`.
    pub breaks: BreakPoints,
}

impl Station {
    /// Position of break point `j`.
    #[must_use]
    pub fn break_point(&self, j: usize) -> Point3 {
        self.points[self.breaks.get(j)]
    }

    /// Trailing-edge point.
    #[must_use]
    pub fn trailing_edge(&self) -> Point3 {
        self.points[self.breaks.trailing_edge()]
    }

    /// Leading-edge point.
    #[must_use]
    pub fn leading_edge(&self) -> Point3 {
        self.points[self.breaks.leading_edge()]
    }
}
