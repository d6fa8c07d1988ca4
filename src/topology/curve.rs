use super::point::PointId;

entity_id! {
    /// Gmsh tag of a curve (line, spline or circle arc).
    CurveId
}

/// The geometric kind of a curve, with the points it passes through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurveKind {
    /// A straight segment.
    Line { start: PointId, end: PointId },
    /// A spline interpolating the points in order.
    Spline(Vec<PointId>),
    /// A circle arc (less than half a turn) around `center`.
    Circle {
        start: PointId,
        center: PointId,
        end: PointId,
    },
}

/// Data associated with a curve.
///
/// A curve runs from its start point to its end point; the direction
/// matters when the curve is placed in a loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveData {
    pub id: CurveId,
    pub kind: CurveKind,
}

impl CurveData {
    /// Creates a straight segment between two points.
    #[must_use]
    pub fn line(id: CurveId, start: PointId, end: PointId) -> Self {
        Self {
            id,
            kind: CurveKind::Line { start, end },
        }
    }

    /// Creates a spline through `points`.
    #[must_use]
    pub fn spline(id: CurveId, points: Vec<PointId>) -> Self {
        Self {
            id,
            kind: CurveKind::Spline(points),
        }
    }

    /// Creates a circle arc from `start` to `end` around `center`.
    #[must_use]
    pub fn circle(id: CurveId, start: PointId, center: PointId, end: PointId) -> Self {
        Self {
            id,
            kind: CurveKind::Circle { start, center, end },
        }
    }

    /// First point of the curve.
    #[must_use]
    pub fn start(&self) -> Option<PointId> {
        match &self.kind {
            CurveKind::Line { start, .. } | CurveKind::Circle { start, .. } => Some(*start),
            CurveKind::Spline(points) => points.first().copied(),
        }
    }

    /// Last point of the curve.
    #[must_use]
    pub fn end(&self) -> Option<PointId> {
        match &self.kind {
            CurveKind::Line { end, .. } | CurveKind::Circle { end, .. } => Some(*end),
            CurveKind::Spline(points) => points.last().copied(),
        }
    }

    /// Every point referenced by the curve, including a circle's center.
    #[must_use]
    pub fn referenced_points(&self) -> Vec<PointId> {
        match &self.kind {
            CurveKind::Line { start, end } => vec![*start, *end],
            CurveKind::Spline(points) => points.clone(),
            CurveKind::Circle { start, center, end } => vec![*start, *center, *end],
        }
    }
}
