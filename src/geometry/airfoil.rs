use crate::error::{GeometryError, ParseError, Result};
use crate::math::{Point2, TOLERANCE};

/// An airfoil profile in the normalized-chord frame.
///
/// Points follow the Selig ordering: trailing edge, upper surface, leading
/// edge, lower surface. The polyline is open: the last point is implicitly
/// joined back to the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Airfoil {
    points: Vec<Point2>,
}

impl Airfoil {
    /// Smallest profile that can hold six distinct break points plus
    /// a wrap-around arc.
    pub const MIN_POINTS: usize = 7;

    /// Creates a profile from normalized `(x, y)` points.
    ///
    /// A closing point that repeats the first one is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TooFewPoints`] if fewer than
    /// [`Airfoil::MIN_POINTS`] distinct points remain.
    pub fn new(mut points: Vec<Point2>) -> std::result::Result<Self, GeometryError> {
        if points.len() > 1 {
            if let (Some(first), Some(last)) = (points.first(), points.last()) {
                if (first - last).norm() < TOLERANCE {
                    points.pop();
                }
            }
        }
        if points.len() < Self::MIN_POINTS {
            return Err(GeometryError::TooFewPoints {
                given: points.len(),
                min: Self::MIN_POINTS,
            });
        }
        Ok(Self { points })
    }

    /// Parses a profile file: one header line, then one `x y` pair per line.
    ///
    /// Blank lines are skipped; commas are accepted as separators.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Airfoil`] with the 1-based line number of the
    /// first malformed line, or a geometry error if the profile is too short.
    pub fn parse(text: &str) -> Result<Self> {
        let mut points = Vec::new();
        for (n, line) in text.lines().enumerate().skip(1) {
            let fields: Vec<&str> = line
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|f| !f.is_empty())
                .collect();
            if fields.is_empty() {
                continue;
            }
            if fields.len() != 2 {
                return Err(ParseError::Airfoil {
                    line: n + 1,
                    message: format!("expected 2 columns, found {}", fields.len()),
                }
                .into());
            }
            let x = parse_coordinate(fields[0], n + 1)?;
            let y = parse_coordinate(fields[1], n + 1)?;
            points.push(Point2::new(x, y));
        }
        Ok(Self::new(points)?)
    }

    /// The profile points, trailing edge first.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of distinct profile points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

fn parse_coordinate(field: &str, line: usize) -> std::result::Result<f64, ParseError> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::Airfoil {
            line,
            message: format!("\"{field}\" is not a number"),
        })
}
