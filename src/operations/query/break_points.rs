use crate::error::GeometryError;
use crate::geometry::station::{BreakPoints, BREAKS};
use crate::math::search::{argmin_x, min_x, nearest_x};
use crate::math::Point3;

/// Chord fraction, measured from the leading edge, of the forward separation points.
pub const SEP_FWD: f64 = 0.3;
/// Chord fraction, measured from the leading edge, of the aft separation points.
pub const SEP_AFT: f64 = 0.9;

/// Locates the six break points of a wing station profile.
///
/// The leading edge is the point with the smallest x; the trailing edge is
/// the first point. Separation points are the points whose x distance from
/// the leading edge is closest to [`SEP_AFT`] and [`SEP_FWD`] times the
/// chord, searched independently on the upper arc (strictly between the
/// trailing and leading edges) and the lower arc (strictly after the leading
/// edge).
pub struct LocateBreakPoints<'a> {
    station: usize,
    points: &'a [Point3],
    chord: f64,
}

impl<'a> LocateBreakPoints<'a> {
    /// Creates a new `LocateBreakPoints` query.
    #[must_use]
    pub fn new(station: usize, points: &'a [Point3], chord: f64) -> Self {
        Self {
            station,
            points,
            chord,
        }
    }

    /// Executes the search.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::BreakPoints`] if a separation point cannot be
    /// found or the six indices are not strictly increasing, which happens
    /// on profiles that are too coarse or not in Selig order.
    pub fn execute(&self) -> Result<BreakPoints, GeometryError> {
        let n = self.points.len();
        let le = argmin_x(self.points).unwrap_or(0);
        let origin = self.points.get(le).map_or(0.0, |p| p.x);
        let aft_x = origin + SEP_AFT * self.chord;
        let fwd_x = origin + SEP_FWD * self.chord;

        let upper = 1..le;
        let lower = le + 1..n;
        let found = [
            Some(0),
            nearest_x(self.points, upper.clone(), aft_x),
            nearest_x(self.points, upper, fwd_x),
            Some(le),
            nearest_x(self.points, lower.clone(), fwd_x),
            nearest_x(self.points, lower, aft_x),
        ];

        let mut indices = [0; BREAKS];
        let mut complete = true;
        for (slot, idx) in indices.iter_mut().zip(found) {
            match idx {
                Some(i) => *slot = i,
                None => complete = false,
            }
        }

        let increasing = indices.windows(2).all(|w| w[0] < w[1]);
        if !complete || !increasing || indices[BREAKS - 1] >= n {
            return Err(GeometryError::BreakPoints {
                station: self.station,
                indices: indices.to_vec(),
                len: n,
            });
        }
        Ok(BreakPoints::new_unchecked(indices))
    }
}

/// Locates the aft and forward break points of the wingtip mean line.
///
/// Distances are measured from the smallest x of the outer wing station
/// (`section`), using that station's chord.
pub struct LocateTipBreakPoints<'a> {
    mean_line: &'a [Point3],
    section: &'a [Point3],
    chord: f64,
}

impl<'a> LocateTipBreakPoints<'a> {
    /// Creates a new `LocateTipBreakPoints` query.
    #[must_use]
    pub fn new(mean_line: &'a [Point3], section: &'a [Point3], chord: f64) -> Self {
        Self {
            mean_line,
            section,
            chord,
        }
    }

    /// Executes the search, returning `(aft, fwd)` indices into the mean line.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::TipBreakPoints`] unless `aft < fwd`.
    pub fn execute(&self) -> Result<(usize, usize), GeometryError> {
        let len = self.mean_line.len();
        let origin = min_x(self.section);
        let aft = nearest_x(self.mean_line, 0..len, origin + SEP_AFT * self.chord);
        let fwd = nearest_x(self.mean_line, 0..len, origin + SEP_FWD * self.chord);
        match (aft, fwd) {
            (Some(aft), Some(fwd)) if aft < fwd => Ok((aft, fwd)),
            (aft, fwd) => Err(GeometryError::TipBreakPoints {
                aft: aft.unwrap_or(0),
                fwd: fwd.unwrap_or(0),
                len,
            }),
        }
    }
}
