/// Spanwise shape of the half-wing.
///
/// Per-segment lists (`span`, `taper`, `sweep`, `dihedral`) have one entry
/// fewer than the per-station `twist` list. Angles are in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Planform {
    /// Chord of the root station.
    pub root_chord: f64,
    /// Spanwise length of each segment.
    pub span: Vec<f64>,
    /// Chord ratio between the outer and inner station of each segment.
    pub taper: Vec<f64>,
    /// Leading-edge sweep of each segment.
    pub sweep: Vec<f64>,
    /// Dihedral of each segment.
    pub dihedral: Vec<f64>,
    /// Twist of each station.
    pub twist: Vec<f64>,
    /// Leading-edge offset `(x, z)` applied to the whole wing.
    pub offset: [f64; 2],
}

impl Planform {
    /// Number of stations.
    #[must_use]
    pub fn stations(&self) -> usize {
        self.twist.len()
    }

    /// Chord length of every station, root first.
    #[must_use]
    pub fn chords(&self) -> Vec<f64> {
        let mut chords = Vec::with_capacity(self.stations());
        chords.push(self.root_chord);
        for (i, taper) in self.taper.iter().enumerate() {
            chords.push(chords[i] * taper);
        }
        chords
    }

    /// Spanwise position of every station, root at zero.
    #[must_use]
    pub fn span_positions(&self) -> Vec<f64> {
        let mut positions = Vec::with_capacity(self.stations());
        positions.push(0.0);
        for (i, span) in self.span.iter().enumerate() {
            positions.push(positions[i] + span);
        }
        positions
    }

    /// Half-wing span `b`.
    #[must_use]
    pub fn half_span(&self) -> f64 {
        self.span.iter().sum()
    }

    /// Half-wing area `S`, the sum of the trapezoidal panels.
    #[must_use]
    pub fn area(&self) -> f64 {
        let chords = self.chords();
        chords
            .windows(2)
            .zip(&self.span)
            .map(|(c, span)| 0.5 * (c[0] + c[1]) * span)
            .sum()
    }

    /// Aspect ratio of the full wing, `2 b² / S`.
    ///
    /// Returns `None` for a single station (zero area).
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        let area = self.area();
        (area > 0.0).then(|| 2.0 * self.half_span().powi(2) / area)
    }
}
