use crate::export::GeoWriter;
use crate::geometry::{Planform, Station, BREAKS};
use crate::ids::IdRange;
use crate::topology::{CurveId, PointId, SurfaceId};

use super::{Entities, GeoComponent};

/// The half-wing: placed stations and the surfaces joining them.
///
/// Built by [`crate::operations::creation::MakeWing`]. Station `i` owns the
/// point range `point_ids[i]` and six section arcs; the panel between
/// stations `i` and `i + 1` owns six planform lines and six surfaces.
#[derive(Debug, Clone)]
pub struct Wing {
    pub(crate) planform: Planform,
    pub(crate) stations: Vec<Station>,
    pub(crate) point_ids: Vec<IdRange>,
    pub(crate) section_ids: Vec<IdRange>,
    pub(crate) planform_ids: Vec<IdRange>,
    pub(crate) surface_ids: Vec<IdRange>,
    pub(crate) entities: Entities,
}

impl Wing {
    #[must_use]
    pub fn planform(&self) -> &Planform {
        &self.planform
    }

    /// Stations, root first.
    #[must_use]
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Number of stations (at least one).
    #[must_use]
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// The root station.
    #[must_use]
    pub fn root(&self) -> &Station {
        &self.stations[0]
    }

    /// The outermost station.
    #[must_use]
    pub fn last(&self) -> &Station {
        &self.stations[self.stations.len() - 1]
    }

    /// ID of point `k` of station `i`.
    #[must_use]
    pub fn point_id(&self, i: usize, k: usize) -> PointId {
        PointId(self.point_ids[i].at(k))
    }

    /// ID of break point `j` of station `i`.
    #[must_use]
    pub fn break_point_id(&self, i: usize, j: usize) -> PointId {
        self.point_id(i, self.stations[i].breaks.get(j))
    }

    /// Section arc `j` of station `i`, from break `j` to break `j + 1`.
    #[must_use]
    pub fn section_curve(&self, i: usize, j: usize) -> CurveId {
        CurveId(self.section_ids[i].at(j % BREAKS))
    }

    /// Planform line `j` of panel `i`, from break `j` of station `i` to
    /// break `j` of station `i + 1`.
    #[must_use]
    pub fn planform_curve(&self, i: usize, j: usize) -> CurveId {
        CurveId(self.planform_ids[i].at(j % BREAKS))
    }

    /// Surface `j` of panel `i`.
    #[must_use]
    pub fn surface(&self, i: usize, j: usize) -> SurfaceId {
        SurfaceId(self.surface_ids[i].at(j))
    }

    /// Surfaces on the upper side (arcs 0 to 2) of every panel.
    #[must_use]
    pub fn upper_surfaces(&self) -> Vec<SurfaceId> {
        self.panel_surfaces(0..3)
    }

    /// Surfaces on the lower side (arcs 3 to 5) of every panel.
    #[must_use]
    pub fn lower_surfaces(&self) -> Vec<SurfaceId> {
        self.panel_surfaces(3..6)
    }

    fn panel_surfaces(&self, arcs: std::ops::Range<usize>) -> Vec<SurfaceId> {
        self.surface_ids
            .iter()
            .flat_map(|range| arcs.clone().map(move |j| SurfaceId(range.at(j))))
            .collect()
    }
}

impl GeoComponent for Wing {
    fn title(&self) -> &'static str {
        "Wing"
    }

    fn entities(&self) -> Option<&Entities> {
        Some(&self.entities)
    }

    fn write_info(&self, out: &mut GeoWriter) {
        let b = self.planform.half_span();
        let normalized: Vec<f64> = self
            .stations
            .iter()
            .map(|s| if b > 0.0 { s.span_pos / b } else { 0.0 })
            .collect();
        let chords: Vec<f64> = self.stations.iter().map(|s| s.chord).collect();

        out.section("Wing geometry");
        out.comment(&format!("Number of spanwise stations: {}", self.stations.len()));
        out.comment_values("Spanwise stations normalized coordinate", &normalized);
        out.comment_values("Chord lengths", &chords);
        out.comment(&format!("Half-wing area: {:.6}", self.planform.area()));
        out.comment(&format!("Half-wing span: {b:.6}"));
        if let Some(ar) = self.planform.aspect_ratio() {
            out.comment(&format!("Aspect ratio: {ar:.6}"));
        }
        out.blank();
    }

    fn write_opts(&self, out: &mut GeoWriter) {
        out.section("Wing options");
        for station in &self.stations {
            let i = station.index;
            let size = station.chord / 100.0;
            out.define_constant(
                &format!("msLe{i}"),
                size,
                &format!("leading edge mesh size on {i}th spanwise station"),
            );
            out.define_constant(
                &format!("msTe{i}"),
                size,
                &format!("trailing edge mesh size on {i}th spanwise station"),
            );
            out.define_constant(
                &format!("gr{i}"),
                1.5,
                &format!("growth ratio for {i}th spanwise station"),
            );
        }
        out.blank();
    }

    fn write_points(&self, out: &mut GeoWriter) {
        out.section("Wing points");
        let mut rest = self.entities.points.as_slice();
        for (i, range) in self.point_ids.iter().enumerate() {
            let (station, tail) = rest.split_at(range.len().min(rest.len()));
            out.subsection(&format!("Airfoil {i}"));
            for point in station {
                out.point(point);
            }
            out.blank();
            rest = tail;
        }
        out.blank();
    }
}
