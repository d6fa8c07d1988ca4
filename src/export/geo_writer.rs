use std::fmt;

use crate::topology::{
    CurveData, CurveKind, CurveLoopData, PhysicalGroup, PointData, SurfaceData, SurfaceKind,
    SurfaceLoopData, VolumeData,
};

/// Width of the header comment box.
const HEADER_WIDTH: usize = 44;

/// Accumulates Gmsh `.geo` statements.
///
/// Coordinates and constants are written with six decimals; entity lists
/// are comma-separated without spaces.
#[derive(Debug, Default)]
pub struct GeoWriter {
    buf: String,
}

impl GeoWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        self.buf.push_str(&fmt::format(args));
        self.buf.push('\n');
    }

    /// Writes the comment box opening the file.
    pub fn header(&mut self, name: &str) {
        let rule = "*".repeat(HEADER_WIDTH - 2);
        self.line(format_args!("/{rule}/"));
        self.line(format_args!("/* Gmsh geometry for {name:>20} */"));
        self.line(format_args!("/* Generated by      {:>20} */", env!("CARGO_PKG_NAME")));
        self.line(format_args!("/{rule}/"));
        self.blank();
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// `// --- title ---`
    pub fn section(&mut self, title: &str) {
        self.line(format_args!("// --- {title} ---"));
    }

    /// `// -- title`
    pub fn subsection(&mut self, title: &str) {
        self.line(format_args!("// -- {title}"));
    }

    pub fn comment(&mut self, text: &str) {
        self.line(format_args!("// {text}"));
    }

    /// Writes a `// label: v0 v1 ...` comment.
    pub fn comment_values(&mut self, label: &str, values: &[f64]) {
        let list: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
        self.line(format_args!("// {label}: {}", list.join(" ")));
    }

    /// Declares an ONELAB-tunable constant.
    pub fn define_constant(&mut self, name: &str, value: f64, label: &str) {
        self.line(format_args!(
            "DefineConstant[ {name} = {{ {value:.6}, Name \"{label}\" }} ];"
        ));
    }

    pub fn point(&mut self, point: &PointData) {
        let PointData { id, coords, size } = point;
        match size {
            Some(size) => self.line(format_args!(
                "Point({id}) = {{{:.6},{:.6},{:.6},{size}}};",
                coords.x, coords.y, coords.z
            )),
            None => self.line(format_args!(
                "Point({id}) = {{{:.6},{:.6},{:.6}}};",
                coords.x, coords.y, coords.z
            )),
        }
    }

    pub fn curve(&mut self, curve: &CurveData) {
        let id = curve.id;
        match &curve.kind {
            CurveKind::Line { start, end } => self.line(format_args!("Line({id}) = {{{start},{end}}};")),
            CurveKind::Spline(points) => {
                self.line(format_args!("Spline({id}) = {{{}}};", join(points)));
            }
            CurveKind::Circle { start, center, end } => {
                self.line(format_args!("Circle({id}) = {{{start},{center},{end}}};"));
            }
        }
    }

    pub fn curve_loop(&mut self, curve_loop: &CurveLoopData) {
        self.line(format_args!(
            "Line Loop({}) = {{{}}};",
            curve_loop.id,
            join(&curve_loop.curves)
        ));
    }

    /// Writes a surface over its (already written) curve loops.
    pub fn surface(&mut self, surface: &SurfaceData) {
        let id = surface.id;
        let sign = if surface.flipped { "-" } else { "" };
        let holes: String = surface.holes.iter().map(|h| format!(",{h}")).collect();
        match surface.kind {
            SurfaceKind::Filling => {
                self.line(format_args!("Surface({id}) = {{{sign}{}{holes}}};", surface.outer));
            }
            SurfaceKind::Plane => {
                self.line(format_args!(
                    "Plane Surface({id}) = {{{sign}{}{holes}}};",
                    surface.outer
                ));
            }
        }
    }

    pub fn surface_loop(&mut self, shell: &SurfaceLoopData) {
        self.line(format_args!(
            "Surface Loop({}) = {{{}}};",
            shell.id,
            join(&shell.surfaces)
        ));
    }

    pub fn volume(&mut self, volume: &VolumeData) {
        let shells: Vec<_> = volume.shells().collect();
        self.line(format_args!("Volume({}) = {{{}}};", volume.id, join(&shells)));
    }

    /// Writes a named physical group; empty groups are skipped.
    pub fn physical(&mut self, group: &PhysicalGroup) {
        if group.members.is_empty() {
            return;
        }
        self.line(format_args!(
            "Physical {}(\"{}\") = {{{}}};",
            group.members.keyword(),
            group.name,
            join(&group.members.tags())
        ));
    }

    /// Writes a raw statement (mesh options and the like).
    pub fn statement(&mut self, text: &str) {
        self.line(format_args!("{text}"));
    }

    /// Returns the accumulated text.
    #[must_use]
    pub fn finish(self) -> String {
        self.buf
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
