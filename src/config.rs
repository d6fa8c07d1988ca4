//! User parameter set.
//!
//! Parameters are read from JSON. Angles are given in degrees; lengths are
//! in the airfoil files' unit scaled by the root chord.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::components::{BoxBounds, Wingtip};
use crate::error::ConfigError;
use crate::geometry::Planform;
use crate::ids::layout::MAX_STATIONS;
use crate::math::deg_to_rad;

fn default_n_slope() -> usize {
    10
}

/// Wing, wingtip and domain parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Params {
    /// Directory holding the airfoil files, relative to the config file.
    #[serde(default)]
    pub airfoil_dir: PathBuf,
    /// Airfoil file name of each station, root first.
    pub airfoils: Vec<String>,
    /// Span of each segment between consecutive stations.
    #[serde(default)]
    pub span: Vec<f64>,
    /// Taper ratio of each segment.
    #[serde(default)]
    pub taper: Vec<f64>,
    /// Leading-edge sweep of each segment, in degrees.
    #[serde(default)]
    pub sweep: Vec<f64>,
    /// Dihedral of each segment, in degrees.
    #[serde(default)]
    pub dihedral: Vec<f64>,
    /// Twist of each station, in degrees.
    pub twist: Vec<f64>,
    pub root_chord: f64,
    /// Leading-edge offset `[x, z]` of the whole wing.
    #[serde(default)]
    pub offset: [f64; 2],
    #[serde(default)]
    pub wingtip: Wingtip,
    pub domain: DomainConfig,
}

/// The `domain` table as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConfig {
    /// `"box"` or `"sphere"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Wake slope sample offset (box only).
    #[serde(default = "default_n_slope")]
    pub n_slope: usize,
    pub x_o: Option<f64>,
    pub x_f: Option<f64>,
    pub y_f: Option<f64>,
    pub z_o: Option<f64>,
    pub z_f: Option<f64>,
    pub radius: Option<f64>,
}

/// Resolved domain parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DomainParams {
    Box { bounds: BoxBounds, n_slope: usize },
    Sphere { radius: f64 },
}

impl Params {
    /// Parses and validates a JSON parameter set.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed JSON and a configuration error if
    /// validation fails.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let params: Self = serde_json::from_str(text).map_err(crate::error::ParseError::from)?;
        params.validate()?;
        Ok(params)
    }

    /// Number of stations.
    #[must_use]
    pub fn stations(&self) -> usize {
        self.airfoils.len()
    }

    /// Checks every parameter before any geometry is built.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.stations();
        if n == 0 {
            return Err(ConfigError::NoStations);
        }
        if n > MAX_STATIONS {
            return Err(ConfigError::TooManyStations {
                given: n,
                max: MAX_STATIONS,
            });
        }
        let segments: [(&'static str, &[f64]); 4] = [
            ("span", &self.span),
            ("taper", &self.taper),
            ("sweep", &self.sweep),
            ("dihedral", &self.dihedral),
        ];
        for (name, values) in segments {
            check_len(name, values, n - 1)?;
        }
        check_len("twist", &self.twist, n)?;

        for (name, values) in segments {
            check_finite(name, values)?;
        }
        check_finite("twist", &self.twist)?;
        check_finite("offset", &self.offset)?;

        check_positive("root_chord", &[self.root_chord])?;
        check_positive("span", &self.span)?;
        check_positive("taper", &self.taper)?;

        self.domain()?;
        Ok(())
    }

    /// The planform with angles converted to radians.
    #[must_use]
    pub fn planform(&self) -> Planform {
        let radians =
            |values: &[f64]| -> Vec<f64> { values.iter().copied().map(deg_to_rad).collect() };
        Planform {
            root_chord: self.root_chord,
            span: self.span.clone(),
            taper: self.taper.clone(),
            sweep: radians(&self.sweep),
            dihedral: radians(&self.dihedral),
            twist: radians(&self.twist),
            offset: self.offset,
        }
    }

    /// Resolves the domain table, filling in default box bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownDomain`] for an unknown type, and a
    /// bounds or radius error for an unusable domain.
    pub fn domain(&self) -> Result<DomainParams, ConfigError> {
        let d = &self.domain;
        match d.kind.as_str() {
            "box" => {
                if d.n_slope == 0 {
                    return Err(ConfigError::NotPositive {
                        name: "n_slope",
                        value: 0.0,
                    });
                }
                let c = self.root_chord;
                let b: f64 = self.span.iter().sum();
                let bounds = BoxBounds {
                    x_o: d.x_o.unwrap_or(-3.5 * c),
                    x_f: d.x_f.unwrap_or(4.5 * c),
                    y_f: d.y_f.unwrap_or(2.0 * b),
                    z_o: d.z_o.unwrap_or(-3.5 * c),
                    z_f: d.z_f.unwrap_or(3.5 * c),
                };
                check_bounds(&bounds)?;
                Ok(DomainParams::Box {
                    bounds,
                    n_slope: d.n_slope,
                })
            }
            "sphere" => {
                let radius = d.radius.ok_or(ConfigError::MissingField {
                    domain: "sphere",
                    field: "radius",
                })?;
                check_finite("radius", &[radius])?;
                check_positive("radius", &[radius])?;
                Ok(DomainParams::Sphere { radius })
            }
            other => Err(ConfigError::UnknownDomain(other.to_string())),
        }
    }

    /// Airfoil file paths, resolved against the config file's directory.
    #[must_use]
    pub fn airfoil_paths(&self, config_dir: &Path) -> Vec<PathBuf> {
        let dir = config_dir.join(&self.airfoil_dir);
        self.airfoils.iter().map(|name| dir.join(name)).collect()
    }
}

fn check_len(name: &'static str, values: &[f64], expected: usize) -> Result<(), ConfigError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(ConfigError::LengthMismatch {
            name,
            given: values.len(),
            expected,
        })
    }
}

fn check_finite(name: &'static str, values: &[f64]) -> Result<(), ConfigError> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(ConfigError::NotFinite { name, value }),
        None => Ok(()),
    }
}

fn check_positive(name: &'static str, values: &[f64]) -> Result<(), ConfigError> {
    match values.iter().find(|&&v| v <= 0.0) {
        Some(&value) => Err(ConfigError::NotPositive { name, value }),
        None => Ok(()),
    }
}

fn check_bounds(b: &BoxBounds) -> Result<(), ConfigError> {
    let values = [b.x_o, b.x_f, b.y_f, b.z_o, b.z_f];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ConfigError::InvalidBounds(format!("non-finite bound in {b:?}")));
    }
    if b.x_o >= b.x_f {
        return Err(ConfigError::InvalidBounds(format!(
            "x_o = {} is not upstream of x_f = {}",
            b.x_o, b.x_f
        )));
    }
    if b.z_o >= b.z_f {
        return Err(ConfigError::InvalidBounds(format!(
            "z_o = {} is not below z_f = {}",
            b.z_o, b.z_f
        )));
    }
    if b.y_f <= 0.0 {
        return Err(ConfigError::InvalidBounds(format!(
            "y_f = {} must be positive",
            b.y_f
        )));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;
    use serde_json::json;

    use super::*;
    use crate::error::GeogenError;

    fn base() -> serde_json::Value {
        json!({
            "airfoil_dir": "airfoils",
            "airfoils": ["a.dat", "b.dat", "c.dat"],
            "span": [0.5, 2.0],
            "taper": [0.8, 0.4],
            "sweep": [20.0, 20.0],
            "dihedral": [2.0, 1.0],
            "twist": [1.0, 0.0, -1.0],
            "root_chord": 2.0,
            "domain": { "type": "box" }
        })
    }

    fn params(value: serde_json::Value) -> Params {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn defaults_and_box_bounds() {
        let p = params(base());
        p.validate().unwrap();
        assert_eq!(p.offset, [0.0, 0.0]);
        assert_eq!(p.wingtip, Wingtip::Cutoff);
        let DomainParams::Box { bounds, n_slope } = p.domain().unwrap() else {
            panic!("expected a box");
        };
        assert_eq!(n_slope, 10);
        assert_relative_eq!(bounds.x_o, -7.0);
        assert_relative_eq!(bounds.x_f, 9.0);
        assert_relative_eq!(bounds.y_f, 5.0);
        assert_relative_eq!(bounds.z_o, -7.0);
        assert_relative_eq!(bounds.z_f, 7.0);
    }

    #[test]
    fn explicit_bound_overrides_default() {
        let mut v = base();
        v["domain"]["x_f"] = json!(20.0);
        let DomainParams::Box { bounds, .. } = params(v).domain().unwrap() else {
            panic!("expected a box");
        };
        assert_relative_eq!(bounds.x_f, 20.0);
        assert_relative_eq!(bounds.x_o, -7.0);
    }

    #[test]
    fn angles_become_radians() {
        let planform = params(base()).planform();
        assert_relative_eq!(planform.sweep[0], 20.0_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(planform.twist[2], -(1.0_f64.to_radians()), epsilon = 1e-12);
        assert_relative_eq!(planform.span[1], 2.0);
    }

    #[test]
    fn unknown_domain_is_named() {
        let mut v = base();
        v["domain"] = json!({ "type": "cylinder" });
        let err = params(v).validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownDomain(ref t) if t == "cylinder"));
        assert!(err.to_string().contains("\"cylinder\""));
    }

    #[test]
    fn sphere_needs_a_positive_radius() {
        let mut v = base();
        v["domain"] = json!({ "type": "sphere" });
        assert!(matches!(
            params(v.clone()).validate().unwrap_err(),
            ConfigError::MissingField { field: "radius", .. }
        ));
        v["domain"]["radius"] = json!(-1.0);
        assert!(matches!(
            params(v.clone()).validate().unwrap_err(),
            ConfigError::NotPositive { name: "radius", .. }
        ));
        v["domain"]["radius"] = json!(50.0);
        assert_eq!(
            params(v).domain().unwrap(),
            DomainParams::Sphere { radius: 50.0 }
        );
    }

    #[test]
    fn station_count_is_bounded() {
        let mut v = base();
        v["airfoils"] = json!(vec!["a.dat"; 11]);
        v["twist"] = json!(vec![0.0; 11]);
        v["span"] = json!(vec![1.0; 10]);
        v["taper"] = json!(vec![1.0; 10]);
        v["sweep"] = json!(vec![0.0; 10]);
        v["dihedral"] = json!(vec![0.0; 10]);
        assert!(matches!(
            params(v).validate().unwrap_err(),
            ConfigError::TooManyStations { given: 11, max: 10 }
        ));

        let mut v = base();
        v["airfoils"] = json!([]);
        assert!(matches!(params(v).validate().unwrap_err(), ConfigError::NoStations));
    }

    #[test]
    fn segment_lists_must_match_stations() {
        let mut v = base();
        v["taper"] = json!([0.8]);
        assert!(matches!(
            params(v).validate().unwrap_err(),
            ConfigError::LengthMismatch {
                name: "taper",
                given: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn non_positive_span_is_rejected() {
        let mut v = base();
        v["span"] = json!([0.5, 0.0]);
        assert!(matches!(
            params(v).validate().unwrap_err(),
            ConfigError::NotPositive { name: "span", .. }
        ));
    }

    #[test]
    fn inverted_box_is_rejected() {
        let mut v = base();
        v["domain"]["z_o"] = json!(10.0);
        assert!(matches!(
            params(v).validate().unwrap_err(),
            ConfigError::InvalidBounds(_)
        ));
    }

    #[test]
    fn rounded_tip_parses() {
        let mut v = base();
        v["wingtip"] = json!("rounded");
        assert_eq!(params(v).wingtip, Wingtip::Rounded);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Params::from_json("{ \"airfoils\": ").unwrap_err();
        assert!(matches!(err, GeogenError::Parse(_)));
    }

    #[test]
    fn airfoil_paths_join_the_config_dir() {
        let p = params(base());
        let paths = p.airfoil_paths(Path::new("/work/cfg"));
        assert_eq!(paths[0], PathBuf::from("/work/cfg/airfoils/a.dat"));
        assert_eq!(paths.len(), 3);
    }
}
