//! Reserved blocks of the Gmsh ID space.
//!
//! ```text
//! points    wing 1..=4999 (499 per station) | domain 5000.. | tip 5101.. | wake 5351..
//! curves    wing sections 1..=60 | wing planform 61..=114 | tip 121.. | wake 131.., 161..
//!           | domain 191..
//! surfaces  wing 1..=54 | tip 71.. | wake 81.. | domain 111..
//! volumes   domain 1..
//! ```

use super::Region;

/// Maximum number of spanwise stations.
pub const MAX_STATIONS: usize = 10;

/// Maximum number of distinct points per airfoil station.
pub const MAX_STATION_POINTS: usize = 499;

const STATION_STRIDE: u32 = 500;
const SIDES: u32 = 6;

/// Point IDs of wing station `i`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn wing_points(i: usize) -> Region {
    Region::new(i as u32 * STATION_STRIDE + 1, MAX_STATION_POINTS as u32)
}

/// Section (airfoil) curve IDs of wing station `i`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn wing_section_curves(i: usize) -> Region {
    Region::new(i as u32 * SIDES + 1, SIDES)
}

/// Planform curve IDs between wing stations `i` and `i + 1`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn wing_planform_curves(i: usize) -> Region {
    Region::new(MAX_STATIONS as u32 * SIDES + 1 + i as u32 * SIDES, SIDES)
}

/// Surface IDs between wing stations `i` and `i + 1`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn wing_surfaces(i: usize) -> Region {
    Region::new(i as u32 * SIDES + 1, SIDES)
}

/// Wingtip mean-line point IDs.
#[allow(clippy::cast_possible_truncation)]
pub const TIP_POINTS: Region = Region::new(5101, ((MAX_STATION_POINTS - 3) / 2) as u32);
/// Wingtip curve IDs (3 mean-line splines, 4 connectors).
pub const TIP_CURVES: Region = Region::new(121, 7);
/// Wingtip surface IDs.
pub const TIP_SURFACES: Region = Region::new(71, 6);

/// Wake point IDs (`2n + 6` points).
#[allow(clippy::cast_possible_truncation)]
pub const WAKE_POINTS: Region = Region::new(5351, 2 * MAX_STATIONS as u32 + 6);
/// Wake curves joining consecutive wake points (`2n + 5`).
#[allow(clippy::cast_possible_truncation)]
pub const WAKE_DOMAIN_CURVES: Region = Region::new(131, 2 * MAX_STATIONS as u32 + 5);
/// Wake curves joining the wing/tip to the wake points (`2n + 4`).
#[allow(clippy::cast_possible_truncation)]
pub const WAKE_LINK_CURVES: Region = Region::new(161, 2 * MAX_STATIONS as u32 + 4);
/// Wake surface IDs (`2n + 3`).
#[allow(clippy::cast_possible_truncation)]
pub const WAKE_SURFACES: Region = Region::new(81, 2 * MAX_STATIONS as u32 + 3);

/// Domain corner/pole point IDs.
pub const DOMAIN_POINTS: Region = Region::new(5000, 8);
/// Box symmetry-plane curves (y = 0).
pub const BOX_SYMMETRY_CURVES: Region = Region::new(191, 6);
/// Box far-side curves (y = y_f).
pub const BOX_BACK_CURVES: Region = Region::new(197, 6);
/// Box spanwise edges.
pub const BOX_TRANSVERSE_CURVES: Region = Region::new(205, 4);
/// Sphere equator arcs.
pub const SPHERE_EQUATOR_CURVES: Region = Region::new(191, 4);
/// Sphere meridian arcs.
pub const SPHERE_MERIDIAN_CURVES: Region = Region::new(195, 4);
/// Domain surface IDs (and the extra curve loop of the sphere symmetry plane).
pub const DOMAIN_SURFACES: Region = Region::new(111, 10);
/// Volume and surface-loop IDs.
pub const DOMAIN_VOLUMES: Region = Region::new(1, 2);
