use std::collections::{BTreeMap, BTreeSet};

use crate::error::TopologyError;
use crate::topology::{CurveId, CurveLoopData, OrientedCurve, PointId, TopologyStore, VolumeData};

/// Validates the consistency of the assembled topology.
///
/// Checks, in order:
/// 1. every point referenced by a curve exists,
/// 2. every curve loop references existing curves and is a closed, simple
///    polygon,
/// 3. every surface references existing loops,
/// 4. every volume shell references existing surfaces, each curve of the
///    shell bounds exactly two of its surfaces, and those two surfaces cross
///    it in opposite directions.
///
/// A surface's hole loops run against its outer loop, and a surface that is
/// flipped or taken reversed in a shell has every loop reversed.
pub struct IsValid;

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Executes the validation.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn execute(&self, store: &TopologyStore) -> Result<(), TopologyError> {
        for curve in store.curves() {
            for point in curve.referenced_points() {
                store.point(point)?;
            }
        }

        for curve_loop in store.curve_loops() {
            check_loop(store, curve_loop)?;
        }

        for surface in store.surfaces() {
            for id in surface.loops() {
                store.curve_loop(id)?;
            }
        }

        for volume in store.volumes() {
            check_shells(store, volume)?;
        }
        Ok(())
    }
}

impl Default for IsValid {
    fn default() -> Self {
        Self::new()
    }
}

/// `(first, last)` point of a curve as traversed within a loop.
fn traversal(
    store: &TopologyStore,
    oriented: OrientedCurve,
) -> Result<(Option<PointId>, Option<PointId>), TopologyError> {
    let curve = store.curve(oriented.curve)?;
    if oriented.forward {
        Ok((curve.start(), curve.end()))
    } else {
        Ok((curve.end(), curve.start()))
    }
}

fn check_loop(store: &TopologyStore, curve_loop: &CurveLoopData) -> Result<(), TopologyError> {
    let mut ends = Vec::with_capacity(curve_loop.curves.len());
    for oriented in &curve_loop.curves {
        ends.push(traversal(store, *oriented)?);
    }
    let closed = !ends.is_empty()
        && ends
            .iter()
            .zip(ends.iter().cycle().skip(1))
            .all(|((_, end), (start, _))| end == start);
    if !closed {
        return Err(TopologyError::LoopNotClosed(curve_loop.id.0));
    }

    // a closed loop is simple when no point starts two of its curves
    let mut visited = BTreeSet::new();
    for point in ends.iter().filter_map(|(start, _)| *start) {
        if !visited.insert(point) {
            return Err(TopologyError::LoopNotSimple {
                id: curve_loop.id.0,
                point: point.0,
            });
        }
    }
    Ok(())
}

fn check_shells(store: &TopologyStore, volume: &VolumeData) -> Result<(), TopologyError> {
    for shell_id in volume.shells() {
        let shell = store.surface_loop(shell_id)?;
        // (forward, reverse) crossings of each curve
        let mut uses: BTreeMap<CurveId, (usize, usize)> = BTreeMap::new();
        for oriented in &shell.surfaces {
            let surface = store.surface(oriented.surface)?;
            let outer_sense = oriented.forward != surface.flipped;
            for (k, loop_id) in surface.loops().enumerate() {
                let sense = if k == 0 { outer_sense } else { !outer_sense };
                for curve in &store.curve_loop(loop_id)?.curves {
                    let entry = uses.entry(curve.curve).or_default();
                    if curve.forward == sense {
                        entry.0 += 1;
                    } else {
                        entry.1 += 1;
                    }
                }
            }
        }
        for (curve, &(forward, reverse)) in &uses {
            if forward + reverse != 2 {
                return Err(TopologyError::NotWatertight {
                    volume: volume.id.0,
                    curve: curve.0,
                    count: forward + reverse,
                });
            }
            if forward != 1 {
                return Err(TopologyError::MisOriented {
                    volume: volume.id.0,
                    curve: curve.0,
                });
            }
        }
    }
    Ok(())
}
