//! Explicit entity-ID allocation.
//!
//! Every component reserves its IDs from fixed [`Region`]s of the numeric
//! space (see [`layout`]). The [`IdAllocator`] records each reservation under
//! a [`RangeKey`] and rejects, at construction time, any request that exceeds
//! its region or any region that overlaps another one of the same entity class.

pub mod layout;

use std::fmt;

use crate::error::AllocationError;

/// The component owning a range of IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Wing,
    Tip,
    Wake,
    Domain,
}

/// The kind of entity an ID range numbers.
///
/// Gmsh keeps one ID space per entity dimension, so ranges only conflict
/// within the same class. Curve loops share the surface numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityClass {
    Point,
    Curve,
    Surface,
    Volume,
}

impl EntityClass {
    /// Human-readable name used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Curve => "curve",
            Self::Surface => "surface",
            Self::Volume => "volume",
        }
    }
}

/// Identifies one reservation: (component, entity class, role, instance).
///
/// `role` distinguishes several blocks of the same class within a component
/// (e.g. wing section curves vs. wing planform curves).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeKey {
    pub owner: Owner,
    pub class: EntityClass,
    pub role: &'static str,
    pub instance: usize,
}

impl RangeKey {
    #[must_use]
    pub fn new(owner: Owner, class: EntityClass, role: &'static str, instance: usize) -> Self {
        Self {
            owner,
            class,
            role,
            instance,
        }
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} {}[{}]",
            self.owner,
            self.class.name(),
            self.role,
            self.instance
        )
    }
}

/// A block of the numeric ID space set aside for one reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub base: u32,
    pub capacity: u32,
}

impl Region {
    #[must_use]
    pub const fn new(base: u32, capacity: u32) -> Self {
        Self { base, capacity }
    }

    /// One past the last ID of the region.
    #[must_use]
    pub fn end(&self) -> u32 {
        self.base + self.capacity
    }

    /// Returns `true` if both regions share at least one ID.
    #[must_use]
    pub fn overlaps(&self, other: &Region) -> bool {
        self.capacity > 0 && other.capacity > 0 && self.base < other.end() && other.base < self.end()
    }
}

/// A contiguous range of allocated IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    start: u32,
    len: u32,
}

impl IdRange {
    /// First ID of the range.
    #[must_use]
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Number of IDs in the range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the `i`-th ID of the range.
    ///
    /// `i` must be below [`IdRange::len`]; the range was sized by the caller
    /// that requested it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn at(&self, i: usize) -> u32 {
        debug_assert!(i < self.len(), "index {i} outside range of {}", self.len);
        self.start + i as u32
    }

    /// Iterates over the IDs of the range.
    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.start..self.start + self.len
    }
}

/// A recorded reservation.
#[derive(Debug, Clone, Copy)]
pub struct Reservation {
    pub key: RangeKey,
    pub region: Region,
    pub range: IdRange,
}

/// Hands out ID ranges from reserved regions and checks them for overlap.
#[derive(Debug, Default)]
pub struct IdAllocator {
    reservations: Vec<Reservation>,
}

impl IdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves `region` under `key` and allocates its first `len` IDs.
    ///
    /// The whole region is reserved, not only the allocated prefix, so that
    /// a later, larger input can never spill into a neighbouring block.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::CapacityExceeded`] if `len` exceeds the region,
    /// [`AllocationError::AlreadyReserved`] if `key` was already used, and
    /// [`AllocationError::Overlap`] if the region intersects another region of
    /// the same entity class.
    pub fn reserve(
        &mut self,
        key: RangeKey,
        region: Region,
        len: usize,
    ) -> Result<IdRange, AllocationError> {
        let len = u32::try_from(len)
            .ok()
            .filter(|&l| l <= region.capacity)
            .ok_or_else(|| AllocationError::CapacityExceeded {
                key: key.to_string(),
                requested: len,
                capacity: region.capacity,
            })?;

        for r in &self.reservations {
            if r.key == key {
                return Err(AllocationError::AlreadyReserved(key.to_string()));
            }
            if r.key.class == key.class && r.region.overlaps(&region) {
                return Err(AllocationError::Overlap {
                    key: key.to_string(),
                    other: r.key.to_string(),
                    class: key.class.name(),
                });
            }
        }

        let range = IdRange {
            start: region.base,
            len,
        };
        self.reservations.push(Reservation { key, region, range });
        Ok(range)
    }

    /// All reservations made so far, in allocation order.
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Re-checks that no two reservations of the same class overlap.
    ///
    /// # Errors
    ///
    /// Returns [`AllocationError::Overlap`] for the first conflicting pair.
    pub fn check_disjoint(&self) -> Result<(), AllocationError> {
        for (i, a) in self.reservations.iter().enumerate() {
            for b in &self.reservations[i + 1..] {
                if a.key.class == b.key.class && a.region.overlaps(&b.region) {
                    return Err(AllocationError::Overlap {
                        key: b.key.to_string(),
                        other: a.key.to_string(),
                        class: a.key.class.name(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn key(owner: Owner, class: EntityClass, instance: usize) -> RangeKey {
        RangeKey::new(owner, class, "test", instance)
    }

    #[test]
    fn allocates_prefix_of_region() {
        let mut ids = IdAllocator::new();
        let range = ids
            .reserve(key(Owner::Wing, EntityClass::Point, 0), Region::new(1, 499), 3)
            .unwrap();
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(range.at(2), 3);
        assert_eq!(range.len(), 3);
    }

    #[test]
    fn rejects_request_above_capacity() {
        let mut ids = IdAllocator::new();
        let err = ids
            .reserve(key(Owner::Tip, EntityClass::Curve, 0), Region::new(121, 7), 8)
            .unwrap_err();
        assert!(matches!(err, AllocationError::CapacityExceeded { requested: 8, .. }));
    }

    #[test]
    fn rejects_overlap_within_class() {
        let mut ids = IdAllocator::new();
        ids.reserve(key(Owner::Wing, EntityClass::Point, 9), Region::new(4501, 499), 10)
            .unwrap();
        let err = ids
            .reserve(key(Owner::Domain, EntityClass::Point, 0), Region::new(4990, 8), 8)
            .unwrap_err();
        assert!(matches!(err, AllocationError::Overlap { class: "point", .. }));
    }

    #[test]
    fn same_numbers_in_other_class_are_fine() {
        let mut ids = IdAllocator::new();
        ids.reserve(key(Owner::Wing, EntityClass::Curve, 0), Region::new(1, 6), 6)
            .unwrap();
        ids.reserve(key(Owner::Wing, EntityClass::Surface, 0), Region::new(1, 6), 6)
            .unwrap();
        assert!(ids.check_disjoint().is_ok());
    }

    #[test]
    fn key_cannot_be_reserved_twice() {
        let mut ids = IdAllocator::new();
        let k = key(Owner::Wake, EntityClass::Point, 0);
        ids.reserve(k, Region::new(5351, 26), 1).unwrap();
        let err = ids.reserve(k, Region::new(6000, 26), 1).unwrap_err();
        assert!(matches!(err, AllocationError::AlreadyReserved(_)));
    }

    #[test]
    fn empty_regions_never_overlap() {
        assert!(!Region::new(5, 0).overlaps(&Region::new(1, 10)));
        assert!(Region::new(5, 1).overlaps(&Region::new(1, 10)));
        assert!(!Region::new(11, 1).overlaps(&Region::new(1, 10)));
    }
}
