//! Smallest-free-index allocator.

use std::collections::BTreeSet;

/// Tracks which non-negative integers are in use and hands out the smallest
/// one that is not.
///
/// LaunchBox identifies playlist entries by a small integer that must be
/// unique across every playlist. Ids read from existing documents are marked
/// with [`reserve`](Self::reserve) while they are loaded; new entries get
/// theirs from [`reserve_first_free`](Self::reserve_first_free).
///
/// Values below the floor set by [`reset`](Self::reset) are never handed out.
#[derive(Debug, Clone, Default)]
pub struct FreeIndexTracker {
    floor: u32,
    reserved: BTreeSet<u32>,
    /// Every index in `floor..cursor` is reserved.
    cursor: u32,
}

impl FreeIndexTracker {
    /// An empty tracker whose first free index is 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty tracker whose first free index is `floor`.
    pub fn with_floor(floor: u32) -> Self {
        Self {
            floor,
            reserved: BTreeSet::new(),
            cursor: floor,
        }
    }

    /// The lowest index this tracker will hand out.
    pub fn floor(&self) -> u32 {
        self.floor
    }

    pub fn is_reserved(&self, index: u32) -> bool {
        index < self.floor || self.reserved.contains(&index)
    }

    /// Number of indices currently reserved at or above the floor.
    pub fn reserved_count(&self) -> usize {
        self.reserved.len()
    }

    /// Mark `index` as in use.
    ///
    /// Returns `false` if it was already reserved or lies below the floor.
    pub fn reserve(&mut self, index: u32) -> bool {
        if index < self.floor {
            return false;
        }
        self.reserved.insert(index)
    }

    /// Reserve and return the smallest index not currently in use.
    pub fn reserve_first_free(&mut self) -> u32 {
        let mut candidate = self.cursor.max(self.floor);
        while self.reserved.contains(&candidate) {
            candidate += 1;
        }
        self.reserved.insert(candidate);
        self.cursor = candidate + 1;
        candidate
    }

    /// Free `index` so it can be handed out again.
    ///
    /// Returns `false` (and changes nothing) if it was not reserved.
    pub fn release(&mut self, index: u32) -> bool {
        if !self.reserved.remove(&index) {
            return false;
        }
        self.cursor = self.cursor.min(index);
        true
    }

    /// Forget every reservation and start handing out indices from `floor`.
    pub fn reset(&mut self, floor: u32) {
        self.floor = floor;
        self.reserved.clear();
        self.cursor = floor;
    }
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
