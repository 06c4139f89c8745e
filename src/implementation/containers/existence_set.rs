// Copyright 2020 Xavier Gillard
//
// Permission is hereby granted, free of charge, to any person obtaining a copy of
// this software and associated documentation files (the "Software"), to deal in
// the Software without restriction, including without limitation the rights to
// use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of
// the Software, and to permit persons to whom the Software is furnished to do so,
// subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY, FITNESS
// FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR
// COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER
// IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN
// CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use bit_vec::BitVec;

/// A dense set of linear indices, backed by a bit vector.
///
/// This is the closed set of every solver: membership tests are a single
/// bounds guarded bit read, insertion grows the vector on demand, and the
/// [`allocate`](Self::allocate) amortisation lets a solver widen the set in
/// capacity-sized steps instead of one bit at a time.
#[derive(Debug, Default, Clone)]
pub struct ExistenceSet {
    bits: BitVec,
}

impl ExistenceSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for indices below `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        ExistenceSet { bits: BitVec::with_capacity(capacity) }
    }

    /// Returns true iff `index` is a member of the set. Out of range indices
    /// are simply not members.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).unwrap_or(false)
    }

    /// Inserts `index` into the set, growing the backing vector when the
    /// index lies beyond its current extent.
    #[inline]
    pub fn emplace(&mut self, index: usize) {
        if index >= self.bits.len() {
            self.bits.grow(index + 1 - self.bits.len(), false);
        }
        self.bits.set(index, true);
    }

    /// Removes `index` from the set. Removing a non-member is a no-op.
    #[inline]
    pub fn erase(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Amortised preallocation: when the set cannot yet hold `index` without
    /// reallocating, reserves room for `capacity + increment` more indices,
    /// clamped to `max`. Called by the solvers right before
    /// [`emplace`](Self::emplace) so the set widens in search-sized steps.
    pub fn allocate(&mut self, index: usize, increment: usize, max: usize) {
        let capacity = self.bits.capacity();
        if capacity <= index {
            let target = capacity.saturating_add(increment).min(max.max(index + 1));
            let additional = target.saturating_sub(self.bits.len());
            if additional > 0 {
                self.bits.reserve(additional);
            }
        }
    }

    /// Reserves room for indices below `capacity`.
    pub fn reserve(&mut self, capacity: usize) {
        let additional = capacity.saturating_sub(self.bits.len());
        if additional > 0 {
            self.bits.reserve(additional);
        }
    }

    /// Removes every member, keeping the backing storage.
    pub fn clear(&mut self) {
        self.bits.clear();
    }

    /// Drops the trailing run of non-members, shrinking the extent of the
    /// backing vector.
    pub fn trim(&mut self) {
        let mut len = self.bits.len();
        while len > 0 && !self.bits.get(len - 1).unwrap_or(false) {
            len -= 1;
        }
        self.bits.truncate(len);
    }

    /// Rebuilds the backing vector at the smallest size holding the current
    /// members.
    pub fn shrink_to_fit(&mut self) {
        self.trim();
        let mut fresh = BitVec::with_capacity(self.bits.len());
        for bit in self.bits.iter() {
            fresh.push(bit);
        }
        self.bits = fresh;
    }

    /// Extent of the backing vector (one past the largest index ever
    /// emplaced, unless trimmed).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true iff no index was ever emplaced (or the set was trimmed
    /// back to nothing).
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_existence_set {
    use super::*;

    #[test]
    fn by_default_it_is_empty() {
        let set = ExistenceSet::new();
        assert!(set.is_empty());
        assert!(!set.contains(0));
    }

    #[test]
    fn emplace_then_contains_then_erase_round_trips() {
        let mut set = ExistenceSet::new();
        for h in [0_usize, 1, 7, 63, 64, 1000] {
            set.emplace(h);
            assert!(set.contains(h));
            set.erase(h);
            assert!(!set.contains(h));
        }
    }

    #[test]
    fn membership_is_bounds_guarded() {
        let set = ExistenceSet::new();
        assert!(!set.contains(123_456));
    }

    #[test]
    fn erasing_a_non_member_is_a_no_op() {
        let mut set = ExistenceSet::new();
        set.erase(42);
        assert!(set.is_empty());
    }

    #[test]
    fn emplacing_far_indices_grows_the_set() {
        let mut set = ExistenceSet::new();
        set.emplace(100);
        assert!(set.contains(100));
        assert!(!set.contains(99));
        assert_eq!(101, set.len());
    }

    #[test]
    fn allocate_is_clamped_to_max() {
        let mut set = ExistenceSet::new();
        set.allocate(10, 1_000_000, 64);
        set.emplace(10);
        assert!(set.contains(10));
    }

    #[test]
    fn clear_removes_every_member() {
        let mut set = ExistenceSet::new();
        set.emplace(3);
        set.emplace(9);
        set.clear();
        assert!(!set.contains(3));
        assert!(!set.contains(9));
    }

    #[test]
    fn trim_drops_the_trailing_zero_run() {
        let mut set = ExistenceSet::new();
        set.emplace(5);
        set.emplace(100);
        set.erase(100);
        set.trim();
        assert_eq!(6, set.len());
        assert!(set.contains(5));
    }

    #[test]
    fn shrink_to_fit_preserves_members() {
        let mut set = ExistenceSet::with_capacity(1024);
        set.emplace(2);
        set.emplace(17);
        set.shrink_to_fit();
        assert!(set.contains(2));
        assert!(set.contains(17));
        assert!(!set.contains(3));
    }
}
