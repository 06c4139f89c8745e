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

use std::mem::size_of;

use crate::{MemoryResource, NodeHandle};

use super::{INITIAL_BLOCK_BYTES, MAX_BLOCK_BYTES};

enum Slot<T> {
    Occupied(T),
    Vacant(Option<u32>),
}

/// A fixed-size slab with an intrusive free list.
///
/// Freed slots are threaded into a free list and handed back first on the
/// next insertion, so a pool under expunge churn stabilises at the peak
/// number of simultaneously live records. Storage is claimed in chunks
/// growing 1.5x within a [4 KiB, 64 KiB] budget. The fixed size and
/// alignment the pool serves are those of `T` itself, enforced by the type.
///
/// Use this for records that are freed one at a time: managed parent chains
/// live here, released by [`crate::expunge`] as branches die.
#[derive(Debug)]
pub struct HomogeneousPool<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    live: usize,
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Occupied(_) => write!(f, "occupied"),
            Slot::Vacant(next) => write!(f, "vacant -> {:?}", next),
        }
    }
}

impl<T> Default for HomogeneousPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HomogeneousPool<T> {
    /// Creates an empty pool. No memory is claimed before the first
    /// insertion.
    pub fn new() -> Self {
        HomogeneousPool { slots: vec![], free_head: None, live: 0 }
    }

    /// Moves `value` into the slab and returns its handle. The most recently
    /// freed slot is reused first.
    pub fn insert(&mut self, value: T) -> NodeHandle {
        self.live += 1;
        match self.free_head {
            Some(slot) => {
                self.free_head = match self.slots[slot as usize] {
                    Slot::Vacant(next) => next,
                    Slot::Occupied(_) => unreachable!("free list points at a live slot"),
                };
                self.slots[slot as usize] = Slot::Occupied(value);
                NodeHandle(slot)
            }
            None => {
                if self.slots.len() == self.slots.capacity() {
                    self.reserve_chunk();
                }
                self.slots.push(Slot::Occupied(value));
                NodeHandle(self.slots.len() as u32 - 1)
            }
        }
    }

    /// Frees the slot at `handle` and returns the value it held. The slot
    /// becomes the head of the free list.
    pub fn remove(&mut self, handle: NodeHandle) -> T {
        let slot = std::mem::replace(
            &mut self.slots[handle.0 as usize],
            Slot::Vacant(self.free_head),
        );
        match slot {
            Slot::Occupied(value) => {
                self.free_head = Some(handle.0);
                self.live -= 1;
                value
            }
            Slot::Vacant(_) => unreachable!("double free of a pool slot"),
        }
    }

    /// Dereferences a handle to a live slot.
    #[inline]
    pub fn get(&self, handle: NodeHandle) -> &T {
        match &self.slots[handle.0 as usize] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unreachable!("dangling pool handle"),
        }
    }

    /// Mutable access to a live slot.
    #[inline]
    pub fn get_mut(&mut self, handle: NodeHandle) -> &mut T {
        match &mut self.slots[handle.0 as usize] {
            Slot::Occupied(value) => value,
            Slot::Vacant(_) => unreachable!("dangling pool handle"),
        }
    }

    /// Number of live allocations.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Returns true iff no allocation is live.
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots claimed from the system allocator. Stable across
    /// `reset`, which is how the reuse guarantee can be observed.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    fn reserve_chunk(&mut self) {
        let elem = size_of::<T>().max(1);
        let bytes = if self.slots.capacity() == 0 {
            INITIAL_BLOCK_BYTES
        } else {
            (self.slots.capacity() * elem * 3 / 2).clamp(INITIAL_BLOCK_BYTES, MAX_BLOCK_BYTES)
        };
        let target = (bytes / elem).max(self.slots.len() + 1);
        self.slots.reserve(target - self.slots.len());
    }
}

impl<T> MemoryResource for HomogeneousPool<T> {
    fn reset(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }

    fn release(&mut self) {
        self.slots = vec![];
        self.free_head = None;
        self.live = 0;
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
