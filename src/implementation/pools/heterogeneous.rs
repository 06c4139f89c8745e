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

use std::collections::{BTreeMap, BTreeSet};

use crate::MemoryResource;

/// A contiguous run of elements inside a [`HeterogeneousPool`], identified
/// by its offset and length. Runs are plain indices: they stay valid when
/// the pool's backing storage relocates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Run {
    /// Offset of the first element of the run.
    pub start: u32,
    /// Number of elements in the run.
    pub len: u32,
}

impl Run {
    /// The zero-length run. Allocating an empty slice yields it and freeing
    /// it is a no-op.
    pub const EMPTY: Run = Run { start: 0, len: 0 };
}

/// A variable-size run allocator with a coalescing free list.
///
/// Freed runs are kept in a map keyed by size (allocation picks the
/// smallest fitting run) and merged with their physically adjacent
/// neighbours on insertion, so alternating workloads of short and long runs
/// do not fragment the arena. Fresh space is claimed by appending at the
/// end of the backing store.
///
/// Use this for allocations whose size varies call by call: the
/// iterative-deepening solvers park each DFS frame's neighbour snapshot
/// here and give it back when the frame pops.
#[derive(Debug)]
pub struct HeterogeneousPool<T> {
    data: Vec<T>,
    /// start -> len, for adjacency coalescing
    free_by_start: BTreeMap<u32, u32>,
    /// len -> starts, for best-fit lookup
    free_by_size: BTreeMap<u32, BTreeSet<u32>>,
}

impl<T> Default for HeterogeneousPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> HeterogeneousPool<T> {
    /// Creates an empty pool. No memory is claimed before the first
    /// allocation.
    pub fn new() -> Self {
        HeterogeneousPool {
            data: vec![],
            free_by_start: BTreeMap::new(),
            free_by_size: BTreeMap::new(),
        }
    }

    /// Copies `items` into the arena and returns the run holding them. The
    /// smallest free run that fits is consumed (splitting off its tail when
    /// it is larger); fresh space is appended when none fits.
    pub fn alloc_run(&mut self, items: &[T]) -> Run
    where
        T: Clone,
    {
        let len = items.len() as u32;
        if len == 0 {
            return Run::EMPTY;
        }

        if let Some((&size, _)) = self.free_by_size.range(len..).next() {
            let start = self.take_free(size);
            if size > len {
                self.insert_free(start + len, size - len);
            }
            self.data[start as usize..(start + len) as usize].clone_from_slice(items);
            Run { start, len }
        } else {
            let start = self.data.len() as u32;
            self.data.extend_from_slice(items);
            Run { start, len }
        }
    }

    /// Returns a run to the free list, merging it with any physically
    /// adjacent free neighbour.
    pub fn free_run(&mut self, run: Run) {
        if run.len == 0 {
            return;
        }

        let mut start = run.start;
        let mut len = run.len;

        if let Some((&prev_start, &prev_len)) = self.free_by_start.range(..start).next_back() {
            if prev_start + prev_len == start {
                self.remove_free(prev_start, prev_len);
                start = prev_start;
                len += prev_len;
            }
        }
        if let Some(&next_len) = self.free_by_start.get(&(start + len)) {
            let next_start = start + len;
            self.remove_free(next_start, next_len);
            len += next_len;
        }

        self.insert_free(start, len);
    }

    /// Borrows the elements of a live run.
    #[inline]
    pub fn get(&self, run: Run) -> &[T] {
        &self.data[run.start as usize..(run.start + run.len) as usize]
    }

    /// Number of elements in the backing store (live or free).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true iff the backing store is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of runs currently sitting on the free list. Adjacent frees
    /// coalesce, which is how fragmentation can be observed.
    pub fn free_runs(&self) -> usize {
        self.free_by_start.len()
    }

    /// Capacity of the backing store. Stable across `reset`, which is how
    /// the reuse guarantee can be observed.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    fn insert_free(&mut self, start: u32, len: u32) {
        self.free_by_start.insert(start, len);
        self.free_by_size.entry(len).or_default().insert(start);
    }

    fn remove_free(&mut self, start: u32, len: u32) {
        self.free_by_start.remove(&start);
        if let Some(starts) = self.free_by_size.get_mut(&len) {
            starts.remove(&start);
            if starts.is_empty() {
                self.free_by_size.remove(&len);
            }
        }
    }

    fn take_free(&mut self, size: u32) -> u32 {
        let start = match self.free_by_size.get(&size).and_then(|starts| starts.iter().next()) {
            Some(&start) => start,
            None => unreachable!("free list lookup of an absent size"),
        };
        self.remove_free(start, size);
        start
    }
}

impl<T> MemoryResource for HeterogeneousPool<T> {
    fn reset(&mut self) {
        self.data.clear();
        self.free_by_start.clear();
        self.free_by_size.clear();
    }

    fn release(&mut self) {
        self.data = vec![];
        self.free_by_start = BTreeMap::new();
        self.free_by_size = BTreeMap::new();
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
