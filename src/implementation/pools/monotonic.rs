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

/// A bump arena: allocation appends to the current block, individual
/// deallocation does not exist, and the whole arena is reclaimed at once.
///
/// Blocks grow by 1.5x per block within a [4 KiB, 64 KiB] budget (expressed
/// in elements of `T`). [`reset`](MemoryResource::reset) rewinds the arena
/// to its first block while *keeping* every block, so subsequent queries
/// bump through the same memory in the same order, and
/// [`release`](MemoryResource::release) frees the blocks themselves.
///
/// Use this for node records whose peak count is bounded by the search
/// itself: unmanaged parent chains live here.
#[derive(Debug)]
pub struct MonotonicPool<T> {
    blocks: Vec<Vec<T>>,
    starts: Vec<u32>,
    active: usize,
    len: usize,
}

impl<T> Default for MonotonicPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MonotonicPool<T> {
    /// Creates an empty pool. No memory is claimed before the first
    /// allocation.
    pub fn new() -> Self {
        MonotonicPool { blocks: vec![], starts: vec![], active: 0, len: 0 }
    }

    /// Moves `value` into the arena and returns its handle. Handles are
    /// dense and stable for the lifetime of the query.
    pub fn alloc(&mut self, value: T) -> NodeHandle {
        if self.active >= self.blocks.len()
            || self.blocks[self.active].len() == self.blocks[self.active].capacity()
        {
            self.advance();
        }

        let block = &mut self.blocks[self.active];
        let handle = NodeHandle(self.starts[self.active] + block.len() as u32);
        block.push(value);
        self.len += 1;
        handle
    }

    /// Dereferences a handle produced by [`alloc`](Self::alloc).
    #[inline]
    pub fn get(&self, handle: NodeHandle) -> &T {
        let block = self.starts.partition_point(|&start| start <= handle.0) - 1;
        &self.blocks[block][(handle.0 - self.starts[block]) as usize]
    }

    /// Number of live allocations since the last reset.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true iff nothing was allocated since the last reset.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of blocks claimed from the system allocator. Stable across
    /// `reset`, which is how the reuse guarantee can be observed.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn advance(&mut self) {
        if self.active < self.blocks.len() {
            self.active += 1;
        }
        if self.active >= self.blocks.len() {
            self.open_block();
        }
    }

    fn open_block(&mut self) {
        let elem = size_of::<T>().max(1);
        let bytes = match self.blocks.last() {
            None => INITIAL_BLOCK_BYTES,
            Some(block) => {
                (block.capacity() * elem * 3 / 2).clamp(INITIAL_BLOCK_BYTES, MAX_BLOCK_BYTES)
            }
        };
        let capacity = (bytes / elem).max(1);

        let start = match (self.starts.last(), self.blocks.last()) {
            (Some(start), Some(block)) => start + block.capacity() as u32,
            _ => 0,
        };
        self.starts.push(start);
        self.blocks.push(Vec::with_capacity(capacity));
        // starts are derived from the true (possibly over-allocated)
        // capacities, so handles stay dense across blocks
        if let Some(block) = self.blocks.last() {
            debug_assert!(block.capacity() >= capacity);
        }
    }
}

impl<T> MemoryResource for MonotonicPool<T> {
    fn reset(&mut self) {
        for block in self.blocks.iter_mut() {
            block.clear();
        }
        self.active = 0;
        self.len = 0;
    }

    fn release(&mut self) {
        self.blocks = vec![];
        self.starts = vec![];
        self.active = 0;
        self.len = 0;
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
