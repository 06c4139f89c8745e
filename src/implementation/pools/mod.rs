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

//! This module provides the three memory pools the solvers allocate their
//! node records from. Three shapes exist because the algorithms have three
//! distinct allocation regimes:
//!
//! * [`MonotonicPool`] - records that live for the whole query and are all
//!   reclaimed together (unmanaged parent chains);
//! * [`HomogeneousPool`] - records that are freed one by one as dead
//!   branches of the search tree are expunged (managed parent chains);
//! * [`HeterogeneousPool`] - variable-length runs that are allocated and
//!   freed with the frames of the iterative-deepening solvers.
//!
//! All three retain their storage across [`reset`](crate::MemoryResource)
//! so that a pool which has served one query serves the next without going
//! back to the system allocator.

mod heterogeneous;
mod homogeneous;
mod monotonic;

pub use heterogeneous::*;
pub use homogeneous::*;
pub use monotonic::*;

/// Pools open their first block at this size, in bytes.
pub(crate) const INITIAL_BLOCK_BYTES: usize = 4 * 1024;
/// Block growth (1.5x per block) is capped at this size, in bytes.
pub(crate) const MAX_BLOCK_BYTES: usize = 64 * 1024;
