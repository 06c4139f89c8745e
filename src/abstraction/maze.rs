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

use crate::{Coord, Scalar};

/// This trait abstracts away the concrete representation of a search space.
/// The solvers treat any maze as a set of linearly indexed nodes whose
/// active neighbours can be enumerated on demand.
///
/// Two implementations are bundled: the dense K-dimensional [`crate::Grid`]
/// and the sparse weighted [`crate::Graph`].
pub trait Maze<const K: usize> {
    /// Returns true iff `index` denotes a node of this maze.
    fn contains(&self, index: usize) -> bool;

    /// Returns true iff the node at `index` exists and may be traversed.
    fn is_active(&self, index: usize) -> bool;

    /// Yields the total number of nodes in the maze.
    fn count(&self) -> usize;

    /// Estimates the container capacity a query between `start` and `end`
    /// should preallocate. When the caller provided an explicit `requested`
    /// capacity it takes precedence over (or is folded into) the estimate.
    ///
    /// # Warning
    /// For sufficiently large mazes the produced value may exceed the memory
    /// actually available; preallocation from this hint is best effort.
    fn capacity_hint(&self, start: &Coord<K>, end: &Coord<K>, requested: usize) -> usize;

    /// Invokes `f` once for every *active* neighbour of the node at `index`,
    /// passing the neighbour's linear index and the cost of the connecting
    /// move. When `diagonals` is set, grid mazes enumerate the full
    /// `3^K - 1` neighbourhood instead of the `2K` axis moves; graph mazes
    /// ignore the flag.
    ///
    /// # Note
    /// Enumeration order is the maze's natural iteration order and is
    /// deterministic; solvers rely on that for reproducibility, not for
    /// correctness.
    fn for_each_neighbour(&self, index: usize, diagonals: bool, f: &mut dyn FnMut(usize, Scalar));
}
