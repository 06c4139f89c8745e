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

use crate::{Coord, Maze, Params};

/// This trait abstracts a search algorithm. Each of the bundled solvers is a
/// unit struct implementing `Solve` for the maze shapes it supports; the
/// [`crate::Solver`] facade takes care of endpoint validation and resource
/// cleanup around the call to [`invoke`](Self::invoke).
///
/// # Note
/// `invoke` is only ever called with endpoints that are in bounds, active
/// and distinct; the facade answers the degenerate queries itself.
pub trait Solve<const K: usize, M: Maze<K>> {
    /// Runs the search described by `params` and returns the sequence of
    /// positions leading from `params.start` to `params.end`, both
    /// inclusive. An empty vector means no path exists.
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>>;
}
