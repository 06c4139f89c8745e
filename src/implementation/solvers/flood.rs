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

use crate::{to_1d, Coord, ExistenceSet, Maze, Params, Queue, Solve};

/// Feasibility flood over the full neighbourhood (diagonals included).
///
/// Answers "is the goal reachable at all?" without tracking any parent: the
/// result is `[end]` when a connection exists and empty otherwise. Use
/// [`crate::FloodFill`] for the axis-only variant.
pub struct Flood;

impl<const K: usize, M: Maze<K>> Solve<K, M> for Flood {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        flood_internal(params, true)
    }
}

pub(super) fn flood_internal<const K: usize, M: Maze<K>>(
    params: &mut Params<K, M>,
    diagonals: bool,
) -> Vec<Coord<K>> {
    let maze = params.maze;
    let size = params.size;

    let s = to_1d(&params.start, &size);
    let e = to_1d(&params.end, &size);
    let capacity = maze.capacity_hint(&params.start, &params.end, params.capacity);

    let mut closed = ExistenceSet::with_capacity(capacity);
    let mut open = Queue::with_capacity(capacity / 8);

    open.push(s);
    closed.emplace(s);

    while let Some(curr) = open.pop() {
        if curr == e {
            return vec![params.end];
        }

        maze.for_each_neighbour(curr, diagonals, &mut |to, _| {
            if !closed.contains(to) {
                closed.allocate(to, capacity, maze.count());
                closed.emplace(to);
                open.push(to);
            }
        });
    }

    Vec::new()
}
