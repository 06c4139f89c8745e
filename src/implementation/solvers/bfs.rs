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

use crate::{
    rbacktrack, to_1d, Coord, ExistenceSet, Link, Maze, NodeHandle, Params, Queue, Solve,
};

#[derive(Clone, Copy)]
struct Node {
    index: usize,
    parent: Option<NodeHandle>,
}

/// Breadth-first search.
///
/// Expands the frontier one layer at a time, which makes the first path
/// reaching the goal a shortest one on unit-cost mazes. Node records are
/// unmanaged: they pile up in the monotonic pool and are reclaimed together
/// when the query ends.
pub struct Bfs;

impl<const K: usize, M: Maze<K>> Solve<K, M> for Bfs {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let monotonic = &mut *params.monotonic;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&params.end, &size);
        let capacity = maze.capacity_hint(&params.start, &params.end, params.capacity);

        let mut closed = ExistenceSet::with_capacity(capacity);
        let mut open = Queue::with_capacity(capacity / 8);

        open.push(Node { index: s, parent: None });
        closed.emplace(s);

        while let Some(curr) = open.pop() {
            if curr.index == e {
                drop(open);
                drop(closed);
                return rbacktrack(monotonic, curr.index, curr.parent, &size);
            }

            let mut materialised = None;
            maze.for_each_neighbour(curr.index, false, &mut |to, _| {
                if !closed.contains(to) {
                    closed.allocate(to, capacity, maze.count());
                    closed.emplace(to);

                    let parent = *materialised.get_or_insert_with(|| {
                        monotonic.alloc(Link { index: curr.index, parent: curr.parent })
                    });
                    open.push(Node { index: to, parent: Some(parent) });
                }
            });
        }

        Vec::new()
    }
}
