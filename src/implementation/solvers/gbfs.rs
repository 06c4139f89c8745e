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
    adopt, expunge, rbacktrack, rbacktrack_forward, to_1d, Coord, ExistenceSet, ManagedLink,
    Maze, NodeHandle, Params, Queue, Solve,
};

#[derive(Clone, Copy)]
struct Node {
    index: usize,
    parent: Option<NodeHandle>,
}

/// Graveyard breadth-first search.
///
/// [`crate::Bfs`] with managed parent chains: dead branches are expunged as
/// soon as an expansion produces no child, so the pool holds the useful
/// tree rather than the whole visited set.
///
/// This solver honours [`Params::reverse_equivalence`]: when set, the
/// search runs from `end` to `start` (valid on undirected search spaces)
/// and reconstruction fills forward - either way the returned path runs
/// start to end.
pub struct Gbfs;

impl<const K: usize, M: Maze<K>> Solve<K, M> for Gbfs {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let reversed = params.reverse_equivalence;
        let homogeneous = &mut *params.homogeneous;

        let (from, goal) = if reversed {
            (params.end, params.start)
        } else {
            (params.start, params.end)
        };
        let s = to_1d(&from, &size);
        let e = to_1d(&goal, &size);
        let capacity = maze.capacity_hint(&from, &goal, params.capacity);

        let mut closed = ExistenceSet::with_capacity(capacity);
        let mut open = Queue::with_capacity(capacity / 8);

        open.push(Node { index: s, parent: None });
        closed.emplace(s);

        while let Some(curr) = open.pop() {
            if curr.index == e {
                drop(open);
                drop(closed);
                return if reversed {
                    rbacktrack_forward(homogeneous, curr.index, curr.parent, &size)
                } else {
                    rbacktrack(homogeneous, curr.index, curr.parent, &size)
                };
            }

            let mut materialised = None;
            maze.for_each_neighbour(curr.index, false, &mut |to, _| {
                if !closed.contains(to) {
                    closed.allocate(to, capacity, maze.count());
                    closed.emplace(to);

                    let parent = *materialised.get_or_insert_with(|| {
                        homogeneous.insert(ManagedLink {
                            index: curr.index,
                            parent: curr.parent,
                            successors: 0,
                        })
                    });
                    adopt(homogeneous, parent);
                    open.push(Node { index: to, parent: Some(parent) });
                }
            });

            if materialised.is_none() {
                expunge(homogeneous, curr.parent);
            }
        }

        Vec::new()
    }
}
