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

use std::cmp::Ordering;

use compare::Compare;

use crate::{
    rbacktrack, to_1d, to_nd, Coord, ExistenceSet, Heap, Link, Maze, NodeHandle, Params, Scalar,
    Solve,
};

#[derive(Clone, Copy, PartialEq)]
struct Node {
    index: usize,
    parent: Option<NodeHandle>,
    g: Scalar,
    f: Scalar,
}

/// Lower `f` first; on ties, the deeper node (higher `g`) is preferred, as
/// it is the one closer to a finished solution.
struct AStarOrder;

impl Compare<Node> for AStarOrder {
    fn compare(&self, a: &Node, b: &Node) -> Ordering {
        match b.f.total_cmp(&a.f) {
            Ordering::Equal => a.g.total_cmp(&b.g),
            ordering => ordering,
        }
    }
}

/// The A* search algorithm.
///
/// The classic best-first search over `f = g + weight * h`. With an
/// admissible heuristic (and unit weight) the returned path is optimal.
/// Sibling insertions go through the heap's lazy path: children are
/// appended unsorted and the heap is repaired once per expansion.
pub struct AStar;

impl<const K: usize, M: Maze<K>> Solve<K, M> for AStar {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let end = params.end;
        let h = params.h;
        let weight = params.weight;
        let monotonic = &mut *params.monotonic;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&end, &size);
        let capacity = maze.capacity_hint(&params.start, &end, params.capacity);

        let mut closed = ExistenceSet::with_capacity(capacity);
        let mut open: Heap<Node, AStarOrder> = Heap::with_capacity(AStarOrder, capacity / 8);

        open.push(Node { index: s, parent: None, g: 0.0, f: h(&params.start, &end) * weight });
        closed.emplace(s);

        while let Some(curr) = open.pop() {
            if curr.index == e {
                open.wipe();
                drop(closed);
                return rbacktrack(monotonic, curr.index, curr.parent, &size);
            }

            let mut materialised = None;
            maze.for_each_neighbour(curr.index, false, &mut |to, cost| {
                if !closed.contains(to) {
                    closed.allocate(to, capacity, maze.count());
                    closed.emplace(to);

                    let parent = *materialised.get_or_insert_with(|| {
                        monotonic.alloc(Link { index: curr.index, parent: curr.parent })
                    });

                    let g = curr.g + cost;
                    let f = g + h(&to_nd(to, &size), &end) * weight;
                    open.push_unsorted(Node { index: to, parent: Some(parent), g, f });
                }
            });
            open.reheapify();
        }

        Vec::new()
    }
}
