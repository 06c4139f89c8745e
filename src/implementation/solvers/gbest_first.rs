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
    adopt, expunge, rbacktrack, to_1d, to_nd, Coord, ExistenceSet, Heap, ManagedLink, Maze,
    NodeHandle, Params, Scalar, Solve,
};

#[derive(Clone, Copy, PartialEq)]
struct Node {
    index: usize,
    parent: Option<NodeHandle>,
    h: Scalar,
}

/// Lower heuristic estimate first.
struct GBestFirstOrder;

impl Compare<Node> for GBestFirstOrder {
    fn compare(&self, a: &Node, b: &Node) -> Ordering {
        b.h.total_cmp(&a.h)
    }
}

/// Graveyard greedy best-first search.
///
/// [`crate::BStar`] with managed parent chains: dead branches are expunged
/// as soon as an expansion produces no child. No optimality guarantee.
pub struct GBestFirst;

impl<const K: usize, M: Maze<K>> Solve<K, M> for GBestFirst {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let end = params.end;
        let h = params.h;
        let weight = params.weight;
        let lazy = params.lazy_sorting;
        let homogeneous = &mut *params.homogeneous;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&end, &size);
        let capacity = maze.capacity_hint(&params.start, &end, params.capacity);

        let mut closed = ExistenceSet::with_capacity(capacity);
        let mut open: Heap<Node, GBestFirstOrder> = Heap::with_capacity(GBestFirstOrder, capacity / 8);

        open.push(Node { index: s, parent: None, h: h(&params.start, &end) * weight });
        closed.emplace(s);

        while let Some(curr) = open.pop() {
            if curr.index == e {
                open.wipe();
                drop(closed);
                return rbacktrack(homogeneous, curr.index, curr.parent, &size);
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

                    let estimate = h(&to_nd(to, &size), &end) * weight;
                    let child = Node { index: to, parent: Some(parent), h: estimate };
                    if lazy {
                        open.push_unsorted(child);
                    } else {
                        open.push(child);
                    }
                }
            });

            if materialised.is_none() {
                expunge(homogeneous, curr.parent);
            } else if lazy {
                open.reheapify();
            }
        }

        Vec::new()
    }
}
