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
    g: Scalar,
    f: Scalar,
}

/// Lower `f` first; on ties, the deeper node (higher `g`) is preferred.
struct GStarOrder;

impl Compare<Node> for GStarOrder {
    fn compare(&self, a: &Node, b: &Node) -> Ordering {
        match b.f.total_cmp(&a.f) {
            Ordering::Equal => a.g.total_cmp(&b.g),
            ordering => ordering,
        }
    }
}

/// The graveyard search algorithm.
///
/// G* keeps the search shape of [`crate::AStar`] but stores its parent
/// chains as managed records: whenever an expansion produces no child, the
/// dead branch is expunged from the pool right away. The live record count
/// thus tracks the useful search tree instead of the visited set, which is
/// what makes G* attractive on large or unbounded search spaces.
///
/// Like A*, G* returns an optimal path when the heuristic is admissible.
pub struct GStar;

impl<const K: usize, M: Maze<K>> Solve<K, M> for GStar {
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
        let mut open: Heap<Node, GStarOrder> = Heap::with_capacity(GStarOrder, capacity / 8);

        open.push(Node { index: s, parent: None, g: 0.0, f: h(&params.start, &end) * weight });
        closed.emplace(s);

        while let Some(curr) = open.pop() {
            if curr.index == e {
                open.wipe();
                drop(closed);
                return rbacktrack(homogeneous, curr.index, curr.parent, &size);
            }

            let mut materialised = None;
            maze.for_each_neighbour(curr.index, false, &mut |to, cost| {
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

                    let g = curr.g + cost;
                    let f = g + h(&to_nd(to, &size), &end) * weight;
                    let child = Node { index: to, parent: Some(parent), g, f };
                    if lazy {
                        open.push_unsorted(child);
                    } else {
                        open.push(child);
                    }
                }
            });

            if materialised.is_none() {
                // dead end: collapse the branch as far as the counts permit
                expunge(homogeneous, curr.parent);
            } else if lazy {
                open.reheapify();
            }
        }

        Vec::new()
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_gstar {
    use crate::*;

    #[test]
    fn the_pool_holds_no_stragglers_after_a_query() {
        let mut grid: Grid<2> = Grid::new([8, 8]);
        for y in 1..8 {
            grid.set(&[3, y], true);
        }

        let mut monotonic = MonotonicPool::default();
        let mut heterogeneous = HeterogeneousPool::default();
        let mut homogeneous = HomogeneousPool::default();
        let mut params = Params::new(
            &grid,
            [0, 7],
            [7, 7],
            [8, 8],
            manhattan_distance,
            &mut monotonic,
            &mut heterogeneous,
            &mut homogeneous,
        );
        params.no_cleanup = true;

        let path = Solver::<GStar>::solve(&mut params);
        assert!(!path.is_empty());
        // every record still alive belongs to the frontier or the returned
        // path's chain, never to an expanded-and-dead branch
        assert!(homogeneous.live() <= grid.count());
    }
}
