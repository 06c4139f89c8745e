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
use fxhash::FxHashMap;

use crate::{to_1d, to_nd, Coord, Heap, Maze, Params, Scalar, Solve};

#[derive(Clone, Copy, PartialEq)]
struct Node {
    index: usize,
    g: Scalar,
    parent: Option<usize>,
}

/// Lower accumulated cost first.
struct DijkstraOrder;

impl Compare<Node> for DijkstraOrder {
    fn compare(&self, a: &Node, b: &Node) -> Ordering {
        b.g.total_cmp(&a.g)
    }
}

#[derive(Clone, Copy)]
struct Entry {
    g: Scalar,
    parent: Option<usize>,
}

/// The predecessor map produced by a [`Dijkstra`] sweep: every node settled
/// by the search knows its cost and predecessor towards the sweep's root
/// (the query's `end`), so a path from *any* settled position can be read
/// off on demand.
pub struct DijkstraResult<const K: usize> {
    size: Coord<K>,
    entries: FxHashMap<usize, Entry>,
}

impl<const K: usize> DijkstraResult<K> {
    /// The path from `coord` to the sweep's root, or empty when `coord` was
    /// never reached.
    pub fn get(&self, coord: &Coord<K>) -> Vec<Coord<K>> {
        let mut result = vec![];
        if let Some(entry) = self.entries.get(&to_1d(coord, &self.size)) {
            result.push(*coord);
            let mut parent = entry.parent;
            while let Some(index) = parent {
                result.push(to_nd(index, &self.size));
                parent = self.entries.get(&index).and_then(|e| e.parent);
            }
        }
        result
    }

    /// The accumulated cost from `coord` to the sweep's root, if reached.
    pub fn cost(&self, coord: &Coord<K>) -> Option<Scalar> {
        self.entries.get(&to_1d(coord, &self.size)).map(|e| e.g)
    }

    /// Number of settled nodes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true iff the sweep settled nothing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Dijkstra's algorithm, run as a reverse single-source sweep.
///
/// The sweep is rooted at the query's `end` and relaxes the whole connected
/// component, accepting improvements of already reached nodes (cost and
/// predecessor are updated in place). Through [`Dijkstra::flow`] the full
/// predecessor map is available, answering path queries from any settled
/// position at no extra search cost.
///
/// # Note
/// The single-target [`Solve`] result is the first solution the predecessor
/// map yields for `start`; with non-negative edge costs it coincides with
/// the optimum.
pub struct Dijkstra;

impl Dijkstra {
    /// Runs the sweep and returns the full predecessor map.
    pub fn flow<const K: usize, M: Maze<K>>(params: &Params<K, M>) -> DijkstraResult<K> {
        let maze = params.maze;
        let size = params.size;
        let e = to_1d(&params.end, &size);
        let capacity = maze.capacity_hint(&params.start, &params.end, params.capacity);

        let mut entries = FxHashMap::default();
        entries.reserve(capacity);
        let mut open: Heap<Node, DijkstraOrder> = Heap::with_capacity(DijkstraOrder, capacity / 8);

        open.push(Node { index: e, g: 0.0, parent: None });

        while let Some(curr) = open.pop() {
            let settled = *entries
                .entry(curr.index)
                .or_insert(Entry { g: curr.g, parent: curr.parent });

            maze.for_each_neighbour(curr.index, false, &mut |to, cost| {
                let g = settled.g + cost;
                match entries.get_mut(&to) {
                    Some(reached) => {
                        // negative relaxation of an already settled node
                        if g < reached.g {
                            reached.g = g;
                            reached.parent = Some(curr.index);
                            open.push(Node { index: to, g, parent: Some(curr.index) });
                        }
                    }
                    None => {
                        open.push(Node { index: to, g, parent: Some(curr.index) });
                    }
                }
            });
        }

        DijkstraResult { size, entries }
    }
}

impl<const K: usize, M: Maze<K>> Solve<K, M> for Dijkstra {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        Self::flow(params).get(&params.start)
    }
}
