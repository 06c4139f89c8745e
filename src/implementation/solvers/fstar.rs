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
    rbacktrack, to_1d, to_nd, Coord, ExistenceSet, Link, Maze, NodeHandle, Params, Scalar, Solve,
};

#[derive(Clone, Copy, PartialEq)]
struct Node {
    index: usize,
    parent: Option<NodeHandle>,
    g: Scalar,
    f: Scalar,
}

/// The fringe search algorithm.
///
/// A double-buffered threshold sweep: the current fringe is swept linearly,
/// children within the threshold move to the `next` buffer, and the
/// smallest `f` seen beyond the threshold becomes the next threshold. When
/// a sweep admits nothing new, the *same* fringe is swept again at the
/// relaxed threshold. Avoids the per-operation cost of a priority queue at
/// the price of re-scans.
///
/// Since the maze abstraction gives no monotone neighbour ordering, an
/// over-threshold neighbour never cuts its siblings short: the sweep keeps
/// looking and only records the threshold candidate. A node that rejected
/// any of its children stays on the fringe, so the rejected branch is
/// revisited once the threshold has caught up with it.
pub struct FStar;

impl<const K: usize, M: Maze<K>> Solve<K, M> for FStar {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let end = params.end;
        let h = params.h;
        let weight = params.weight;
        let lazy = params.lazy_sorting;
        let monotonic = &mut *params.monotonic;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&end, &size);
        let capacity = maze.capacity_hint(&params.start, &end, params.capacity);

        let mut closed = ExistenceSet::with_capacity(capacity);
        let mut open: Vec<Node> = Vec::with_capacity(capacity / 8);
        let mut next: Vec<Node> = Vec::with_capacity(capacity / 8);

        let mut threshold = h(&params.start, &end) * weight;
        open.push(Node { index: s, parent: None, g: 0.0, f: threshold });
        closed.emplace(s);

        while !open.is_empty() {
            let mut next_threshold = Scalar::INFINITY;

            for at in 0..open.len() {
                let curr = open[at];
                if curr.index == e {
                    drop(open);
                    drop(next);
                    drop(closed);
                    return rbacktrack(monotonic, curr.index, curr.parent, &size);
                }

                let mut materialised = None;
                let mut rejected = false;
                maze.for_each_neighbour(curr.index, false, &mut |to, cost| {
                    let g = curr.g + cost;
                    let f = g + h(&to_nd(to, &size), &end) * weight;

                    if f <= threshold {
                        if !closed.contains(to) {
                            closed.allocate(to, capacity, maze.count());
                            closed.emplace(to);

                            let parent = *materialised.get_or_insert_with(|| {
                                monotonic.alloc(Link { index: curr.index, parent: curr.parent })
                            });
                            let child = Node { index: to, parent: Some(parent), g, f };
                            if lazy {
                                next.push(child);
                            } else {
                                let slot = next.partition_point(|other| {
                                    other.f < f || (other.f == f && other.g < g)
                                });
                                next.insert(slot, child);
                            }
                        }
                    } else {
                        next_threshold = next_threshold.min(f);
                        rejected = true;
                    }
                });

                if rejected {
                    // the rejected children stay reachable only through this
                    // node: keep it on the fringe for the relaxed threshold
                    if lazy {
                        next.push(curr);
                    } else {
                        let slot = next.partition_point(|other| {
                            other.f < curr.f || (other.f == curr.f && other.g < curr.g)
                        });
                        next.insert(slot, curr);
                    }
                }
            }

            if !next.is_empty() {
                std::mem::swap(&mut open, &mut next);
                next.clear();
            } else if next_threshold == Scalar::INFINITY {
                // nothing admitted and nothing beyond the threshold either:
                // the reachable space is exhausted
                break;
            }
            threshold = next_threshold;
        }

        Vec::new()
    }
}
