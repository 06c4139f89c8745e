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

use std::collections::BTreeSet;

use fxhash::FxHashMap;
use ordered_float::OrderedFloat;

use crate::{to_1d, to_nd, Coord, Maze, Params, Scalar, Solve};

/// SMA* nodes order by `(f, g, index)` ascending, so the first element of
/// an ordered set is the most promising node and the last is the worst.
/// Parents are plain indices: nodes stay relocatable and erasable from the
/// node map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Node {
    f: OrderedFloat<Scalar>,
    g: OrderedFloat<Scalar>,
    index: usize,
    parent: Option<usize>,
}

const INF: Scalar = Scalar::INFINITY;

/// Simplified memory-bounded A*.
///
/// A* that never keeps more than [`Params::memory_limit`] nodes alive
/// (node map and open set combined). When the budget is hit, the worst open
/// node is forgotten; before it goes, its `f` is *backed up* through its
/// ancestors so the information it carried is not lost entirely. A node
/// whose expansion produces nothing new has its `f` pinned to infinity and
/// backed up likewise.
///
/// SMA* returns an optimal path when the memory suffices to hold it; under
/// pressure it still returns a valid path whenever one fits in the budget.
pub struct SmaStar;

/// Recomputes the `f` of the removed node's ancestors from their live
/// children, propagating upward until a value stops changing.
fn backup_f_values<const K: usize, M: Maze<K>>(
    removed: &Node,
    all_nodes: &mut FxHashMap<usize, Node>,
    maze: &M,
) {
    let mut parent = removed.parent;
    while let Some(index) = parent {
        let Some(&entry) = all_nodes.get(&index) else { break };

        let mut min_f = OrderedFloat(INF);
        maze.for_each_neighbour(entry.index, false, &mut |to, _| {
            if let Some(child) = all_nodes.get(&to) {
                min_f = min_f.min(child.f);
            }
        });

        if min_f > entry.f {
            if let Some(slot) = all_nodes.get_mut(&index) {
                slot.f = min_f;
            }
            parent = entry.parent;
        } else {
            break;
        }
    }
}

/// Forgets the worst open node: backs its `f` up through its ancestors,
/// then erases it from both the open set and the node map.
fn remove_worst<const K: usize, M: Maze<K>>(
    open: &mut BTreeSet<Node>,
    all_nodes: &mut FxHashMap<usize, Node>,
    maze: &M,
) {
    if let Some(worst) = open.pop_last() {
        backup_f_values(&worst, all_nodes, maze);
        all_nodes.remove(&worst.index);
    }
}

impl<const K: usize, M: Maze<K>> Solve<K, M> for SmaStar {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let end = params.end;
        let h = params.h;
        let weight = params.weight;
        let memory_limit = params.memory_limit;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&end, &size);

        let mut all_nodes: FxHashMap<usize, Node> = FxHashMap::default();
        let mut open: BTreeSet<Node> = BTreeSet::new();

        let seed = Node {
            f: OrderedFloat(h(&params.start, &end) * weight),
            g: OrderedFloat(0.0),
            index: s,
            parent: None,
        };
        all_nodes.insert(s, seed);
        open.insert(seed);

        while let Some(curr) = open.pop_first() {
            if curr.index == e {
                return reconstruct(&curr, &all_nodes, &size);
            }

            let mut complete = true;
            if curr.f.0 != INF {
                let mut pending: Vec<(usize, Scalar)> = vec![];
                maze.for_each_neighbour(curr.index, false, &mut |to, cost| {
                    pending.push((to, cost));
                });

                for (to, cost) in pending {
                    match all_nodes.get(&to).copied() {
                        Some(reached) => {
                            if reached.f.0 != INF {
                                let g = curr.g.0 + cost;
                                if g < reached.g.0 {
                                    // a strictly better route: rescore in place
                                    let f = g + h(&to_nd(to, &size), &end) * weight;
                                    let updated = Node {
                                        f: OrderedFloat(f),
                                        g: OrderedFloat(g),
                                        index: to,
                                        parent: Some(curr.index),
                                    };
                                    open.remove(&reached);
                                    open.insert(updated);
                                    all_nodes.insert(to, updated);
                                    complete = false;
                                }
                            }
                        }
                        None => {
                            complete = false;
                            if !open.is_empty()
                                && all_nodes.len() + open.len() >= memory_limit.saturating_sub(1)
                            {
                                remove_worst(&mut open, &mut all_nodes, maze);
                            }
                            // creating a child costs one map entry and one
                            // open entry: both must fit under the limit
                            if all_nodes.len() + open.len() <= memory_limit.saturating_sub(2) {
                                let g = curr.g.0 + cost;
                                let f = g + h(&to_nd(to, &size), &end) * weight;
                                let child = Node {
                                    f: OrderedFloat(f),
                                    g: OrderedFloat(g),
                                    index: to,
                                    parent: Some(curr.index),
                                };
                                all_nodes.insert(to, child);
                                open.insert(child);
                            } else {
                                break;
                            }
                        }
                    }
                }
            }

            if complete {
                // dead end: pin the node at infinity and let its ancestors know
                let mut dead = curr;
                dead.f = OrderedFloat(INF);
                backup_f_values(&dead, &mut all_nodes, maze);
                all_nodes.insert(dead.index, dead);
            }
        }

        Vec::new()
    }
}

/// Walks the node map from the goal back to the root. The depth is whatever
/// the predecessor links say it is - `g` is only a depth on unit-cost
/// mazes, so it is never trusted here.
fn reconstruct<const K: usize>(
    curr: &Node,
    all_nodes: &FxHashMap<usize, Node>,
    size: &Coord<K>,
) -> Vec<Coord<K>> {
    let mut result = vec![to_nd(curr.index, size)];
    let mut parent = curr.parent;
    while let Some(index) = parent {
        result.push(to_nd(index, size));
        match all_nodes.get(&index) {
            Some(node) => parent = node.parent,
            None => {
                debug_assert!(false, "a path ancestor was forgotten under memory pressure");
                break;
            }
        }
    }
    result.reverse();
    result
}
