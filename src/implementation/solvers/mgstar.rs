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

use ordered_float::OrderedFloat;

use crate::{
    adopt, forget_one, rbacktrack_forward, rbacktrack_with_depth, to_1d, to_nd, Coord,
    ExistenceSet, HomogeneousPool, LinkStore, ManagedLink, Maze, NodeHandle, Params, Scalar,
    Solve, Stack,
};

/// MG* nodes order by `(f, g)` ascending: the first element of the open set
/// is the most promising node, the last is the worst (and the first to be
/// sacrificed under memory pressure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Node {
    f: OrderedFloat<Scalar>,
    g: OrderedFloat<Scalar>,
    index: usize,
    parent: Option<NodeHandle>,
}

/// Memory-bounded graveyard search.
///
/// G* under a hard budget: `open + closed emplacements + live pool records`
/// may never exceed [`Params::memory_limit`]. When an insertion would bust
/// the budget, the solver *desaturates* in two tiers:
///
/// 1. **lossless** - records that were [`forget_one`]-orphaned but not yet
///    freed sit on an expunct stack; deallocating one restores budget
///    without losing any search progress;
/// 2. **lossy** - failing that, the worst open node is dropped and its
///    ancestry is walked to erase the closed-set membership of the indices
///    it had claimed ("bitwise regression"), so other routes may reclaim
///    them.
///
/// When a solution is found and budget remains, the search reseeds from the
/// start and keeps improving on the best solution until the open set runs
/// dry. Given sufficient memory the result is optimal.
///
/// Honours [`Params::reverse_equivalence`] the same way [`crate::Gbfs`]
/// does.
pub struct MgStar;

/// Walks a parent chain and erases the closed-set membership of every
/// ancestor on it, stopping at the chain's root or the first index that
/// is not marked.
fn bitwise_regression(
    parent: Option<NodeHandle>,
    closed: &mut ExistenceSet,
    pool: &HomogeneousPool<ManagedLink>,
) {
    let mut current = parent;
    while let Some(handle) = current {
        let (index, next) = pool.entry(handle);
        if next.is_some() && closed.contains(index) {
            closed.erase(index);
            current = next;
        } else {
            break;
        }
    }
}

/// One desaturation step. Returns true when nothing could be reclaimed,
/// i.e. the search is genuinely out of memory.
fn desaturate(
    open: &mut BTreeSet<Node>,
    closed: &mut ExistenceSet,
    expunct: &mut Stack<NodeHandle>,
    pool: &mut HomogeneousPool<ManagedLink>,
    dynamic_allocations: &mut usize,
) -> bool {
    if let Some(handle) = expunct.pop() {
        // lossless: a record already orphaned, just not yet freed
        pool.remove(handle);
        *dynamic_allocations -= 1;
        false
    } else if let Some(worst) = open.pop_last() {
        // lossy: sacrifice the worst frontier node and regress its ancestry
        log::trace!("desaturating: dropping node {}", worst.index);
        bitwise_regression(worst.parent, closed, pool);
        closed.erase(worst.index);
        false
    } else {
        true
    }
}

impl<const K: usize, M: Maze<K>> Solve<K, M> for MgStar {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let h = params.h;
        let weight = params.weight;
        let memory_limit = params.memory_limit;
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
        let mut open: BTreeSet<Node> = BTreeSet::new();
        let mut expunct: Stack<NodeHandle> = Stack::new();

        let seed = |h0: Scalar| Node {
            f: OrderedFloat(h0),
            g: OrderedFloat(0.0),
            index: s,
            parent: None,
        };
        let h0 = h(&from, &goal) * weight;

        open.insert(seed(h0));
        closed.emplace(s);

        let mut closed_allocations = 1_usize;
        let mut dynamic_allocations = 0_usize;
        let mut best_solution: Option<Node> = None;

        while let Some(curr) = open.pop_first() {
            if curr.index != e {
                let mut materialised = None;

                let improves = best_solution.map_or(true, |best| curr.g < best.g);
                if improves {
                    let mut pending: Vec<(usize, Scalar)> = vec![];
                    maze.for_each_neighbour(curr.index, false, &mut |to, cost| {
                        pending.push((to, cost));
                    });

                    for (to, cost) in pending {
                        if closed.contains(to) {
                            continue;
                        }

                        let mut full =
                            open.len() + closed_allocations + dynamic_allocations >= memory_limit;
                        if full {
                            full = desaturate(
                                &mut open,
                                &mut closed,
                                &mut expunct,
                                homogeneous,
                                &mut dynamic_allocations,
                            );
                        }

                        if !full {
                            closed.allocate(to, capacity, maze.count());
                            closed.emplace(to);
                            closed_allocations += 1;

                            let parent = *materialised.get_or_insert_with(|| {
                                dynamic_allocations += 1;
                                homogeneous.insert(ManagedLink {
                                    index: curr.index,
                                    parent: curr.parent,
                                    successors: 0,
                                })
                            });
                            adopt(homogeneous, parent);

                            let g = curr.g.0 + cost;
                            let f = g + h(&to_nd(to, &size), &goal) * weight;
                            open.insert(Node {
                                f: OrderedFloat(f),
                                g: OrderedFloat(g),
                                index: to,
                                parent: Some(parent),
                            });
                        } else {
                            // out of memory: stop this expansion and give the
                            // ancestry back to the search
                            bitwise_regression(curr.parent, &mut closed, homogeneous);
                            break;
                        }
                    }
                }

                if materialised.is_none() {
                    if let Some(orphan) = forget_one(homogeneous, curr.parent) {
                        expunct.push(orphan);
                    }
                }
            } else if best_solution.map_or(true, |best| curr.g < best.g) {
                best_solution = Some(curr);

                // optimising continuation: reseed from the start while the
                // budget allows, so a better route may still be found
                let mut full = open.len() + closed_allocations + dynamic_allocations >= memory_limit;
                if full {
                    full = !open.is_empty();
                    if full {
                        open.clear();
                    }
                }
                if !full {
                    open.insert(seed(h0));
                }
            }
        }

        drop(open);
        drop(closed);

        match best_solution {
            Some(best) => {
                let depth = chain_length(homogeneous, best.parent) + 1;
                if reversed {
                    rbacktrack_forward(homogeneous, best.index, best.parent, &size)
                } else {
                    rbacktrack_with_depth(homogeneous, best.index, best.parent, &size, depth)
                }
            }
            None => Vec::new(),
        }
    }
}

fn chain_length(pool: &HomogeneousPool<ManagedLink>, parent: Option<NodeHandle>) -> usize {
    let mut length = 0;
    let mut current = parent;
    while let Some(handle) = current {
        length += 1;
        current = pool.entry(handle).1;
    }
    length
}
