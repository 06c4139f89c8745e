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

use fxhash::{FxHashMap, FxHashSet};
use parking_lot::Mutex;

use crate::{Cell, Coord, Edge, Grid, Maze, Scalar};

/// A sparse weighted search space: an adjacency map from node index to the
/// list of outgoing edges. Undirected graphs store both endpoints of every
/// connection.
///
/// A graph can be built empty, from an adjacency list, or from a [`Grid`] -
/// either one node per active cell, or contracted so that every corridor of
/// the grid becomes a single weighted edge between its junction endpoints.
#[derive(Debug, Default)]
pub struct Graph {
    entries: FxHashMap<usize, Vec<Edge>>,
    pruned: bool,
}

impl Graph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph from an adjacency list: entry `i` of `lists` holds
    /// the outgoing edges of node `i`.
    pub fn from_adjacency(lists: &[Vec<(usize, Scalar)>]) -> Self {
        let mut graph = Graph::new();
        for (index, edges) in lists.iter().enumerate() {
            graph.add_node(index);
            for &(to, cost) in edges {
                graph.add_edge(index, Edge { to, cost });
            }
        }
        graph
    }

    /// Creates a graph from a grid. With `prune` unset, every active cell
    /// becomes a node connected to its active axis neighbours at cost 1.
    ///
    /// With `prune` set, only junction cells (cells that are not
    /// [transitory](Grid::is_transitory)) become nodes, and every corridor
    /// between two junctions is contracted to a single edge carrying the
    /// walked distance. Adjacent junctions degenerate to a direct edge of
    /// weight 1. The contraction runs on up to 6 worker threads over
    /// disjoint index ranges, appending to the shared adjacency map under a
    /// mutex.
    pub fn from_grid<const K: usize, W: Cell + Sync>(grid: &Grid<K, W>, prune: bool) -> Self {
        if !prune {
            let mut graph = Graph::new();
            for index in 0..grid.count() {
                if grid.active(index) {
                    graph.add_node(index);
                    grid.for_each_neighbour(index, false, &mut |to, cost| {
                        graph.add_edge(index, Edge { to, cost });
                    });
                }
            }
            return graph;
        }

        let shared = Mutex::new(FxHashMap::<usize, Vec<Edge>>::default());
        let count = grid.count();
        let workers = num_cpus::get().clamp(1, 6);
        let chunk = (count + workers - 1) / workers;
        log::debug!("contracting a {count} cell grid on {workers} workers");

        std::thread::scope(|scope| {
            for worker in 0..workers {
                let shared = &shared;
                let range = (worker * chunk)..((worker + 1) * chunk).min(count);
                scope.spawn(move || {
                    let mut walked = FxHashSet::default();
                    let mut connections: Vec<Edge> = vec![];

                    for index in range {
                        if !grid.active(index) || grid.is_transitory(index) {
                            continue;
                        }

                        connections.clear();
                        grid.for_each_neighbour(index, false, &mut |first, _| {
                            if !grid.is_transitory(first) {
                                // adjacent junction: an empty corridor
                                connections.push(Edge { to: first, cost: 1.0 });
                            } else if let Some(edge) = walk_corridor(grid, index, first, &mut walked) {
                                connections.push(edge);
                            }
                        });

                        if !connections.is_empty() {
                            let mut entries = shared.lock();
                            entries.entry(index).or_default().extend_from_slice(&connections);
                        }
                    }
                });
            }
        });

        Graph { entries: shared.into_inner(), pruned: false }
    }

    /// Registers a node without any outgoing edge (no-op when present).
    pub fn add_node(&mut self, index: usize) {
        self.entries.entry(index).or_default();
    }

    /// Appends an outgoing edge to `from`, registering it on demand.
    pub fn add_edge(&mut self, from: usize, edge: Edge) {
        self.entries.entry(from).or_default().push(edge);
    }

    /// Removes the first outgoing edge of `from` equal to `edge`; the node
    /// itself is dropped when its last edge goes.
    pub fn remove_edge(&mut self, from: usize, edge: Edge) {
        if let Some(edges) = self.entries.get_mut(&from) {
            if let Some(at) = edges.iter().position(|other| *other == edge) {
                edges.remove(at);
                if edges.is_empty() {
                    self.entries.remove(&from);
                }
            }
        }
    }

    /// Borrows the outgoing edges of a node.
    pub fn edges(&self, index: usize) -> &[Edge] {
        self.entries.get(&index).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterates over `(index, edges)` for every node of the graph, in
    /// arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[Edge])> {
        self.entries.iter().map(|(&index, edges)| (index, edges.as_slice()))
    }

    /// Contracts every degree-2 node by merging its two incident edges into
    /// one direct edge between its neighbours, repeating until a pass
    /// removes nothing. Intended for graphs built without contraction.
    ///
    /// Directed graphs are not supported: the pass assumes each incident
    /// edge has a symmetric reverse edge of equal cost.
    ///
    /// # Warning
    /// Single-shot: pruning an already pruned graph is a logic error and is
    /// flagged by a debug assertion.
    pub fn prune(&mut self) {
        debug_assert!(!self.pruned, "prune() must only be invoked once per graph");

        loop {
            let candidates: Vec<usize> = self
                .entries
                .iter()
                .filter(|(_, edges)| edges.len() == 2)
                .map(|(&index, _)| index)
                .collect();

            let mut removed = 0;
            for node in candidates {
                if self.entries.len() <= 2 {
                    break;
                }
                let Some(edges) = self.entries.get(&node) else { continue };
                if edges.len() != 2 {
                    continue;
                }
                let (a, to_a) = (edges[0].to, edges[0].cost);
                let (b, to_b) = (edges[1].to, edges[1].cost);
                if a == node || b == node {
                    continue;
                }

                let merged = to_a + to_b;
                self.rewire(a, node, to_a, Edge { to: b, cost: merged });
                self.rewire(b, node, to_b, Edge { to: a, cost: merged });
                self.entries.remove(&node);
                removed += 1;
            }

            if removed == 0 {
                break;
            }
        }

        self.pruned = true;
    }

    /// Replaces `at`'s reverse edge towards `node` (of the given cost) with
    /// the contracted edge.
    fn rewire(&mut self, at: usize, node: usize, cost: Scalar, replacement: Edge) {
        if let Some(edges) = self.entries.get_mut(&at) {
            if let Some(found) = edges.iter_mut().find(|e| e.to == node && e.cost == cost) {
                *found = replacement;
            }
        }
    }
}

/// Walks a corridor starting at the transitory cell `first`, away from the
/// junction `from`, and returns the contracted edge to the junction at the
/// far end. Corridor cells have exactly two active neighbours, so the walk
/// is deterministic; a corridor looping back on itself yields nothing.
fn walk_corridor<const K: usize, W: Cell>(
    grid: &Grid<K, W>,
    from: usize,
    first: usize,
    walked: &mut FxHashSet<usize>,
) -> Option<Edge> {
    walked.clear();
    walked.insert(from);

    let mut current = first;
    let mut distance = 1.0;
    loop {
        walked.insert(current);

        let mut next = None;
        grid.for_each_neighbour(current, false, &mut |candidate, _| {
            if next.is_none() && !walked.contains(&candidate) {
                next = Some(candidate);
            }
        });

        match next {
            Some(cell) if grid.is_transitory(cell) => {
                current = cell;
                distance += 1.0;
            }
            Some(cell) => return Some(Edge { to: cell, cost: distance + 1.0 }),
            // looped back, or a corridor pinched shut
            None => return None,
        }
    }
}

impl<const K: usize> Maze<K> for Graph {
    fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    fn is_active(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    fn count(&self) -> usize {
        self.entries.len()
    }

    fn capacity_hint(&self, _start: &Coord<K>, _end: &Coord<K>, requested: usize) -> usize {
        if requested != 0 {
            requested
        } else {
            (self.entries.len() / 10).max(1)
        }
    }

    fn for_each_neighbour(&self, index: usize, _diagonals: bool, f: &mut dyn FnMut(usize, Scalar)) {
        if let Some(edges) = self.entries.get(&index) {
            for edge in edges {
                f(edge.to, edge.cost);
            }
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
