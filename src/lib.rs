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

//! # AMBLE
//! Amble is a fast and memory-frugal pathfinding framework for
//! K-dimensional grids and sparse weighted graphs. It bundles two dozen
//! named search algorithms - uninformed (BFS, DFS, Dijkstra), heuristic
//! (A*, fringe, jump point search, best-first), iterative-deepening
//! (IDDFS, IDA* and their transposition-table variants), graveyard
//! (G*, GBFS, GDFS, G-best-first) and memory-bounded (SMA*, MG*) - behind
//! one uniform query surface: hand the [`Solver`] facade a [`Params`]
//! describing your maze, your endpoints and your heuristic, and get back
//! the sequence of coordinates leading from start to goal.
//!
//! ## Memory model
//! What sets the library apart is its node lifetime management. Search
//! records never go through the system allocator one by one: every query
//! draws from three caller-owned pools matching the three allocation
//! regimes of the algorithms:
//!
//! * the [`MonotonicPool`] bump arena for records living until the query
//!   ends,
//! * the [`HomogeneousPool`] slab for the *managed* records of the
//!   graveyard solvers, which prune dead branches of the search tree as
//!   they go,
//! * the [`HeterogeneousPool`] run allocator for the variable-length
//!   neighbour snapshots of the iterative-deepening solvers.
//!
//! The pools retain their storage across queries, so a warmed-up pool set
//! serves query after query without ever touching the system allocator
//! again.
//!
//! ## Quick example
//! The following solves a tiny labyrinth with A*. Swapping the algorithm
//! is a matter of changing the type parameter of the facade: every solver
//! consumes the exact same parameters.
//!
//! ```
//! use amble::*;
//!
//! // a 5 x 5 grid with a wall across the middle row
//! let mut grid: Grid<2> = Grid::new([5, 5]);
//! for x in 0..4 {
//!     grid.set(&[x, 2], true);
//! }
//!
//! // the three pools are owned by the caller and reusable across queries
//! let mut monotonic     = MonotonicPool::default();
//! let mut heterogeneous = HeterogeneousPool::default();
//! let mut homogeneous   = HomogeneousPool::default();
//!
//! let mut params = Params::new(
//!     &grid, [0, 0], [0, 4], [5, 5],
//!     manhattan_distance,
//!     &mut monotonic, &mut heterogeneous, &mut homogeneous);
//!
//! let path = Solver::<AStar>::solve(&mut params);
//!
//! // the path threads through the gap at the right end of the wall
//! assert_eq!(Some(&[0, 0]), path.first());
//! assert_eq!(Some(&[0, 4]), path.last());
//! assert_eq!(13, path.len());
//! ```
//!
//! ## Picking a solver
//! As a rule of thumb:
//!
//! * [`AStar`] is the safe default on any maze with a decent heuristic;
//! * [`GStar`] trades a small constant factor for a much smaller resident
//!   search tree - prefer it on large or unbounded search spaces;
//! * [`Jps`] dominates everything else on open 2-D grids;
//! * [`SmaStar`] and [`MgStar`] are the tools of last resort when the
//!   search must run under a hard memory budget;
//! * [`Flood`] and [`FloodFill`] answer reachability and nothing else,
//!   as fast as it gets.

mod abstraction;
mod common;
mod implementation;

pub use abstraction::*;
pub use common::*;
pub use implementation::*;
