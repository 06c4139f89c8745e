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

//! This module provides the solver facade and the named algorithms. Every
//! algorithm is a unit struct implementing [`Solve`]; the facade wraps the
//! call with the endpoint validation, the degenerate-query shortcuts and
//! the pool cleanup all solvers share.

mod astar;
mod bfs;
mod bstar;
mod dfs;
mod dijkstra;
mod eidastar;
mod eidbest_first;
mod eiddfs;
mod flood;
mod floodfill;
mod fstar;
mod gbest_first;
mod gbfs;
mod gdfs;
mod gstar;
mod idastar;
mod idbest_first;
mod iddfs;
mod jps;
mod mgstar;
mod smastar;

pub use astar::*;
pub use bfs::*;
pub use bstar::*;
pub use dfs::*;
pub use dijkstra::*;
pub use eidastar::*;
pub use eidbest_first::*;
pub use eiddfs::*;
pub use flood::*;
pub use floodfill::*;
pub use fstar::*;
pub use gbest_first::*;
pub use gbfs::*;
pub use gdfs::*;
pub use gstar::*;
pub use idastar::*;
pub use idbest_first::*;
pub use iddfs::*;
pub use jps::*;
pub use mgstar::*;
pub use smastar::*;

use std::marker::PhantomData;

use crate::{to_1d, Coord, Maze, MemoryResource, Params, Solve};

/// The core entry point of the library: a facade instantiating and invoking
/// a search algorithm over a query description.
///
/// The facade owns the concerns every algorithm shares:
///
/// 1. both endpoints must be in bounds and active, otherwise the query has
///    no solution and yields an empty path;
/// 2. a query whose endpoints coincide yields `[end]` without ever invoking
///    the algorithm;
/// 3. after the algorithm returns (with or without a path), the three
///    memory pools are reset - unless the caller opted out through
///    [`Params::no_cleanup`].
///
/// # Example
/// ```
/// # use amble::*;
/// let grid: Grid<2> = Grid::new([5, 5]);
///
/// let mut monotonic     = MonotonicPool::default();
/// let mut heterogeneous = HeterogeneousPool::default();
/// let mut homogeneous   = HomogeneousPool::default();
///
/// let mut params = Params::new(
///     &grid, [0, 0], [4, 4], [5, 5],
///     manhattan_distance,
///     &mut monotonic, &mut heterogeneous, &mut homogeneous);
///
/// let path = Solver::<GStar>::solve(&mut params);
/// assert_eq!(9, path.len());
/// ```
pub struct Solver<A> {
    _algorithm: PhantomData<A>,
}

impl<A> Solver<A> {
    /// Runs the query described by `params` and returns the path from
    /// `start` to `end`, both inclusive; the empty vector means no path
    /// exists.
    pub fn solve<const K: usize, M: Maze<K>>(params: &mut Params<K, M>) -> Vec<Coord<K>>
    where
        A: Solve<K, M>,
    {
        let s = to_1d(&params.start, &params.size);
        let e = to_1d(&params.end, &params.size);

        let result = if params.maze.contains(s)
            && params.maze.is_active(s)
            && params.maze.contains(e)
            && params.maze.is_active(e)
        {
            if s != e {
                log::debug!("solving {s} -> {e}");
                A::invoke(params)
            } else {
                vec![params.end]
            }
        } else {
            Vec::new()
        };

        if !params.no_cleanup {
            params.monotonic.reset();
            params.heterogeneous.reset();
            params.homogeneous.reset();
        }

        result
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_facade {
    use crate::*;

    macro_rules! query {
        ($grid:expr, $start:expr, $end:expr, $body:expr) => {{
            let grid = $grid;
            let mut monotonic = MonotonicPool::default();
            let mut heterogeneous = HeterogeneousPool::default();
            let mut homogeneous = HomogeneousPool::default();
            let mut params = Params::new(
                &grid,
                $start,
                $end,
                *grid.size(),
                manhattan_distance,
                &mut monotonic,
                &mut heterogeneous,
                &mut homogeneous,
            );
            let f: fn(&mut Params<2, Grid<2>>) -> Vec<Coord<2>> = $body;
            f(&mut params)
        }};
    }

    #[test]
    fn coinciding_endpoints_yield_the_end_without_dispatch() {
        let path = query!(Grid::new([3, 3]), [1, 1], [1, 1], Solver::<Bfs>::solve);
        assert_eq!(vec![[1, 1]], path);
    }

    #[test]
    fn a_single_cell_maze_yields_its_cell() {
        let path = query!(Grid::new([1, 1]), [0, 0], [0, 0], Solver::<AStar>::solve);
        assert_eq!(vec![[0, 0]], path);
    }

    #[test]
    fn an_inactive_endpoint_yields_no_path() {
        let mut grid: Grid<2> = Grid::new([3, 3]);
        grid.set(&[2, 2], true);
        let path = query!(grid, [0, 0], [2, 2], Solver::<AStar>::solve);
        assert!(path.is_empty());
    }

    #[test]
    fn the_pools_are_reset_after_a_query() {
        let grid: Grid<2> = Grid::new([4, 4]);
        let mut monotonic = MonotonicPool::default();
        let mut heterogeneous = HeterogeneousPool::default();
        let mut homogeneous = HomogeneousPool::default();
        let mut params = Params::new(
            &grid,
            [0, 0],
            [3, 3],
            [4, 4],
            manhattan_distance,
            &mut monotonic,
            &mut heterogeneous,
            &mut homogeneous,
        );
        let path = Solver::<AStar>::solve(&mut params);
        assert!(!path.is_empty());
        assert!(monotonic.is_empty());
        assert!(homogeneous.is_empty());
    }

    #[test]
    fn no_cleanup_leaves_the_pools_alone() {
        let grid: Grid<2> = Grid::new([4, 4]);
        let mut monotonic = MonotonicPool::default();
        let mut heterogeneous = HeterogeneousPool::default();
        let mut homogeneous = HomogeneousPool::default();
        let mut params = Params::new(
            &grid,
            [0, 0],
            [3, 3],
            [4, 4],
            manhattan_distance,
            &mut monotonic,
            &mut heterogeneous,
            &mut homogeneous,
        );
        params.no_cleanup = true;
        let path = Solver::<AStar>::solve(&mut params);
        assert!(!path.is_empty());
        assert!(!monotonic.is_empty());
    }
}
