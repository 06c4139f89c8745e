//! Shared support for the integration suites: deterministic maze
//! generators, the GPPC map/scenario loader and a tiny console renderer
//! used in failure diagnostics.

#![allow(dead_code)]

pub mod display;
pub mod generators;
pub mod gppc;
pub mod lcg;

use amble::*;

/// Runs `solver` on `grid` through a fresh set of pools.
pub fn solve_grid<A>(
    grid: &Grid<2>,
    start: Coord<2>,
    end: Coord<2>,
    h: Heuristic<2>,
) -> Vec<Coord<2>>
where
    A: Solve<2, Grid<2>>,
{
    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        grid,
        start,
        end,
        *grid.size(),
        h,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );
    Solver::<A>::solve(&mut params)
}

/// Runs `solver` on `graph` (1-dimensional indexing) through a fresh set of
/// pools.
pub fn solve_graph<A>(graph: &Graph, size: usize, start: usize, end: usize) -> Vec<Coord<1>>
where
    A: Solve<1, Graph>,
{
    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        graph,
        [start],
        [end],
        [size],
        manhattan_distance,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );
    Solver::<A>::solve(&mut params)
}

/// Asserts the universal path invariants: endpoints match the query, and
/// every step moves to an active axis neighbour.
pub fn assert_valid_grid_path(grid: &Grid<2>, path: &[Coord<2>], start: Coord<2>, end: Coord<2>) {
    assert!(!path.is_empty(), "expected a path from {start:?} to {end:?}");
    assert_eq!(start, path[0], "paths start at the query start");
    assert_eq!(end, path[path.len() - 1], "paths end at the query end");

    for window in path.windows(2) {
        let (a, b) = (window[0], window[1]);
        let dx = a[0].abs_diff(b[0]);
        let dy = a[1].abs_diff(b[1]);
        assert_eq!(
            1,
            dx + dy,
            "{a:?} -> {b:?} is not an axis move\n{}",
            display::render(grid, path)
        );
        assert!(grid.get(&b).is_active(), "{b:?} is blocked");
    }
}

/// Asserts the jump point variant of the invariants: consecutive jump
/// points lie on a common row, column or diagonal, with every cell of the
/// connecting segment active.
pub fn assert_valid_jump_path(grid: &Grid<2>, path: &[Coord<2>], start: Coord<2>, end: Coord<2>) {
    assert!(!path.is_empty(), "expected a path from {start:?} to {end:?}");
    assert_eq!(start, path[0]);
    assert_eq!(end, path[path.len() - 1]);

    for window in path.windows(2) {
        let (a, b) = (window[0], window[1]);
        let dx = b[0] as isize - a[0] as isize;
        let dy = b[1] as isize - a[1] as isize;
        assert!(
            dx == 0 || dy == 0 || dx.abs() == dy.abs(),
            "{a:?} -> {b:?} is neither straight nor diagonal"
        );

        let steps = dx.abs().max(dy.abs());
        for step in 1..=steps {
            let cell = [
                (a[0] as isize + dx.signum() * step) as usize,
                (a[1] as isize + dy.signum() * step) as usize,
            ];
            assert!(grid.get(&cell).is_active(), "{cell:?} on segment {a:?} -> {b:?} is blocked");
        }
    }
}

/// The exact cost of a path over a weighted graph, pricing parallel edges
/// at their cheapest; panics when two consecutive nodes are not connected.
pub fn graph_path_cost(graph: &Graph, path: &[Coord<1>]) -> f64 {
    path.windows(2)
        .map(|window| {
            graph
                .edges(window[0][0])
                .iter()
                .filter(|edge| edge.to == window[1][0])
                .map(|edge| edge.cost)
                .fold(f64::INFINITY, f64::min)
        })
        .inspect(|cost| assert!(cost.is_finite(), "the path leaves the graph"))
        .sum()
}
