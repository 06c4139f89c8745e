//! Cross-query pool behaviour: storage reuse after reset, and the managed
//! pool's live accounting across graveyard searches.

mod common;

use amble::*;
use common::generators::backtracking_maze;
use common::solve_grid;

#[test]
fn a_warmed_up_pool_set_serves_the_next_query_without_new_blocks() {
    let grid = backtracking_maze(15, 15, 21);

    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        &grid,
        [0, 0],
        [14, 14],
        [15, 15],
        manhattan_distance,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );

    let first = Solver::<AStar>::solve(&mut params);
    assert!(!first.is_empty());
    let second = Solver::<IdaStar>::solve(&mut params);
    assert!(!second.is_empty());
    let third = Solver::<GStar>::solve(&mut params);
    assert!(!third.is_empty());

    // the facade reset the pools after each query: everything is reclaimed,
    // the storage is not
    let blocks = params.monotonic.block_count();
    let slab = params.homogeneous.capacity();
    let runs = params.heterogeneous.capacity();
    assert!(params.monotonic.is_empty());
    assert!(params.homogeneous.is_empty());

    // replaying the same queries must not claim any new storage
    let _ = Solver::<AStar>::solve(&mut params);
    let _ = Solver::<IdaStar>::solve(&mut params);
    let _ = Solver::<GStar>::solve(&mut params);
    assert_eq!(blocks, params.monotonic.block_count());
    assert_eq!(slab, params.homogeneous.capacity());
    assert_eq!(runs, params.heterogeneous.capacity());
}

#[test]
fn the_graveyard_keeps_the_live_count_at_the_useful_tree() {
    // a maze with plenty of dead ends: the graveyard must reclaim them all
    let grid = backtracking_maze(15, 15, 2);

    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        &grid,
        [0, 0],
        [14, 14],
        [15, 15],
        manhattan_distance,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );
    params.no_cleanup = true;

    let path = Solver::<GStar>::solve(&mut params);
    assert!(!path.is_empty());

    // every live record is on the path's chain or adopted by a node that
    // was still on the frontier when the goal came up
    assert!(homogeneous.live() < grid.count() / 2);
    assert!(homogeneous.live() >= path.len() - 1);

    // an explicit reset reclaims the stragglers without freeing storage
    let capacity = homogeneous.capacity();
    homogeneous.reset();
    assert_eq!(0, homogeneous.live());
    assert_eq!(capacity, homogeneous.capacity());
}

#[test]
fn release_returns_every_pool_to_square_one() {
    let grid: Grid<2> = Grid::new([6, 6]);

    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        &grid,
        [0, 0],
        [5, 5],
        [6, 6],
        manhattan_distance,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );

    let _ = Solver::<AStar>::solve(&mut params);
    let _ = Solver::<Eiddfs>::solve(&mut params);

    monotonic.release();
    heterogeneous.release();
    homogeneous.release();
    assert_eq!(0, monotonic.block_count());
    assert_eq!(0, heterogeneous.capacity());
    assert_eq!(0, homogeneous.capacity());
}

#[test]
fn pools_are_indifferent_to_which_solver_warmed_them() {
    let grid = backtracking_maze(9, 9, 5);

    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        &grid,
        [0, 0],
        [8, 8],
        [9, 9],
        manhattan_distance,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );

    let reference = solve_grid::<Bfs>(&grid, [0, 0], [8, 8], manhattan_distance);
    for _ in 0..3 {
        assert_eq!(reference.len(), Solver::<AStar>::solve(&mut params).len());
        assert_eq!(reference.len(), Solver::<GStar>::solve(&mut params).len());
        assert_eq!(reference.len(), Solver::<Gbfs>::solve(&mut params).len());
        assert_eq!(reference.len(), Solver::<IdaStar>::solve(&mut params).len());
        assert_eq!(reference.len(), Solver::<FStar>::solve(&mut params).len());
    }
}
