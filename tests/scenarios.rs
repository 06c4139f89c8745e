//! End-to-end scenarios: every solver is exercised over the same small
//! mazes, optimality-claiming solvers are held to the exact optimum, the
//! rest to the universal path invariants.

mod common;

use amble::*;
use common::generators::{backtracking_maze, obstacle_field, spanning_graph};
use common::*;

fn zero_h<const K: usize>(_: &Coord<K>, _: &Coord<K>) -> Scalar {
    0.0
}

fn u_wall() -> Grid<2> {
    // . . .
    // # # .
    // s . e     with s = (0, 0) and e = (2, 2)
    let mut grid = Grid::new([3, 3]);
    grid.set(&[0, 1], true);
    grid.set(&[1, 1], true);
    grid
}

// ----------------------------------------------------------------------------
// --- SCENARIO: 5 x 5 OPEN FIELD ---------------------------------------------
// ----------------------------------------------------------------------------

macro_rules! open_field_is_solved_optimally_by {
    ($($name:ident: $solver:ty,)*) => {
        $(#[test]
        fn $name() {
            let grid: Grid<2> = Grid::new([5, 5]);
            let path = solve_grid::<$solver>(&grid, [0, 0], [4, 4], manhattan_distance);
            assert_valid_grid_path(&grid, &path, [0, 0], [4, 4]);
            assert_eq!(9, path.len());
        })*
    };
}

open_field_is_solved_optimally_by! {
    open_field_astar: AStar,
    open_field_gstar: GStar,
    open_field_fstar: FStar,
    open_field_bfs: Bfs,
    open_field_gbfs: Gbfs,
    open_field_dijkstra: Dijkstra,
    open_field_idastar: IdaStar,
    open_field_iddfs: Iddfs,
    open_field_eiddfs: Eiddfs,
    open_field_smastar: SmaStar,
    open_field_mgstar: MgStar,
}

macro_rules! open_field_is_solved_validly_by {
    ($($name:ident: $solver:ty,)*) => {
        $(#[test]
        fn $name() {
            let grid: Grid<2> = Grid::new([5, 5]);
            let path = solve_grid::<$solver>(&grid, [0, 0], [4, 4], manhattan_distance);
            assert_valid_grid_path(&grid, &path, [0, 0], [4, 4]);
        })*
    };
}

open_field_is_solved_validly_by! {
    open_field_dfs: Dfs,
    open_field_bstar: BStar,
    open_field_gdfs: Gdfs,
    open_field_gbest_first: GBestFirst,
    open_field_eidastar: EidaStar,
    open_field_idbest_first: IdBestFirst,
    open_field_eidbest_first: EidBestFirst,
}

#[test]
fn open_field_jps_returns_the_octile_optimum() {
    let grid: Grid<2> = Grid::new([5, 5]);
    let path = solve_grid::<Jps>(&grid, [0, 0], [4, 4], octile_distance);
    assert_valid_jump_path(&grid, &path, [0, 0], [4, 4]);

    let cost: Scalar = path.windows(2).map(|w| octile_distance(&w[0], &w[1])).sum();
    assert!((cost - 4.0 * std::f64::consts::SQRT_2).abs() < 1e-9);
}

// ----------------------------------------------------------------------------
// --- SCENARIO: 3 x 3 U-WALL -------------------------------------------------
// ----------------------------------------------------------------------------

macro_rules! u_wall_is_solved_optimally_by {
    ($($name:ident: $solver:ty,)*) => {
        $(#[test]
        fn $name() {
            let grid = u_wall();
            let path = solve_grid::<$solver>(&grid, [0, 0], [2, 2], manhattan_distance);
            assert_valid_grid_path(&grid, &path, [0, 0], [2, 2]);
            assert_eq!(5, path.len());
        })*
    };
}

u_wall_is_solved_optimally_by! {
    u_wall_astar: AStar,
    u_wall_gstar: GStar,
    u_wall_fstar: FStar,
    u_wall_bfs: Bfs,
    u_wall_dijkstra: Dijkstra,
    u_wall_idastar: IdaStar,
    u_wall_iddfs: Iddfs,
    u_wall_smastar: SmaStar,
    u_wall_mgstar: MgStar,
}

#[test]
fn u_wall_flood_reports_feasibility_only() {
    let grid = u_wall();
    let path = solve_grid::<Flood>(&grid, [0, 0], [2, 2], manhattan_distance);
    assert_eq!(vec![[2, 2]], path);
}

#[test]
fn u_wall_start_equals_end_shortcuts() {
    let grid = u_wall();
    let path = solve_grid::<AStar>(&grid, [0, 0], [0, 0], manhattan_distance);
    assert_eq!(vec![[0, 0]], path);
}

// ----------------------------------------------------------------------------
// --- SCENARIO: DISJOINT GRAPH COMPONENTS ------------------------------------
// ----------------------------------------------------------------------------

macro_rules! disjoint_components_defeat {
    ($($name:ident: $solver:ty,)*) => {
        $(#[test]
        fn $name() {
            // two components: 0 - 1 and 2 - 3
            let graph = Graph::from_adjacency(&[
                vec![(1, 1.0)],
                vec![(0, 1.0)],
                vec![(3, 1.0)],
                vec![(2, 1.0)],
            ]);
            assert!(solve_graph::<$solver>(&graph, 4, 0, 2).is_empty());
        })*
    };
}

disjoint_components_defeat! {
    disjoint_astar: AStar,
    disjoint_bfs: Bfs,
    disjoint_bstar: BStar,
    disjoint_dfs: Dfs,
    disjoint_dijkstra: Dijkstra,
    disjoint_eidastar: EidaStar,
    disjoint_eidbest_first: EidBestFirst,
    disjoint_eiddfs: Eiddfs,
    disjoint_flood: Flood,
    disjoint_floodfill: FloodFill,
    disjoint_fstar: FStar,
    disjoint_gbest_first: GBestFirst,
    disjoint_gbfs: Gbfs,
    disjoint_gdfs: Gdfs,
    disjoint_gstar: GStar,
    disjoint_idastar: IdaStar,
    disjoint_idbest_first: IdBestFirst,
    disjoint_iddfs: Iddfs,
    disjoint_mgstar: MgStar,
    disjoint_smastar: SmaStar,
}

// ----------------------------------------------------------------------------
// --- WEIGHTED GRAPHS --------------------------------------------------------
// ----------------------------------------------------------------------------

#[test]
fn optimal_solvers_agree_with_dijkstra_on_weighted_trees() {
    // spanning trees: the start-goal route is unique, so every complete
    // solver must return exactly the route dijkstra prices
    for seed in [3, 17, 1999] {
        let graph = spanning_graph(40, 0, 9, seed);

        let mut monotonic = MonotonicPool::default();
        let mut heterogeneous = HeterogeneousPool::default();
        let mut homogeneous = HomogeneousPool::default();
        let mut params = Params::new(
            &graph,
            [0],
            [39],
            [40],
            zero_h,
            &mut monotonic,
            &mut heterogeneous,
            &mut homogeneous,
        );

        let reference = Dijkstra::flow(&params).cost(&[0]).expect("the graph is connected");

        let astar = Solver::<AStar>::solve(&mut params);
        assert!((graph_path_cost(&graph, &astar) - reference).abs() < 1e-9);

        let gstar = Solver::<GStar>::solve(&mut params);
        assert!((graph_path_cost(&graph, &gstar) - reference).abs() < 1e-9);
    }
}

#[test]
fn dijkstra_lower_bounds_every_other_solver_on_cyclic_graphs() {
    for seed in [5, 23] {
        let graph = spanning_graph(25, 15, 9, seed);

        let mut monotonic = MonotonicPool::default();
        let mut heterogeneous = HeterogeneousPool::default();
        let mut homogeneous = HomogeneousPool::default();
        let mut params = Params::new(
            &graph,
            [0],
            [24],
            [25],
            zero_h,
            &mut monotonic,
            &mut heterogeneous,
            &mut homogeneous,
        );

        let flow = Dijkstra::flow(&params);
        let optimum = flow.cost(&[0]).expect("the graph is connected");
        assert!((graph_path_cost(&graph, &flow.get(&[0])) - optimum).abs() < 1e-9);

        let astar = Solver::<AStar>::solve(&mut params);
        assert!(graph_path_cost(&graph, &astar) >= optimum - 1e-9);

        let bfs = Solver::<Bfs>::solve(&mut params);
        assert!(graph_path_cost(&graph, &bfs) >= optimum - 1e-9);
    }
}

#[test]
fn dijkstra_answers_path_queries_from_any_settled_node() {
    let graph = spanning_graph(30, 10, 5, 77);

    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let params = Params::new(
        &graph,
        [0],
        [29],
        [30],
        zero_h,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );

    let flow = Dijkstra::flow(&params);
    for node in 0..30 {
        let path = flow.get(&[node]);
        assert_eq!([node], path[0]);
        assert_eq!([29], path[path.len() - 1]);
        assert!((graph_path_cost(&graph, &path) - flow.cost(&[node]).unwrap()).abs() < 1e-9);
    }
}

// ----------------------------------------------------------------------------
// --- GENERATED LABYRINTHS ---------------------------------------------------
// ----------------------------------------------------------------------------

macro_rules! labyrinths_are_solved_by {
    ($($name:ident: $solver:ty => $optimal:expr,)*) => {
        $(#[test]
        fn $name() {
            for seed in [1, 42, 12345] {
                let grid = backtracking_maze(15, 15, seed);
                let start = [0, 0];
                let end = [14, 14];

                let reference = solve_grid::<Bfs>(&grid, start, end, manhattan_distance);
                assert_valid_grid_path(&grid, &reference, start, end);

                let path = solve_grid::<$solver>(&grid, start, end, manhattan_distance);
                assert_valid_grid_path(&grid, &path, start, end);
                if $optimal {
                    assert_eq!(reference.len(), path.len());
                }
            }
        })*
    };
}

labyrinths_are_solved_by! {
    labyrinth_astar: AStar => true,
    labyrinth_gstar: GStar => true,
    labyrinth_fstar: FStar => true,
    labyrinth_dijkstra: Dijkstra => true,
    labyrinth_gbfs: Gbfs => true,
    labyrinth_idastar: IdaStar => true,
    labyrinth_smastar: SmaStar => true,
    labyrinth_mgstar: MgStar => true,
    labyrinth_dfs: Dfs => false,
    labyrinth_bstar: BStar => false,
    labyrinth_gdfs: Gdfs => false,
    labyrinth_gbest_first: GBestFirst => false,
    labyrinth_eidastar: EidaStar => false,
    labyrinth_eiddfs: Eiddfs => true,
    labyrinth_idbest_first: IdBestFirst => false,
    labyrinth_eidbest_first: EidBestFirst => false,
}

// ----------------------------------------------------------------------------
// --- FEASIBILITY ------------------------------------------------------------
// ----------------------------------------------------------------------------

#[test]
fn floodfill_agrees_with_bfs_on_feasibility() {
    for seed in 0..8 {
        let grid = obstacle_field(12, 12, 35, &[[0, 0], [11, 11]], seed);
        let reachable = !solve_grid::<Bfs>(&grid, [0, 0], [11, 11], manhattan_distance).is_empty();
        let flooded = !solve_grid::<FloodFill>(&grid, [0, 0], [11, 11], manhattan_distance).is_empty();
        assert_eq!(reachable, flooded, "seed {seed}:\n{}", common::display::render(&grid, &[]));
    }
}

#[test]
fn flood_reaches_at_least_whatever_floodfill_reaches() {
    for seed in 0..8 {
        let grid = obstacle_field(12, 12, 35, &[[0, 0], [11, 11]], seed);
        let axis = !solve_grid::<FloodFill>(&grid, [0, 0], [11, 11], manhattan_distance).is_empty();
        let diag = !solve_grid::<Flood>(&grid, [0, 0], [11, 11], manhattan_distance).is_empty();
        assert!(diag || !axis);
    }
}

// ----------------------------------------------------------------------------
// --- JPS --------------------------------------------------------------------
// ----------------------------------------------------------------------------

#[test]
fn jps_routes_around_a_wall_through_its_forced_neighbours() {
    // a vertical wall with a single gap
    let mut grid: Grid<2> = Grid::new([7, 7]);
    for y in 0..6 {
        grid.set(&[3, y], true);
    }

    let path = solve_grid::<Jps>(&grid, [0, 0], [6, 0], octile_distance);
    assert_valid_jump_path(&grid, &path, [0, 0], [6, 0]);

    // the detour must dip to the gap row (y = 6) and back
    assert!(path.iter().any(|cell| cell[1] == 6));
}

#[test]
fn jps_agrees_with_bfs_feasibility_on_labyrinths() {
    for seed in [5, 99] {
        let grid = backtracking_maze(13, 13, seed);
        let reference = solve_grid::<Bfs>(&grid, [0, 0], [12, 12], manhattan_distance);
        let path = solve_grid::<Jps>(&grid, [0, 0], [12, 12], octile_distance);
        assert_eq!(reference.is_empty(), path.is_empty());
        if !path.is_empty() {
            assert_valid_jump_path(&grid, &path, [0, 0], [12, 12]);
        }
    }
}

// ----------------------------------------------------------------------------
// --- MEMORY-BOUNDED SOLVERS -------------------------------------------------
// ----------------------------------------------------------------------------

/// A corridor along the top row with dead-end teeth hanging below every
/// other column. The teeth lead away from the goal, so a guided search
/// only ever *generates* them - exactly the nodes a memory-bounded solver
/// should be sacrificing.
fn comb() -> Grid<2> {
    let mut grid = Grid::with_nodes([10, 5], vec![true; 50]).unwrap();
    for x in 0..10 {
        grid.set(&[x, 0], false);
    }
    for x in (1..10).step_by(2) {
        for y in 1..5 {
            grid.set(&[x, y], false);
        }
    }
    grid
}

#[test]
fn smastar_solves_under_a_tight_but_sufficient_budget() {
    let grid = comb();
    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        &grid,
        [0, 0],
        [9, 0],
        [10, 5],
        manhattan_distance,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );
    // far below the 30 open cells, yet enough for the 10 cell path plus a
    // small frontier: the teeth get forgotten on the way
    params.memory_limit = 24;

    let path = Solver::<SmaStar>::solve(&mut params);
    assert_valid_grid_path(&grid, &path, [0, 0], [9, 0]);
    assert_eq!(10, path.len());
}

#[test]
fn smastar_stays_graceful_when_the_budget_cannot_hold_a_path() {
    // a 19-node path cannot be represented in 6 nodes of memory: the search
    // must come back empty handed rather than crash or spin
    let grid: Grid<2> = Grid::new([10, 10]);
    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        &grid,
        [0, 0],
        [9, 9],
        [10, 10],
        manhattan_distance,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );
    params.memory_limit = 6;

    let path = Solver::<SmaStar>::solve(&mut params);
    assert!(path.is_empty() || path.len() == 19);
}

#[test]
fn mgstar_solves_under_a_budget() {
    let grid = backtracking_maze(11, 11, 8);
    let mut monotonic = MonotonicPool::default();
    let mut heterogeneous = HeterogeneousPool::default();
    let mut homogeneous = HomogeneousPool::default();
    let mut params = Params::new(
        &grid,
        [0, 0],
        [10, 10],
        [11, 11],
        manhattan_distance,
        &mut monotonic,
        &mut heterogeneous,
        &mut homogeneous,
    );
    params.memory_limit = 160;

    let path = Solver::<MgStar>::solve(&mut params);
    assert_valid_grid_path(&grid, &path, [0, 0], [10, 10]);
}

#[test]
fn mgstar_stays_graceful_under_heavy_pressure() {
    for seed in 0..4 {
        let grid = obstacle_field(12, 12, 25, &[[0, 0], [11, 11]], seed);
        let mut monotonic = MonotonicPool::default();
        let mut heterogeneous = HeterogeneousPool::default();
        let mut homogeneous = HomogeneousPool::default();
        let mut params = Params::new(
            &grid,
            [0, 0],
            [11, 11],
            [12, 12],
            manhattan_distance,
            &mut monotonic,
            &mut heterogeneous,
            &mut homogeneous,
        );
        params.memory_limit = 48;

        // under this much pressure the search may come back empty handed,
        // but whatever it returns must be a real path
        let path = Solver::<MgStar>::solve(&mut params);
        if !path.is_empty() {
            assert_valid_grid_path(&grid, &path, [0, 0], [11, 11]);
        }
    }
}

// ----------------------------------------------------------------------------
// --- POLICIES ---------------------------------------------------------------
// ----------------------------------------------------------------------------

#[test]
fn reverse_equivalence_still_runs_start_to_end() {
    let grid = u_wall();
    for reversed in [false, true] {
        let mut monotonic = MonotonicPool::default();
        let mut heterogeneous = HeterogeneousPool::default();
        let mut homogeneous = HomogeneousPool::default();
        let mut params = Params::new(
            &grid,
            [0, 0],
            [2, 2],
            [3, 3],
            manhattan_distance,
            &mut monotonic,
            &mut heterogeneous,
            &mut homogeneous,
        );
        params.reverse_equivalence = reversed;

        let path = Solver::<Gbfs>::solve(&mut params);
        assert_valid_grid_path(&grid, &path, [0, 0], [2, 2]);
        assert_eq!(5, path.len());

        let path = Solver::<MgStar>::solve(&mut params);
        assert_valid_grid_path(&grid, &path, [0, 0], [2, 2]);
        assert_eq!(5, path.len());
    }
}

#[test]
fn lazy_sorting_preserves_the_result() {
    let grid = backtracking_maze(11, 11, 4);
    for lazy in [false, true] {
        let mut monotonic = MonotonicPool::default();
        let mut heterogeneous = HeterogeneousPool::default();
        let mut homogeneous = HomogeneousPool::default();
        let mut params = Params::new(
            &grid,
            [0, 0],
            [10, 10],
            [11, 11],
            manhattan_distance,
            &mut monotonic,
            &mut heterogeneous,
            &mut homogeneous,
        );
        params.lazy_sorting = lazy;

        let reference = solve_grid::<Bfs>(&grid, [0, 0], [10, 10], manhattan_distance);
        let gstar = Solver::<GStar>::solve(&mut params);
        assert_eq!(reference.len(), gstar.len());

        let fstar = Solver::<FStar>::solve(&mut params);
        assert_valid_grid_path(&grid, &fstar, [0, 0], [10, 10]);
    }
}
