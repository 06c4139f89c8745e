//! Maze producers for the integration suites: a recursive-backtracker
//! labyrinth carver, a random obstacle field and a random connected
//! weighted graph. All of them are driven by the deterministic
//! [`Lcg`](super::lcg::Lcg).

use amble::{Cell, Edge, Graph, Grid, Scalar};

use super::lcg::Lcg;

/// Carves a perfect labyrinth into a fully blocked grid with the classic
/// recursive backtracker: corridors are dug two cells at a time over the
/// odd lattice, so both extents should be odd for a fully used area. Every
/// even-coordinate cell ends up reachable from every other.
pub fn backtracking_maze(width: usize, height: usize, seed: u64) -> Grid<2> {
    let mut grid = Grid::with_nodes([width, height], vec![true; width * height]).unwrap();
    let mut lcg = Lcg::new(seed);

    let mut trail = vec![[0_usize, 0]];
    grid.set(&[0, 0], false);

    while let Some(&cell) = trail.last() {
        // the unvisited lattice neighbours, two cells away
        let mut candidates = [[0_usize; 2]; 4];
        let mut found = 0;
        let deltas: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];
        for (dx, dy) in deltas {
            let x = cell[0] as isize + dx;
            let y = cell[1] as isize + dy;
            if x >= 0 && (x as usize) < width && y >= 0 && (y as usize) < height {
                let next = [x as usize, y as usize];
                if !grid.get(&next).is_active() {
                    candidates[found] = next;
                    found += 1;
                }
            }
        }

        if found == 0 {
            trail.pop();
            continue;
        }

        let next = candidates[lcg.below(found)];
        let wall = [(cell[0] + next[0]) / 2, (cell[1] + next[1]) / 2];
        grid.set(&wall, false);
        grid.set(&next, false);
        trail.push(next);
    }

    grid
}

/// Scatters blocked cells over an open grid at roughly `percent` density,
/// keeping `keep` (typically the query endpoints) open.
pub fn obstacle_field(width: usize, height: usize, percent: usize, keep: &[[usize; 2]], seed: u64) -> Grid<2> {
    let mut grid = Grid::new([width, height]);
    let mut lcg = Lcg::new(seed);

    for y in 0..height {
        for x in 0..width {
            if lcg.chance(percent, 100) && !keep.contains(&[x, y]) {
                grid.set(&[x, y], true);
            }
        }
    }

    grid
}

/// Builds a connected undirected weighted graph over `nodes` nodes: a
/// random spanning tree plus `extra` shortcut edges, with integral weights
/// in `1..=max_weight`.
pub fn spanning_graph(nodes: usize, extra: usize, max_weight: usize, seed: u64) -> Graph {
    let mut graph = Graph::new();
    let mut lcg = Lcg::new(seed);

    graph.add_node(0);
    for node in 1..nodes {
        let anchor = lcg.below(node);
        let cost = (1 + lcg.below(max_weight)) as Scalar;
        graph.add_edge(node, Edge { to: anchor, cost });
        graph.add_edge(anchor, Edge { to: node, cost });
    }
    for _ in 0..extra {
        let a = lcg.below(nodes);
        let b = lcg.below(nodes);
        if a != b {
            let cost = (1 + lcg.below(max_weight)) as Scalar;
            graph.add_edge(a, Edge { to: b, cost });
            graph.add_edge(b, Edge { to: a, cost });
        }
    }

    graph
}
