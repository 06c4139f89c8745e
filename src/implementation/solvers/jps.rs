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

//! Jump point search over 2-D uniform-cost grids.
//!
//! JPS exploits the symmetry of open grid regions: instead of enqueuing
//! every neighbour, it slides along straight and diagonal lines and only
//! enqueues *jump points* - the goal, cells with a forced neighbour, and
//! diagonal cells one of whose orthogonal components jumps somewhere. The
//! eight compass directions are handled by rotating one canonical lookup
//! frame ("travelling right") over the [`Grid::neighbours8`] frame.

use std::cmp::Ordering;

use compare::Compare;

use crate::{
    octile_distance, rbacktrack, to_1d, to_nd, Cell, Coord, ExistenceSet, Grid, Heap, Link, Maze,
    NodeHandle, Params, Scalar, Solve,
};

type Dir = u8;

// slots of the 8-neighbour frame, top-left to bottom-right
const TL: usize = 0;
const TM: usize = 1;
const TR: usize = 2;
const ML: usize = 3;
const MR: usize = 4;
const BL: usize = 5;
const BM: usize = 6;
const BR: usize = 7;
/// The pseudo direction of the start node: every direction at once.
const ZZ: Dir = 8;

const IDENTITY: [usize; 8] = [TL, TM, TR, ML, MR, BL, BM, BR];
const ROTATE_L: [usize; 8] = [TR, MR, BR, TM, BM, TL, ML, BL];
const ROTATE_2: [usize; 8] = [BR, BM, BL, MR, ML, TR, TM, TL];
const ROTATE_R: [usize; 8] = [BL, ML, TL, BM, TM, BR, MR, TR];

/// Per direction, the rotation bringing the canonical "travelling right"
/// frame onto the actual travel direction.
const LOOKUP: [[usize; 8]; 9] = [
    ROTATE_2, // towards the top left
    ROTATE_R, // towards the top
    ROTATE_R, // towards the top right
    ROTATE_2, // towards the left
    IDENTITY, // towards the right
    ROTATE_L, // towards the bottom left
    ROTATE_L, // towards the bottom
    IDENTITY, // towards the bottom right
    IDENTITY, // start node
];

fn is_straight(direction: Dir) -> bool {
    direction == TM as Dir || direction == ML as Dir || direction == MR as Dir || direction == BM as Dir
}

/// The travel direction from one cell to an adjacent (or aligned) cell,
/// derived from the per-axis movement signs.
fn direction(from: &Coord<2>, to: &Coord<2>) -> Dir {
    let dx = 1 + (to[0] > from[0]) as i8 - (to[0] < from[0]) as i8;
    let dy = 1 + (to[1] > from[1]) as i8 - (to[1] < from[1]) as i8;
    match (dx, dy) {
        (0, 0) => TL as Dir,
        (1, 0) => TM as Dir,
        (2, 0) => TR as Dir,
        (0, 1) => ML as Dir,
        (2, 1) => MR as Dir,
        (0, 2) => BL as Dir,
        (1, 2) => BM as Dir,
        (2, 2) => BR as Dir,
        _ => ZZ,
    }
}

/// Slides from `current` along `dir` until it hits the goal, a forced
/// neighbour situation, or a dead stop. Returns `(true, cell)` when `cell`
/// is a jump point to enqueue.
fn jump<W: Cell>(grid: &Grid<2, W>, current: Coord<2>, dir: Dir, end: &Coord<2>) -> (bool, Coord<2>) {
    if current == *end {
        return (true, current);
    }

    let frame = grid.neighbours8(&current);
    let map = &LOOKUP[dir as usize];
    let forced = |a: usize, b: usize| frame[map[a]].0 && !frame[map[b]].0;

    if is_straight(dir) {
        if forced(TR, TM) || forced(BR, BM) {
            return (true, current);
        }
        if frame[map[MR]].0 {
            return jump(grid, frame[map[MR]].1, dir, end);
        }
    } else if frame[map[TM]].0 || frame[map[ML]].0 {
        // diagonal move, not blocked on both orthogonal components
        if forced(TR, TM) || forced(BL, ML) {
            return (true, current);
        }
        for slot in [MR, BM] {
            if frame[map[slot]].0 && jump_towards(grid, frame[map[slot]].1, &current, end).0 {
                return (true, current);
            }
        }
        if frame[map[BR]].0 {
            return jump(grid, frame[map[BR]].1, dir, end);
        }
    }

    (false, current)
}

/// [`jump`] with the direction derived from the previous cell.
fn jump_towards<W: Cell>(
    grid: &Grid<2, W>,
    target: Coord<2>,
    previous: &Coord<2>,
    end: &Coord<2>,
) -> (bool, Coord<2>) {
    jump(grid, target, direction(previous, &target), end)
}

/// The successor jump points of a node, as the 8-slot frame convention used
/// by the expansion loop: inactive slots are `(false, _)`.
fn successors<W: Cell>(
    grid: &Grid<2, W>,
    current: Coord<2>,
    dir: Dir,
    end: &Coord<2>,
) -> [(bool, Coord<2>); 8] {
    let null = (false, current);
    let mut result = [null; 8];
    let frame = grid.neighbours8(&current);

    if dir == ZZ {
        // the start node probes every direction
        for slot in 0..8 {
            if frame[slot].0 {
                result[slot] = jump_towards(grid, frame[slot].1, &current, end);
            }
        }
        return result;
    }

    let map = &LOOKUP[dir as usize];
    if is_straight(dir) {
        if frame[map[TR]].0 && !frame[map[TM]].0 {
            result[0] = jump_towards(grid, frame[map[TR]].1, &current, end); // forced
        }
        if frame[map[BR]].0 && !frame[map[BM]].0 {
            result[1] = jump_towards(grid, frame[map[BR]].1, &current, end); // forced
        }
        if frame[map[MR]].0 {
            result[2] = jump(grid, frame[map[MR]].1, dir, end); // natural
        }
    } else if frame[map[TM]].0 || frame[map[ML]].0 {
        if frame[map[TR]].0 && !frame[map[TM]].0 {
            result[0] = jump_towards(grid, frame[map[TR]].1, &current, end); // forced
        }
        if frame[map[BL]].0 && !frame[map[ML]].0 {
            result[1] = jump_towards(grid, frame[map[BL]].1, &current, end); // forced
        }
        if frame[map[MR]].0 {
            result[2] = jump_towards(grid, frame[map[MR]].1, &current, end); // natural
        }
        if frame[map[BM]].0 {
            result[3] = jump_towards(grid, frame[map[BM]].1, &current, end); // natural
        }
        if frame[map[BR]].0 {
            result[4] = jump(grid, frame[map[BR]].1, dir, end); // natural
        }
    }

    result
}

#[derive(Clone, Copy, PartialEq)]
struct Node {
    index: usize,
    parent: Option<NodeHandle>,
    direction: Dir,
    g: Scalar,
    f: Scalar,
}

/// Lower `f` first; on ties, the deeper node (higher `g`) is preferred.
struct JpsOrder;

impl Compare<Node> for JpsOrder {
    fn compare(&self, a: &Node, b: &Node) -> Ordering {
        match b.f.total_cmp(&a.f) {
            Ordering::Equal => a.g.total_cmp(&b.g),
            ordering => ordering,
        }
    }
}

/// Jump point search. Only defined over 2-D grids, where its symmetry
/// argument holds; the returned path is the sequence of jump points, each
/// consecutive pair lying on a common row, column or diagonal.
///
/// Scores use [`octile_distance`], which is exact for aligned pairs, so JPS
/// inherits the optimality of A* over the jump point graph.
pub struct Jps;

impl<W: Cell> Solve<2, Grid<2, W>> for Jps {
    fn invoke(params: &mut Params<2, Grid<2, W>>) -> Vec<Coord<2>> {
        let grid = params.maze;
        let size = params.size;
        let end = params.end;
        let h = params.h;
        let weight = params.weight;
        let lazy = params.lazy_sorting;
        let monotonic = &mut *params.monotonic;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&end, &size);
        let capacity = grid.capacity_hint(&params.start, &end, params.capacity);

        let mut closed = ExistenceSet::with_capacity(capacity);
        let mut open: Heap<Node, JpsOrder> = Heap::with_capacity(JpsOrder, capacity / 8);

        open.push(Node {
            index: s,
            parent: None,
            direction: ZZ,
            g: 0.0,
            f: h(&params.start, &end) * weight,
        });
        closed.emplace(s);

        while let Some(curr) = open.pop() {
            if curr.index == e {
                open.wipe();
                drop(closed);
                return rbacktrack(monotonic, curr.index, curr.parent, &size);
            }

            let coord = to_nd(curr.index, &size);
            let mut materialised = None;
            for (active, jump_point) in successors(grid, coord, curr.direction, &end) {
                if !active {
                    continue;
                }
                let to = to_1d(&jump_point, &size);
                if closed.contains(to) {
                    continue;
                }
                closed.allocate(to, capacity, grid.count());
                closed.emplace(to);

                let parent = *materialised.get_or_insert_with(|| {
                    monotonic.alloc(Link { index: curr.index, parent: curr.parent })
                });

                let g = curr.g + octile_distance(&coord, &jump_point);
                let f = g + h(&jump_point, &end) * weight;
                let child = Node {
                    index: to,
                    parent: Some(parent),
                    direction: direction(&coord, &jump_point),
                    g,
                    f,
                };
                if lazy {
                    open.push_unsorted(child);
                } else {
                    open.push(child);
                }
            }
            if lazy {
                open.reheapify();
            }
        }

        Vec::new()
    }
}
