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

use crate::{
    ibacktrack, to_1d, to_nd, Coord, Edge, HeterogeneousPool, Maze, Params, Run, Scalar, Solve,
    Stack,
};

#[derive(Clone, Copy)]
struct Node {
    index: usize,
    g: Scalar,
    f: Scalar,
}

#[derive(Clone, Copy)]
struct Frame {
    run: Run,
    at: u32,
}

/// Snapshots the neighbours of `index` into the heterogeneous pool; the run
/// lives exactly as long as the DFS frame that owns it.
pub(super) fn neighbours_run<const K: usize, M: Maze<K>>(
    maze: &M,
    index: usize,
    pool: &mut HeterogeneousPool<Edge>,
    scratch: &mut Vec<Edge>,
) -> Run {
    scratch.clear();
    maze.for_each_neighbour(index, false, &mut |to, cost| scratch.push(Edge { to, cost }));
    pool.alloc_run(scratch)
}

/// Iterative-deepening A*.
///
/// A depth-first search bounded by an `f` threshold: branches whose
/// `f = g + weight * h` exceeds the bound are cut, and the search restarts
/// with the smallest rejected `f` as the new bound until the goal is found
/// or nothing was rejected. Memory use is proportional to the path length
/// (the DFS trail *is* the path); cycle avoidance is a linear scan of that
/// short trail.
///
/// Optimal under the same conditions as A*.
pub struct IdaStar;

impl<const K: usize, M: Maze<K>> Solve<K, M> for IdaStar {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let end = params.end;
        let h = params.h;
        let weight = params.weight;
        let heterogeneous = &mut *params.heterogeneous;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&end, &size);

        let mut open: Vec<Node> = vec![];
        let mut frames: Stack<Frame> = Stack::new();
        let mut scratch: Vec<Edge> = vec![];

        let mut bound = h(&params.start, &end) * weight;
        loop {
            open.clear();
            open.push(Node { index: s, g: 0.0, f: bound });
            frames.clear();
            frames.push(Frame { run: neighbours_run(maze, s, heterogeneous, &mut scratch), at: 0 });

            let mut min = Scalar::INFINITY;
            while let Some(&Frame { run, at }) = frames.top() {
                let curr = open[open.len() - 1];

                if (at as usize) < (run.len as usize) {
                    if let Some(top) = frames.top_mut() {
                        top.at += 1;
                    }
                    let edge = heterogeneous.get(run)[at as usize];

                    let g = curr.g + edge.cost;
                    let f = g + h(&to_nd(edge.to, &size), &end) * weight;
                    if f > bound {
                        min = min.min(f);
                    } else if !open.iter().any(|node| node.index == edge.to) {
                        open.push(Node { index: edge.to, g, f });
                        if edge.to == e {
                            return ibacktrack(open.iter().map(|node| node.index), &size);
                        }
                        let run = neighbours_run(maze, edge.to, heterogeneous, &mut scratch);
                        frames.push(Frame { run, at: 0 });
                    }
                } else {
                    heterogeneous.free_run(run);
                    frames.pop();
                    open.pop();
                }
            }

            if min == Scalar::INFINITY {
                return Vec::new();
            }
            bound = min;
        }
    }
}
