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

use super::idastar::neighbours_run;
use crate::{ibacktrack, to_1d, to_nd, Coord, Edge, Maze, Params, Run, Scalar, Solve, Stack};

#[derive(Clone, Copy)]
struct Node {
    index: usize,
    h: Scalar,
}

#[derive(Clone, Copy)]
struct Frame {
    run: Run,
    at: u32,
}

/// Iterative-deepening best-first search.
///
/// Depth-first passes bounded by the heuristic estimate alone: a node whose
/// `weight * h` exceeds the bound is cut and the smallest rejected estimate
/// becomes the next bound. The trail is the path; no optimality guarantee
/// (the bound says nothing about the cost actually spent).
///
/// Neighbours are probed in reverse enumeration order, which tends to aim
/// the dive at the goal first on grid mazes.
pub struct IdBestFirst;

impl<const K: usize, M: Maze<K>> Solve<K, M> for IdBestFirst {
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
            open.push(Node { index: s, h: bound });
            frames.clear();
            frames.push(Frame { run: neighbours_run(maze, s, heterogeneous, &mut scratch), at: 0 });

            let mut min = Scalar::INFINITY;
            while let Some(&Frame { run, at }) = frames.top() {
                let curr = open[open.len() - 1];

                if curr.h > bound {
                    min = min.min(curr.h);
                    heterogeneous.free_run(run);
                    frames.pop();
                    open.pop();
                } else if (at as usize) < (run.len as usize) {
                    if let Some(top) = frames.top_mut() {
                        top.at += 1;
                    }
                    let edge = heterogeneous.get(run)[run.len as usize - 1 - at as usize];

                    if !open.iter().any(|node| node.index == edge.to) {
                        let estimate = h(&to_nd(edge.to, &size), &end) * weight;
                        open.push(Node { index: edge.to, h: estimate });
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
