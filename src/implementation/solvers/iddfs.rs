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
use crate::{ibacktrack, to_1d, Coord, Edge, Maze, Params, Run, Solve, Stack};

#[derive(Clone, Copy)]
struct Node {
    index: usize,
    depth: usize,
}

#[derive(Clone, Copy)]
struct Frame {
    run: Run,
    at: u32,
}

/// Iterative-deepening depth-first search.
///
/// Runs depth-limited DFS passes at ever increasing depth bounds, so the
/// first pass reaching the goal reaches it over a shortest trail (on
/// unit-cost mazes) while only ever holding one trail in memory. Cycle
/// avoidance is a linear scan of the trail. The search gives up when a
/// whole pass completes without cutting any branch on depth.
pub struct Iddfs;

impl<const K: usize, M: Maze<K>> Solve<K, M> for Iddfs {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let heterogeneous = &mut *params.heterogeneous;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&params.end, &size);

        let mut open: Vec<Node> = vec![];
        let mut frames: Stack<Frame> = Stack::new();
        let mut scratch: Vec<Edge> = vec![];

        for bound in 0_usize.. {
            open.clear();
            open.push(Node { index: s, depth: 0 });
            frames.clear();
            frames.push(Frame { run: neighbours_run(maze, s, heterogeneous, &mut scratch), at: 0 });

            let mut cut = false;
            while let Some(&Frame { run, at }) = frames.top() {
                let curr = open[open.len() - 1];

                if curr.depth <= bound && (at as usize) < (run.len as usize) {
                    if let Some(top) = frames.top_mut() {
                        top.at += 1;
                    }
                    let edge = heterogeneous.get(run)[at as usize];

                    if !open.iter().any(|node| node.index == edge.to) {
                        open.push(Node { index: edge.to, depth: curr.depth + 1 });
                        if edge.to == e {
                            return ibacktrack(open.iter().map(|node| node.index), &size);
                        }
                        let run = neighbours_run(maze, edge.to, heterogeneous, &mut scratch);
                        frames.push(Frame { run, at: 0 });
                    }
                } else {
                    if curr.depth > bound {
                        cut = true;
                    }
                    heterogeneous.free_run(run);
                    frames.pop();
                    open.pop();
                }
            }

            if !cut {
                // the whole reachable space fit under the bound
                break;
            }
        }

        Vec::new()
    }
}
