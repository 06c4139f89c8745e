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

use fxhash::FxHashMap;

use super::idastar::neighbours_run;
use crate::{ibacktrack, to_1d, to_nd, Coord, Edge, Maze, Params, Run, Scalar, Solve, Stack};

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

/// Enhanced iterative-deepening A*.
///
/// [`crate::IdaStar`] augmented with a transposition table memoising the
/// best `f` seen at every index: a branch is cut as soon as it reaches an
/// index it cannot improve on. The table replaces both the on-path cycle
/// scan and the threshold restarts (a position only ever re-enters the DFS
/// through a strictly better `f`), trading memory for a single pass.
pub struct EidaStar;

impl<const K: usize, M: Maze<K>> Solve<K, M> for EidaStar {
    fn invoke(params: &mut Params<K, M>) -> Vec<Coord<K>> {
        let maze = params.maze;
        let size = params.size;
        let end = params.end;
        let h = params.h;
        let weight = params.weight;
        let heterogeneous = &mut *params.heterogeneous;

        let s = to_1d(&params.start, &size);
        let e = to_1d(&end, &size);

        let bound = h(&params.start, &end) * weight;
        let mut open: Vec<Node> = vec![Node { index: s, g: 0.0, f: bound }];
        let mut frames: Stack<Frame> = Stack::new();
        let mut scratch: Vec<Edge> = vec![];
        frames.push(Frame { run: neighbours_run(maze, s, heterogeneous, &mut scratch), at: 0 });

        let mut table: FxHashMap<usize, Scalar> = FxHashMap::default();
        table.insert(s, bound);

        while let Some(&Frame { run, at }) = frames.top() {
            let curr = open[open.len() - 1];

            if (at as usize) < (run.len as usize) {
                if let Some(top) = frames.top_mut() {
                    top.at += 1;
                }
                let edge = heterogeneous.get(run)[at as usize];

                let g = curr.g + edge.cost;
                let f = g + h(&to_nd(edge.to, &size), &end) * weight;
                let stale = table.get(&edge.to).map_or(false, |&best| f >= best);
                if !stale {
                    table.insert(edge.to, f);
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

        Vec::new()
    }
}
