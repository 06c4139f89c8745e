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

//! This module provides the two bundled search space representations: the
//! dense K-dimensional [`Grid`] and the sparse weighted [`Graph`], plus the
//! contraction pass turning the former into the latter.

mod graph;
mod grid;

pub use graph::*;
pub use grid::*;

use thiserror::Error;

/// The ways constructing a maze can go wrong.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum MazeError {
    /// The weight vector handed to [`Grid::with_nodes`] does not cover the
    /// requested extent exactly.
    #[error("a grid of {expected} cells cannot be built from {actual} weights")]
    SizeMismatch {
        /// Number of cells the requested extent implies.
        expected: usize,
        /// Number of weights actually provided.
        actual: usize,
    },
}
