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

use crate::{to_1d, to_nd, product, Coord, Maze, MazeError, Scalar};

/// The weight stored in a grid cell. Each weight type reserves one sentinel
/// value meaning "blocked": the all-ones pattern for the unsigned integers,
/// `true` for `bool`. Types that cannot represent such a sentinel simply do
/// not implement the trait.
pub trait Cell: Copy {
    /// The sentinel marking an impassable cell.
    const BLOCKED: Self;
    /// A default passable weight, used when carving cells open.
    const OPEN: Self;

    /// Returns true iff the cell may be traversed.
    fn is_active(&self) -> bool;
}

impl Cell for bool {
    const BLOCKED: Self = true;
    const OPEN: Self = false;

    #[inline]
    fn is_active(&self) -> bool {
        !*self
    }
}

macro_rules! weight_cell {
    ($($t:ty),*) => {
        $(impl Cell for $t {
            const BLOCKED: Self = <$t>::MAX;
            const OPEN: Self = 0;

            #[inline]
            fn is_active(&self) -> bool {
                *self != <$t>::MAX
            }
        })*
    };
}
weight_cell!(u8, u16, u32, u64, usize);

/// A dense K-dimensional uniform-cost grid.
///
/// Every cell holds a weight of type `W`; a cell is traversable iff its
/// weight differs from the sentinel (see [`Cell`]). Moves cost 1 regardless
/// of the weight stored, axis moves by default and the full `3^K - 1`
/// neighbourhood on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<const K: usize, W: Cell = bool> {
    size: Coord<K>,
    count: usize,
    nodes: Vec<W>,
}

impl<const K: usize, W: Cell> Grid<K, W> {
    /// Creates a fully open grid of the given extent.
    pub fn new(size: Coord<K>) -> Self {
        let count = product(&size);
        Grid { size, count, nodes: vec![W::OPEN; count] }
    }

    /// Creates a grid of the given extent from explicit cell weights. The
    /// weight vector must cover the extent exactly.
    pub fn with_nodes(size: Coord<K>, nodes: Vec<W>) -> Result<Self, MazeError> {
        let count = product(&size);
        if nodes.len() != count {
            return Err(MazeError::SizeMismatch { expected: count, actual: nodes.len() });
        }
        Ok(Grid { size, count, nodes })
    }

    /// Extent of the grid along each dimension.
    pub fn size(&self) -> &Coord<K> {
        &self.size
    }

    /// The weight of the cell at the given position.
    pub fn get(&self, coord: &Coord<K>) -> W {
        self.nodes[to_1d(coord, &self.size)]
    }

    /// Overwrites the weight of the cell at the given position.
    pub fn set(&mut self, coord: &Coord<K>, weight: W) {
        let index = to_1d(coord, &self.size);
        self.nodes[index] = weight;
    }

    /// The weight of the cell at the given linear index.
    pub fn at(&self, index: usize) -> W {
        self.nodes[index]
    }

    /// Returns true iff the cell at `index` exists and is traversable.
    pub fn active(&self, index: usize) -> bool {
        index < self.count && self.nodes[index].is_active()
    }

    /// Returns true iff the cell at `index` has exactly two active axis
    /// neighbours, i.e. it is the interior of a corridor. Transitory cells
    /// are what the grid-to-graph contraction collapses away.
    pub fn is_transitory(&self, index: usize) -> bool {
        let coord = to_nd(index, &self.size);
        let mut active = 0;
        self.for_each_axis_neighbour(&coord, &mut |ok, _| {
            if ok {
                active += 1;
            }
        });
        active == 2
    }

    /// The `2K` axis neighbours of a position, in dimension order (negative
    /// then positive per dimension). Out-of-bounds or blocked neighbours are
    /// yielded as `(false, _)` rather than omitted, so callers that need
    /// positional information can rely on the arity.
    pub fn neighbours(&self, coord: &Coord<K>) -> Vec<(bool, Coord<K>)> {
        let mut result = Vec::with_capacity(2 * K);
        self.for_each_axis_neighbour(coord, &mut |ok, c| result.push((ok, c)));
        result
    }

    /// The `3^K - 1` axis + diagonal neighbours of a position, enumerated in
    /// row-major offset order. Arity and inactive-slot conventions are the
    /// same as for [`neighbours`](Self::neighbours).
    pub fn diagonal_neighbours(&self, coord: &Coord<K>) -> Vec<(bool, Coord<K>)> {
        let total = 3_usize.pow(K as u32);
        let mut result = Vec::with_capacity(total - 1);
        let three = [3; K];
        for sample in 0..total {
            let offset = to_nd(sample, &three);
            if offset == [1; K] {
                continue;
            }
            result.push(self.offset_neighbour(coord, &offset));
        }
        result
    }

    fn for_each_axis_neighbour(&self, coord: &Coord<K>, f: &mut dyn FnMut(bool, Coord<K>)) {
        for i in 0..K {
            let mut negative = *coord;
            let mut ok = coord[i] > 0;
            if ok {
                negative[i] -= 1;
                ok = self.nodes[to_1d(&negative, &self.size)].is_active();
            }
            f(ok, negative);

            let mut positive = *coord;
            let mut ok = coord[i] + 1 < self.size[i];
            if ok {
                positive[i] += 1;
                ok = self.nodes[to_1d(&positive, &self.size)].is_active();
            }
            f(ok, positive);
        }
    }

    fn offset_neighbour(&self, coord: &Coord<K>, offset: &Coord<K>) -> (bool, Coord<K>) {
        let mut neighbour = [0; K];
        for i in 0..K {
            // offsets are encoded 0..=2 and recentred on 1
            let shifted = coord[i] + offset[i];
            if shifted < 1 || shifted > self.size[i] {
                return (false, *coord);
            }
            neighbour[i] = shifted - 1;
        }
        (self.nodes[to_1d(&neighbour, &self.size)].is_active(), neighbour)
    }
}

impl<W: Cell> Grid<2, W> {
    /// The eight neighbours of a 2-D position as a fixed frame, enumerated
    /// top-left to bottom-right. This is the lookup frame the jump point
    /// search rotates its direction tables over.
    pub fn neighbours8(&self, coord: &Coord<2>) -> [(bool, Coord<2>); 8] {
        let mut result = [(false, *coord); 8];
        let mut slot = 0;
        for sample in 0..9 {
            let offset = [sample % 3, sample / 3];
            if offset == [1, 1] {
                continue;
            }
            result[slot] = self.offset_neighbour(coord, &offset);
            slot += 1;
        }
        result
    }
}

impl<const K: usize, W: Cell> Maze<K> for Grid<K, W> {
    fn contains(&self, index: usize) -> bool {
        index < self.count
    }

    fn is_active(&self, index: usize) -> bool {
        self.active(index)
    }

    fn count(&self) -> usize {
        self.count
    }

    fn capacity_hint(&self, start: &Coord<K>, end: &Coord<K>, requested: usize) -> usize {
        requested.max(to_1d(start, &self.size).max(to_1d(end, &self.size)))
    }

    fn for_each_neighbour(&self, index: usize, diagonals: bool, f: &mut dyn FnMut(usize, Scalar)) {
        let coord = to_nd(index, &self.size);
        if diagonals {
            let total = 3_usize.pow(K as u32);
            let three = [3; K];
            for sample in 0..total {
                let offset = to_nd(sample, &three);
                if offset == [1; K] {
                    continue;
                }
                let (ok, neighbour) = self.offset_neighbour(&coord, &offset);
                if ok {
                    f(to_1d(&neighbour, &self.size), 1.0);
                }
            }
        } else {
            self.for_each_axis_neighbour(&coord, &mut |ok, neighbour| {
                if ok {
                    f(to_1d(&neighbour, &self.size), 1.0);
                }
            });
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
