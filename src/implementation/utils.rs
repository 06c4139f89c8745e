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

//! Conversions between K-dimensional positions and linear indices. The
//! linearisation is row-major with stride 1 on dimension 0; since `K` is a
//! compile time constant, the conversion loops unroll for the small
//! dimensionalities that dominate in practice.

use crate::Coord;

/// Flattens a K-dimensional position into its linear index, given the extent
/// of the space along each dimension.
///
/// # Examples:
/// ```
/// # use amble::to_1d;
/// assert_eq!(0, to_1d(&[0, 0], &[4, 3]));
/// assert_eq!(3, to_1d(&[3, 0], &[4, 3]));
/// assert_eq!(4, to_1d(&[0, 1], &[4, 3]));
/// ```
#[inline]
pub fn to_1d<const K: usize>(coord: &Coord<K>, size: &Coord<K>) -> usize {
    let mut index = 0;
    for i in (0..K).rev() {
        index = index * size[i] + coord[i];
    }
    index
}

/// Expands a linear index back into its K-dimensional position, given the
/// extent of the space along each dimension. Inverse of [`to_1d`] for every
/// in-bounds position.
#[inline]
pub fn to_nd<const K: usize>(index: usize, size: &Coord<K>) -> Coord<K> {
    let mut coord = [0; K];
    let mut rest = index;
    for i in 0..K {
        coord[i] = rest % size[i];
        rest /= size[i];
    }
    coord
}

/// Computes the number of cells in a space of the given extent, saturating
/// at `usize::MAX` when the multiplication would overflow.
#[inline]
pub fn product<const K: usize>(size: &Coord<K>) -> usize {
    size.iter()
        .try_fold(1usize, |acc, &dim| acc.checked_mul(dim))
        .unwrap_or(usize::MAX)
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_indexing {
    use super::*;

    #[test]
    fn dimension_zero_has_stride_one() {
        assert_eq!(1, to_1d(&[1, 0], &[5, 5]));
        assert_eq!(5, to_1d(&[0, 1], &[5, 5]));
    }

    #[test]
    fn one_dimensional_spaces_are_the_identity() {
        for i in 0..10 {
            assert_eq!(i, to_1d(&[i], &[10]));
            assert_eq!([i], to_nd(i, &[10]));
        }
    }

    #[test]
    fn to_nd_inverts_to_1d_for_every_cell() {
        let size = [3, 4, 5];
        for x in 0..3 {
            for y in 0..4 {
                for z in 0..5 {
                    let coord = [x, y, z];
                    assert_eq!(coord, to_nd(to_1d(&coord, &size), &size));
                }
            }
        }
    }

    #[test]
    fn indices_enumerate_cells_in_row_major_order() {
        let size = [2, 3];
        let mut expected = 0;
        for y in 0..3 {
            for x in 0..2 {
                assert_eq!(expected, to_1d(&[x, y], &size));
                expected += 1;
            }
        }
    }

    #[test]
    fn product_multiplies_every_dimension() {
        assert_eq!(60, product(&[3, 4, 5]));
        assert_eq!(1, product(&[1, 1, 1]));
    }

    #[test]
    fn product_saturates_instead_of_overflowing() {
        assert_eq!(usize::MAX, product(&[usize::MAX, 2]));
    }
}
