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

//! The heuristics informing the guided solvers. All of them are pure
//! functions on a pair of positions, so any of them can be plugged into
//! [`crate::Params::h`] directly.
//!
//! Whether a given heuristic keeps a solver optimal depends on the move set:
//! `manhattan_distance` is admissible for axis moves, `octile_distance` for
//! axis + diagonal moves, and `euclidean_distance` for both.

use crate::{Coord, Scalar};

/// The straight line distance between two positions.
pub fn euclidean_distance<const K: usize>(a: &Coord<K>, b: &Coord<K>) -> Scalar {
    sqr_euclidean_distance(a, b).sqrt()
}

/// The squared straight line distance. Cheaper than [`euclidean_distance`]
/// and ranks positions identically, but overestimates at range: only use it
/// where admissibility does not matter.
pub fn sqr_euclidean_distance<const K: usize>(a: &Coord<K>, b: &Coord<K>) -> Scalar {
    let mut result = 0.0;
    for i in 0..K {
        let d = a[i].abs_diff(b[i]) as Scalar;
        result += d * d;
    }
    result
}

/// The sum of the per-axis distances, i.e. the exact cost between two
/// positions when only axis moves are allowed.
pub fn manhattan_distance<const K: usize>(a: &Coord<K>, b: &Coord<K>) -> Scalar {
    let mut result = 0.0;
    for i in 0..K {
        result += a[i].abs_diff(b[i]) as Scalar;
    }
    result
}

/// The greatest per-axis distance, i.e. the exact cost between two positions
/// when diagonal moves cost the same as axis moves.
pub fn chebyshev_distance<const K: usize>(a: &Coord<K>, b: &Coord<K>) -> Scalar {
    let mut result = 0;
    for i in 0..K {
        result = result.max(a[i].abs_diff(b[i]));
    }
    result as Scalar
}

/// The Chebyshev distance, scaled by sqrt(2) when no axis is aligned.
///
/// For two positions on a common row, column or diagonal this is the exact
/// unit-cost travel distance with diagonal moves, which is what the jump
/// point search uses to score the distance between successive jump points.
pub fn octile_distance<const K: usize>(a: &Coord<K>, b: &Coord<K>) -> Scalar {
    let result = chebyshev_distance(a, b);
    let straight = (0..K).any(|i| a[i] == b[i]);
    if straight {
        result
    } else {
        result * std::f64::consts::SQRT_2
    }
}

/// The Canberra distance: a weighted per-axis difference that emphasises
/// movement close to the origin.
pub fn canberra_distance<const K: usize>(a: &Coord<K>, b: &Coord<K>) -> Scalar {
    let mut result = 0.0;
    for i in 0..K {
        let denominator = (a[i] + b[i]) as Scalar;
        if denominator != 0.0 {
            result += a[i].abs_diff(b[i]) as Scalar / denominator;
        }
    }
    result
}

/// The cosine distance: one minus the cosine of the angle between the two
/// position vectors. Degenerates to 1 when either vector is null.
pub fn cosine_distance<const K: usize>(a: &Coord<K>, b: &Coord<K>) -> Scalar {
    let mut dot_product = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for i in 0..K {
        let va = a[i] as Scalar;
        let vb = b[i] as Scalar;
        dot_product += va * vb;
        norm_a += va * va;
        norm_b += vb * vb;
    }

    let norm_product = norm_a.sqrt() * norm_b.sqrt();
    if norm_product > 0.0 {
        1.0 - dot_product / norm_product
    } else {
        1.0
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################

#[cfg(test)]
mod test_heuristics {
    use super::*;

    #[test]
    fn every_distance_is_zero_between_identical_positions() {
        let p = [3, 4];
        assert_eq!(0.0, euclidean_distance(&p, &p));
        assert_eq!(0.0, sqr_euclidean_distance(&p, &p));
        assert_eq!(0.0, manhattan_distance(&p, &p));
        assert_eq!(0.0, chebyshev_distance(&p, &p));
        assert_eq!(0.0, octile_distance(&p, &p));
        assert_eq!(0.0, canberra_distance(&p, &p));
    }

    #[test]
    fn every_distance_is_symmetric() {
        let a = [1, 7];
        let b = [5, 2];
        assert_eq!(euclidean_distance(&a, &b), euclidean_distance(&b, &a));
        assert_eq!(manhattan_distance(&a, &b), manhattan_distance(&b, &a));
        assert_eq!(chebyshev_distance(&a, &b), chebyshev_distance(&b, &a));
        assert_eq!(octile_distance(&a, &b), octile_distance(&b, &a));
        assert_eq!(canberra_distance(&a, &b), canberra_distance(&b, &a));
        assert_eq!(cosine_distance(&a, &b), cosine_distance(&b, &a));
    }

    #[test]
    fn the_3_4_5_triangle_holds() {
        assert_eq!(5.0, euclidean_distance(&[0, 0], &[3, 4]));
        assert_eq!(25.0, sqr_euclidean_distance(&[0, 0], &[3, 4]));
        assert_eq!(7.0, manhattan_distance(&[0, 0], &[3, 4]));
        assert_eq!(4.0, chebyshev_distance(&[0, 0], &[3, 4]));
    }

    #[test]
    fn octile_is_exact_on_rows_and_diagonals() {
        // same row: plain Chebyshev
        assert_eq!(4.0, octile_distance(&[0, 2], &[4, 2]));
        // perfect diagonal: Chebyshev scaled by sqrt(2)
        assert_eq!(3.0 * std::f64::consts::SQRT_2, octile_distance(&[0, 0], &[3, 3]));
    }

    #[test]
    fn cosine_of_a_null_vector_is_one() {
        assert_eq!(1.0, cosine_distance(&[0, 0], &[3, 4]));
    }

    #[test]
    fn cosine_of_colinear_vectors_is_zero() {
        let d = cosine_distance(&[1, 2], &[2, 4]);
        assert!(d.abs() < 1e-9);
    }
}
