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

//! This module defines the most basic data types that are used throughout all
//! the code of our library (both at the abstraction and implementation levels).
//! These are also the types your client code is likely to work with.

use crate::{HeterogeneousPool, HomogeneousPool, MonotonicPool};

/// The scalar type used for all costs, weights and heuristic estimates.
pub type Scalar = f64;

/// A position in a K-dimensional search space. Linearisation is row-major
/// with stride 1 on dimension 0 (see [`crate::to_1d`] and [`crate::to_nd`]).
pub type Coord<const K: usize> = [usize; K];

/// The signature of a heuristic function: it estimates the remaining cost
/// between two positions of the search space.
pub type Heuristic<const K: usize> = fn(&Coord<K>, &Coord<K>) -> Scalar;

// ----------------------------------------------------------------------------
// --- NODE HANDLE ------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A handle to a node record living inside one of the memory pools.
///
/// Handles replace the raw parent pointers of a classical implementation:
/// dereferencing one is a bounds checked slot access into the pool that
/// produced it, which makes path reconstruction trivially safe while keeping
/// node records relocatable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeHandle(pub u32);

// ----------------------------------------------------------------------------
// --- NODE RECORDS -----------------------------------------------------------
// ----------------------------------------------------------------------------
/// The parent-chain record of an unmanaged node.
///
/// Unmanaged records are allocated from a [`MonotonicPool`] and all live
/// until the pool is reset at the end of the query. They carry exactly the
/// information path reconstruction needs: the node index and a handle to the
/// predecessor record (`None` for the root of the search).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Link {
    /// Linear index of the node within the search space.
    pub index: usize,
    /// Handle of the predecessor record, if any.
    pub parent: Option<NodeHandle>,
}

/// The parent-chain record of a managed node.
///
/// Managed records extend [`Link`] with a successor count so that dead
/// branches of the search tree can be released incrementally (see
/// [`crate::expunge`]). They are allocated from a [`HomogeneousPool`].
///
/// # Invariant
/// For any record still reachable through the parent chain of a live
/// descendant, `successors >= 1`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ManagedLink {
    /// Linear index of the node within the search space.
    pub index: usize,
    /// Handle of the predecessor record, if any.
    pub parent: Option<NodeHandle>,
    /// Number of live successors referencing this record.
    pub successors: u8,
}

// ----------------------------------------------------------------------------
// --- EDGE -------------------------------------------------------------------
// ----------------------------------------------------------------------------
/// A weighted connection between two nodes of the search space. This is both
/// the adjacency entry of a [`crate::Graph`] and the neighbour snapshot the
/// iterative-deepening solvers stash in the heterogeneous pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Linear index of the node this edge leads to.
    pub to: usize,
    /// Cost of traversing the edge.
    pub cost: Scalar,
}

// ----------------------------------------------------------------------------
// --- PARAMS -----------------------------------------------------------------
// ----------------------------------------------------------------------------
/// The complete description of one pathfinding query.
///
/// A `Params` borrows the maze and the three caller-owned memory pools for
/// the duration of the query. The pools must outlive every node record that
/// points into them, which the borrow guarantees; the solver facade resets
/// all three after the query unless [`no_cleanup`](Self::no_cleanup) is set.
///
/// # Example
/// ```
/// # use amble::*;
/// let grid: Grid<2> = Grid::new([3, 3]);
///
/// let mut monotonic     = MonotonicPool::default();
/// let mut heterogeneous = HeterogeneousPool::default();
/// let mut homogeneous   = HomogeneousPool::default();
///
/// let mut params = Params::new(
///     &grid, [0, 0], [2, 2], [3, 3],
///     manhattan_distance,
///     &mut monotonic, &mut heterogeneous, &mut homogeneous);
///
/// let path = Solver::<AStar>::solve(&mut params);
/// assert_eq!(5, path.len());
/// ```
pub struct Params<'a, const K: usize, M> {
    /// The maze to search. Any type implementing [`crate::Maze`] works.
    pub maze: &'a M,
    /// Start position of the query.
    pub start: Coord<K>,
    /// Goal position of the query.
    pub end: Coord<K>,
    /// Extent of the search space along each dimension, used to convert
    /// between positions and linear indices.
    pub size: Coord<K>,
    /// The heuristic estimating the remaining cost to the goal. Uninformed
    /// solvers ignore it.
    pub h: Heuristic<K>,
    /// Bump arena holding the unmanaged node records of the query.
    pub monotonic: &'a mut MonotonicPool<Link>,
    /// Run allocator holding the neighbour snapshots of the
    /// iterative-deepening solvers.
    pub heterogeneous: &'a mut HeterogeneousPool<Edge>,
    /// Slab holding the managed node records of the graveyard solvers.
    pub homogeneous: &'a mut HomogeneousPool<ManagedLink>,
    /// Multiplier applied to every heuristic estimate. 1 keeps an admissible
    /// heuristic admissible; larger values trade optimality for speed.
    pub weight: Scalar,
    /// Preallocation hint for the open and closed containers. 0 lets the
    /// facade derive an estimate from the maze.
    pub capacity: usize,
    /// Upper bound on the number of node records the memory-bounded solvers
    /// (SMA*, MG*) may keep alive at any point of the search.
    pub memory_limit: usize,
    /// When set, priority containers defer their ordering work to one repair
    /// per expansion instead of one sift per insertion.
    pub lazy_sorting: bool,
    /// When set, the facade leaves the three pools untouched after the
    /// query so their contents can be inspected (or reused) by the caller.
    pub no_cleanup: bool,
    /// When set, solvers that support it run the search from `end` to
    /// `start` and reconstruct the path forward. Only valid on undirected
    /// search spaces.
    pub reverse_equivalence: bool,
}

impl<'a, const K: usize, M> Params<'a, K, M> {
    /// Creates a query description with the default policies: unit heuristic
    /// weight, derived capacity, unbounded memory, eager sorting, pool
    /// cleanup on exit and a forward search.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        maze: &'a M,
        start: Coord<K>,
        end: Coord<K>,
        size: Coord<K>,
        h: Heuristic<K>,
        monotonic: &'a mut MonotonicPool<Link>,
        heterogeneous: &'a mut HeterogeneousPool<Edge>,
        homogeneous: &'a mut HomogeneousPool<ManagedLink>,
    ) -> Self {
        Params {
            maze,
            start,
            end,
            size,
            h,
            monotonic,
            heterogeneous,
            homogeneous,
            weight: 1.0,
            capacity: 0,
            memory_limit: usize::MAX,
            lazy_sorting: false,
            no_cleanup: false,
            reverse_equivalence: false,
        }
    }
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################
