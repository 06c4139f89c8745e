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

//! Node lifetime management and path reconstruction.
//!
//! Solvers never chase pointers: a node's ancestry is a chain of
//! [`NodeHandle`]s into one of the pools. This module provides the chain
//! bookkeeping for managed records (reference counted, expunged as branches
//! die) and the reconstruction flavours turning a finished chain back into
//! a coordinate path.

use crate::{
    to_nd, Coord, HomogeneousPool, Link, ManagedLink, MonotonicPool, NodeHandle,
};

/// Read access to a pool of parent-chain records, the only thing path
/// reconstruction needs.
pub trait LinkStore {
    /// The `(index, parent)` pair of the record at `handle`.
    fn entry(&self, handle: NodeHandle) -> (usize, Option<NodeHandle>);
}

impl LinkStore for MonotonicPool<Link> {
    fn entry(&self, handle: NodeHandle) -> (usize, Option<NodeHandle>) {
        let link = self.get(handle);
        (link.index, link.parent)
    }
}

impl LinkStore for HomogeneousPool<ManagedLink> {
    fn entry(&self, handle: NodeHandle) -> (usize, Option<NodeHandle>) {
        let link = self.get(handle);
        (link.index, link.parent)
    }
}

// ----------------------------------------------------------------------------
// --- MANAGED CHAIN BOOKKEEPING ----------------------------------------------
// ----------------------------------------------------------------------------

/// Registers one more successor on the record at `handle`. Called whenever a
/// child referencing the record is created.
pub fn adopt(pool: &mut HomogeneousPool<ManagedLink>, handle: NodeHandle) {
    let link = pool.get_mut(handle);
    debug_assert!(link.successors < u8::MAX, "successor count overflow");
    link.successors += 1;
}

/// Releases a dead branch: starting at `from`, decrements each ancestor's
/// successor count and deallocates every record whose count reaches zero,
/// stopping at the first record that is still referenced (or at the root).
///
/// This is the graveyard mechanism keeping the managed pool's live count at
/// the size of the *useful* search tree rather than the visited set.
pub fn expunge(pool: &mut HomogeneousPool<ManagedLink>, from: Option<NodeHandle>) {
    let mut current = from;
    while let Some(handle) = current {
        let link = pool.get_mut(handle);
        debug_assert!(link.successors > 0, "successor count underflow");
        link.successors -= 1;

        if link.successors == 0 {
            current = pool.remove(handle).parent;
        } else {
            break;
        }
    }
}

/// The single-step variant of [`expunge`]: decrements the successor count
/// of `parent` and reports the record when it became deallocatable, leaving
/// the actual deallocation to the caller. Memory-bounded solvers use this
/// to park dead records on a reclamation stack instead of freeing eagerly.
pub fn forget_one(
    pool: &mut HomogeneousPool<ManagedLink>,
    parent: Option<NodeHandle>,
) -> Option<NodeHandle> {
    let handle = parent?;
    let link = pool.get_mut(handle);
    debug_assert!(link.successors > 0, "successor count underflow");
    link.successors -= 1;

    if link.successors == 0 {
        Some(handle)
    } else {
        None
    }
}

// ----------------------------------------------------------------------------
// --- PATH RECONSTRUCTION ----------------------------------------------------
// ----------------------------------------------------------------------------

/// Reconstructs the path ending at `(index, parent)` by walking the chain
/// twice: one pass to count its depth, one pass to fill the result back to
/// front. The returned path runs from the root of the search to `index`,
/// both inclusive.
pub fn rbacktrack<const K: usize, S: LinkStore>(
    store: &S,
    index: usize,
    parent: Option<NodeHandle>,
    size: &Coord<K>,
) -> Vec<Coord<K>> {
    let mut depth = 1;
    let mut current = parent;
    while let Some(handle) = current {
        depth += 1;
        current = store.entry(handle).1;
    }

    rbacktrack_with_depth(store, index, parent, size, depth)
}

/// Single-pass variant of [`rbacktrack`] for callers that already know the
/// number of nodes on the path (root and tail included): the chain is walked
/// once, filling the result back to front.
pub fn rbacktrack_with_depth<const K: usize, S: LinkStore>(
    store: &S,
    index: usize,
    parent: Option<NodeHandle>,
    size: &Coord<K>,
    depth: usize,
) -> Vec<Coord<K>> {
    let mut result = vec![[0; K]; depth];
    let mut slot = depth - 1;
    result[slot] = to_nd(index, size);

    let mut current = parent;
    while let Some(handle) = current {
        let (node, next) = store.entry(handle);
        slot -= 1;
        result[slot] = to_nd(node, size);
        current = next;
    }
    debug_assert!(slot == 0, "path depth does not match the chain length");

    result
}

/// Reconstructs the path ending at `(index, parent)` in walk order, without
/// reversing. This is the flavour used after a reverse-equivalence search:
/// the chain is rooted at the goal, so the walk itself runs start to goal.
pub fn rbacktrack_forward<const K: usize, S: LinkStore>(
    store: &S,
    index: usize,
    parent: Option<NodeHandle>,
    size: &Coord<K>,
) -> Vec<Coord<K>> {
    let mut result = vec![to_nd(index, size)];
    let mut current = parent;
    while let Some(handle) = current {
        let (node, next) = store.entry(handle);
        result.push(to_nd(node, size));
        current = next;
    }
    result
}

/// Reconstruction for the iterative-deepening solvers: their DFS trail *is*
/// the path, so the indices only need mapping back to coordinates.
pub fn ibacktrack<const K: usize>(
    trail: impl Iterator<Item = usize>,
    size: &Coord<K>,
) -> Vec<Coord<K>> {
    trail.map(|index| to_nd(index, size)).collect()
}

// ############################################################################
// #### TESTS #################################################################
// ############################################################################


#[cfg(test)]
mod test_backtracking {
    use super::*;

    fn pool_with_chain(indices: &[usize]) -> (MonotonicPool<Link>, usize, Option<NodeHandle>) {
        let mut pool = MonotonicPool::new();
        let mut parent = None;
        let mut last = 0;
        for &index in indices {
            let handle = pool.alloc(Link { index, parent });
            parent = Some(handle);
            last = index;
        }
        (pool, last, parent)
    }

    #[test]
    fn rbacktrack_returns_the_chain_root_first() {
        let (pool, _, tail) = pool_with_chain(&[0, 1, 2, 7]);
        let (index, parent) = pool.entry(tail.unwrap());
        let path = rbacktrack(&pool, index, parent, &[8]);
        assert_eq!(vec![[0], [1], [2], [7]], path);
    }

    #[test]
    fn the_depth_hinted_variant_agrees_with_the_counting_one() {
        let (pool, _, tail) = pool_with_chain(&[3, 4, 5]);
        let (index, parent) = pool.entry(tail.unwrap());
        assert_eq!(
            rbacktrack(&pool, index, parent, &[8]),
            rbacktrack_with_depth(&pool, index, parent, &[8], 3)
        );
    }

    #[test]
    fn the_forward_variant_returns_the_walk_order() {
        let (pool, _, tail) = pool_with_chain(&[0, 1, 2]);
        let (index, parent) = pool.entry(tail.unwrap());
        let path = rbacktrack_forward(&pool, index, parent, &[8]);
        assert_eq!(vec![[2], [1], [0]], path);
    }

    #[test]
    fn ibacktrack_maps_a_trail_to_coordinates() {
        let path = ibacktrack([0_usize, 1, 4, 5].into_iter(), &[3, 2]);
        assert_eq!(vec![[0, 0], [1, 0], [1, 1], [2, 1]], path);
    }
}
