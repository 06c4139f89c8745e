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

/// The lifecycle surface shared by the three memory pools.
///
/// Pools are owned by the caller and survive across queries: `reset` makes
/// every allocation reclaimable while *keeping* the underlying storage, so
/// the next query allocates from memory that is already paged in. `release`
/// returns the storage itself.
pub trait MemoryResource {
    /// Reclaims every allocation but keeps the backing storage for reuse.
    /// After a reset, allocations are served from the retained storage
    /// without touching the system allocator until it is exhausted.
    fn reset(&mut self);

    /// Frees the backing storage and returns the pool to its initial state.
    fn release(&mut self);
}
