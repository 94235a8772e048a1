//! Arena allocation for AST and GIL nodes.
//!
//! Every node created while compiling one translation unit is owned by an
//! arena and stays allocated until the arena itself is dropped. [`Arena::release`]
//! runs a value's destructor early (for nodes holding sub-resources that
//! should be closed eagerly) but never returns the slot to the allocator:
//! the backing storage is only reclaimed in bulk at teardown. Tight
//! allocate/release loops against a long-lived arena therefore grow memory
//! monotonically. This mirrors how a bump allocator behaves and is part of
//! the contract, not an oversight.

use std::marker::PhantomData;

use crate::index::Index;

/// Number of slots reserved per backing block.
pub const BLOCK_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("arena out of memory: could not reserve a backing block of {0} slots")]
    OutOfMemory(usize),
}

#[derive(Debug)]
enum Slot<T> {
    Live(T),
    /// The value's destructor has already run. The slot is kept so that the
    /// indices of every other allocation stay valid.
    Released,
}

/// A block-based allocator handing out typed indices instead of pointers.
/// Indices are never invalidated by later allocations or releases.
#[derive(Debug)]
pub struct Arena<I: Index, T> {
    blocks: Vec<Vec<Slot<T>>>,
    len: usize,
    _marker: PhantomData<fn(&I)>,
}

impl<I: Index, T> Arena<I, T> {
    pub const fn new() -> Self {
        Self {
            blocks: Vec::new(),
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates storage for `value` and returns its index. The only failure
    /// mode is the backing block reservation itself failing.
    pub fn allocate(&mut self, value: T) -> Result<I, AllocationError> {
        if self.len == self.blocks.len() * BLOCK_CAPACITY {
            let mut block = Vec::new();
            block
                .try_reserve_exact(BLOCK_CAPACITY)
                .map_err(|_| AllocationError::OutOfMemory(BLOCK_CAPACITY))?;
            self.blocks.push(block);
        }

        let index = I::new(self.len);
        self.blocks
            .last_mut()
            .expect("a backing block was just ensured")
            .push(Slot::Live(value));
        self.len += 1;

        Ok(index)
    }

    /// Runs the destructor of the value at `index` without reclaiming its
    /// storage. Returns whether a live value was released; releasing the same
    /// index twice is a no-op the second time.
    pub fn release(&mut self, index: I) -> bool {
        match self.slot_mut(index) {
            Some(slot @ Slot::Live(_)) => {
                *slot = Slot::Released;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, index: I) -> Option<&T> {
        match self.slot(index) {
            Some(Slot::Live(value)) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, index: I) -> Option<&mut T> {
        match self.slot_mut(index) {
            Some(Slot::Live(value)) => Some(value),
            _ => None,
        }
    }

    /// Total number of slots ever allocated, released ones included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn slot(&self, index: I) -> Option<&Slot<T>> {
        let idx = index.index();
        self.blocks.get(idx / BLOCK_CAPACITY)?.get(idx % BLOCK_CAPACITY)
    }

    fn slot_mut(&mut self, index: I) -> Option<&mut Slot<T>> {
        let idx = index.index();
        self.blocks
            .get_mut(idx / BLOCK_CAPACITY)?
            .get_mut(idx % BLOCK_CAPACITY)
    }
}

impl<I: Index, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}
