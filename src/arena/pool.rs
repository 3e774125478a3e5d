//! Fixed-capacity slot pool.
//!
//! One contiguous buffer of `slot_count * slot_size` elements, an occupancy
//! bitset and a circular scan cursor. Allocation never grows the buffer: a
//! full pool reports `ArenaError::Exhausted` and the caller decides what to do.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::ArenaError;

static NEXT_POOL_ID: AtomicU32 = AtomicU32::new(0);

const WORD_BITS: usize = u64::BITS as usize;

/// Identifier distinguishing one pool from every other pool in the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolId(u32);

impl PoolId {
    fn next() -> Self {
        Self(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a slot lent out by a `SlotPool`.
///
/// Handles are plain indices tagged with their pool. A handle presented to a
/// different pool, or pointing past the end of the buffer, is foreign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId {
    pool: PoolId,
    index: u32,
}

impl SlotId {
    /// Slot position within its pool.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Pool that issued this handle.
    #[inline]
    #[must_use]
    pub const fn pool(self) -> PoolId {
        self.pool
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({}:{})", self.pool.0, self.index)
    }
}

/// A pool of equally sized slots over `T` elements.
///
/// Not thread-safe. The search owns its pools exclusively.
///
/// # Example
///
/// ```
/// use mancala_tree::arena::SlotPool;
///
/// let mut pool: SlotPool<u8> = SlotPool::new("boards", 2, 4);
///
/// let a = pool.allocate().unwrap();
/// pool.get_mut(a).unwrap().copy_from_slice(&[1, 2, 3, 4]);
/// let _b = pool.allocate().unwrap();
/// assert!(pool.allocate().is_err());
///
/// assert!(pool.free(a));
/// assert_eq!(pool.allocate().unwrap(), a);
/// ```
#[derive(Debug)]
pub struct SlotPool<T> {
    id: PoolId,
    label: &'static str,
    slot_size: usize,
    slot_count: usize,
    storage: Box<[T]>,
    occupancy: Box<[u64]>,
    scan_cursor: usize,
    occupied: usize,
}

impl<T: Copy + Default> SlotPool<T> {
    /// Reserve `slot_count` slots of `slot_size` elements, all free.
    ///
    /// `label` names the pool in errors and logs.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero or the index space overflows.
    #[must_use]
    pub fn new(label: &'static str, slot_count: usize, slot_size: usize) -> Self {
        assert!(slot_count > 0, "Slot count must be greater than zero");
        assert!(slot_size > 0, "Slot size must be greater than zero");
        assert!(
            u32::try_from(slot_count).is_ok(),
            "Slot count must fit in a u32 index"
        );

        let Some(len) = slot_count.checked_mul(slot_size) else {
            panic!("Pool storage size overflows usize");
        };

        Self {
            id: PoolId::next(),
            label,
            slot_size,
            slot_count,
            storage: vec![T::default(); len].into_boxed_slice(),
            occupancy: vec![0u64; slot_count.div_ceil(WORD_BITS)].into_boxed_slice(),
            scan_cursor: 0,
            occupied: 0,
        }
    }

    /// Lend out the first free slot at or after the scan cursor.
    ///
    /// The slot is zero-filled. O(1) while frees follow allocations in
    /// LIFO order, O(`slot_count`) when the pool is nearly full.
    pub fn allocate(&mut self) -> Result<SlotId, ArenaError> {
        if self.occupied == self.slot_count {
            return Err(self.exhausted());
        }

        let mut index = self.scan_cursor;
        for _ in 0..self.slot_count {
            if !self.bit(index) {
                self.set_bit(index, true);
                self.occupied += 1;
                self.scan_cursor = (index + 1) % self.slot_count;
                self.slot_mut(index).fill(T::default());
                return Ok(SlotId {
                    pool: self.id,
                    index: index as u32,
                });
            }
            index = (index + 1) % self.slot_count;
        }

        // Occupancy count and bitset disagree.
        Err(self.exhausted())
    }

    /// Return a slot to the pool.
    ///
    /// Returns `false`, leaving the pool untouched, when the handle is foreign
    /// or the slot is not currently lent out.
    pub fn free(&mut self, slot: SlotId) -> bool {
        if !self.owns(slot) || !self.bit(slot.index()) {
            return false;
        }

        self.set_bit(slot.index(), false);
        self.occupied -= 1;
        true
    }

    /// Contents of a lent-out slot.
    #[must_use]
    pub fn get(&self, slot: SlotId) -> Option<&[T]> {
        if self.is_occupied(slot) {
            let start = slot.index() * self.slot_size;
            Some(&self.storage[start..start + self.slot_size])
        } else {
            None
        }
    }

    /// Mutable contents of a lent-out slot.
    pub fn get_mut(&mut self, slot: SlotId) -> Option<&mut [T]> {
        if self.is_occupied(slot) {
            Some(self.slot_mut(slot.index()))
        } else {
            None
        }
    }

    /// Copy the contents of `src` over `dst` without leaving the buffer.
    ///
    /// Returns `false`, copying nothing, unless both slots are lent out by
    /// this pool.
    pub fn copy_slot(&mut self, src: SlotId, dst: SlotId) -> bool {
        if !self.is_occupied(src) || !self.is_occupied(dst) {
            return false;
        }

        let start = src.index() * self.slot_size;
        self.storage
            .copy_within(start..start + self.slot_size, dst.index() * self.slot_size);
        true
    }

    /// Tear the pool down, reporting slots that were never returned.
    pub fn destroy(self) {
        if self.occupied > 0 {
            tracing::warn!(
                pool = self.label,
                outstanding = self.occupied,
                "pool destroyed with slots still lent out"
            );
        }
    }

    fn slot_mut(&mut self, index: usize) -> &mut [T] {
        let start = index * self.slot_size;
        &mut self.storage[start..start + self.slot_size]
    }
}

impl<T> SlotPool<T> {
    /// This pool's identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> PoolId {
        self.id
    }

    /// Name used in errors and logs.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Total number of slots.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slot_count
    }

    /// Elements per slot.
    #[inline]
    #[must_use]
    pub fn slot_size(&self) -> usize {
        self.slot_size
    }

    /// Slots currently lent out.
    #[inline]
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    /// Slots currently free.
    #[inline]
    #[must_use]
    pub fn available(&self) -> usize {
        self.slot_count - self.occupied
    }

    /// Next slot the allocator will examine.
    #[inline]
    #[must_use]
    pub fn scan_cursor(&self) -> usize {
        self.scan_cursor
    }

    /// Whether `slot` was issued by this pool and lies inside its buffer.
    #[inline]
    #[must_use]
    pub fn owns(&self, slot: SlotId) -> bool {
        slot.pool == self.id && slot.index() < self.slot_count
    }

    /// Whether `slot` belongs to this pool and is lent out.
    #[must_use]
    pub fn is_occupied(&self, slot: SlotId) -> bool {
        self.owns(slot) && self.bit(slot.index())
    }

    fn exhausted(&self) -> ArenaError {
        ArenaError::Exhausted {
            pool: self.label,
            capacity: self.slot_count,
        }
    }

    #[inline]
    fn bit(&self, index: usize) -> bool {
        self.occupancy[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    #[inline]
    fn set_bit(&mut self, index: usize, value: bool) {
        let mask = 1u64 << (index % WORD_BITS);
        let word = &mut self.occupancy[index / WORD_BITS];
        if value {
            *word |= mask;
        } else {
            *word &= !mask;
        }
    }
}
