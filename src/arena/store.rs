//! Lease store: a slot pool plus the fallback policy chosen at startup.
//!
//! The pool itself never grows. When it is full the store either fails the
//! lease (`FallbackPolicy::Fail`) or spills it to a heap overflow table.
//! Releasing goes to the pool first; a lease the pool rejects as foreign is
//! disposed of from the overflow table instead.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::pool::{SlotId, SlotPool};
use crate::core::FallbackPolicy;
use crate::error::ArenaError;

/// Inline capacity of heap-overflow slots. Boards up to 7 pits per side fit.
const INLINE_SLOT: usize = 16;

/// Exclusive claim on one slot of storage.
///
/// Leases are move-only: the only way to get a second one is to ask the store
/// for it, and the only way to end one is `SlotStore::release`.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Lease {
    /// Slot lent by the pool.
    Pooled(SlotId),
    /// Overflow slot on the heap.
    Heap(u32),
}

impl Lease {
    /// Whether this lease lives in the pool.
    #[must_use]
    pub fn is_pooled(&self) -> bool {
        matches!(self, Lease::Pooled(_))
    }
}

/// Slot pool with a fallback policy for exhaustion.
#[derive(Debug)]
pub struct SlotStore<T: Copy + Default> {
    pool: SlotPool<T>,
    policy: FallbackPolicy,
    overflow: FxHashMap<u32, SmallVec<[T; INLINE_SLOT]>>,
    next_heap_id: u32,
    free_heap_ids: Vec<u32>,
    peak_live: usize,
    heap_allocations: u64,
    spilled: bool,
}

impl<T: Copy + Default> SlotStore<T> {
    /// Create a store backed by a pool of `slot_count` slots of `slot_size`.
    #[must_use]
    pub fn new(
        label: &'static str,
        slot_count: usize,
        slot_size: usize,
        policy: FallbackPolicy,
    ) -> Self {
        Self {
            pool: SlotPool::new(label, slot_count, slot_size),
            policy,
            overflow: FxHashMap::default(),
            next_heap_id: 0,
            free_heap_ids: Vec::new(),
            peak_live: 0,
            heap_allocations: 0,
            spilled: false,
        }
    }

    /// Take a zero-filled slot.
    pub fn lease(&mut self) -> Result<Lease, ArenaError> {
        let lease = match self.policy {
            FallbackPolicy::HeapOnly => self.lease_heap(),
            FallbackPolicy::Fail => Lease::Pooled(self.pool.allocate()?),
            FallbackPolicy::Heap => match self.pool.allocate() {
                Ok(slot) => Lease::Pooled(slot),
                Err(err) => {
                    if !self.spilled {
                        self.spilled = true;
                        tracing::warn!(
                            pool = self.pool.label(),
                            %err,
                            "pool exhausted, spilling leases to the heap"
                        );
                    }
                    self.lease_heap()
                }
            },
        };

        self.peak_live = self.peak_live.max(self.live());
        Ok(lease)
    }

    /// Take a new slot holding a copy of `source`.
    ///
    /// Pool-to-pool copies stay inside the pool buffer.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not live in this store.
    pub fn lease_copy(&mut self, source: &Lease) -> Result<Lease, ArenaError> {
        let lease = self.lease()?;

        match (source, &lease) {
            (Lease::Pooled(src), Lease::Pooled(dst)) => {
                if !self.pool.copy_slot(*src, *dst) {
                    panic!("{source:?} is not live in the {} store", self.pool.label());
                }
            }
            _ => {
                let cells: SmallVec<[T; INLINE_SLOT]> = SmallVec::from_slice(self.get(source));
                self.get_mut(&lease).copy_from_slice(&cells);
            }
        }

        Ok(lease)
    }

    /// End a lease, returning its slot to wherever it came from.
    pub fn release(&mut self, lease: Lease) {
        let known = match lease {
            Lease::Pooled(slot) => self.pool.free(slot),
            Lease::Heap(id) => {
                let removed = self.overflow.remove(&id).is_some();
                if removed {
                    self.free_heap_ids.push(id);
                }
                removed
            }
        };

        if !known {
            tracing::error!(?lease, pool = self.pool.label(), "released an unknown lease");
            debug_assert!(known, "released an unknown lease");
        }
    }

    /// Contents of a live lease.
    ///
    /// # Panics
    ///
    /// Panics if the lease was not issued by this store.
    #[must_use]
    pub fn get(&self, lease: &Lease) -> &[T] {
        let slot = match lease {
            Lease::Pooled(slot) => self.pool.get(*slot),
            Lease::Heap(id) => self.overflow.get(id).map(|s| s.as_slice()),
        };
        slot.unwrap_or_else(|| panic!("{lease:?} is not live in the {} store", self.pool.label()))
    }

    /// Mutable contents of a live lease.
    ///
    /// # Panics
    ///
    /// Panics if the lease was not issued by this store.
    pub fn get_mut(&mut self, lease: &Lease) -> &mut [T] {
        let label = self.pool.label();
        let slot = match lease {
            Lease::Pooled(slot) => self.pool.get_mut(*slot),
            Lease::Heap(id) => self.overflow.get_mut(id).map(|s| s.as_mut_slice()),
        };
        slot.unwrap_or_else(|| panic!("{lease:?} is not live in the {label} store"))
    }

    /// Leases currently outstanding.
    #[must_use]
    pub fn live(&self) -> usize {
        self.pool.occupied() + self.overflow.len()
    }

    /// Outstanding leases served by the pool.
    #[must_use]
    pub fn pooled_live(&self) -> usize {
        self.pool.occupied()
    }

    /// Outstanding leases served by the heap.
    #[must_use]
    pub fn heap_live(&self) -> usize {
        self.overflow.len()
    }

    /// Highest number of simultaneously outstanding leases.
    #[must_use]
    pub fn peak_live(&self) -> usize {
        self.peak_live
    }

    /// Total leases ever served by the heap.
    #[must_use]
    pub fn heap_allocations(&self) -> u64 {
        self.heap_allocations
    }

    /// The backing pool.
    #[must_use]
    pub fn pool(&self) -> &SlotPool<T> {
        &self.pool
    }

    /// Tear the store down.
    pub fn destroy(self) {
        if !self.overflow.is_empty() {
            tracing::warn!(
                pool = self.pool.label(),
                outstanding = self.overflow.len(),
                "store destroyed with heap leases outstanding"
            );
        }
        self.pool.destroy();
    }

    fn lease_heap(&mut self) -> Lease {
        let id = match self.free_heap_ids.pop() {
            Some(id) => id,
            None => self.fresh_heap_id(),
        };
        self.heap_allocations += 1;
        self.overflow
            .insert(id, SmallVec::from_elem(T::default(), self.pool.slot_size()));
        Lease::Heap(id)
    }

    /// Next id past the counter that no live lease holds.
    fn fresh_heap_id(&mut self) -> u32 {
        // Released ids are recycled, so at most `overflow.len()` ids are taken.
        loop {
            let id = self.next_heap_id;
            self.next_heap_id = self.next_heap_id.wrapping_add(1);
            if !self.overflow.contains_key(&id) {
                return id;
            }
        }
    }
}
