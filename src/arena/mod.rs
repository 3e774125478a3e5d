//! Fixed-capacity storage for search state.
//!
//! ## Overview
//!
//! - `SlotPool`: a contiguous buffer of equally sized slots with an
//!   occupancy bitset and a circular scan cursor. Never grows.
//! - `SlotStore`: a pool plus the fallback policy chosen at startup, handing
//!   out move-only `Lease`s.
//!
//! Depth-first search frees slots in roughly the reverse order it takes them,
//! so the scan cursor usually finds a free slot immediately.

pub mod pool;
pub mod store;

pub use pool::{PoolId, SlotId, SlotPool};
pub use store::{Lease, SlotStore};
