//! Exhaustive depth-first enumeration.
//!
//! ## Overview
//!
//! - `SearchFrame`: a position plus the cursor over its untried moves.
//! - `TraversalStack`: the explicit stack of open ancestors.
//! - `Enumerator`: the step-wise driver, resumable at any step.
//! - `PositionSink`: hook receiving every visited position.
//! - `SearchStats`: counters returned at the end of a run.

pub mod driver;
pub mod frame;
pub mod sink;
pub mod stack;
pub mod stats;

pub use driver::{Enumerator, Progress, SearchReport, Step};
pub use frame::SearchFrame;
pub use sink::{NullSink, PositionSink, PositionView};
pub use stack::TraversalStack;
pub use stats::SearchStats;
