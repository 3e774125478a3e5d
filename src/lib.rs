//! # mancala-tree
//!
//! Exhaustive game-tree enumeration for a two-player Kalah variant.
//!
//! Starting from every pit holding the same number of tokens, the enumerator
//! plays every legal move sequence to the end and counts completed games,
//! distinct positions visited, and game lengths.
//!
//! ## Design Principles
//!
//! 1. **Bounded Memory**: Depth-first with an explicit stack. Only the open
//!    path is alive, so memory scales with the longest game rather than the
//!    size of the tree.
//!
//! 2. **Fixed-Capacity Storage**: Boards live in a slot pool sized once at
//!    startup. Exhaustion is an explicit error, or a heap spill when the run
//!    is configured for it.
//!
//! 3. **Configuration Over Globals**: Board geometry is computed once into a
//!    `BoardConfig` and passed by reference to every rule.
//!
//! ## Modules
//!
//! - `core`: Players, configuration, positions and their store
//! - `arena`: Slot pool and lease store with fallback policy
//! - `rules`: Sowing, capture and terminal tests on raw boards
//! - `search`: Frames, traversal stack, enumerator, sinks, statistics
//! - `render`: ASCII board output
//! - `error`: Error types
//!
//! ## Example
//!
//! ```
//! use mancala_tree::{BoardConfig, Enumerator, NullSink, SearchConfig};
//!
//! let board = BoardConfig::new(2, 1)?;
//! let report = Enumerator::new(board, &SearchConfig::default(), NullSink)?.run()?;
//!
//! assert_eq!(report.stats.games, 3);
//! assert_eq!(report.stats.positions(), 8);
//! # Ok::<(), mancala_tree::SearchError>(())
//! ```

pub mod arena;
pub mod core;
pub mod error;
pub mod render;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, FallbackPolicy, PlayerId, PlayerMap, Position, PositionStore, SearchConfig,
};

pub use crate::arena::{Lease, PoolId, SlotId, SlotPool, SlotStore};

pub use crate::error::{ArenaError, ConfigError, SearchError, SearchResult};

pub use crate::rules::{MoveOutcome, TerminalReason};

pub use crate::search::{
    Enumerator, NullSink, PositionSink, PositionView, Progress, SearchFrame, SearchReport,
    SearchStats, Step, TraversalStack,
};

pub use crate::render::{render_board, AsciiRenderer};
