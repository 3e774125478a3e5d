//! Per-position output hook.
//!
//! The driver reports the root and every child it generates to a
//! `PositionSink`. Sinks only observe: nothing they do can change the
//! traversal.

use crate::core::PlayerId;

/// Read-only view of a position as the driver generates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionView<'a> {
    /// Token counts, laid out as on `BoardConfig`.
    pub board: &'a [u8],

    /// Player to move.
    pub active_player: PlayerId,

    /// Moves from the root to this position.
    pub depth: usize,

    /// Whether the game ends here.
    pub terminal: bool,
}

/// Consumer of visited positions.
pub trait PositionSink {
    /// Called once per visited position, in pre-order.
    fn visit(&mut self, view: PositionView<'_>);
}

/// Sink that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PositionSink for NullSink {
    #[inline]
    fn visit(&mut self, _view: PositionView<'_>) {}
}

impl<F> PositionSink for F
where
    F: FnMut(PositionView<'_>),
{
    #[inline]
    fn visit(&mut self, view: PositionView<'_>) {
        self(view)
    }
}
