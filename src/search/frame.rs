//! Search frames: a position open for expansion plus its move cursor.

use crate::core::{Position, PositionStore};

/// One node of the game tree that may still have untried moves.
///
/// The frame owns its position. Every start below `next_move` has already
/// been tried (or was empty) and is never revisited.
#[derive(Debug)]
pub struct SearchFrame {
    /// Position being expanded.
    pub position: Position,

    /// First start index not yet tried, in `[0, locations_per_player]`.
    pub next_move: usize,
}

impl SearchFrame {
    /// Wrap a fresh position with its cursor at the first pit.
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self {
            position,
            next_move: 0,
        }
    }

    /// Claim the next playable start, advancing the cursor past it.
    ///
    /// Returns `None` once every playable start has been claimed.
    pub fn claim_next(&mut self, positions: &PositionStore) -> Option<usize> {
        let start = positions.next_legal_start(&self.position, self.next_move);
        self.next_move = match start {
            Some(start) => start + 1,
            None => positions.config().locations_per_player(),
        };
        start
    }

    /// Destroy the frame, returning its board to the store.
    pub fn release(self, positions: &mut PositionStore) {
        positions.release(self.position);
    }
}
