//! Kalah move rules over raw board slices.
//!
//! These functions know nothing about storage: they read and write a
//! `&[u8]` laid out as described on `BoardConfig`.

use serde::{Deserialize, Serialize};

use crate::core::{BoardConfig, PlayerId};

/// What happened when a move was sown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Last token landed in the mover's store; the mover plays again.
    ExtraTurn {
        /// Board index of the last token.
        landing: usize,
    },
    /// Last token landed in an empty pit on the mover's row.
    Capture {
        /// Board index of the last token.
        landing: usize,
        /// Tokens moved into the mover's store (the lander plus the opposite pit).
        captured: u8,
    },
    /// Any other landing; the turn passes.
    Sown {
        /// Board index of the last token.
        landing: usize,
    },
}

impl MoveOutcome {
    /// Board index where the last token was dropped.
    #[must_use]
    pub fn landing(&self) -> usize {
        match *self {
            MoveOutcome::ExtraTurn { landing }
            | MoveOutcome::Capture { landing, .. }
            | MoveOutcome::Sown { landing } => landing,
        }
    }

    /// Whether the mover keeps the turn.
    #[must_use]
    pub fn is_extra_turn(&self) -> bool {
        matches!(self, MoveOutcome::ExtraTurn { .. })
    }
}

/// Why a position ends the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalReason {
    /// This player's store holds more than half of all tokens.
    StoreMajority(PlayerId),
    /// This player's row of pits is empty.
    ///
    /// Tokens left on the other row stay where they are; they are not swept
    /// into the other player's store.
    RowEmpty(PlayerId),
}

/// Play `mover`'s pit `start` (0-based within the mover's row).
///
/// Returns `None`, leaving the board untouched, when `start` is off the row
/// or the pit is empty.
pub fn sow(
    config: &BoardConfig,
    board: &mut [u8],
    mover: PlayerId,
    start: usize,
) -> Option<MoveOutcome> {
    debug_assert_eq!(board.len(), config.board_size());

    if start >= config.locations_per_player() {
        return None;
    }

    let mut index = config.pit(mover, start);
    let mut in_hand = std::mem::take(&mut board[index]);
    if in_hand == 0 {
        return None;
    }

    let own_store = config.store(mover);
    let opponent_store = config.store(mover.opponent());

    while in_hand > 0 {
        index = (index + 1) % config.board_size();
        if index != opponent_store {
            board[index] += 1;
            in_hand -= 1;
        }
    }

    if index == own_store {
        return Some(MoveOutcome::ExtraTurn { landing: index });
    }

    if config.row(mover).contains(&index) && board[index] == 1 {
        let opposite = config.opposite(index);
        let captured = 1 + board[opposite];
        board[own_store] += captured;
        board[opposite] = 0;
        board[index] = 0;
        return Some(MoveOutcome::Capture {
            landing: index,
            captured,
        });
    }

    Some(MoveOutcome::Sown { landing: index })
}

/// Why `board` ends the game, if it does.
///
/// Store majorities are checked before empty rows, first player first.
#[must_use]
pub fn terminal_reason(config: &BoardConfig, board: &[u8]) -> Option<TerminalReason> {
    let threshold = config.winning_threshold();

    PlayerId::all()
        .find(|&p| board[config.store(p)] > threshold)
        .map(TerminalReason::StoreMajority)
        .or_else(|| {
            PlayerId::all()
                .find(|&p| board[config.row(p)].iter().all(|&t| t == 0))
                .map(TerminalReason::RowEmpty)
        })
}

/// Whether `board` ends the game.
#[inline]
#[must_use]
pub fn is_terminal(config: &BoardConfig, board: &[u8]) -> bool {
    terminal_reason(config, board).is_some()
}

/// First non-empty pit of `player`'s row at or after `from`.
#[must_use]
pub fn next_legal_start(
    config: &BoardConfig,
    board: &[u8],
    player: PlayerId,
    from: usize,
) -> Option<usize> {
    let row = &board[config.row(player)];
    row.iter()
        .enumerate()
        .skip(from)
        .find(|&(_, &tokens)| tokens > 0)
        .map(|(start, _)| start)
}
