//! Positions and the store that owns their boards.
//!
//! ## Position
//!
//! A board lease plus the player to move. Positions are move-only: a second,
//! independent copy comes from `PositionStore::clone_position`, and a
//! position ends by being handed back through `PositionStore::release`.
//!
//! ## PositionStore
//!
//! Owns the board pool and applies the rules from `crate::rules` to the
//! boards it lends out.

use smallvec::SmallVec;

use super::config::{BoardConfig, FallbackPolicy};
use super::player::PlayerId;
use crate::arena::{Lease, SlotStore};
use crate::error::ArenaError;
use crate::rules::{self, MoveOutcome, TerminalReason};

/// A game position whose board lives in a `PositionStore`.
#[derive(Debug, PartialEq, Eq)]
pub struct Position {
    board: Lease,
    active_player: PlayerId,
}

impl Position {
    /// The player to move.
    #[inline]
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active_player
    }

    /// Storage backing the board.
    #[inline]
    #[must_use]
    pub fn lease(&self) -> &Lease {
        &self.board
    }
}

/// Board storage and rule application for one run.
#[derive(Debug)]
pub struct PositionStore {
    config: BoardConfig,
    boards: SlotStore<u8>,
}

impl PositionStore {
    /// Create a store with room for `slots` boards before `fallback` applies.
    #[must_use]
    pub fn new(config: BoardConfig, slots: usize, fallback: FallbackPolicy) -> Self {
        Self {
            config,
            boards: SlotStore::new("boards", slots, config.board_size(), fallback),
        }
    }

    /// Board geometry.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// A fresh game: every pit holds the initial tokens, stores are empty,
    /// the first player moves.
    pub fn initial_position(&mut self) -> Result<Position, ArenaError> {
        let lease = self.boards.lease()?;
        let board = self.boards.get_mut(&lease);
        for player in PlayerId::all() {
            board[self.config.row(player)].fill(self.config.initial_tokens());
        }

        Ok(Position {
            board: lease,
            active_player: PlayerId::FIRST,
        })
    }

    /// Deep copy of `source` on a new lease.
    pub fn clone_position(&mut self, source: &Position) -> Result<Position, ArenaError> {
        let lease = self.boards.lease_copy(&source.board)?;

        Ok(Position {
            board: lease,
            active_player: source.active_player,
        })
    }

    /// Play pit `start` of the active player's row.
    ///
    /// `None` means the move is illegal (off the row or an empty pit) and the
    /// position is unchanged. Otherwise the turn passes unless the last token
    /// reached the mover's store.
    pub fn apply_move(&mut self, position: &mut Position, start: usize) -> Option<MoveOutcome> {
        let mover = position.active_player;
        let board = self.boards.get_mut(&position.board);
        let outcome = rules::sow(&self.config, board, mover, start)?;

        if !outcome.is_extra_turn() {
            position.active_player = mover.opponent();
        }
        Some(outcome)
    }

    /// Whether the game is over at `position`.
    #[must_use]
    pub fn is_terminal(&self, position: &Position) -> bool {
        rules::is_terminal(&self.config, self.board(position))
    }

    /// Why the game is over at `position`, if it is.
    #[must_use]
    pub fn terminal_reason(&self, position: &Position) -> Option<TerminalReason> {
        rules::terminal_reason(&self.config, self.board(position))
    }

    /// First playable pit of the active player at or after `from`.
    #[must_use]
    pub fn next_legal_start(&self, position: &Position, from: usize) -> Option<usize> {
        rules::next_legal_start(
            &self.config,
            self.board(position),
            position.active_player,
            from,
        )
    }

    /// Every playable pit of the active player.
    #[must_use]
    pub fn legal_starts(&self, position: &Position) -> SmallVec<[usize; 8]> {
        let mut starts = SmallVec::new();
        let mut from = 0;
        while let Some(start) = self.next_legal_start(position, from) {
            starts.push(start);
            from = start + 1;
        }
        starts
    }

    /// Token counts of `position`'s board.
    #[must_use]
    pub fn board(&self, position: &Position) -> &[u8] {
        self.boards.get(&position.board)
    }

    /// Sum of all cells of `position`'s board.
    #[must_use]
    pub fn token_total(&self, position: &Position) -> usize {
        self.board(position).iter().map(|&t| usize::from(t)).sum()
    }

    /// Return `position`'s board to the pool.
    pub fn release(&mut self, position: Position) {
        self.boards.release(position.board);
    }

    /// Boards currently leased.
    #[must_use]
    pub fn live(&self) -> usize {
        self.boards.live()
    }

    /// Board storage, for pool diagnostics.
    #[must_use]
    pub fn boards(&self) -> &SlotStore<u8> {
        &self.boards
    }

    /// Tear down the board pool.
    pub fn destroy(self) {
        self.boards.destroy();
    }
}
