//! Enumeration statistics.

use serde::{Deserialize, Serialize};

/// Counters collected while walking the game tree.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Terminal positions reached, one per completed game.
    pub games: u64,

    /// Edges traversed (moves applied).
    pub moves: u64,

    /// Shortest completed game, in moves. `None` until a game is measured.
    pub min_game_length: Option<u32>,

    /// Longest completed game, in moves.
    pub max_game_length: Option<u32>,

    /// Sum of the lengths of all measured games.
    pub total_game_length: u64,

    /// Deepest the traversal stack has been.
    pub peak_depth: u32,

    /// Wall time spent enumerating (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Distinct positions visited: every edge leads to one, plus the root.
    #[must_use]
    pub fn positions(&self) -> u64 {
        self.moves + 1
    }

    /// Count one completed game.
    pub fn record_game(&mut self) {
        self.games += 1;
    }

    /// Fold one completed game's length into the length metrics.
    pub fn record_game_length(&mut self, length: usize) {
        let length = u32::try_from(length).unwrap_or(u32::MAX);
        self.min_game_length = Some(self.min_game_length.map_or(length, |m| m.min(length)));
        self.max_game_length = Some(self.max_game_length.map_or(length, |m| m.max(length)));
        self.total_game_length += u64::from(length);
    }

    /// Mean game length, if lengths were measured.
    #[must_use]
    pub fn average_game_length(&self) -> Option<f64> {
        self.min_game_length?;
        if self.games == 0 {
            None
        } else {
            Some(self.total_game_length as f64 / self.games as f64)
        }
    }

    /// Calculate positions per second.
    #[must_use]
    pub fn positions_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.positions() as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
