//! Run configuration.
//!
//! - `BoardConfig`: board geometry and thresholds, derived once from the two
//!   input integers and passed by reference to every rule operation.
//! - `SearchConfig`: pool sizing, fallback policy and output toggles.
//!
//! Both are immutable for the lifetime of a run.

use serde::{Deserialize, Serialize};

use super::PlayerId;
use super::PlayerMap;
use crate::error::ConfigError;

/// Board geometry for one run.
///
/// Layout of a board with `L` locations per player:
///
/// ```text
/// [0, L)        player 0 pits
/// L             player 0 store
/// (L, 2L]       player 1 pits
/// 2L + 1        player 1 store
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoardConfig {
    locations_per_player: usize,
    initial_tokens: u8,
    board_size: usize,
    stores: PlayerMap<usize>,
    winning_threshold: u8,
}

impl BoardConfig {
    /// Derive the geometry for `locations_per_player` pits per side, each
    /// starting with `initial_tokens`.
    pub fn new(locations_per_player: usize, initial_tokens: usize) -> Result<Self, ConfigError> {
        if locations_per_player == 0 {
            return Err(ConfigError::ZeroLocations);
        }
        if initial_tokens == 0 {
            return Err(ConfigError::ZeroTokens);
        }

        let total = locations_per_player
            .checked_mul(initial_tokens)
            .and_then(|half| half.checked_mul(2))
            .unwrap_or(usize::MAX);
        if total > usize::from(u8::MAX) {
            return Err(ConfigError::TooManyTokens { total });
        }

        let board_size = 2 * (locations_per_player + 1);
        Ok(Self {
            locations_per_player,
            initial_tokens: initial_tokens as u8,
            board_size,
            stores: PlayerMap::new(|p| p.index() * (locations_per_player + 1) + locations_per_player),
            winning_threshold: (total / 2) as u8,
        })
    }

    /// Pits per player, excluding the store.
    #[inline]
    #[must_use]
    pub fn locations_per_player(&self) -> usize {
        self.locations_per_player
    }

    /// Tokens initially placed in every pit.
    #[inline]
    #[must_use]
    pub fn initial_tokens(&self) -> u8 {
        self.initial_tokens
    }

    /// Number of board cells, stores included.
    #[inline]
    #[must_use]
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Board index of a player's store.
    #[inline]
    #[must_use]
    pub fn store(&self, player: PlayerId) -> usize {
        self.stores[player]
    }

    /// Board index range of a player's pits.
    #[inline]
    #[must_use]
    pub fn row(&self, player: PlayerId) -> std::ops::Range<usize> {
        let start = player.index() * (self.locations_per_player + 1);
        start..start + self.locations_per_player
    }

    /// Board index of a player's `start`-th pit.
    #[inline]
    #[must_use]
    pub fn pit(&self, player: PlayerId, start: usize) -> usize {
        player.index() * (self.locations_per_player + 1) + start
    }

    /// Index of the pit facing `index` across the board.
    #[inline]
    #[must_use]
    pub fn opposite(&self, index: usize) -> usize {
        self.board_size - 2 - index
    }

    /// Half of all tokens. A store holding more than this has won.
    #[inline]
    #[must_use]
    pub fn winning_threshold(&self) -> u8 {
        self.winning_threshold
    }

    /// Tokens on the board, constant for the whole run.
    #[inline]
    #[must_use]
    pub fn total_tokens(&self) -> usize {
        2 * usize::from(self.winning_threshold)
    }
}

/// What a store does when its pool runs out of slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Exhaustion aborts the run with `SearchError::PoolExhausted`.
    #[default]
    Fail,
    /// Exhaustion spills new leases to the heap.
    Heap,
    /// Skip the pools and lease everything from the heap.
    HeapOnly,
}

/// Search settings decided once at startup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Slots in the board pool and depth capacity of the frame stack.
    pub pool_slots: usize,

    /// Behavior when a pool is exhausted.
    pub fallback: FallbackPolicy,

    /// Track min/max/total game length.
    pub collect_metrics: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pool_slots: 64,
            fallback: FallbackPolicy::Fail,
            collect_metrics: true,
        }
    }
}

impl SearchConfig {
    /// Set the pool slot count.
    #[must_use]
    pub fn with_pool_slots(mut self, slots: usize) -> Self {
        self.pool_slots = slots;
        self
    }

    /// Set the fallback policy.
    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Enable or disable game-length metrics.
    #[must_use]
    pub fn with_metrics(mut self, collect: bool) -> Self {
        self.collect_metrics = collect;
        self
    }

    /// Check the settings before any pool is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_slots == 0 {
            return Err(ConfigError::ZeroPoolSlots);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board() {
        let config = BoardConfig::new(6, 4).unwrap();

        assert_eq!(config.board_size(), 14);
        assert_eq!(config.store(PlayerId::FIRST), 6);
        assert_eq!(config.store(PlayerId::SECOND), 13);
        assert_eq!(config.row(PlayerId::FIRST), 0..6);
        assert_eq!(config.row(PlayerId::SECOND), 7..13);
        assert_eq!(config.winning_threshold(), 24);
        assert_eq!(config.total_tokens(), 48);
    }

    #[test]
    fn test_pit_and_opposite() {
        let config = BoardConfig::new(2, 1).unwrap();

        assert_eq!(config.pit(PlayerId::FIRST, 1), 1);
        assert_eq!(config.pit(PlayerId::SECOND, 0), 3);
        assert_eq!(config.opposite(1), 3);
        assert_eq!(config.opposite(0), 4);
        assert_eq!(config.opposite(4), 0);
    }

    #[test]
    fn test_rejects_bad_geometry() {
        assert_eq!(BoardConfig::new(0, 4), Err(ConfigError::ZeroLocations));
        assert_eq!(BoardConfig::new(6, 0), Err(ConfigError::ZeroTokens));
        assert_eq!(
            BoardConfig::new(8, 16),
            Err(ConfigError::TooManyTokens { total: 256 })
        );
        assert!(BoardConfig::new(5, 25).is_ok());
    }

    #[test]
    fn test_search_config_builder() {
        let config = SearchConfig::default()
            .with_pool_slots(8)
            .with_fallback(FallbackPolicy::Heap)
            .with_metrics(false);

        assert_eq!(config.pool_slots, 8);
        assert_eq!(config.fallback, FallbackPolicy::Heap);
        assert!(!config.collect_metrics);
        assert!(config.validate().is_ok());
        assert_eq!(
            SearchConfig::default().with_pool_slots(0).validate(),
            Err(ConfigError::ZeroPoolSlots)
        );
    }

    #[test]
    fn test_serialization() {
        let config = SearchConfig::default().with_fallback(FallbackPolicy::HeapOnly);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"heap-only\""));

        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
