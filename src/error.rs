//! Error types for configuration, arena storage and search.
//!
//! Illegal moves are not errors: `apply_move` reports them as `None` and the
//! driver never sees one. Only pool exhaustion escapes a running search.

use thiserror::Error;

/// Rejected board or search parameters.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A board needs at least one pit per player.
    #[error("locations per player must be at least 1")]
    ZeroLocations,

    /// Every pit starts with at least one token.
    #[error("initial tokens per location must be at least 1")]
    ZeroTokens,

    /// Board cells are `u8`, so the whole board must fit in one.
    #[error("total token count {total} exceeds the board cell limit of {max}", max = u8::MAX)]
    TooManyTokens {
        /// `2 * locations * tokens`.
        total: usize,
    },

    /// Pools and the frame stack need at least one slot.
    #[error("pool slot count must be at least 1")]
    ZeroPoolSlots,
}

/// Failure to lend out storage.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    /// Every slot of the named pool is occupied.
    #[error("{pool} pool exhausted: all {capacity} slots are in use")]
    Exhausted {
        /// Which pool ran out (`"boards"`, `"frames"`).
        pool: &'static str,
        /// Slot count of that pool.
        capacity: usize,
    },
}

/// Errors surfaced by the search driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The run was configured with invalid parameters.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Storage ran out mid-run; the traversal was aborted.
    #[error("search aborted: {0}")]
    PoolExhausted(#[from] ArenaError),
}

/// Result type for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ArenaError::Exhausted { pool: "boards", capacity: 4 };
        assert_eq!(err.to_string(), "boards pool exhausted: all 4 slots are in use");

        let err = ConfigError::TooManyTokens { total: 300 };
        assert_eq!(
            err.to_string(),
            "total token count 300 exceeds the board cell limit of 255"
        );
    }

    #[test]
    fn test_search_error_from() {
        let err: SearchError = ArenaError::Exhausted { pool: "frames", capacity: 2 }.into();
        assert!(matches!(err, SearchError::PoolExhausted(_)));

        let err: SearchError = ConfigError::ZeroTokens.into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: initial tokens per location must be at least 1"
        );
    }
}
