//! Kalah rules: sowing, capture, extra turns and the game-over test.
//!
//! The functions here are pure transitions over a board slice. Storage and
//! ownership of boards live in `core::position`.

pub mod kalah;

pub use kalah::{is_terminal, next_legal_start, sow, terminal_reason, MoveOutcome, TerminalReason};
