//! Text rendering of boards.

pub mod ascii;

pub use ascii::{render_board, AsciiRenderer};
