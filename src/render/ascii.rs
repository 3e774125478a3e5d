//! ASCII box drawing of a board.
//!
//! Player 1's row runs right to left along the top, player 0's row left to
//! right along the bottom, with player 1's store on the left flank and
//! player 0's on the right:
//!
//! ```text
//!  ______ ______ ______ ______
//! |      |      |      |      |
//! |      |   1  |   1  |      |
//! |   0  |______|______|   0  |
//! |      |      |      |      |
//! |      |   1  |   1  |      |
//! |______|______|______|______|
//! ```

use std::fmt::Write as _;
use std::io;

use crate::core::{BoardConfig, PlayerId};
use crate::search::{PositionSink, PositionView};

/// Draw `board` as a box diagram, one line per row, ending in a newline.
#[must_use]
pub fn render_board(config: &BoardConfig, board: &[u8]) -> String {
    let pits = config.locations_per_player();
    let top = config.row(PlayerId::SECOND).rev().map(|i| board[i]);
    let bottom = config.row(PlayerId::FIRST).map(|i| board[i]);

    let mut out = String::new();
    let _ = writeln!(out, " ______ ______ {}", "______ ".repeat(pits));
    let _ = writeln!(out, "|      |      |{}", "      |".repeat(pits));

    out.push_str("|      |");
    for tokens in top {
        let _ = write!(out, "  {tokens:>2}  |");
    }
    out.push_str("      |\n");

    let _ = writeln!(
        out,
        "|  {:>2}  |{}  {:>2}  |",
        board[config.store(PlayerId::SECOND)],
        "______|".repeat(pits),
        board[config.store(PlayerId::FIRST)],
    );
    let _ = writeln!(out, "|      |      |{}", "      |".repeat(pits));

    out.push_str("|      |");
    for tokens in bottom {
        let _ = write!(out, "  {tokens:>2}  |");
    }
    out.push_str("      |\n");

    let _ = writeln!(out, "|______|______|{}", "______|".repeat(pits));
    out
}

/// Sink that draws every visited position to a writer.
///
/// Writing stops at the first I/O error; `finish` reports it.
#[derive(Debug)]
pub struct AsciiRenderer<W: io::Write> {
    config: BoardConfig,
    writer: W,
    error: Option<io::Error>,
    rendered: u64,
}

impl<W: io::Write> AsciiRenderer<W> {
    /// Render boards of `config` geometry into `writer`.
    pub fn new(config: BoardConfig, writer: W) -> Self {
        Self {
            config,
            writer,
            error: None,
            rendered: 0,
        }
    }

    /// Boards written so far.
    #[must_use]
    pub fn rendered(&self) -> u64 {
        self.rendered
    }

    /// Flush and hand back the writer, or the first error hit.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_view(&mut self, view: &PositionView<'_>) -> io::Result<()> {
        let status = if view.terminal { ", game over" } else { "" };
        writeln!(
            self.writer,
            "depth {}: {} to move{status}",
            view.depth, view.active_player
        )?;
        writeln!(self.writer, "{}", render_board(&self.config, view.board))
    }
}

impl<W: io::Write> PositionSink for AsciiRenderer<W> {
    fn visit(&mut self, view: PositionView<'_>) {
        if self.error.is_some() {
            return;
        }

        match self.write_view(&view) {
            Ok(()) => self.rendered += 1,
            Err(err) => {
                tracing::warn!(%err, "board output failed, further boards are dropped");
                self.error = Some(err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_minimal_board() {
        let config = BoardConfig::new(1, 1).unwrap();
        let expected = concat!(
            " ______ ______ ______ \n",
            "|      |      |      |\n",
            "|      |   1  |      |\n",
            "|   0  |______|   0  |\n",
            "|      |      |      |\n",
            "|      |   1  |      |\n",
            "|______|______|______|\n",
        );

        assert_eq!(render_board(&config, &[1, 0, 1, 0]), expected);
    }

    #[test]
    fn test_render_orientation() {
        let config = BoardConfig::new(2, 3).unwrap();
        // Pits 3 and 4 belong to player 1 and are drawn right to left.
        let rendered = render_board(&config, &[1, 2, 10, 3, 4, 0]);
        let lines: Vec<_> = rendered.lines().collect();

        assert_eq!(lines[2], "|      |   4  |   3  |      |");
        assert_eq!(lines[3], "|   0  |______|______|  10  |");
        assert_eq!(lines[5], "|      |   1  |   2  |      |");
    }

    #[test]
    fn test_renderer_writes_each_view() {
        let config = BoardConfig::new(1, 1).unwrap();
        let mut renderer = AsciiRenderer::new(config, Vec::new());

        renderer.visit(PositionView {
            board: &[0, 1, 1, 0],
            active_player: PlayerId::FIRST,
            depth: 1,
            terminal: true,
        });
        assert_eq!(renderer.rendered(), 1);

        let output = String::from_utf8(renderer.finish().unwrap()).unwrap();
        assert!(output.starts_with("depth 1: Player 0 to move, game over\n"));
        assert!(output.ends_with("|______|______|______|\n\n"));
    }

    #[derive(Debug)]
    struct FailingWriter;

    impl io::Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_renderer_keeps_first_error() {
        let config = BoardConfig::new(1, 1).unwrap();
        let mut renderer = AsciiRenderer::new(config, FailingWriter);
        let view = PositionView {
            board: &[1, 0, 1, 0],
            active_player: PlayerId::FIRST,
            depth: 0,
            terminal: false,
        };

        renderer.visit(view);
        renderer.visit(view);

        assert_eq!(renderer.rendered(), 0);
        let err = renderer.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
