//! Iterative pre-order enumeration of the game tree.
//!
//! The driver holds one current frame outside the stack. Each step either
//! tries one more move of that frame or, when the frame has nothing left,
//! releases it and resumes its parent from the stack. Memory is bounded by
//! the longest game, not by the size of the tree.

use std::time::Instant;

use super::frame::SearchFrame;
use super::sink::{PositionSink, PositionView};
use super::stack::TraversalStack;
use super::stats::SearchStats;
use crate::core::{BoardConfig, Position, PositionStore, SearchConfig};
use crate::error::{ArenaError, SearchError, SearchResult};

/// Outcome of a single `Enumerator::step`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// One move was applied and its child counted.
    Expanded,
    /// An exhausted frame was released and its parent resumed.
    Retreated,
    /// The traversal is complete.
    Done,
}

/// Outcome of a bounded `Enumerator::run_for`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Progress {
    /// The step budget ran out; call again to continue.
    Suspended,
    /// The traversal is complete.
    Finished,
}

/// Everything a finished run hands back.
#[derive(Debug)]
pub struct SearchReport<S> {
    /// Final counters.
    pub stats: SearchStats,
    /// The sink, with whatever it accumulated.
    pub sink: S,
}

/// Exhaustive game-tree walker.
///
/// Owns the board store and the traversal stack for one run; both are torn
/// down when the run finishes or aborts.
pub struct Enumerator<S: PositionSink> {
    positions: PositionStore,
    stack: TraversalStack,
    current: Option<SearchFrame>,
    sink: S,
    stats: SearchStats,
    collect_metrics: bool,
}

impl<S: PositionSink> Enumerator<S> {
    /// Prepare a run from the initial position of `board`.
    ///
    /// The root is reported to `sink` at depth 0 before this returns.
    pub fn new(board: BoardConfig, settings: &SearchConfig, mut sink: S) -> SearchResult<Self> {
        settings.validate()?;

        tracing::debug!(
            locations = board.locations_per_player(),
            tokens = board.initial_tokens(),
            pool_slots = settings.pool_slots,
            fallback = ?settings.fallback,
            "starting enumeration"
        );

        let mut positions = PositionStore::new(board, settings.pool_slots, settings.fallback);
        let root = positions.initial_position()?;
        visit(&mut sink, &positions, &root, 0);

        Ok(Self {
            positions,
            stack: TraversalStack::with_capacity(settings.pool_slots, settings.fallback),
            current: Some(SearchFrame::new(root)),
            sink,
            stats: SearchStats::default(),
            collect_metrics: settings.collect_metrics,
        })
    }

    /// Perform exactly one transition of the traversal.
    ///
    /// On error every live board has been returned to the store and the
    /// enumerator is done.
    pub fn step(&mut self) -> SearchResult<Step> {
        let Some(frame) = self.current.as_mut() else {
            return Ok(Step::Done);
        };

        let Some(start) = frame.claim_next(&self.positions) else {
            return Ok(self.retreat());
        };

        let mut child = match self.positions.clone_position(&frame.position) {
            Ok(child) => child,
            Err(err) => return Err(self.abort(err)),
        };
        if self.positions.apply_move(&mut child, start).is_none() {
            unreachable!("start {start} was reported playable but the move was rejected");
        }

        self.stats.moves += 1;
        let depth = self.stack.depth() + 1;
        let terminal = visit(&mut self.sink, &self.positions, &child, depth);

        if terminal {
            self.stats.record_game();
            if self.collect_metrics {
                self.stats.record_game_length(depth);
            }
            self.positions.release(child);
            return Ok(Step::Expanded);
        }

        if let Some(parent) = self.current.take() {
            if let Err((parent, err)) = self.stack.push(parent) {
                parent.release(&mut self.positions);
                self.positions.release(child);
                return Err(self.abort(err));
            }
        }
        self.current = Some(SearchFrame::new(child));
        self.stats.peak_depth = self.stack.peak_depth() as u32;

        Ok(Step::Expanded)
    }

    /// Perform up to `max_steps` transitions.
    ///
    /// The traversal can be resumed by calling this again; the result is the
    /// same as one uninterrupted `run`.
    pub fn run_for(&mut self, max_steps: usize) -> SearchResult<Progress> {
        let started = Instant::now();
        let mut outcome = Ok(());

        for _ in 0..max_steps {
            match self.step() {
                Ok(Step::Done) => break,
                Ok(_) => {}
                Err(err) => {
                    outcome = Err(err);
                    break;
                }
            }
        }

        self.stats.time_us += started.elapsed().as_micros() as u64;
        outcome?;

        Ok(if self.is_done() {
            Progress::Finished
        } else {
            Progress::Suspended
        })
    }

    /// Walk the whole tree and hand back the statistics and the sink.
    pub fn run(mut self) -> SearchResult<SearchReport<S>> {
        while self.run_for(usize::MAX)? == Progress::Suspended {}

        self.positions.destroy();
        Ok(SearchReport {
            stats: self.stats,
            sink: self.sink,
        })
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Depth of the current frame below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Whether the traversal has finished or aborted.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.current.is_none()
    }

    /// Boards currently leased from the store.
    #[must_use]
    pub fn live_boards(&self) -> usize {
        self.positions.live()
    }

    /// Board geometry of this run.
    #[must_use]
    pub fn board_config(&self) -> &BoardConfig {
        self.positions.config()
    }

    fn retreat(&mut self) -> Step {
        if let Some(frame) = self.current.take() {
            frame.release(&mut self.positions);
        }
        self.current = self.stack.pop();

        if self.current.is_some() {
            return Step::Retreated;
        }

        tracing::info!(
            games = self.stats.games,
            positions = self.stats.positions(),
            peak_depth = self.stats.peak_depth,
            "enumeration finished"
        );
        Step::Done
    }

    fn abort(&mut self, err: ArenaError) -> SearchError {
        tracing::error!(%err, depth = self.stack.depth(), "aborting enumeration");

        if let Some(frame) = self.current.take() {
            frame.release(&mut self.positions);
        }
        for frame in self.stack.drain() {
            frame.release(&mut self.positions);
        }
        debug_assert_eq!(self.positions.live(), 0);

        SearchError::PoolExhausted(err)
    }
}

/// Report `position` to `sink`, returning whether it is terminal.
fn visit<S: PositionSink>(
    sink: &mut S,
    positions: &PositionStore,
    position: &Position,
    depth: usize,
) -> bool {
    let terminal = positions.is_terminal(position);
    sink.visit(PositionView {
        board: positions.board(position),
        active_player: position.active_player(),
        depth,
        terminal,
    });
    terminal
}
