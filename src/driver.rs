//! Control loop: capture the board region, classify it, search, and click the move.
//!
//! The screen, the pointer and the stop key are collaborators behind traits, so the
//! loop runs the same against a real desktop backend or an in-process simulation.

use crate::capture::{classify_board, Frame, GridRegion};
use crate::engine::Board;
use crate::error::Result;
use crate::palette::Palette;
use crate::search::{find_move, Move, SearchMode};
use log::{debug, info};
use std::thread;
use std::time::Duration;

/// Source of frames showing the board region.
pub trait ScreenSource {
    fn capture(&mut self, region: &GridRegion) -> Result<Frame>;
}

/// Receives clicks in screen coordinates.
pub trait Pointer {
    fn click(&mut self, x: i32, y: i32) -> Result<()>;
}

/// Polled once per cycle; `true` ends the loop.
pub trait StopSignal {
    fn should_stop(&self) -> bool;
}

impl<F: Fn() -> bool> StopSignal for F {
    fn should_stop(&self) -> bool {
        self()
    }
}

/// Timing and search settings for the loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutoplayConfig {
    /// Wait at the start of every cycle.
    pub poll_delay: Duration,
    /// Wait between the source click and the destination click.
    pub click_delay: Duration,
    /// Extra wait after playing the same move two cycles in a row.
    pub repeat_backoff: Duration,
    pub search_mode: SearchMode,
    /// Stop after this many cycles. `None` runs until the stop signal fires.
    pub max_cycles: Option<u64>,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig {
            poll_delay: Duration::from_millis(100),
            click_delay: Duration::from_millis(100),
            repeat_backoff: Duration::from_millis(200),
            search_mode: SearchMode::Parallel,
            max_cycles: None,
        }
    }
}

impl AutoplayConfig {
    /// Default settings with every delay set to zero.
    pub fn without_delays() -> Self {
        AutoplayConfig {
            poll_delay: Duration::ZERO,
            click_delay: Duration::ZERO,
            repeat_backoff: Duration::ZERO,
            ..Default::default()
        }
    }
}

/// What a single cycle did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No scoring move on the observed board; nothing was clicked.
    Idle,
    /// The move was played.
    Moved(Move),
    /// The move was played and equals the previous cycle's move.
    Repeated(Move),
}

/// Counters for one `run`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub cycles: u64,
    pub moves: u64,
    pub idle_cycles: u64,
    pub repeated_moves: u64,
}

pub struct Autoplayer<S, P> {
    screen: S,
    pointer: P,
    region: GridRegion,
    palette: Palette,
    config: AutoplayConfig,
    last_move: Option<Move>,
    stats: SessionStats,
}

fn pause(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

impl<S: ScreenSource, P: Pointer> Autoplayer<S, P> {
    pub fn new(screen: S, pointer: P, region: GridRegion, palette: Palette, config: AutoplayConfig) -> Self {
        Autoplayer {
            screen,
            pointer,
            region,
            palette,
            config,
            last_move: None,
            stats: SessionStats::default(),
        }
    }

    /// Captures the region and classifies it into a fresh board.
    pub fn observe(&mut self) -> Result<Board> {
        let frame = self.screen.capture(&self.region)?;
        Ok(classify_board(&frame, &self.palette))
    }

    /// Clicks the center of the source cell, waits, then clicks the destination cell.
    pub fn perform_move(&mut self, mv: Move) -> Result<()> {
        let (sx, sy) = self.region.cell_center(mv.src_row, mv.src_col);
        let (dx, dy) = self.region.cell_center(mv.dst_row, mv.dst_col);
        self.pointer.click(sx, sy)?;
        pause(self.config.click_delay);
        self.pointer.click(dx, dy)
    }

    /// Runs one capture, search and act cycle.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome> {
        pause(self.config.poll_delay);
        let mut board = self.observe()?;
        self.stats.cycles += 1;

        let Some(mv) = find_move(&mut board, self.config.search_mode) else {
            debug!("No scoring move on a board with {} tiles", board.count_non_empty());
            self.stats.idle_cycles += 1;
            return Ok(CycleOutcome::Idle);
        };

        info!("Performing move: {}", mv);
        self.perform_move(mv)?;
        self.stats.moves += 1;

        let repeated = self.last_move == Some(mv);
        self.last_move = Some(mv);
        if repeated {
            debug!("Move {} repeats the previous cycle, backing off", mv);
            self.stats.repeated_moves += 1;
            pause(self.config.repeat_backoff);
            Ok(CycleOutcome::Repeated(mv))
        } else {
            Ok(CycleOutcome::Moved(mv))
        }
    }

    /// Cycles until `stop` fires or `max_cycles` is reached.
    ///
    /// The stop signal is checked after each cycle. Errors from the collaborators end
    /// the loop and are returned as is.
    pub fn run(&mut self, stop: &impl StopSignal) -> Result<SessionStats> {
        self.stats = SessionStats::default();
        loop {
            if self
                .config
                .max_cycles
                .is_some_and(|max| self.stats.cycles >= max)
            {
                break;
            }
            self.run_cycle()?;
            if stop.should_stop() {
                info!("Stop requested after {} cycles", self.stats.cycles);
                break;
            }
        }
        Ok(self.stats)
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn pointer(&self) -> &P {
        &self.pointer
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }
}
