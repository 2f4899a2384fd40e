use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Board, CellCount, CellView, Coord2, GameClock, GameConfig, Result};

/// Session outcome. Valid transitions:
/// - Fresh -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// [`Game::reset`] returns to Fresh from any state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// No cell interacted with yet, clock not running.
    Fresh,
    InProgress,
    Won,
    Lost,
}

impl Outcome {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    /// The game has ended and no further moves are accepted.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::Fresh
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Outcome of a reveal action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// One play session: a board plus the player-facing state around it.
///
/// Every action runs to completion before returning and leaves the board
/// consistent; the only fallible step is board construction. Actions whose
/// preconditions do not hold (flagged cell, finished game, out-of-range
/// coordinates) are silent no-ops, since they are ordinary player input.
///
/// A `Game` is a plain owned value with no internal locking; a concurrent
/// host must treat the whole value as one unit behind its own exclusion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    remaining_flags: i32,
    clock: GameClock,
    outcome: Outcome,
    mines_visible: bool,
}

impl Game {
    /// Wraps a constructed board into a fresh session.
    pub fn new(board: Board) -> Self {
        let remaining_flags = i32::from(board.mine_count());
        Self {
            board,
            remaining_flags,
            clock: GameClock::new(),
            outcome: Outcome::default(),
            mines_visible: false,
        }
    }

    /// Builds the board and the session in one step.
    pub fn from_config(config: GameConfig) -> Result<Self> {
        Ok(Self::new(Board::new(config)?))
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Flag budget still unused. Goes negative when the player places more
    /// flags than there are mines; that is a display signal, not an error.
    pub fn remaining_flags(&self) -> i32 {
        self.remaining_flags
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.clock.elapsed_secs()
    }

    pub fn mines_visible(&self) -> bool {
        self.mines_visible
    }

    /// What the player currently sees at `coords`.
    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.board.view(coords)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Reveals a cell. Hitting a mine ends the session as [`Outcome::Lost`]
    /// with every mine exposed; clearing the last safe cell ends it as
    /// [`Outcome::Won`]. No-op on finished games and on flagged or
    /// already-revealed cells.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        if self.outcome.is_terminal() || !self.board.in_bounds(coords) {
            return NoChange;
        }
        let cell = self.board.cell(coords);
        if cell.is_flagged() || cell.is_revealed() {
            return NoChange;
        }

        self.begin();

        if cell.is_mine {
            self.board.reveal_all_mines();
            self.finish(Outcome::Lost);
            return HitMine;
        }

        self.board.reveal_area(coords);
        if self.board.has_winner() {
            self.finish(Outcome::Won);
            Won
        } else {
            Revealed
        }
    }

    /// Flips the flag on an unrevealed cell and adjusts the remaining-flag
    /// counter by one in the matching direction. No-op on finished games
    /// and on revealed cells.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        use MarkOutcome::*;

        if self.outcome.is_terminal() || !self.board.in_bounds(coords) {
            return NoChange;
        }
        if self.board.cell(coords).is_revealed() {
            return NoChange;
        }

        self.begin();

        if self.board.toggle_flag(coords) {
            self.remaining_flags -= 1;
        } else {
            self.remaining_flags += 1;
        }
        Changed
    }

    /// Starts a fresh session on the same game value: new random mine
    /// layout, full flag budget, clock back to zero. Works from any state.
    pub fn reset(&mut self) {
        self.reset_with(&mut rand::rng());
    }

    /// [`reset`](Game::reset) with a caller-supplied RNG.
    pub fn reset_with(&mut self, rng: &mut impl Rng) {
        self.board.reset_with(rng);
        self.remaining_flags = i32::from(self.board.mine_count());
        self.clock.reset();
        self.outcome = Outcome::Fresh;
        if self.mines_visible {
            self.board.reveal_all_mines();
        }
        log::debug!("session reset");
    }

    /// Debug toggle: exposes or hides mine positions without touching the
    /// revealed state or the outcome. Sticky across [`reset`](Game::reset)
    /// until switched off.
    pub fn set_mine_visibility(&mut self, visible: bool) {
        self.mines_visible = visible;
        if visible {
            self.board.reveal_all_mines();
        } else {
            self.board.conceal_mines();
        }
    }

    /// First interaction of any kind starts the session and the clock.
    fn begin(&mut self) {
        if self.outcome.is_fresh() {
            self.outcome = Outcome::InProgress;
            self.clock.start();
            log::debug!("session started");
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        self.clock.stop();
        log::debug!("session ended: {outcome:?}");
    }
}
