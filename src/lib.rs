//! Minesweeper game-state engine: grid geometry, mine placement,
//! flood-fill reveal, flag bookkeeping, and win/lose evaluation. Rendering
//! and input translation live with the caller, which polls observable
//! state after each action.

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use error::*;
pub use game::*;
pub use grid::*;

mod board;
mod cell;
mod clock;
mod error;
mod game;
mod grid;

/// Board dimensions and mine count for a new session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// 8x8 with 10 mines.
    pub const BEGINNER: Self = Self::new_unchecked((8, 8), 10);
    /// 16x16 with 40 mines.
    pub const INTERMEDIATE: Self = Self::new_unchecked((16, 16), 40);
    /// 30x16 with 99 mines.
    pub const EXPERT: Self = Self::new_unchecked((30, 16), 99);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Clamps each axis to at least one cell. The mine count is checked at
    /// board construction, not here.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.clamp(1, Coord::MAX);
        let size_y = size_y.clamp(1, Coord::MAX);
        Self::new_unchecked((size_x, size_y), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Largest accepted mine count, `(width-1) * (height-1)`. Keeps at
    /// least one safe area on the board.
    pub const fn max_mines(&self) -> CellCount {
        mult(
            self.size.0.saturating_sub(1),
            self.size.1.saturating_sub(1),
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::BEGINNER
    }
}
