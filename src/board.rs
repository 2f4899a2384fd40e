use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::grid::nd;
use crate::{Cell, CellCount, CellView, ConfigError, Coord2, GameConfig, Grid, Result};

/// Owns every cell of a single minefield: mine placement, adjacency
/// counting, flood-fill reveal, and win detection.
///
/// Exactly `mine_count` cells carry a mine from construction until the
/// next [`reset_with`](Board::reset_with); mines never move mid-game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Grid,
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
}

impl Board {
    /// Builds a board and places `config.mines` mines from the thread RNG.
    ///
    /// Fails when the mine count exceeds `(width-1) * (height-1)`; the
    /// bound keeps at least one safe area on the board. The boundary value
    /// itself is accepted.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_rng(config, &mut rand::rng())
    }

    /// Same as [`new`](Board::new) with a caller-supplied RNG, so layouts
    /// can be reproduced from a seed.
    pub fn with_rng(config: GameConfig, rng: &mut impl Rng) -> Result<Self> {
        let max = config.max_mines();
        if config.mines > max {
            return Err(ConfigError::TooManyMines {
                mines: config.mines,
                max,
            });
        }

        let grid = Grid::new(config.size.0, config.size.1);
        let mut board = Self {
            grid,
            cells: Array2::default(grid.dim()),
            mine_count: config.mines,
            revealed_count: 0,
        };
        board.place_mines(rng);
        Ok(board)
    }

    /// Builds a board with an explicit mine layout. Duplicate coordinates
    /// collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let grid = Grid::new(size.0, size.1);
        let mut cells: Array2<Cell> = Array2::default(grid.dim());

        for &coords in mine_coords {
            if !grid.in_bounds(coords) {
                return Err(ConfigError::MineOutOfBounds);
            }
            cells[nd(coords)].is_mine = true;
        }

        let mine_count = cells.iter().filter(|cell| cell.is_mine).count() as CellCount;
        Ok(Self {
            grid,
            cells,
            mine_count,
            revealed_count: 0,
        })
    }

    /// Uniform sampling without replacement: draw positions from the full
    /// grid, skipping ones already mined, until the quota is met. The
    /// construction bound guarantees free cells remain, so this terminates.
    fn place_mines(&mut self, rng: &mut impl Rng) {
        let mut remaining = self.mine_count;
        while remaining > 0 {
            let x = rng.random_range(0..self.grid.width());
            let y = rng.random_range(0..self.grid.height());
            let cell = &mut self.cells[nd((x, y))];
            if !cell.is_mine {
                cell.is_mine = true;
                remaining -= 1;
            }
        }
        log::debug!(
            "placed {} mines on a {}x{} board",
            self.mine_count,
            self.grid.width(),
            self.grid.height()
        );
    }

    /// Reinitializes every cell and draws a fresh mine layout of the same
    /// size from `rng`.
    pub fn reset_with(&mut self, rng: &mut impl Rng) {
        self.cells.fill(Cell::default());
        self.revealed_count = 0;
        self.place_mines(rng);
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        self.grid.in_bounds(coords)
    }

    pub fn total_cells(&self) -> CellCount {
        self.grid.total_cells()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub(crate) fn cell(&self, coords: Coord2) -> Cell {
        self.cells[nd(coords)]
    }

    /// Player-facing projection of the cell at `coords`.
    pub fn view(&self, coords: Coord2) -> CellView {
        self.cell(coords).view(self.adjacent_mine_count(coords))
    }

    /// Count of mined neighbor positions, in `[0, 8]`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.grid
            .neighbors(coords)
            .filter(|&pos| self.cells[nd(pos)].is_mine)
            .count() as u8
    }

    /// Flips the flag at `coords` and returns the new flag state.
    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[nd(coords)];
        cell.is_flagged = !cell.is_flagged;
        cell.is_flagged
    }

    /// Reveals `start` and, when its adjacent-mine count is zero, the whole
    /// connected zero region plus its numbered rim.
    ///
    /// The expansion runs over an explicit worklist, so the call stack
    /// stays flat on large boards, and the already-revealed filter bounds
    /// it to one visit per cell. Flagged cells are never revealed; they
    /// must be unflagged first. Callers guarantee `start` is not a mine;
    /// a mine hit is a distinct terminal action handled by the session
    /// layer. Revealing an already-revealed region changes nothing.
    pub fn reveal_area(&mut self, start: Coord2) {
        if self.cells[nd(start)].is_flagged {
            return;
        }
        self.reveal_single(start);

        if self.adjacent_mine_count(start) > 0 {
            return;
        }

        let mut visited = HashSet::from([start]);
        let mut to_visit: VecDeque<Coord2> = self
            .grid
            .neighbors(start)
            .filter(|&pos| {
                let cell = self.cells[nd(pos)];
                !cell.is_revealed && !cell.is_flagged
            })
            .collect();
        log::trace!("flood fill from {start:?}, initial rim: {to_visit:?}");

        while let Some(visit) = to_visit.pop_front() {
            if !visited.insert(visit) {
                continue;
            }
            if !self.reveal_single(visit) {
                continue;
            }

            // a zero cell has no mined neighbors, so expansion can never
            // walk onto a mine
            if self.adjacent_mine_count(visit) == 0 {
                to_visit.extend(
                    self.grid
                        .neighbors(visit)
                        .filter(|&pos| {
                            let cell = self.cells[nd(pos)];
                            !cell.is_revealed && !cell.is_flagged
                        })
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Marks one cell revealed. Returns false for flagged or
    /// already-revealed cells, which stay untouched.
    fn reveal_single(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[nd(coords)];
        if cell.is_revealed || cell.is_flagged {
            return false;
        }
        cell.is_revealed = true;
        self.revealed_count += 1;
        log::trace!("revealed {coords:?}");
        true
    }

    /// The win condition: every non-mine cell has been revealed. Flags play
    /// no part in this.
    pub fn has_winner(&self) -> bool {
        self.total_cells() - self.revealed_count == self.mine_count
    }

    /// Sets the shown-as-mine display bit on every mine. Used on loss and
    /// by the debug visibility toggle; does not touch the revealed state.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.is_mine {
                cell.is_exposed = true;
            }
        }
    }

    /// Clears the shown-as-mine display bit everywhere.
    pub fn conceal_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            cell.is_exposed = false;
        }
    }

    #[cfg(test)]
    pub(crate) fn mine_positions(&self) -> Vec<Coord2> {
        let (width, height) = self.size();
        let mut positions = Vec::new();
        for x in 0..width {
            for y in 0..height {
                if self.cells[nd((x, y))].is_mine {
                    positions.push((x, y));
                }
            }
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded(config: GameConfig, seed: u64) -> Board {
        Board::with_rng(config, &mut StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn placement_yields_exact_mine_count() {
        for seed in 0..8 {
            let board = seeded(GameConfig::BEGINNER, seed);
            assert_eq!(board.mine_positions().len(), 10);
        }
    }

    #[test]
    fn mine_count_bound_is_enforced_at_the_boundary() {
        assert!(Board::new(GameConfig::new_unchecked((8, 8), 49)).is_ok());
        assert_eq!(
            Board::new(GameConfig::new_unchecked((8, 8), 50)).unwrap_err(),
            ConfigError::TooManyMines { mines: 50, max: 49 }
        );
    }

    #[test]
    fn explicit_layout_rejects_out_of_bounds_mines() {
        assert_eq!(
            Board::from_mine_coords((4, 4), &[(4, 0)]).unwrap_err(),
            ConfigError::MineOutOfBounds
        );
    }

    #[test]
    fn mines_never_move_during_play() {
        let mut board = Board::from_mine_coords((8, 8), &[(0, 0), (7, 7)]).unwrap();
        board.toggle_flag((3, 3));
        board.reveal_area((0, 7));
        assert_eq!(board.mine_positions(), vec![(0, 0), (7, 7)]);
    }

    #[test]
    fn adjacent_mine_counts() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        assert_eq!(board.adjacent_mine_count((1, 1)), 2);
        assert_eq!(board.adjacent_mine_count((0, 1)), 1);
        assert_eq!(board.adjacent_mine_count((2, 0)), 0);
    }

    #[test]
    fn reveal_area_opens_everything_but_the_mine() {
        let mut board = Board::from_mine_coords((8, 8), &[(0, 0)]).unwrap();
        board.reveal_area((7, 7));
        assert_eq!(board.revealed_count(), 63);
        assert_eq!(board.view((0, 0)), CellView::Hidden);
        assert_eq!(board.view((1, 1)), CellView::Revealed(1));
        assert!(board.has_winner());
    }

    #[test]
    fn reveal_area_stops_at_numbered_cells() {
        // mines on one row guard the far side of a 3-wide board
        let mut board = Board::from_mine_coords((3, 5), &[(0, 2), (1, 2), (2, 2)]).unwrap();
        board.reveal_area((1, 0));
        assert_eq!(board.view((1, 1)), CellView::Revealed(3));
        assert_eq!(board.view((1, 3)), CellView::Hidden);
        assert_eq!(board.view((1, 4)), CellView::Hidden);
        assert_eq!(board.revealed_count(), 6);
    }

    #[test]
    fn reveal_area_is_idempotent() {
        let mut board = Board::from_mine_coords((4, 4), &[(0, 0)]).unwrap();
        board.reveal_area((3, 3));
        let snapshot = board.clone();
        board.reveal_area((3, 3));
        assert_eq!(board, snapshot);
    }

    #[test]
    fn reveal_area_skips_flagged_cells() {
        let mut board = Board::from_mine_coords((4, 4), &[(0, 0)]).unwrap();
        board.toggle_flag((2, 2));
        board.reveal_area((3, 3));
        assert_eq!(board.view((2, 2)), CellView::Flagged);
        assert_eq!(board.revealed_count(), 14);
    }

    #[test]
    fn reveal_area_on_a_flagged_cell_is_a_no_op() {
        let mut board = Board::from_mine_coords((4, 4), &[(0, 0)]).unwrap();
        board.toggle_flag((3, 3));
        board.reveal_area((3, 3));
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn has_winner_ignores_flags() {
        let mut board = Board::from_mine_coords((2, 1), &[(0, 0)]).unwrap();
        board.toggle_flag((0, 0));
        assert!(!board.has_winner());
        board.reveal_area((1, 0));
        assert!(board.has_winner());
    }

    #[test]
    fn reveal_all_mines_is_display_only() {
        let mut board = Board::from_mine_coords((3, 3), &[(1, 1)]).unwrap();
        board.reveal_all_mines();
        assert_eq!(board.view((1, 1)), CellView::Mine);
        assert_eq!(board.revealed_count(), 0);
        assert!(!board.has_winner());

        board.conceal_mines();
        assert_eq!(board.view((1, 1)), CellView::Hidden);
    }

    #[test]
    fn reset_redraws_the_layout() {
        let mut board = seeded(GameConfig::BEGINNER, 1);
        let before = board.mine_positions();
        board.reset_with(&mut StdRng::seed_from_u64(2));
        assert_eq!(board.mine_positions().len(), 10);
        assert_ne!(board.mine_positions(), before);
        assert_eq!(board.revealed_count(), 0);
    }
}
