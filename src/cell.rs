use serde::{Deserialize, Serialize};

/// Full per-position state as the board tracks it. Only `Board` operations
/// mutate a cell after construction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_flagged: bool,
    /// Shown-as-mine display bit, set on loss or by the debug visibility
    /// toggle. Never consulted by win/lose logic.
    pub(crate) is_exposed: bool,
}

impl Cell {
    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Player-facing projection of this cell. `adjacent_mines` is the
    /// numeral to show when the cell is revealed.
    pub(crate) fn view(self, adjacent_mines: u8) -> CellView {
        if self.is_revealed {
            CellView::Revealed(adjacent_mines)
        } else if self.is_exposed && self.is_mine {
            CellView::Mine
        } else if self.is_flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }
}

/// What an observer is allowed to see at one position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    /// Revealed with the adjacent-mine numeral.
    Revealed(u8),
    /// An exposed mine (after a loss, or while mine visibility is on).
    Mine,
}

impl CellView {
    /// Whether the tile still renders as covered.
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
