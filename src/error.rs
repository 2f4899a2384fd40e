use crate::CellCount;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("mine count {mines} is not allowed, at most {max} fit this board")]
    TooManyMines { mines: CellCount, max: CellCount },
    #[error("mine coordinates outside the board")]
    MineOutOfBounds,
}

pub type Result<T> = core::result::Result<T, ConfigError>;
