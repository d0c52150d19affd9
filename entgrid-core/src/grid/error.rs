use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Entropy grid must have {expected} cells, got {found}")]
    InvalidLength { expected: usize, found: usize },
    #[error("Cell {cell} holds {value}, which is not a dictionary index")]
    IndexOutOfRange { cell: usize, value: u16 },
    #[error("{coordinates} coordinates given for {words} words")]
    CountMismatch { coordinates: usize, words: usize },
    #[error("Word index {0} is not present in the grid")]
    WordNotInGrid(u16),
    #[error("Coordinate points at cell {0}, outside of the grid")]
    CellOutOfRange(usize),
}
