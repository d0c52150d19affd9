use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    #[error("Pattern does not touch any point")]
    Empty,
    #[error("Point ({x},{y}) is outside of the {grid_size}x{grid_size} pattern grid")]
    PointOutOfBounds { x: u16, y: u16, grid_size: u16 },
    #[error("Failed to parse pattern: {0}")]
    Parse(String),
}

impl From<ParseIntError> for PatternError {
    fn from(err: ParseIntError) -> Self {
        PatternError::Parse(err.to_string())
    }
}
