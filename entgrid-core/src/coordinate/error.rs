use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoordinateError {
    #[error("Coordinate {index} needs bits past the end of the derived key")]
    OutOfRange { index: usize },
    #[error("Location {0} does not fit in 10 bits")]
    InvalidLocation(u16),
}
