pub mod coordinate;
pub mod format;
pub mod grid;
pub mod kdf;
pub mod pattern;
pub mod seed;

use coordinate::error::CoordinateError;
use grid::error::GridError;
use kdf::error::KDFError;
use thiserror::Error;

pub use bip39;

/// Errors from the derivation, coordinate and grid primitives
#[derive(Debug, Error)]
pub enum CoreErrorKind {
    #[error("KDF: {0}")]
    KDF(KDFError),
    #[error("Coordinate: {0}")]
    Coordinate(CoordinateError),
    #[error("Grid: {0}")]
    Grid(GridError),
}
