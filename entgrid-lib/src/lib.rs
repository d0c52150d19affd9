pub mod backup;
pub mod config;

use std::io::Error as IoError;

use entgrid_core::{
    coordinate::error::CoordinateError, format::FormatError, grid::error::GridError,
    kdf::error::KDFError, pattern::error::PatternError, seed::error::SeedError,
};
use thiserror::Error;

pub use entgrid_core::{coordinate, format, grid, kdf, pattern, seed, CoreErrorKind};

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("Secure random source failed: {0}")]
    RandomnessFailure(String),
    #[error("No salt gave {count} distinct coordinates in {attempts} attempts")]
    CollisionRetryExhausted { attempts: u32, count: usize },
    #[error("Malformed backup: {0}")]
    MalformedBackup(FormatError),
    #[error("Dictionary lookup failed: {0}")]
    DictionaryLookupFailure(SeedError),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(PatternError),
    #[error("Invalid wallet: {0}")]
    InvalidWallet(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO Error: {0}")]
    IoError(String),
    #[error("Core Error: {0}")]
    CoreError(CoreErrorKind),
}

impl From<IoError> for BackupError {
    fn from(err: IoError) -> Self {
        BackupError::IoError(err.to_string())
    }
}

impl From<KDFError> for BackupError {
    fn from(err: KDFError) -> Self {
        match err {
            KDFError::RandomnessFailure(reason) => BackupError::RandomnessFailure(reason),
            err => BackupError::CoreError(CoreErrorKind::KDF(err)),
        }
    }
}

impl From<FormatError> for BackupError {
    fn from(err: FormatError) -> Self {
        BackupError::MalformedBackup(err)
    }
}

impl From<SeedError> for BackupError {
    fn from(err: SeedError) -> Self {
        BackupError::DictionaryLookupFailure(err)
    }
}

impl From<PatternError> for BackupError {
    fn from(err: PatternError) -> Self {
        BackupError::InvalidPattern(err)
    }
}

impl From<GridError> for BackupError {
    fn from(err: GridError) -> Self {
        BackupError::CoreError(CoreErrorKind::Grid(err))
    }
}

impl From<CoordinateError> for BackupError {
    fn from(err: CoordinateError) -> Self {
        BackupError::CoreError(CoreErrorKind::Coordinate(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entgrid_core::format::ErrSection;

    #[test]
    fn kdf_errors_routing() {
        assert!(matches!(
            BackupError::from(KDFError::RandomnessFailure("no entropy".to_string())),
            BackupError::RandomnessFailure(_)
        ));
        assert!(matches!(
            BackupError::from(KDFError::InvalidRounds(0)),
            BackupError::CoreError(CoreErrorKind::KDF(KDFError::InvalidRounds(0)))
        ));
    }

    #[test]
    fn lookup_and_input_errors_routing() {
        assert!(matches!(
            BackupError::from(FormatError::FailedToDecode(ErrSection::HEADER)),
            BackupError::MalformedBackup(_)
        ));
        assert!(matches!(
            BackupError::from(SeedError::IndexOutOfRange(2048)),
            BackupError::DictionaryLookupFailure(SeedError::IndexOutOfRange(2048))
        ));
        assert!(matches!(
            BackupError::from(PatternError::Empty),
            BackupError::InvalidPattern(PatternError::Empty)
        ));
        assert!(matches!(
            BackupError::from(GridError::WordNotInGrid(4)),
            BackupError::CoreError(CoreErrorKind::Grid(GridError::WordNotInGrid(4)))
        ));
        assert!(matches!(
            BackupError::from(CoordinateError::OutOfRange { index: 25 }),
            BackupError::CoreError(CoreErrorKind::Coordinate(_))
        ));
    }
}
