use hex::FromHexError;
use hmac::digest::InvalidLength;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KDFError {
    #[error("Secure random source failed: {0}")]
    RandomnessFailure(String),
    #[error("Invalid number of rounds: {0}")]
    InvalidRounds(u32),
    #[error("Invalid output length")]
    InvalidOutputLength,
    #[error("Invalid salt: {0}")]
    InvalidSalt(String),
}

impl From<rand::Error> for KDFError {
    fn from(err: rand::Error) -> Self {
        KDFError::RandomnessFailure(err.to_string())
    }
}

impl From<FromHexError> for KDFError {
    fn from(err: FromHexError) -> Self {
        KDFError::InvalidSalt(err.to_string())
    }
}

impl From<InvalidLength> for KDFError {
    fn from(_: InvalidLength) -> Self {
        KDFError::InvalidOutputLength
    }
}
