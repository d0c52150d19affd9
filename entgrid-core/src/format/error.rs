use std::fmt;

use bson::de::Error as BsonError;
use bson::ser::Error as BsonSerError;
use pem::PemError;
use serde_json::Error as JsonError;
use thiserror::Error;

#[derive(Debug)]
pub enum ErrSection {
    PEM(PemError),
    BSON(BsonError),
    BSONSerialize(BsonSerError),
    JSON(JsonError),
    HEADER,
}

impl fmt::Display for ErrSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrSection::PEM(err) => write!(f, "PEM Error: {}", err),
            ErrSection::BSON(err) => write!(f, "BSON Error: {}", err),
            ErrSection::BSONSerialize(err) => write!(f, "BSON Error: {}", err),
            ErrSection::JSON(err) => write!(f, "JSON Error: {}", err),
            ErrSection::HEADER => write!(f, "Header Error"),
        }
    }
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to decode: {0}")]
    FailedToDecode(ErrSection),
    #[error("Failed to encode: {0}")]
    FailedToEncode(ErrSection),
    #[error("Malformed backup: {0}")]
    Malformed(String),
}

impl From<BsonError> for FormatError {
    fn from(err: BsonError) -> Self {
        FormatError::FailedToDecode(ErrSection::BSON(err))
    }
}

impl From<BsonSerError> for FormatError {
    fn from(err: BsonSerError) -> Self {
        FormatError::FailedToEncode(ErrSection::BSONSerialize(err))
    }
}

impl From<PemError> for FormatError {
    fn from(err: PemError) -> Self {
        FormatError::FailedToDecode(ErrSection::PEM(err))
    }
}

impl From<JsonError> for FormatError {
    fn from(err: JsonError) -> Self {
        FormatError::FailedToDecode(ErrSection::JSON(err))
    }
}
