pub mod backup;
pub mod error;

pub use crate::format::error::{ErrSection, FormatError};

pub trait Encodable {
    fn encode_json(&self) -> Result<String, FormatError>;
    fn decode_json(json_data: &str) -> Result<Self, FormatError>
    where
        Self: Sized;
    fn encode_bson(&self) -> Result<Vec<u8>, FormatError>;
    fn decode_bson(bson_data: &[u8]) -> Result<Self, FormatError>
    where
        Self: Sized;
    fn encode_pem(&self) -> Result<String, FormatError>;
    fn decode_pem(pem_data: &str) -> Result<Self, FormatError>
    where
        Self: Sized;
}
