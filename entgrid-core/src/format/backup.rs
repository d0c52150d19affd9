use pem::Pem;
use serde::{Deserialize, Serialize};

use crate::format::{Encodable, ErrSection, FormatError};
use crate::grid::{EntropyGrid, DICTIONARY_SIZE, ENTROPY_GRID_CELLS};
use crate::kdf::DerivationParams;

pub const PEM_TAG: &str = "ENTROPY GRID BACKUP";

/// The printable half of a backup. Useless without the pattern that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntropyGridBackup {
    pub entropy_grid: EntropyGrid,
    /// Word list the grid indexes refer to
    pub language: String,
    /// Checksum word, stored in the clear
    pub final_word_number: u16,
    #[serde(rename = "function")]
    pub derivation: DerivationParams,
}

impl EntropyGridBackup {
    /// Structural checks that must pass before the grid is read
    pub fn validate(&self) -> Result<(), FormatError> {
        let cells = self.entropy_grid.cells();

        if cells.len() != ENTROPY_GRID_CELLS {
            return Err(FormatError::Malformed(format!(
                "grid has {} cells instead of {ENTROPY_GRID_CELLS}",
                cells.len()
            )));
        }

        if let Some(value) = cells.iter().find(|value| **value >= DICTIONARY_SIZE) {
            return Err(FormatError::Malformed(format!(
                "grid holds {value}, which is not a dictionary index"
            )));
        }

        if self.final_word_number >= DICTIONARY_SIZE {
            return Err(FormatError::Malformed(format!(
                "final word number {} is not a dictionary index",
                self.final_word_number
            )));
        }

        if self.derivation.rounds == 0 {
            return Err(FormatError::Malformed("zero derivation rounds".to_string()));
        }

        if self.language.trim().is_empty() {
            return Err(FormatError::Malformed("missing language".to_string()));
        }

        Ok(())
    }

    /// Accepts either the PEM or the JSON encoding
    pub fn decode(data: &str) -> Result<Self, FormatError> {
        if data.trim_start().starts_with("-----BEGIN") {
            Self::decode_pem(data)
        } else {
            Self::decode_json(data)
        }
    }
}

impl Encodable for EntropyGridBackup {
    fn encode_json(&self) -> Result<String, FormatError> {
        serde_json::to_string_pretty(self)
            .map_err(|err| FormatError::FailedToEncode(ErrSection::JSON(err)))
    }

    fn decode_json(json_data: &str) -> Result<Self, FormatError> {
        let backup = serde_json::from_str::<EntropyGridBackup>(json_data)?;
        backup.validate()?;

        Ok(backup)
    }

    fn encode_bson(&self) -> Result<Vec<u8>, FormatError> {
        Ok(bson::to_vec(&self)?)
    }

    fn decode_bson(bson_data: &[u8]) -> Result<Self, FormatError> {
        let backup = bson::from_slice::<EntropyGridBackup>(bson_data)?;
        backup.validate()?;

        Ok(backup)
    }

    fn encode_pem(&self) -> Result<String, FormatError> {
        let pem = Pem::new(PEM_TAG, self.encode_bson()?);

        Ok(pem::encode(&pem))
    }

    fn decode_pem(pem_data: &str) -> Result<Self, FormatError> {
        let pem = pem::parse(pem_data)?;

        if pem.tag() != PEM_TAG {
            return Err(FormatError::FailedToDecode(ErrSection::HEADER));
        }

        Self::decode_bson(pem.contents())
    }
}
