use bip39::Error as Bip39Error;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeedError {
    #[error("Unknown dictionary language: {0}")]
    UnknownLanguage(String),
    #[error("No word at dictionary index {0}")]
    IndexOutOfRange(u16),
    #[error("Word is not in the {language} dictionary")]
    UnknownWord { language: String },
    #[error("Invalid mnemonic phrase: {0}")]
    InvalidMnemonicPhrase(String),
    #[error("Seed phrases of {0} words are not supported")]
    UnsupportedWordCount(usize),
    #[error("Expected at least {expected} seed phrase indexes, got {found}")]
    NotEnoughWords { expected: usize, found: usize },
}

impl From<Bip39Error> for SeedError {
    fn from(err: Bip39Error) -> Self {
        SeedError::InvalidMnemonicPhrase(err.to_string())
    }
}
