pub mod error;

use bip39::{Language, Mnemonic};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::seed::error::*;

pub const DEFAULT_LANGUAGE: &str = "en";

/// How long the backed up mnemonic is. Only the entropy words go through the grid, the
/// checksum word is stored as is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedPhraseType {
    Normal,
    Long,
}

impl SeedPhraseType {
    pub fn from_word_count(word_count: usize) -> Result<Self, SeedError> {
        match word_count {
            12 => Ok(SeedPhraseType::Normal),
            24 => Ok(SeedPhraseType::Long),
            _ => Err(SeedError::UnsupportedWordCount(word_count)),
        }
    }

    pub fn word_count(&self) -> usize {
        self.entropy_word_count() + 1
    }

    /// Number of words placed in the entropy grid
    pub fn entropy_word_count(&self) -> usize {
        match self {
            SeedPhraseType::Normal => 11,
            SeedPhraseType::Long => 23,
        }
    }
}

/// Word list lookups by language tag
pub trait Dictionary {
    fn words_for(&self, indexes: &[u16], language: &str) -> Result<Vec<String>, SeedError>;
    fn index_of(&self, word: &str, language: &str) -> Result<u16, SeedError>;
}

/// BIP39 word lists shipped with the `bip39` crate
#[derive(Copy, Clone, Debug, Default)]
pub struct Bip39Dictionary;

impl Bip39Dictionary {
    pub fn language(tag: &str) -> Result<Language, SeedError> {
        match tag.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "fr" | "french" => Ok(Language::French),
            "it" | "italian" => Ok(Language::Italian),
            "es" | "spanish" => Ok(Language::Spanish),
            "ja" | "japanese" => Ok(Language::Japanese),
            "ko" | "korean" => Ok(Language::Korean),
            "cs" | "czech" => Ok(Language::Czech),
            "zh-hans" | "chinese-simplified" => Ok(Language::SimplifiedChinese),
            "zh-hant" | "chinese-traditional" => Ok(Language::TraditionalChinese),
            _ => Err(SeedError::UnknownLanguage(tag.to_string())),
        }
    }
}

impl Dictionary for Bip39Dictionary {
    fn words_for(&self, indexes: &[u16], language: &str) -> Result<Vec<String>, SeedError> {
        let word_list = Self::language(language)?.word_list();

        indexes
            .iter()
            .map(|index| {
                word_list
                    .get(usize::from(*index))
                    .map(|word| word.to_string())
                    .ok_or(SeedError::IndexOutOfRange(*index))
            })
            .collect()
    }

    fn index_of(&self, word: &str, language: &str) -> Result<u16, SeedError> {
        Self::language(language)?
            .find_word(word)
            .ok_or_else(|| SeedError::UnknownWord {
                language: language.to_string(),
            })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletInfo {
    /// Entropy words followed by the checksum word
    pub seed_phrase_words: Vec<String>,
    /// Dictionary indexes of the entropy words only
    pub seed_phrase_indexes: Vec<u16>,
    /// Dictionary index of the checksum word
    pub final_word_number: u16,
    pub language: String,
}

impl WalletInfo {
    pub fn from_indexes<D: Dictionary>(
        seed_phrase_indexes: Vec<u16>,
        final_word_number: u16,
        language: &str,
        dictionary: &D,
    ) -> Result<Self, SeedError> {
        let mut all_indexes = seed_phrase_indexes.clone();
        all_indexes.push(final_word_number);

        let seed_phrase_words = dictionary.words_for(&all_indexes, language)?;

        Ok(WalletInfo {
            seed_phrase_words,
            seed_phrase_indexes,
            final_word_number,
            language: language.to_string(),
        })
    }

    /// Parses and checksums a 12 or 24 word mnemonic
    pub fn from_phrase(phrase: &SecretString, language: &str) -> Result<Self, SeedError> {
        let bip39_language = Bip39Dictionary::language(language)?;
        let mnemonic = Mnemonic::parse_in(bip39_language, phrase.expose_secret().as_str())?;

        let normalized = mnemonic.to_string();
        let words: Vec<&str> = normalized.split_whitespace().collect();
        SeedPhraseType::from_word_count(words.len())?;

        let mut indexes = words
            .iter()
            .map(|word| Bip39Dictionary.index_of(word, language))
            .collect::<Result<Vec<u16>, SeedError>>()?;

        let final_word_number = indexes
            .pop()
            .ok_or(SeedError::UnsupportedWordCount(0))?;

        Ok(WalletInfo {
            seed_phrase_words: words.iter().map(|word| word.to_string()).collect(),
            seed_phrase_indexes: indexes,
            final_word_number,
            language: language.to_string(),
        })
    }

    /// The indexes that get hidden in the grid
    pub fn entropy_indexes(&self, seed_phrase_type: SeedPhraseType) -> Result<&[u16], SeedError> {
        let expected = seed_phrase_type.entropy_word_count();

        self.seed_phrase_indexes
            .get(..expected)
            .ok_or(SeedError::NotEnoughWords {
                expected,
                found: self.seed_phrase_indexes.len(),
            })
    }

    pub fn to_mnemonic(&self) -> SecretString {
        SecretString::new(self.seed_phrase_words.join(" "))
    }
}
