use std::collections::HashSet;
use std::fmt;
use std::io::{Read, Write};
use std::str::FromStr;

use entgrid_core::coordinate::{extract_coordinates, max_coordinates, GridCoordinate};
use entgrid_core::format::backup::EntropyGridBackup;
use entgrid_core::format::Encodable;
use entgrid_core::grid::{DecoyGrid, DICTIONARY_SIZE};
use entgrid_core::kdf::{DerivationParams, Salt, KDF, PKDF};
use entgrid_core::pattern::error::PatternError;
use entgrid_core::pattern::UserPattern;
use entgrid_core::seed::{Dictionary, SeedPhraseType, WalletInfo};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::config::BackupConfig;
use crate::BackupError;

/// Loops over fresh salts until the pattern maps to `count` pairwise distinct cells.
pub fn derive_distinct_coordinates<R: RngCore + CryptoRng>(
    pattern: &UserPattern,
    count: usize,
    rounds: u32,
    max_attempts: u32,
    rng: &mut R,
) -> Result<(Salt, Vec<GridCoordinate>), BackupError> {
    if count > max_coordinates() {
        return Err(BackupError::InvalidWallet(format!(
            "{count} words can't be placed with a single derived key"
        )));
    }

    let password = pattern.encode();

    for attempt in 1..=max_attempts {
        let salt = PKDF::generate_salt(rng)?;
        let params = DerivationParams::new(salt, rounds);

        let derived_key = PKDF::new(&password, &params).derive_key()?;
        let coordinates = extract_coordinates(&derived_key, count)?;

        if are_distinct(&coordinates) {
            log::debug!("Found distinct coordinates on attempt {}", attempt);
            return Ok((salt, coordinates));
        }

        log::warn!("Salt attempt {} produced colliding coordinates", attempt);
    }

    Err(BackupError::CollisionRetryExhausted {
        attempts: max_attempts,
        count,
    })
}

fn are_distinct(coordinates: &[GridCoordinate]) -> bool {
    let mut seen = HashSet::with_capacity(coordinates.len());
    coordinates.iter().all(|coordinate| seen.insert(*coordinate))
}

pub fn generate(
    pattern: &UserPattern,
    wallet: &WalletInfo,
    seed_phrase_type: SeedPhraseType,
    config: &BackupConfig,
) -> Result<EntropyGridBackup, BackupError> {
    generate_with_rng(pattern, wallet, seed_phrase_type, config, &mut OsRng)
}

pub fn generate_with_rng<R: RngCore + CryptoRng>(
    pattern: &UserPattern,
    wallet: &WalletInfo,
    seed_phrase_type: SeedPhraseType,
    config: &BackupConfig,
    rng: &mut R,
) -> Result<EntropyGridBackup, BackupError> {
    pattern.validate(config.pattern_grid_size)?;

    let wanted = wallet
        .entropy_indexes(seed_phrase_type)
        .map_err(|err| BackupError::InvalidWallet(err.to_string()))?;

    if let Some(index) = wanted
        .iter()
        .chain([&wallet.final_word_number])
        .find(|index| **index >= DICTIONARY_SIZE)
    {
        return Err(BackupError::InvalidWallet(format!(
            "{index} is not a dictionary index"
        )));
    }

    let (salt, coordinates) = derive_distinct_coordinates(
        pattern,
        wanted.len(),
        config.rounds,
        config.max_salt_attempts,
        rng,
    )?;

    let (decoy_grid, strategy) = DecoyGrid::build(wanted, rng);
    let entropy_grid = decoy_grid.embed(&coordinates, wanted, strategy)?;

    log::info!(
        "Generated entropy grid backup for {} words",
        seed_phrase_type.word_count()
    );

    Ok(EntropyGridBackup {
        entropy_grid,
        language: wallet.language.clone(),
        final_word_number: wallet.final_word_number,
        derivation: DerivationParams::new(salt, config.rounds),
    })
}

/// Reads the wallet back out of a backup. The seed phrase type isn't stored in the backup,
/// the caller has to know it.
pub fn restore<D: Dictionary>(
    pattern: &UserPattern,
    backup: &EntropyGridBackup,
    seed_phrase_type: SeedPhraseType,
    dictionary: &D,
) -> Result<WalletInfo, BackupError> {
    backup.validate()?;

    if pattern.is_empty() {
        return Err(BackupError::InvalidPattern(PatternError::Empty));
    }

    let password = pattern.encode();
    let derived_key = PKDF::new(&password, &backup.derivation).derive_key()?;
    let coordinates = extract_coordinates(&derived_key, seed_phrase_type.entropy_word_count())?;

    let seed_phrase_indexes = coordinates
        .iter()
        .map(|coordinate| backup.entropy_grid.word_at(coordinate))
        .collect::<Result<Vec<u16>, _>>()?;

    let wallet = WalletInfo::from_indexes(
        seed_phrase_indexes,
        backup.final_word_number,
        &backup.language,
        dictionary,
    )?;

    log::info!("Restored {} word seed phrase", seed_phrase_type.word_count());

    Ok(wallet)
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Json,
    Pem,
}

impl FromStr for ExportFormat {
    type Err = BackupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "pem" => Ok(ExportFormat::Pem),
            _ => Err(BackupError::InvalidArgument(format!(
                "unknown export format {s:?}, expected json or pem"
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Pem => write!(f, "pem"),
        }
    }
}

pub fn export<W: Write>(
    backup: &EntropyGridBackup,
    format: ExportFormat,
    mut output: W,
) -> Result<(), BackupError> {
    let encoded = match format {
        ExportFormat::Json => backup.encode_json()?,
        ExportFormat::Pem => backup.encode_pem()?,
    };

    output.write_all(encoded.as_bytes())?;
    output.flush()?;

    Ok(())
}

/// Reads a PEM or JSON encoded backup
pub fn import<R: Read>(mut input: R) -> Result<EntropyGridBackup, BackupError> {
    let mut encoded = String::new();
    input.read_to_string(&mut encoded)?;

    Ok(EntropyGridBackup::decode(&encoded)?)
}
