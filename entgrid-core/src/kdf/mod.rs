pub mod error;

use std::fmt;
use std::str::FromStr;

use hmac::Hmac;
use rand::{CryptoRng, RngCore};
use secrecy::{ExposeSecret, Secret, SecretVec};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::kdf::error::*;

/// Targets a few seconds of derivation on a phone
pub const DEFAULT_ROUNDS: u32 = 2_000_000;
pub const SALT_LEN: usize = 16;
pub const DERIVED_KEY_LEN: usize = 32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Salt([u8; SALT_LEN]);

impl Salt {
    pub fn new(bytes: [u8; SALT_LEN]) -> Self {
        Salt(bytes)
    }

    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, KDFError> {
        let mut salt_buffer = [0u8; SALT_LEN];
        rng.try_fill_bytes(&mut salt_buffer)?;

        Ok(Salt(salt_buffer))
    }

    pub fn as_bytes(&self) -> &[u8; SALT_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Salt {
    type Err = KDFError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let salt = <[u8; SALT_LEN]>::try_from(bytes.as_slice()).map_err(|_| {
            KDFError::InvalidSalt(format!("expected {SALT_LEN} bytes, got {}", bytes.len()))
        })?;

        Ok(Salt(salt))
    }
}

impl TryFrom<String> for Salt {
    type Error = KDFError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Salt> for String {
    fn from(salt: Salt) -> Self {
        salt.to_hex()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DerivationAlgorithm {
    #[serde(rename = "pbkdf2-hmac-sha256")]
    Pbkdf2HmacSha256,
}

impl fmt::Display for DerivationAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivationAlgorithm::Pbkdf2HmacSha256 => write!(f, "pbkdf2-hmac-sha256"),
        }
    }
}

/// Everything besides the password that the derivation depends on. Persisted in the backup
/// and replayed verbatim on restore.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationParams {
    #[serde(rename = "name")]
    pub algorithm: DerivationAlgorithm,
    pub salt: Salt,
    pub rounds: u32,
}

impl DerivationParams {
    pub fn new(salt: Salt, rounds: u32) -> Self {
        DerivationParams {
            algorithm: DerivationAlgorithm::Pbkdf2HmacSha256,
            salt,
            rounds,
        }
    }
}

pub struct DerivedKey(Secret<[u8; DERIVED_KEY_LEN]>);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; DERIVED_KEY_LEN]) -> Self {
        DerivedKey(Secret::new(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; DERIVED_KEY_LEN] {
        self.0.expose_secret()
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerivedKey([REDACTED])")
    }
}

pub trait KDF {
    fn generate_salt<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Salt, KDFError> {
        Salt::generate(rng)
    }
}

pub fn pbkdf2_hmac_sha256(
    password: &[u8],
    salt: &[u8],
    rounds: u32,
) -> Result<DerivedKey, KDFError> {
    if rounds == 0 {
        return Err(KDFError::InvalidRounds(rounds));
    }

    let mut output = [0u8; DERIVED_KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, rounds, &mut output)?;

    Ok(DerivedKey::from_bytes(output))
}

pub struct PKDF<'a> {
    input_data: &'a SecretVec<u8>,
    params: &'a DerivationParams,
}

impl KDF for PKDF<'_> {}

impl<'a> PKDF<'a> {
    pub fn new(input_data: &'a SecretVec<u8>, params: &'a DerivationParams) -> Self {
        PKDF { input_data, params }
    }

    pub fn derive_key(&self) -> Result<DerivedKey, KDFError> {
        match self.params.algorithm {
            DerivationAlgorithm::Pbkdf2HmacSha256 => {
                log::debug!("Deriving key with {} rounds", self.params.rounds);

                pbkdf2_hmac_sha256(
                    self.input_data.expose_secret(),
                    self.params.salt.as_bytes(),
                    self.params.rounds,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::extract_coordinates;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PBKDF2_SHA256_1_ROUND: &str =
        "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b";
    const PBKDF2_SHA256_2_ROUNDS: &str =
        "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43";
    const PBKDF2_SHA256_4096_ROUNDS: &str =
        "c5e478d59288c841aa530db6845c4c8d962893a001ce4e11a4963873aa98134a";

    const TEST_SALT_HEX: &str = "a381fd3913c2edcd4fe118c397e35c3a";

    #[test]
    fn pbkdf2_known_answers() {
        for (rounds, expected) in [
            (1, PBKDF2_SHA256_1_ROUND),
            (2, PBKDF2_SHA256_2_ROUNDS),
            (4096, PBKDF2_SHA256_4096_ROUNDS),
        ] {
            let key = pbkdf2_hmac_sha256(b"password", b"salt", rounds).unwrap();
            assert_eq!(hex::encode(key.as_bytes()), expected);
        }
    }

    #[test]
    fn zero_rounds_rejected() {
        assert!(matches!(
            pbkdf2_hmac_sha256(b"password", b"salt", 0),
            Err(KDFError::InvalidRounds(0))
        ));
    }

    #[test]
    fn pkdf_is_deterministic() {
        let password = SecretVec::new(b"(0,0)".to_vec());
        let params = DerivationParams::new(TEST_SALT_HEX.parse().unwrap(), 8);

        let first = PKDF::new(&password, &params).derive_key().unwrap();
        let second = PKDF::new(&password, &params).derive_key().unwrap();

        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn salt_changes_key() {
        let password = SecretVec::new(b"(0,0)".to_vec());
        let params = DerivationParams::new(Salt::new([0u8; SALT_LEN]), 8);
        let other_params = DerivationParams::new(Salt::new([1u8; SALT_LEN]), 8);

        let key = PKDF::new(&password, &params).derive_key().unwrap();
        let other_key = PKDF::new(&password, &other_params).derive_key().unwrap();

        assert_ne!(key.as_bytes(), other_key.as_bytes());
        assert_ne!(
            extract_coordinates(&key, 11).unwrap(),
            extract_coordinates(&other_key, 11).unwrap()
        );
    }

    #[test]
    fn salt_hex() {
        let salt: Salt = TEST_SALT_HEX.parse().unwrap();

        assert_eq!(salt.to_hex(), TEST_SALT_HEX);
        assert_eq!(salt.as_bytes()[0], 0xa3);
        assert!("a381fd".parse::<Salt>().is_err());
        assert!("zz81fd3913c2edcd4fe118c397e35c3a".parse::<Salt>().is_err());
    }

    #[test]
    fn generate_salt() {
        let mut rng = StdRng::seed_from_u64(42);

        let salt = PKDF::generate_salt(&mut rng).unwrap();
        let other_salt = PKDF::generate_salt(&mut rng).unwrap();

        assert_ne!(salt, other_salt);
    }

    #[test]
    fn derived_key_debug_is_redacted() {
        let key = DerivedKey::from_bytes([7u8; DERIVED_KEY_LEN]);

        assert_eq!(format!("{key:?}"), "DerivedKey([REDACTED])");
    }
}
