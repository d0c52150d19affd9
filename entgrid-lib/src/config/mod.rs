use serde::{Deserialize, Serialize};

use entgrid_core::kdf::DEFAULT_ROUNDS;
use entgrid_core::pattern::DEFAULT_PATTERN_GRID_SIZE;

/// Salts tried before giving up on distinct coordinates. One or two are almost always enough.
pub const DEFAULT_MAX_SALT_ATTEMPTS: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// PBKDF2 iterations written into new backups
    pub rounds: u32,
    pub max_salt_attempts: u32,
    /// Rows and columns of the dot grid patterns are drawn on
    pub pattern_grid_size: u16,
}

impl Default for BackupConfig {
    fn default() -> Self {
        BackupConfig {
            rounds: DEFAULT_ROUNDS,
            max_salt_attempts: DEFAULT_MAX_SALT_ATTEMPTS,
            pattern_grid_size: DEFAULT_PATTERN_GRID_SIZE,
        }
    }
}

impl BackupConfig {
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }
}
