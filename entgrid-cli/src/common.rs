use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use entgrid_lib::backup;
use entgrid_lib::config::BackupConfig;
use entgrid_lib::format::backup::EntropyGridBackup;
use entgrid_lib::pattern::UserPattern;
use secrecy::{ExposeSecret, SecretString};

use crate::error::CliError;

pub const CONFIG_DIRECTORY: &str = "entgrid";
pub const CONFIG_FILE: &str = "config.json";

pub fn read_cli_secret(prompt: impl ToString) -> Result<SecretString, CliError> {
    let secret: SecretString = rpassword::prompt_password(prompt)?.into();

    Ok(secret)
}

/// Reads a pattern such as `(0,0),(1,1),(2,1)` without echoing it
pub fn read_cli_pattern(prompt: impl ToString) -> Result<UserPattern, CliError> {
    let pattern = read_cli_secret(prompt)?;

    pattern
        .expose_secret()
        .parse::<UserPattern>()
        .map_err(|err| CliError::BackupError(err.into()))
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIRECTORY).join(CONFIG_FILE))
}

/// Loads the backup config, or the defaults when there is no config file
pub fn load_config() -> Result<BackupConfig, CliError> {
    let Some(path) = config_path() else {
        log::warn!("No config directory on this platform, using defaults");
        return Ok(BackupConfig::default());
    };

    if let Ok(file) = File::open(&path) {
        let config = serde_json::from_reader(BufReader::new(file))?;
        log::info!("Loaded config from {:?}", path);
        Ok(config)
    } else {
        log::debug!("Config file {:?} not found, using defaults", path);
        Ok(BackupConfig::default())
    }
}

pub fn read_backup_file(path: &Path) -> Result<EntropyGridBackup, CliError> {
    let file = File::open(path)?;

    Ok(backup::import(BufReader::new(file))?)
}

pub fn create_parent_directory(path: &Path) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
