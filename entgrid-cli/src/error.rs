use colored::*;
use entgrid_lib::BackupError;
use serde_json::Error as JsonError;
use std::fmt;
use std::io::Error as IoError;

#[derive(Debug)]
pub enum CliError {
    IoError(String),
    BackupError(BackupError),
    JsonError(String),
}

impl From<IoError> for CliError {
    fn from(err: IoError) -> Self {
        CliError::IoError(err.to_string())
    }
}

impl From<BackupError> for CliError {
    fn from(err: BackupError) -> Self {
        CliError::BackupError(err)
    }
}

impl From<JsonError> for CliError {
    fn from(err: JsonError) -> Self {
        CliError::JsonError(err.to_string())
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::IoError(err) => {
                write!(f, "💾 {} {}", "IO Error:".red().bold(), err.red())
            }
            CliError::BackupError(err) => {
                write!(
                    f,
                    "🛠 {} {}",
                    "Backup Error:".yellow().bold(),
                    err.to_string().yellow()
                )
            }
            CliError::JsonError(err) => {
                write!(f, "📝 {} {}", "JSON Error:".blue().bold(), err.blue())
            }
        }
    }
}
