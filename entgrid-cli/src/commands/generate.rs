use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use argh::FromArgs;
use colored::*;
use entgrid_lib::backup::{self, ExportFormat};
use entgrid_lib::format::backup::EntropyGridBackup;
use entgrid_lib::seed::{SeedPhraseType, WalletInfo, DEFAULT_LANGUAGE};
use entgrid_lib::BackupError;
use indicatif::ProgressBar;

use crate::{common, CliError};

#[derive(FromArgs)]
/// Hides a seed phrase in a new entropy grid
#[argh(subcommand, name = "generate")]
pub struct GenerateCommand {
    /// file to write the backup to, stdout when omitted
    #[argh(option)]
    output: Option<PathBuf>,

    /// backup encoding, json or pem
    #[argh(option)]
    format: Option<String>,

    /// word list of the seed phrase
    #[argh(option)]
    language: Option<String>,

    /// PBKDF2 rounds, overrides the config file
    #[argh(option)]
    rounds: Option<u32>,
}

impl GenerateCommand {
    pub fn execute(&self) -> Result<(), CliError> {
        let mut config = common::load_config()?;
        if let Some(rounds) = self.rounds {
            config = config.with_rounds(rounds);
        }

        let format = match &self.format {
            Some(format) => format.parse::<ExportFormat>()?,
            None => ExportFormat::default(),
        };
        let language = self.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);

        let phrase = common::read_cli_secret("Enter your seed phrase: ")?;
        let wallet = WalletInfo::from_phrase(&phrase, language).map_err(BackupError::from)?;
        let seed_phrase_type = SeedPhraseType::from_word_count(wallet.seed_phrase_words.len())
            .map_err(BackupError::from)?;

        let pattern = common::read_cli_pattern("Enter your pattern: ")?;
        let confirmation = common::read_cli_pattern("Repeat your pattern: ")?;

        if pattern != confirmation {
            eprintln!("{}", "❌ Patterns don't match".red().bold());
            return Ok(());
        }

        let progress = ProgressBar::new_spinner();
        progress.set_message("Deriving grid coordinates...");
        progress.enable_steady_tick(Duration::from_millis(100));

        let backup = backup::generate(&pattern, &wallet, seed_phrase_type, &config)?;

        progress.finish_with_message("✅ Entropy grid generated");

        match &self.output {
            Some(path) => {
                common::create_parent_directory(path)?;
                write_backup(&backup, format, File::create(path)?)?;

                eprintln!(
                    "{} Backup written\n  📂 Output: {:?}\n  📄 Format: {}",
                    "✅".green(),
                    path,
                    format
                );
            }
            None => write_backup(&backup, format, io::stdout().lock())?,
        }

        eprintln!(
            "  {} Keep the pattern apart from the grid, the grid alone reveals nothing",
            "⚠️".yellow()
        );

        Ok(())
    }
}

/// Writes the encoded backup and nothing else, stdout may be redirected into a backup file
fn write_backup<W: Write>(
    backup: &EntropyGridBackup,
    format: ExportFormat,
    mut output: W,
) -> Result<(), CliError> {
    backup::export(backup, format, &mut output)?;
    if format == ExportFormat::Json {
        writeln!(output)?;
    }
    output.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use entgrid_lib::config::BackupConfig;
    use entgrid_lib::pattern::UserPattern;
    use entgrid_lib::seed::Bip39Dictionary;

    #[test]
    fn written_backup_can_be_read_back() {
        let pattern: UserPattern = "(0,0),(1,1)".parse().unwrap();
        let wallet = WalletInfo::from_indexes((0..11).collect(), 0, "en", &Bip39Dictionary)
            .unwrap();
        let config = BackupConfig::default().with_rounds(4);
        let backup =
            backup::generate(&pattern, &wallet, SeedPhraseType::Normal, &config).unwrap();

        for format in [ExportFormat::Json, ExportFormat::Pem] {
            let mut output = Vec::new();
            write_backup(&backup, format, &mut output).unwrap();

            assert_eq!(backup::import(output.as_slice()).unwrap(), backup);
        }
    }
}
