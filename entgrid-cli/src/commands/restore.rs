use std::path::PathBuf;
use std::time::Duration;

use argh::FromArgs;
use colored::*;
use entgrid_lib::backup;
use entgrid_lib::seed::{Bip39Dictionary, SeedPhraseType, WalletInfo};
use indicatif::ProgressBar;

use crate::{common, CliError};

#[derive(FromArgs)]
/// Reads a seed phrase back out of an entropy grid backup
#[argh(subcommand, name = "restore")]
pub struct RestoreCommand {
    #[argh(positional)]
    input_file: PathBuf,

    /// the backup holds a 24 word seed phrase
    #[argh(switch)]
    long: bool,
}

impl RestoreCommand {
    pub fn execute(&self) -> Result<(), CliError> {
        let backup = common::read_backup_file(&self.input_file)?;
        let seed_phrase_type = if self.long {
            SeedPhraseType::Long
        } else {
            SeedPhraseType::Normal
        };

        let pattern = common::read_cli_pattern("Enter your pattern: ")?;

        let progress = ProgressBar::new_spinner();
        progress.set_message("Deriving grid coordinates...");
        progress.enable_steady_tick(Duration::from_millis(100));

        let wallet = backup::restore(&pattern, &backup, seed_phrase_type, &Bip39Dictionary)?;

        progress.finish_with_message("✅ Grid read");

        let mnemonic = wallet.to_mnemonic();

        println!("{}", "Seed phrase:".bold());
        for (number, word) in wallet.seed_phrase_words.iter().enumerate() {
            println!("  {:>2}. {}", number + 1, word);
        }

        // A wrong pattern still reads words, only the checksum can tell
        if WalletInfo::from_phrase(&mnemonic, &wallet.language).is_err() {
            log::debug!("Restored phrase failed the checksum");
            println!(
                "  {} Checksum doesn't match, the pattern or the phrase length is probably wrong",
                "⚠️".yellow()
            );
        } else {
            println!("  {} Checksum is valid", "✅".green());
        }

        Ok(())
    }
}
