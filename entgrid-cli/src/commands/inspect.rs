use std::path::PathBuf;

use argh::FromArgs;
use colored::*;

use crate::{common, CliError};

#[derive(FromArgs)]
/// Shows the public parameters of a backup
#[argh(subcommand, name = "inspect")]
pub struct InspectCommand {
    #[argh(positional)]
    input_file: PathBuf,
}

impl InspectCommand {
    pub fn execute(&self) -> Result<(), CliError> {
        let backup = common::read_backup_file(&self.input_file)?;

        let grid_kind = if backup.entropy_grid.is_permutation() {
            "permutation"
        } else {
            "multiset"
        };

        println!("{} {:?}", "📄 Backup:".bold(), self.input_file);
        println!("  Language: {}", backup.language);
        println!("  Function: {}", backup.derivation.algorithm);
        println!("  Rounds: {}", backup.derivation.rounds);
        println!("  Salt: {}", backup.derivation.salt);
        println!("  Grid: {} cells, {}", backup.entropy_grid.cells().len(), grid_kind);

        Ok(())
    }
}
