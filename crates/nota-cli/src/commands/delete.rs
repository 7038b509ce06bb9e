use std::path::Path;

use crate::commands::common::{open_repository, resolve_note};
use crate::error::CliError;

pub fn run_delete(id: &str, db_path: &Path) -> Result<(), CliError> {
    let mut repo = open_repository(db_path)?;
    let note = resolve_note(&repo, id)?;

    repo.delete_note(&note.id)?;
    println!("{}", note.id);
    Ok(())
}
