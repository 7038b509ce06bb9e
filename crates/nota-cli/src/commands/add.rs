use std::path::Path;

use nota_core::Note;

use crate::commands::common::{open_repository, resolve_folder_id};
use crate::error::CliError;

pub fn run_add(
    title: &str,
    content: &str,
    folder: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let mut repo = open_repository(db_path)?;
    let folder_id = folder
        .map(|query| resolve_folder_id(&repo, query))
        .transpose()?;

    let note = Note::new(title, content)?.with_folder(folder_id);
    let note = repo.upsert_note(note)?;

    println!("{}", note.id);
    Ok(())
}
