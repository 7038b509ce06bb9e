use std::path::Path;

use crate::commands::common::{open_repository, resolve_folder_id, resolve_note};
use crate::error::CliError;

pub fn run_edit(
    id: &str,
    title: Option<String>,
    content: Option<String>,
    folder: Option<&str>,
    unfile: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let mut repo = open_repository(db_path)?;
    let mut note = resolve_note(&repo, id)?;

    if let Some(title) = title {
        note.title = title;
    }
    if let Some(content) = content {
        note.content = content;
    }
    if unfile {
        note.folder_id = None;
    } else if let Some(query) = folder {
        note.folder_id = Some(resolve_folder_id(&repo, query)?);
    }

    let saved = repo.upsert_note(note)?;
    println!("{}", saved.id);
    Ok(())
}
