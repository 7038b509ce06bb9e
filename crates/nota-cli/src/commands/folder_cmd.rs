use std::path::Path;

use nota_core::FolderId;
use serde::Serialize;

use crate::commands::common::{open_repository, resolve_folder_id, short_id, truncate_text};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct FolderListItem {
    id: String,
    name: String,
    created_at: String,
    notes: usize,
}

pub fn run_folder_add(name: &str, db_path: &Path) -> Result<(), CliError> {
    let mut repo = open_repository(db_path)?;
    let folder = repo.create_folder(name)?;
    println!("{}", folder.id);
    Ok(())
}

pub fn run_folder_list(as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let repo = open_repository(db_path)?;

    let note_count = |folder_id: &FolderId| {
        repo.list_notes()
            .iter()
            .filter(|note| note.folder_id.as_ref() == Some(folder_id))
            .count()
    };

    if as_json {
        let items = repo
            .list_folders()
            .iter()
            .map(|folder| FolderListItem {
                id: folder.id.to_string(),
                name: folder.name.clone(),
                created_at: folder.created_at.to_rfc3339(),
                notes: note_count(&folder.id),
            })
            .collect::<Vec<_>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for folder in repo.list_folders() {
            let count = note_count(&folder.id);
            println!(
                "{:<13}  {:<20}  {count} notes",
                short_id(&folder.id.to_string()),
                truncate_text(&folder.name, 20)
            );
        }
    }

    Ok(())
}

pub fn run_folder_delete(id: &str, db_path: &Path) -> Result<(), CliError> {
    let mut repo = open_repository(db_path)?;
    let folder_id = resolve_folder_id(&repo, id)?;

    repo.delete_folder(&folder_id)?;
    println!("{folder_id}");
    Ok(())
}
