use std::path::Path;

use nota_core::media;

use crate::commands::common::{open_repository, resolve_note};
use crate::error::CliError;

pub fn run_view(id: &str, db_path: &Path) -> Result<(), CliError> {
    let repo = open_repository(db_path)?;
    let note = resolve_note(&repo, id)?;

    let folder = repo
        .folder_name(note.folder_id.as_ref())
        .unwrap_or("unfiled");

    println!("{}", note.title);
    println!("Folder:  {folder}");
    println!(
        "Created: {}",
        note.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "Updated: {}",
        note.updated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let Some(image) = &note.image {
        let bytes = media::parse_data_uri(image)?;
        println!("Image:   {} byte JPEG", bytes.len());
    }
    println!();
    println!("{}", note.content);
    Ok(())
}
