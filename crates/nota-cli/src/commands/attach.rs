use std::path::Path;

use nota_core::media;

use crate::commands::common::{open_repository, parse_region, resolve_note};
use crate::error::CliError;

pub fn run_attach(
    id: &str,
    image_path: &Path,
    region: Option<&str>,
    db_path: &Path,
) -> Result<(), CliError> {
    let mut repo = open_repository(db_path)?;
    let mut note = resolve_note(&repo, id)?;

    let bytes = std::fs::read(image_path)?;
    let region = region.map(parse_region).transpose()?;
    let data_uri = media::process_upload(&bytes, region)?;

    note.image = Some(data_uri);
    let saved = repo.upsert_note(note)?;
    println!("{}", saved.id);
    Ok(())
}

pub fn run_detach(id: &str, db_path: &Path) -> Result<(), CliError> {
    let mut repo = open_repository(db_path)?;
    let mut note = resolve_note(&repo, id)?;

    note.image = None;
    let saved = repo.upsert_note(note)?;
    println!("{}", saved.id);
    Ok(())
}
