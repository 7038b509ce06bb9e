use std::path::Path;

use nota_core::db::{Repository, SqliteKvStore};
use nota_core::search::filter_notes;
use nota_core::Note;

use crate::commands::common::{folder_filter, format_note_lines, note_to_list_item, open_repository, NoteListItem};
use crate::error::CliError;

pub fn run_list(folder: Option<&str>, as_json: bool, db_path: &Path) -> Result<(), CliError> {
    let repo = open_repository(db_path)?;
    let filter = folder_filter(&repo, folder)?;
    let notes = filter_notes(repo.list_notes(), &filter, "");

    print_notes(&repo, &notes, as_json)
}

pub fn print_notes(
    repo: &Repository<SqliteKvStore>,
    notes: &[Note],
    as_json: bool,
) -> Result<(), CliError> {
    if as_json {
        let items = notes
            .iter()
            .map(|note| note_to_list_item(repo, note))
            .collect::<Vec<NoteListItem>>();
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        for line in format_note_lines(repo, notes) {
            println!("{line}");
        }
    }

    Ok(())
}
