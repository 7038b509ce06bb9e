use std::path::Path;

use nota_core::search::filter_notes;

use crate::commands::common::{folder_filter, normalize_search_query, open_repository};
use crate::commands::list::print_notes;
use crate::error::CliError;

pub fn run_search(
    query: &str,
    folder: Option<&str>,
    as_json: bool,
    db_path: &Path,
) -> Result<(), CliError> {
    let query = normalize_search_query(query)?;
    let repo = open_repository(db_path)?;
    let filter = folder_filter(&repo, folder)?;
    let notes = filter_notes(repo.list_notes(), &filter, &query);

    print_notes(&repo, &notes, as_json)
}
