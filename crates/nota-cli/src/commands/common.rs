use std::env;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use nota_core::auth;
use nota_core::db::{Repository, SqliteKvStore};
use nota_core::search::FolderFilter;
use nota_core::{Folder, FolderId, Note};
use serde::Serialize;

use crate::error::CliError;

/// JSON row for `list`/`search --json`
#[derive(Debug, Serialize)]
pub struct NoteListItem {
    pub id: String,
    pub title: String,
    pub preview: String,
    pub folder: Option<String>,
    pub has_image: bool,
    pub created_at: String,
    pub updated_at: String,
    pub relative_time: String,
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("NOTA_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("nota")
        .join("nota.db")
}

pub fn open_store(path: &Path) -> Result<SqliteKvStore, CliError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    tracing::debug!(path = %path.display(), "Opening store");
    Ok(SqliteKvStore::open(path)?)
}

/// Open the repository for a data command; requires the login flag.
pub fn open_repository(path: &Path) -> Result<Repository<SqliteKvStore>, CliError> {
    let store = open_store(path)?;
    if !auth::is_logged_in(&store)? {
        return Err(CliError::NotLoggedIn);
    }
    Ok(Repository::open(store)?)
}

/// Resolve a note by exact ID or unique ID prefix.
pub fn resolve_note(
    repo: &Repository<SqliteKvStore>,
    note_query: &str,
) -> Result<Note, CliError> {
    let note_query = note_query.trim();
    if note_query.is_empty() {
        return Err(CliError::NoteNotFound(note_query.to_string()));
    }

    if let Some(note) = repo
        .list_notes()
        .iter()
        .find(|note| note.id.as_str() == note_query)
    {
        return Ok(note.clone());
    }

    let matches: Vec<&Note> = repo
        .list_notes()
        .iter()
        .filter(|note| note.id.as_str().starts_with(note_query))
        .collect();

    match matches.len() {
        0 => Err(CliError::NoteNotFound(note_query.to_string())),
        1 => Ok(matches[0].clone()),
        _ => {
            let options = matches
                .iter()
                .take(3)
                .map(|note| short_id(&note.id.to_string()))
                .collect::<Vec<_>>()
                .join(", ");
            Err(CliError::AmbiguousNoteId(format!(
                "ID prefix '{note_query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

/// Resolve a folder by exact ID, unique ID prefix, or name.
pub fn resolve_folder_id(
    repo: &Repository<SqliteKvStore>,
    folder_query: &str,
) -> Result<FolderId, CliError> {
    let folder_query = folder_query.trim();
    if folder_query.is_empty() {
        return Err(CliError::FolderNotFound(folder_query.to_string()));
    }

    let folders = repo.list_folders();
    if let Some(folder) = folders.iter().find(|f| f.id.as_str() == folder_query) {
        return Ok(folder.id.clone());
    }

    let by_prefix: Vec<&Folder> = folders
        .iter()
        .filter(|f| f.id.as_str().starts_with(folder_query))
        .collect();
    if by_prefix.len() == 1 {
        return Ok(by_prefix[0].id.clone());
    }
    if by_prefix.len() > 1 {
        let options = by_prefix
            .iter()
            .take(3)
            .map(|f| short_id(&f.id.to_string()))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(CliError::AmbiguousFolder(format!(
            "Folder prefix '{folder_query}' is ambiguous; matches: {options}"
        )));
    }

    let by_name: Vec<&Folder> = folders
        .iter()
        .filter(|f| f.name.eq_ignore_ascii_case(folder_query))
        .collect();
    match by_name.len() {
        0 => Err(CliError::FolderNotFound(folder_query.to_string())),
        1 => Ok(by_name[0].id.clone()),
        _ => Err(CliError::AmbiguousFolder(format!(
            "Folder name '{folder_query}' is ambiguous; use the folder id"
        ))),
    }
}

/// Build the folder filter for `list`/`search`; `None` means all notes.
pub fn folder_filter(
    repo: &Repository<SqliteKvStore>,
    folder_query: Option<&str>,
) -> Result<FolderFilter, CliError> {
    match folder_query {
        None => Ok(FolderFilter::All),
        Some(query) => Ok(FolderFilter::Folder(resolve_folder_id(repo, query)?)),
    }
}

pub fn format_note_lines(repo: &Repository<SqliteKvStore>, notes: &[Note]) -> Vec<String> {
    let now = Utc::now();
    notes
        .iter()
        .map(|note| {
            let id = short_id(&note.id.to_string());
            let title = truncate_text(&note.title, 20);
            let preview = note_preview(note, 40);
            let relative_time = format_relative_time(note.updated_at, now);
            let folder = repo
                .folder_name(note.folder_id.as_ref())
                .unwrap_or("unfiled");
            let marker = if note.image.is_some() { " [img]" } else { "" };

            format!("{id:<13}  {title:<20}  {preview:<40}  {relative_time:<10}  {folder}{marker}")
        })
        .collect()
}

pub fn note_to_list_item(repo: &Repository<SqliteKvStore>, note: &Note) -> NoteListItem {
    let now = Utc::now();
    NoteListItem {
        id: note.id.to_string(),
        title: note.title.clone(),
        preview: note_preview(note, 80),
        folder: repo
            .folder_name(note.folder_id.as_ref())
            .map(ToString::to_string),
        has_image: note.image.is_some(),
        created_at: note.created_at.to_rfc3339(),
        updated_at: note.updated_at.to_rfc3339(),
        relative_time: format_relative_time(note.updated_at, now),
    }
}

pub fn note_preview(note: &Note, max_chars: usize) -> String {
    let plain = note.plain_text();
    let first_line = plain.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_text(&collapsed, max_chars)
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = text.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn format_relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp).num_milliseconds().max(0);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;
    let week = 7 * day;
    let month = 30 * day;
    let year = 365 * day;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else if diff < week {
        format!("{}d ago", diff / day)
    } else if diff < month {
        format!("{}w ago", diff / week)
    } else if diff < year {
        format!("{}mo ago", diff / month)
    } else {
        format!("{}y ago", diff / year)
    }
}

pub fn normalize_search_query(query: &str) -> Result<String, CliError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptySearchQuery)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Parse an `X,Y,WIDTH` crop region in display coordinates.
pub fn parse_region(value: &str) -> Result<(f64, f64, f64), CliError> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(CliError::InvalidRegion(value.to_string()));
    }

    let mut numbers = [0.0f64; 3];
    for (slot, part) in numbers.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| CliError::InvalidRegion(value.to_string()))?;
    }

    Ok((numbers[0], numbers[1], numbers[2]))
}
