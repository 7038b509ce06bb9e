//! Note filtering and sort
//!
//! Derives the filtered, sorted view of notes for a folder selection and a
//! case-insensitive search string.

use crate::models::{FolderId, Note};

/// Folder selector for note queries
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FolderFilter {
    /// Every note passes
    #[default]
    All,
    /// Exact `folder_id` match
    Folder(FolderId),
}

impl FolderFilter {
    fn matches(&self, note: &Note) -> bool {
        match self {
            Self::All => true,
            Self::Folder(id) => note.folder_id.as_ref() == Some(id),
        }
    }
}

/// Filter notes by folder and search text, newest first.
///
/// The search term matches case-insensitively against the title or the
/// markup-stripped content; an empty term passes everything. The sort is
/// stable and descending by `updated_at`, so notes with equal timestamps
/// keep their input order.
#[must_use]
pub fn filter_notes(notes: &[Note], filter: &FolderFilter, search: &str) -> Vec<Note> {
    let term = search.trim().to_lowercase();

    let mut matched: Vec<Note> = notes
        .iter()
        .filter(|note| filter.matches(note))
        .filter(|note| {
            term.is_empty()
                || note.title.to_lowercase().contains(&term)
                || note.plain_text().to_lowercase().contains(&term)
        })
        .cloned()
        .collect();

    matched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    matched
}
