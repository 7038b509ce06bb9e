//! Data models for Nota

mod folder;
mod note;

pub use folder::{Folder, FolderId};
pub use note::{strip_markup, Note, NoteId};
