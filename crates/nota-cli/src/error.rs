use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] nota_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Not logged in. Run `nota login --username <USER> --password <PASS>` first")]
    NotLoggedIn,
    #[error("Note not found for id/prefix: {0}")]
    NoteNotFound(String),
    #[error("Folder not found for id/name: {0}")]
    FolderNotFound(String),
    #[error("{0}")]
    AmbiguousNoteId(String),
    #[error("{0}")]
    AmbiguousFolder(String),
    #[error("Search query cannot be empty")]
    EmptySearchQuery,
    #[error("Invalid region '{0}'; expected X,Y,WIDTH")]
    InvalidRegion(String),
}
