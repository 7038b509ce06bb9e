//! nota-core - Core library for Nota
//!
//! This crate contains the shared models, the write-through persistence
//! layer, note filtering, the login gate, and the image pipeline (upload
//! validation, auto-resize, crop engine) used by all Nota interfaces.

pub mod auth;
pub mod db;
pub mod error;
pub mod media;
pub mod models;
pub mod search;
pub mod util;

pub use error::{Error, Result};
pub use models::{Folder, FolderId, Note, NoteId};
