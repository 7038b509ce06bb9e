//! Persistence layer for Nota

mod kv;
mod repository;

pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore, FOLDERS_KEY, LOGIN_KEY, NOTES_KEY};
pub use repository::Repository;
