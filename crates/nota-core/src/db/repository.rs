//! Write-through note and folder repository

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Folder, FolderId, Note, NoteId};

use super::kv::{KeyValueStore, FOLDERS_KEY, NOTES_KEY};

/// In-memory note and folder arrays mirrored to a [`KeyValueStore`].
///
/// Every mutating operation synchronously rewrites the full affected array
/// before returning, so persisted state always reflects in-memory state.
pub struct Repository<S: KeyValueStore> {
    store: S,
    notes: Vec<Note>,
    folders: Vec<Folder>,
}

impl<S: KeyValueStore> Repository<S> {
    /// Open a repository over the given store, loading both arrays.
    ///
    /// Missing records load as empty arrays.
    pub fn open(store: S) -> Result<Self> {
        let notes = load_array(&store, NOTES_KEY)?;
        let folders = load_array(&store, FOLDERS_KEY)?;
        tracing::debug!(notes = notes.len(), folders = folders.len(), "Repository opened");
        Ok(Self {
            store,
            notes,
            folders,
        })
    }

    /// All notes, in insertion order
    #[must_use]
    pub fn list_notes(&self) -> &[Note] {
        &self.notes
    }

    /// Look up a note by ID
    #[must_use]
    pub fn get_note(&self, id: &NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| &note.id == id)
    }

    /// Insert or replace a note by ID.
    ///
    /// Inserts stamp `created_at == updated_at`; replacements keep the
    /// stored `created_at` and happen in place. `updated_at` is always set
    /// to the current time.
    pub fn upsert_note(&mut self, mut note: Note) -> Result<Note> {
        note.validate()?;

        let now = Utc::now();
        note.updated_at = now;

        if let Some(existing) = self.notes.iter_mut().find(|n| n.id == note.id) {
            note.created_at = existing.created_at;
            existing.clone_from(&note);
        } else {
            note.created_at = now;
            self.notes.push(note.clone());
        }

        self.save_notes()?;
        Ok(note)
    }

    /// Delete a note by ID
    pub fn delete_note(&mut self, id: &NoteId) -> Result<()> {
        let before = self.notes.len();
        self.notes.retain(|note| &note.id != id);
        if self.notes.len() == before {
            return Err(Error::NotFound(format!("note {id}")));
        }
        self.save_notes()
    }

    /// All folders, in insertion order
    #[must_use]
    pub fn list_folders(&self) -> &[Folder] {
        &self.folders
    }

    /// Look up a folder by ID
    #[must_use]
    pub fn get_folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|folder| &folder.id == id)
    }

    /// Create a new folder with the given name
    pub fn create_folder(&mut self, name: &str) -> Result<Folder> {
        let folder = Folder::new(name)?;
        self.folders.push(folder.clone());
        self.save_folders()?;
        Ok(folder)
    }

    /// Delete a folder without touching its notes.
    ///
    /// Referencing notes keep the now-dangling `folder_id` and render as
    /// unfiled.
    pub fn delete_folder(&mut self, id: &FolderId) -> Result<()> {
        let before = self.folders.len();
        self.folders.retain(|folder| &folder.id != id);
        if self.folders.len() == before {
            return Err(Error::NotFound(format!("folder {id}")));
        }
        self.save_folders()
    }

    /// Display name for a note's folder; unfiled and dangling ids resolve
    /// to `None`.
    #[must_use]
    pub fn folder_name(&self, id: Option<&FolderId>) -> Option<&str> {
        let id = id?;
        self.get_folder(id).map(|folder| folder.name.as_str())
    }

    /// Seed the starter folders and notes the original client shipped with.
    ///
    /// Writes nothing and returns `false` when any data already exists.
    pub fn seed_sample_data(&mut self) -> Result<bool> {
        if !self.notes.is_empty() || !self.folders.is_empty() {
            return Ok(false);
        }

        let now = Utc::now();
        self.folders = vec![
            Folder {
                id: "work".parse()?,
                name: "Work".to_string(),
                created_at: now,
            },
            Folder {
                id: "personal".parse()?,
                name: "Personal".to_string(),
                created_at: now,
            },
        ];
        self.notes = vec![
            Note {
                id: "1".parse()?,
                title: "Welcome to Notes App".to_string(),
                content: "This is your first note! You can create, edit, and organize your \
                          notes using folders. Use the search feature to quickly find what \
                          you're looking for."
                    .to_string(),
                folder_id: None,
                image: None,
                created_at: now,
                updated_at: now,
            },
            Note {
                id: "2".parse()?,
                title: "Meeting Notes".to_string(),
                content: "Quarterly review meeting scheduled for next week. Prepare \
                          presentation slides and gather team feedback."
                    .to_string(),
                folder_id: Some("work".parse()?),
                image: None,
                created_at: now,
                updated_at: now,
            },
        ];

        self.save_folders()?;
        self.save_notes()?;
        tracing::debug!("Seeded sample data");
        Ok(true)
    }

    fn save_notes(&mut self) -> Result<()> {
        save_array(&mut self.store, NOTES_KEY, &self.notes)
    }

    fn save_folders(&mut self) -> Result<()> {
        save_array(&mut self.store, FOLDERS_KEY, &self.folders)
    }
}

fn load_array<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Vec<T>> {
    match store.get(key)? {
        Some(payload) => Ok(serde_json::from_str(&payload)?),
        None => Ok(Vec::new()),
    }
}

fn save_array<T: Serialize>(
    store: &mut impl KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<()> {
    let payload = serde_json::to_string(items)?;
    store.set(key, &payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{MemoryKvStore, SqliteKvStore};
    use pretty_assertions::assert_eq;
    use std::thread::sleep;
    use std::time::Duration;

    fn setup() -> Repository<MemoryKvStore> {
        Repository::open(MemoryKvStore::new()).unwrap()
    }

    #[test]
    fn test_open_empty_store() {
        let repo = setup();
        assert!(repo.list_notes().is_empty());
        assert!(repo.list_folders().is_empty());
    }

    #[test]
    fn test_upsert_inserts_with_equal_timestamps() {
        let mut repo = setup();

        let note = Note::new("First", "body").unwrap();
        let saved = repo.upsert_note(note).unwrap();

        assert_eq!(saved.created_at, saved.updated_at);
        assert_eq!(repo.list_notes().len(), 1);
    }

    #[test]
    fn test_upsert_replaces_in_place_preserving_created_at() {
        let mut repo = setup();

        let first = repo.upsert_note(Note::new("A", "a").unwrap()).unwrap();
        let second = repo.upsert_note(Note::new("B", "b").unwrap()).unwrap();

        sleep(Duration::from_millis(2));

        let mut edited = first.clone();
        edited.title = "A edited".to_string();
        let saved = repo.upsert_note(edited).unwrap();

        assert_eq!(saved.created_at, first.created_at);
        assert!(saved.updated_at > first.updated_at);

        // Replacement keeps the original position
        let notes = repo.list_notes();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "A edited");
        assert_eq!(notes[1].id, second.id);
    }

    #[test]
    fn test_upsert_rejects_invalid_note_without_state_change() {
        let mut repo = setup();
        repo.upsert_note(Note::new("Keep", "me").unwrap()).unwrap();

        let mut bad = Note::new("Title", "body").unwrap();
        bad.title = String::new();
        assert!(repo.upsert_note(bad).is_err());
        assert_eq!(repo.list_notes().len(), 1);
    }

    #[test]
    fn test_delete_note() {
        let mut repo = setup();
        let note = repo.upsert_note(Note::new("Bye", "now").unwrap()).unwrap();

        repo.delete_note(&note.id).unwrap();
        assert!(repo.get_note(&note.id).is_none());

        // Deleting again is a lookup failure, not a crash
        assert!(matches!(
            repo.delete_note(&note.id),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_folder_crud() {
        let mut repo = setup();

        let folder = repo.create_folder("Work").unwrap();
        assert_eq!(repo.list_folders().len(), 1);
        assert_eq!(repo.folder_name(Some(&folder.id)), Some("Work"));

        repo.delete_folder(&folder.id).unwrap();
        assert!(repo.list_folders().is_empty());
        assert!(matches!(
            repo.delete_folder(&folder.id),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_folder_leaves_notes_dangling() {
        let mut repo = setup();

        let folder = repo.create_folder("Work").unwrap();
        let note = repo
            .upsert_note(
                Note::new("Standup", "notes")
                    .unwrap()
                    .with_folder(Some(folder.id.clone())),
            )
            .unwrap();

        repo.delete_folder(&folder.id).unwrap();

        let kept = repo.get_note(&note.id).unwrap();
        assert_eq!(kept.folder_id.as_ref(), Some(&folder.id));
        // Dangling reference renders as unfiled
        assert_eq!(repo.folder_name(kept.folder_id.as_ref()), None);
    }

    #[test]
    fn test_write_through_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nota.db");

        let note_id;
        {
            let store = SqliteKvStore::open(&path).unwrap();
            let mut repo = Repository::open(store).unwrap();
            let folder = repo.create_folder("Work").unwrap();
            let note = repo
                .upsert_note(
                    Note::new("Persisted", "body")
                        .unwrap()
                        .with_folder(Some(folder.id)),
                )
                .unwrap();
            note_id = note.id;
        }

        let store = SqliteKvStore::open(&path).unwrap();
        let repo = Repository::open(store).unwrap();
        assert_eq!(repo.list_notes().len(), 1);
        assert_eq!(repo.list_folders().len(), 1);
        assert!(repo.get_note(&note_id).is_some());
    }

    #[test]
    fn test_seed_sample_data_only_when_empty() {
        let mut repo = setup();

        assert!(repo.seed_sample_data().unwrap());
        assert_eq!(repo.list_folders().len(), 2);
        assert_eq!(repo.list_notes().len(), 2);

        assert!(!repo.seed_sample_data().unwrap());
        assert_eq!(repo.list_notes().len(), 2);
    }
}
