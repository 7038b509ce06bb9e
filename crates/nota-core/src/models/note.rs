//! Note model

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

use super::folder::FolderId;

/// A unique identifier for a note.
///
/// Freshly generated ids are UUID v7 strings (time-sortable); any opaque
/// non-empty string is accepted on load, so payloads written by older
/// clients (epoch-millis ids) keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("Note ID cannot be empty".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A note in the system
///
/// Serialized field names match the original web client's persisted payload
/// (`folderId`, `createdAt`, ...), so existing dumps load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: NoteId,
    /// Short title shown on cards
    pub title: String,
    /// Rich-text markup content
    pub content: String,
    /// Owning folder; `None` means unfiled. Dangling ids are tolerated and
    /// render as unfiled.
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    /// Inline data-URI JPEG produced by the crop pipeline
    #[serde(default)]
    pub image: Option<String>,
    /// Creation timestamp (ISO-8601)
    pub created_at: DateTime<Utc>,
    /// Last update timestamp (ISO-8601); never earlier than `created_at`
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new unfiled note, validating title and content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        let now = Utc::now();
        let note = Self {
            id: NoteId::new(),
            title: title.into().trim().to_string(),
            content: content.into().trim().to_string(),
            folder_id: None,
            image: None,
            created_at: now,
            updated_at: now,
        };
        note.validate()?;
        Ok(note)
    }

    /// Assign the note to a folder
    #[must_use]
    pub fn with_folder(mut self, folder_id: Option<FolderId>) -> Self {
        self.folder_id = folder_id;
        self
    }

    /// Check title and content against the save rules.
    ///
    /// Content whose markup-stripped plain text is empty counts as empty.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Note title cannot be empty".to_string(),
            ));
        }
        if strip_markup(&self.content).trim().is_empty() {
            return Err(Error::InvalidInput(
                "Note content cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Plain text with markup stripped, for search and emptiness checks
    #[must_use]
    pub fn plain_text(&self) -> String {
        strip_markup(&self.content)
    }
}

/// Strip markup tags from rich-text content.
///
/// # Examples
///
/// ```
/// use nota_core::models::strip_markup;
///
/// assert_eq!(strip_markup("Hello <b>world</b>"), "Hello world");
/// assert_eq!(strip_markup("<p><br></p>"), "");
/// ```
#[must_use]
pub fn strip_markup(text: &str) -> String {
    let re = Regex::new(r"<[^>]*>").expect("Invalid regex");
    re.replace_all(text, "").into_owned()
}
