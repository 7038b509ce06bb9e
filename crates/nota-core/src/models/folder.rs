//! Folder model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};

/// A unique identifier for a folder.
///
/// Same contract as note ids: v7-generated, any opaque non-empty string
/// accepted on load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderId(String);

impl FolderId {
    /// Create a new unique folder ID using UUID v7
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

impl Default for FolderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FolderId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput(
                "Folder ID cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A flat named grouping of notes; no nesting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique identifier
    pub id: FolderId,
    /// Folder name shown in the sidebar
    pub name: String,
    /// Creation timestamp (ISO-8601)
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Create a new folder with the given name
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Folder name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: FolderId::new(),
            name,
            created_at: Utc::now(),
        })
    }
}
