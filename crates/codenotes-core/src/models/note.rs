//! Note model

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A unique identifier for a note, using UUID v7 (time-sortable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteId(Uuid);

impl NoteId {
    /// Create a new unique note ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> String {
        self.0.to_string()
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
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A file path and 1-based line a note is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAnchor<'a> {
    pub file: &'a str,
    pub line: u32,
}

/// A note, either attached to a file line or free-standing
///
/// Records written without an `id` get a fresh one when deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier
    #[serde(default)]
    pub id: NoteId,
    /// Plain text content
    pub text: String,
    /// File path the note is attached to
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_file"
    )]
    pub file: Option<String>,
    /// 1-based line within `file`
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_line"
    )]
    pub line: Option<u32>,
}

/// A non-string `file` is treated as absent
fn lenient_file<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(file)) => Some(file),
        _ => None,
    })
}

/// A `line` that is not a non-negative integer fitting `u32` is treated as
/// absent, so the note renders as a personal note
fn lenient_line<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_u64)
        .and_then(|line| u32::try_from(line).ok()))
}

impl Note {
    /// Create a personal note with no file anchoring
    #[must_use]
    pub fn personal(text: impl Into<String>) -> Self {
        Self {
            id: NoteId::new(),
            text: text.into(),
            file: None,
            line: None,
        }
    }

    /// Create a note attached to `file` at 1-based `line`
    #[must_use]
    pub fn file_note(text: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            id: NoteId::new(),
            text: text.into(),
            file: Some(file.into()),
            line: Some(line),
        }
    }

    /// The file anchor, when both a non-empty file and a line are present
    #[must_use]
    pub fn anchor(&self) -> Option<FileAnchor<'_>> {
        let file = self.file.as_deref().filter(|file| !file.is_empty())?;
        let line = self.line?;
        Some(FileAnchor { file, line })
    }

    /// Whether this note renders in the file-grouped region
    #[must_use]
    pub fn is_file_note(&self) -> bool {
        self.anchor().is_some()
    }
}
