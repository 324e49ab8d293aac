//! Messages exchanged between the notes panel and the host.
//!
//! Payloads are JSON objects tagged by a `command` field, so the same types
//! describe the in-process channel and any serialized transport.

use serde::{Deserialize, Serialize};

use crate::models::{ChecklistItem, Note, Snapshot};

/// Panel → host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelMessage {
    /// Overwrite the persisted collections
    SaveNotes {
        notes: Vec<Note>,
        checklist: Vec<ChecklistItem>,
    },
    /// Open `file` and move the caret to 1-based `line`
    ///
    /// Both fields stay loosely typed so a malformed request reaches the host
    /// and is reported to the user instead of being dropped as undecodable.
    GoToLine {
        #[serde(default)]
        file: Option<String>,
        #[serde(default)]
        line: Option<serde_json::Value>,
    },
    /// Append a file note to the persisted collection
    AddFileNote {
        text: String,
        file: String,
        line: u32,
    },
}

impl PanelMessage {
    /// A `saveNotes` message carrying the whole snapshot
    #[must_use]
    pub fn save(snapshot: &Snapshot) -> Self {
        Self::SaveNotes {
            notes: snapshot.notes.clone(),
            checklist: snapshot.checklist.clone(),
        }
    }

    /// A well-formed `goToLine` request
    #[must_use]
    pub fn go_to_line(file: impl Into<String>, line: u32) -> Self {
        Self::GoToLine {
            file: Some(file.into()),
            line: Some(line.into()),
        }
    }

    /// Wire name of the command, for logging
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::SaveNotes { .. } => "saveNotes",
            Self::GoToLine { .. } => "goToLine",
            Self::AddFileNote { .. } => "addFileNote",
        }
    }
}

/// Host → panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum HostMessage {
    /// Replace the panel's collections and re-render
    UpdateData {
        notes: Vec<Note>,
        checklist: Vec<ChecklistItem>,
    },
}

impl HostMessage {
    #[must_use]
    pub fn update(snapshot: &Snapshot) -> Self {
        Self::UpdateData {
            notes: snapshot.notes.clone(),
            checklist: snapshot.checklist.clone(),
        }
    }

    #[must_use]
    pub fn into_snapshot(self) -> Snapshot {
        match self {
            Self::UpdateData { notes, checklist } => Snapshot::new(notes, checklist),
        }
    }
}
