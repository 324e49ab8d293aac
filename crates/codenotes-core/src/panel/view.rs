//! Render-ready view of the panel: three regions plus input state.

use serde::Serialize;

use crate::models::{ItemId, NoteId};

/// One of the three independently rendered panel regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Region {
    PersonalNotes,
    FileNotes,
    Checklist,
}

impl Region {
    pub const ALL: [Self; 3] = [Self::PersonalNotes, Self::FileNotes, Self::Checklist];
    pub const NOTES: [Self; 2] = [Self::PersonalNotes, Self::FileNotes];
}

/// A row in either note region
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteRow {
    pub id: NoteId,
    pub text: String,
    /// Present for file notes only
    pub line: Option<u32>,
    /// Draft text while the row is in inline edit mode
    pub editing: Option<String>,
}

/// File notes sharing one file path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileGroupView {
    pub file: String,
    pub rows: Vec<NoteRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistRow {
    pub id: ItemId,
    pub text: String,
    pub checked: bool,
    pub editing: Option<String>,
}

/// Everything needed to draw the panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub personal_notes: Vec<NoteRow>,
    pub file_groups: Vec<FileGroupView>,
    pub checklist: Vec<ChecklistRow>,
    pub personal_input: String,
    pub checklist_input: String,
}
