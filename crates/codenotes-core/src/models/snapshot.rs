//! Snapshot model: both collections, exchanged wholesale

use serde::{Deserialize, Serialize};

use super::{ChecklistItem, ItemId, Note, NoteId};

/// The full pair of collections persisted by the host and mirrored by the panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
}

/// File notes sharing one exact `file` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileGroup<'a> {
    pub file: &'a str,
    pub notes: Vec<&'a Note>,
}

impl Snapshot {
    #[must_use]
    pub const fn new(notes: Vec<Note>, checklist: Vec<ChecklistItem>) -> Self {
        Self { notes, checklist }
    }

    /// Notes that are not file notes, in collection order
    pub fn personal_notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter().filter(|note| !note.is_file_note())
    }

    /// File notes grouped by exact file string, groups in first-seen order
    #[must_use]
    pub fn file_groups(&self) -> Vec<FileGroup<'_>> {
        let mut groups: Vec<FileGroup<'_>> = Vec::new();
        for note in &self.notes {
            let Some(anchor) = note.anchor() else {
                continue;
            };
            match groups.iter_mut().find(|group| group.file == anchor.file) {
                Some(group) => group.notes.push(note),
                None => groups.push(FileGroup {
                    file: anchor.file,
                    notes: vec![note],
                }),
            }
        }
        groups
    }

    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn note_mut(&mut self, id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id == id)
    }

    /// Remove a note by id, keeping the order of the rest
    pub fn remove_note(&mut self, id: NoteId) -> Option<Note> {
        let index = self.notes.iter().position(|note| note.id == id)?;
        Some(self.notes.remove(index))
    }

    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&ChecklistItem> {
        self.checklist.iter().find(|item| item.id == id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut ChecklistItem> {
        self.checklist.iter_mut().find(|item| item.id == id)
    }

    /// Remove a checklist item by id, keeping the order of the rest
    pub fn remove_item(&mut self, id: ItemId) -> Option<ChecklistItem> {
        let index = self.checklist.iter().position(|item| item.id == id)?;
        Some(self.checklist.remove(index))
    }

    /// Drop every checked item; returns how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.checklist.len();
        self.checklist.retain(|item| !item.checked);
        before - self.checklist.len()
    }
}
