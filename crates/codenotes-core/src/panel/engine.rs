//! Panel state engine.
//!
//! Holds the panel's private copy of the snapshot plus view-only state (input
//! drafts and the inline edit session). Every user action goes through
//! [`PanelEngine::apply`], which reports the regions it re-rendered and the
//! message, if any, the host must receive. Mutations always produce a
//! `saveNotes` message carrying the complete snapshot.

use crate::models::{ChecklistItem, ItemId, Note, NoteId, Snapshot};
use crate::protocol::{HostMessage, PanelMessage};
use crate::util::normalize_text;

use super::view::{ChecklistRow, FileGroupView, NoteRow, PanelView, Region};

/// Which text input a keystroke goes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    NewPersonalNote,
    NewChecklistItem,
    /// The inline edit form of the row being edited
    Edit,
}

/// The record an inline edit applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTarget {
    Note(NoteId),
    ChecklistItem(ItemId),
}

impl EditTarget {
    const fn regions(self) -> &'static [Region] {
        match self {
            Self::Note(_) => &Region::NOTES,
            Self::ChecklistItem(_) => &[Region::Checklist],
        }
    }
}

/// A user interaction with the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelAction {
    /// Replace the contents of an input
    Input { field: InputField, text: String },
    /// "Add" under My Notes
    AddPersonalNote,
    /// "Add" under Checklist
    AddChecklistItem,
    StartEdit(EditTarget),
    SaveEdit,
    CancelEdit,
    DeleteNote(NoteId),
    DeleteChecklistItem(ItemId),
    /// Checkbox change
    SetChecked { id: ItemId, checked: bool },
    ClearCompleted,
    GoToLine(NoteId),
    /// Ask the host to append a file note on the panel's behalf
    RequestFileNote {
        text: String,
        file: String,
        line: u32,
    },
}

/// Result of applying one action or inbound message
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Applied {
    /// Regions redrawn in full, in render order
    pub rendered: Vec<Region>,
    /// Message to post to the host
    pub message: Option<PanelMessage>,
}

impl Applied {
    fn nothing() -> Self {
        Self::default()
    }

    fn render(regions: &[Region]) -> Self {
        Self {
            rendered: regions.to_vec(),
            message: None,
        }
    }

    fn send(message: PanelMessage) -> Self {
        Self {
            rendered: Vec::new(),
            message: Some(message),
        }
    }

    /// Whether the snapshot changed hands with the host
    #[must_use]
    pub const fn saves(&self) -> bool {
        matches!(self.message, Some(PanelMessage::SaveNotes { .. }))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EditSession {
    target: EditTarget,
    draft: String,
}

#[derive(Debug, Clone, Default)]
pub struct PanelEngine {
    snapshot: Snapshot,
    personal_input: String,
    checklist_input: String,
    edit: Option<EditSession>,
}

impl PanelEngine {
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The record currently in inline edit mode
    #[must_use]
    pub fn editing(&self) -> Option<EditTarget> {
        self.edit.as_ref().map(|session| session.target)
    }

    pub fn apply(&mut self, action: PanelAction) -> Applied {
        match action {
            PanelAction::Input { field, text } => {
                self.set_input(field, text);
                Applied::nothing()
            }
            PanelAction::AddPersonalNote => {
                let Some(text) = normalize_text(&self.personal_input) else {
                    return Applied::nothing();
                };
                self.snapshot.notes.push(Note::personal(text));
                self.personal_input.clear();
                self.commit(&Region::NOTES)
            }
            PanelAction::AddChecklistItem => {
                let Some(text) = normalize_text(&self.checklist_input) else {
                    return Applied::nothing();
                };
                self.snapshot.checklist.push(ChecklistItem::new(text));
                self.checklist_input.clear();
                self.commit(&[Region::Checklist])
            }
            PanelAction::StartEdit(target) => self.start_edit(target),
            PanelAction::SaveEdit => self.save_edit(),
            PanelAction::CancelEdit => match self.edit.take() {
                Some(session) => Applied::render(session.target.regions()),
                None => Applied::nothing(),
            },
            PanelAction::DeleteNote(id) => {
                if self.snapshot.remove_note(id).is_none() {
                    return Applied::nothing();
                }
                self.drop_edit_for(EditTarget::Note(id));
                self.commit(&Region::NOTES)
            }
            PanelAction::DeleteChecklistItem(id) => {
                if self.snapshot.remove_item(id).is_none() {
                    return Applied::nothing();
                }
                self.drop_edit_for(EditTarget::ChecklistItem(id));
                self.commit(&[Region::Checklist])
            }
            PanelAction::SetChecked { id, checked } => {
                let Some(item) = self.snapshot.item_mut(id) else {
                    return Applied::nothing();
                };
                item.checked = checked;
                self.commit(&[Region::Checklist])
            }
            PanelAction::ClearCompleted => {
                let removed = self.snapshot.clear_completed();
                tracing::debug!("Cleared {removed} completed checklist items");
                if let Some(target) = self.editing() {
                    if !self.contains(target) {
                        self.edit = None;
                    }
                }
                self.commit(&[Region::Checklist])
            }
            PanelAction::GoToLine(id) => {
                let Some(anchor) = self.snapshot.note(id).and_then(Note::anchor) else {
                    return Applied::nothing();
                };
                Applied::send(PanelMessage::go_to_line(anchor.file, anchor.line))
            }
            PanelAction::RequestFileNote { text, file, line } => {
                let Some(text) = normalize_text(&text) else {
                    return Applied::nothing();
                };
                if file.is_empty() {
                    return Applied::nothing();
                }
                Applied::send(PanelMessage::AddFileNote { text, file, line })
            }
        }
    }

    /// Apply a message pushed by the host.
    ///
    /// An edit in progress survives when its record is still present.
    pub fn receive(&mut self, message: HostMessage) -> Applied {
        self.snapshot = message.into_snapshot();
        if let Some(target) = self.editing() {
            if !self.contains(target) {
                tracing::debug!("Dropping edit of {target:?}: record no longer present");
                self.edit = None;
            }
        }
        Applied::render(&Region::ALL)
    }

    /// Build the render-ready view of all three regions
    #[must_use]
    pub fn view(&self) -> PanelView {
        let personal_notes = self
            .snapshot
            .personal_notes()
            .map(|note| self.note_row(note))
            .collect();

        let file_groups = self
            .snapshot
            .file_groups()
            .into_iter()
            .map(|group| FileGroupView {
                file: group.file.to_string(),
                rows: group.notes.iter().map(|note| self.note_row(note)).collect(),
            })
            .collect();

        let checklist = self
            .snapshot
            .checklist
            .iter()
            .map(|item| ChecklistRow {
                id: item.id,
                text: item.text.clone(),
                checked: item.checked,
                editing: self.draft_for(EditTarget::ChecklistItem(item.id)),
            })
            .collect();

        PanelView {
            personal_notes,
            file_groups,
            checklist,
            personal_input: self.personal_input.clone(),
            checklist_input: self.checklist_input.clone(),
        }
    }

    fn set_input(&mut self, field: InputField, text: String) {
        match field {
            InputField::NewPersonalNote => self.personal_input = text,
            InputField::NewChecklistItem => self.checklist_input = text,
            InputField::Edit => {
                if let Some(session) = self.edit.as_mut() {
                    session.draft = text;
                }
            }
        }
    }

    fn start_edit(&mut self, target: EditTarget) -> Applied {
        let current = match target {
            EditTarget::Note(id) => self.snapshot.note(id).map(|note| note.text.clone()),
            EditTarget::ChecklistItem(id) => self.snapshot.item(id).map(|item| item.text.clone()),
        };
        let Some(draft) = current else {
            return Applied::nothing();
        };

        let mut rendered = target.regions().to_vec();
        if let Some(previous) = self.edit.replace(EditSession { target, draft }) {
            for region in previous.target.regions() {
                if !rendered.contains(region) {
                    rendered.push(*region);
                }
            }
        }
        Applied {
            rendered,
            message: None,
        }
    }

    /// Commit the edit session. A blank draft leaves the text untouched, but
    /// the row still leaves edit mode and the snapshot is still saved.
    fn save_edit(&mut self) -> Applied {
        let Some(EditSession { target, draft }) = self.edit.take() else {
            return Applied::nothing();
        };

        if let Some(text) = normalize_text(&draft) {
            match target {
                EditTarget::Note(id) => {
                    if let Some(note) = self.snapshot.note_mut(id) {
                        note.text = text;
                    }
                }
                EditTarget::ChecklistItem(id) => {
                    if let Some(item) = self.snapshot.item_mut(id) {
                        item.text = text;
                    }
                }
            }
        }

        self.commit(target.regions())
    }

    fn commit(&self, regions: &[Region]) -> Applied {
        Applied {
            rendered: regions.to_vec(),
            message: Some(PanelMessage::save(&self.snapshot)),
        }
    }

    fn contains(&self, target: EditTarget) -> bool {
        match target {
            EditTarget::Note(id) => self.snapshot.note(id).is_some(),
            EditTarget::ChecklistItem(id) => self.snapshot.item(id).is_some(),
        }
    }

    fn drop_edit_for(&mut self, target: EditTarget) {
        if self.editing() == Some(target) {
            self.edit = None;
        }
    }

    fn draft_for(&self, target: EditTarget) -> Option<String> {
        self.edit
            .as_ref()
            .filter(|session| session.target == target)
            .map(|session| session.draft.clone())
    }

    fn note_row(&self, note: &Note) -> NoteRow {
        NoteRow {
            id: note.id,
            text: note.text.clone(),
            line: note.anchor().map(|anchor| anchor.line),
            editing: self.draft_for(EditTarget::Note(note.id)),
        }
    }
}
