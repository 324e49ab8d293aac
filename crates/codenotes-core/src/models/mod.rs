//! Data models for Code Notes

mod checklist;
mod note;
mod snapshot;

pub use checklist::{ChecklistItem, ItemId};
pub use note::{FileAnchor, Note, NoteId};
pub use snapshot::{FileGroup, Snapshot};
