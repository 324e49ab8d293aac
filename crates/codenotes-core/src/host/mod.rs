//! Editor-side controller and the host services it depends on.

mod commands;
mod controller;
pub mod services;

pub use commands::{CommandRegistry, HostCommand, ADD_FILE_NOTE, OPEN_NOTES_PANEL};
pub use controller::{
    NavigationTarget, NotesHost, PanelState, NO_ACTIVE_EDITOR_MESSAGE, UNSAVED_DOCUMENT_MESSAGE,
};
pub use services::{
    ActiveContext, EditorService, PanelService, PanelSpec, Position, PromptService, Range,
    ViewColumn,
};
