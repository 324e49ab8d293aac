//! Command registration

use std::collections::BTreeMap;

use crate::{Error, Result};

/// Command id that opens or closes the notes panel
pub const OPEN_NOTES_PANEL: &str = "code-notes.openNotesPanel";
/// Command id that attaches a note to the cursor line
pub const ADD_FILE_NOTE: &str = "code-notes.addFileNote";

/// Actions the host can run on behalf of a user trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    ToggleNotesPanel,
    AddFileNote,
}

/// Maps command ids to host actions
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    commands: BTreeMap<String, HostCommand>,
}

impl CommandRegistry {
    /// An empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with both built-in commands bound
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(OPEN_NOTES_PANEL, HostCommand::ToggleNotesPanel);
        registry.register(ADD_FILE_NOTE, HostCommand::AddFileNote);
        registry
    }

    pub fn register(&mut self, id: impl Into<String>, command: HostCommand) {
        self.commands.insert(id.into(), command);
    }

    pub fn resolve(&self, id: &str) -> Result<HostCommand> {
        self.commands
            .get(id)
            .copied()
            .ok_or_else(|| Error::UnknownCommand(id.to_string()))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }
}
