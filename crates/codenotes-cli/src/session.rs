//! One CLI invocation driving the host and its panel.

use std::path::Path;

use codenotes_core::host::{NotesHost, OPEN_NOTES_PANEL};
use codenotes_core::panel::{InputField, LocalPanelService, PanelAction, PanelRuntime, PanelView};
use codenotes_core::{Error, JsonFileStore, Snapshot};

use crate::error::CliError;
use crate::terminal::{TerminalEditor, TerminalPrompts};

pub type CliHost = NotesHost<JsonFileStore, LocalPanelService, TerminalEditor, TerminalPrompts>;

/// The host plus an open notes panel that the command operates as the user
pub struct Session {
    host: CliHost,
}

impl Session {
    pub fn open(store_path: &Path) -> Result<Self, CliError> {
        Self::open_with(store_path, TerminalEditor::new(), TerminalPrompts::new())
    }

    pub fn open_with(
        store_path: &Path,
        editor: TerminalEditor,
        prompts: TerminalPrompts,
    ) -> Result<Self, CliError> {
        let store = JsonFileStore::open(store_path)?;
        let mut host = NotesHost::new(store, LocalPanelService::new(), editor, prompts);
        host.run_command(OPEN_NOTES_PANEL)?;
        Ok(Self { host })
    }

    pub const fn host(&self) -> &CliHost {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut CliHost {
        &mut self.host
    }

    /// The panel's current view, after applying pushed updates
    pub fn view(&mut self) -> Result<PanelView, CliError> {
        let runtime = self.runtime_mut()?;
        runtime.sync_inbound();
        Ok(runtime.view())
    }

    pub fn snapshot(&mut self) -> Result<Snapshot, CliError> {
        let runtime = self.runtime_mut()?;
        runtime.sync_inbound();
        Ok(runtime.engine().snapshot().clone())
    }

    pub fn markup(&mut self) -> Result<String, CliError> {
        let runtime = self.runtime_mut()?;
        runtime.sync_inbound();
        Ok(runtime.markup())
    }

    /// Perform one panel interaction and let the host handle what it sent.
    ///
    /// An error the host showed to the user while handling it fails the
    /// command.
    pub fn dispatch(&mut self, action: PanelAction) -> Result<(), CliError> {
        let shown_before = self.host.prompts().errors().len();
        self.runtime_mut()?.dispatch(action)?;
        self.host.process_pending()?;

        match self.host.prompts().errors().get(shown_before) {
            Some(message) => Err(CliError::NavigationFailed(message.clone())),
            None => Ok(()),
        }
    }

    pub fn type_into(&mut self, field: InputField, text: String) -> Result<(), CliError> {
        self.dispatch(PanelAction::Input { field, text })
    }

    /// Close the panel as the user would and wait for the host to see it go
    pub async fn close(mut self) -> Result<(), CliError> {
        self.host.panels_mut().close_by_user();
        self.host.run_until_closed().await?;
        Ok(())
    }

    fn runtime_mut(&mut self) -> Result<&mut PanelRuntime, CliError> {
        self.host
            .panels_mut()
            .runtime_mut()
            .ok_or(CliError::Core(Error::PanelClosed))
    }
}
