use std::path::Path;

use codenotes_core::panel::{EditTarget, PanelAction};
use codenotes_core::Note;

use crate::commands::common::{normalize_note_identifier, preferred_editor, resolve_target};
use crate::config::CliConfig;
use crate::error::CliError;
use crate::session::Session;
use crate::terminal::{TerminalEditor, TerminalPrompts};

pub async fn run_goto(
    id: &str,
    open: bool,
    config: &CliConfig,
    store_path: &Path,
) -> Result<(), CliError> {
    let normalized_id = normalize_note_identifier(id)?;
    let editor = if open {
        TerminalEditor::new().launching(preferred_editor(config))
    } else {
        TerminalEditor::new()
    };

    let mut session = Session::open_with(store_path, editor, TerminalPrompts::new())?;
    let snapshot = session.snapshot()?;
    let note_id = match resolve_target(&normalized_id, &snapshot)? {
        EditTarget::Note(note_id) if snapshot.note(note_id).is_some_and(Note::is_file_note) => note_id,
        _ => return Err(CliError::NotAFileNote(normalized_id)),
    };

    session.dispatch(PanelAction::GoToLine(note_id))?;

    let editor = session.host().editor();
    if let Some(error) = editor.launch_error() {
        return Err(CliError::EditorFailed(error.to_string()));
    }
    if !open {
        if let Some(location) = editor.last_location() {
            println!("{location}");
        }
    }
    session.close().await
}
